//! Handle the translation of compared values into typed parameters.

use query_engine_expression::expression::{InvalidPredicate, Value};
use query_engine_metadata::metadata::database::{ScalarType, ValueConverter};
use query_engine_metadata::metadata::PropertyBinding;
use query_engine_sql::sql;

/// Convert an in-memory value into the parameter stored in the column of `binding`.
pub fn translate_value(
    binding: &PropertyBinding,
    value: &Value,
) -> Result<sql::string::Param, InvalidPredicate> {
    let scalar_type = binding.column.r#type;
    let unconvertible = || InvalidPredicate::Unconvertible {
        property: binding.property.clone(),
        kind: value.kind(),
        value: value.to_string(),
        column_type: scalar_type.to_string(),
        converter: binding.converter.to_string(),
    };

    let storage_value = match binding.converter {
        ValueConverter::Identity => match value {
            // booleans
            Value::Bool(b) => match scalar_type {
                ScalarType::Boolean => Some(sql::string::Value::Bool(*b)),
                _ => None,
            },

            // integers, range checked against the column
            Value::Integer(i) => match scalar_type {
                ScalarType::Smallint | ScalarType::Integer | ScalarType::Bigint => {
                    integral(*i, scalar_type)
                }
                _ if scalar_type.is_floating() => exact_float(*i, scalar_type),
                ScalarType::Numeric => Some(sql::string::Value::Numeric(i.to_string())),
                _ => None,
            },

            // floats
            Value::Float(x) if x.is_finite() => match scalar_type {
                ScalarType::Real if x.abs() > f64::from(f32::MAX) => None,
                _ if scalar_type.is_floating() => Some(sql::string::Value::Float8(*x)),
                ScalarType::Numeric => Some(sql::string::Value::Numeric(x.to_string())),
                _ => None,
            },
            Value::Float(_) => None,

            // decimals
            Value::Decimal(d) => match scalar_type {
                ScalarType::Numeric if is_decimal(d) => {
                    Some(sql::string::Value::Numeric(d.clone()))
                }
                _ => None,
            },

            // strings, timestamps travel as ISO-8601 text
            Value::Text(s) => match scalar_type {
                ScalarType::Text => Some(sql::string::Value::String(s.clone())),
                ScalarType::Timestamp if is_timestamp(s) => {
                    Some(sql::string::Value::String(s.clone()))
                }
                _ => None,
            },

            // uuid
            Value::Uuid(u) => match scalar_type {
                ScalarType::Uuid => Some(sql::string::Value::Uuid(*u)),
                _ => None,
            },

            Value::Enum(_) => None,
        },

        ValueConverter::EnumAsInteger => match value {
            Value::Enum(e) if scalar_type.is_integral() => integral(e.discriminant, scalar_type),
            _ => None,
        },

        ValueConverter::EnumAsText => match (value, scalar_type) {
            (Value::Enum(e), ScalarType::Text) => Some(sql::string::Value::String(e.variant.clone())),
            _ => None,
        },

        ValueConverter::UuidAsText => match (value, scalar_type) {
            (Value::Uuid(u), ScalarType::Text) => Some(sql::string::Value::String(
                u.hyphenated().to_string(),
            )),
            _ => None,
        },

        ValueConverter::BooleanAsInteger => match value {
            Value::Bool(b) if scalar_type.is_integral() => {
                Some(sql::string::Value::Int8(i64::from(*b)))
            }
            _ => None,
        },
    };

    let value = storage_value.ok_or_else(unconvertible)?;
    Ok(sql::string::Param {
        value,
        r#type: translate_scalar_type(scalar_type),
    })
}

/// An integer within the range of an integral column type.
fn integral(i: i64, scalar_type: ScalarType) -> Option<sql::string::Value> {
    let fits = match scalar_type {
        ScalarType::Smallint => i16::try_from(i).is_ok(),
        ScalarType::Integer => i32::try_from(i).is_ok(),
        ScalarType::Bigint => true,
        _ => false,
    };
    fits.then_some(sql::string::Value::Int8(i))
}

/// An integer stored in a floating point column, only when it is represented exactly.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::float_cmp
)]
fn exact_float(i: i64, scalar_type: ScalarType) -> Option<sql::string::Value> {
    let x = i as f64;
    // 2^63 saturates back to i64::MAX, so it is excluded explicitly
    let exact = x < 9_223_372_036_854_775_808.0 && x as i64 == i;
    let fits = match scalar_type {
        ScalarType::Real => exact && f64::from(x as f32) == x,
        _ => exact,
    };
    fits.then_some(sql::string::Value::Float8(x))
}

/// RFC 3339 with an offset, or a local `YYYY-MM-DDTHH:MM:SS[.fff]`.
fn is_timestamp(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
        || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}

/// `-?[0-9]+(\.[0-9]+)?`
fn is_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    digits(whole) && fraction.map_or(true, digits)
}

/// The declared type of a parameter bound to a column of this type.
pub fn translate_scalar_type(scalar_type: ScalarType) -> sql::ast::ScalarType {
    match scalar_type {
        ScalarType::Boolean => sql::ast::ScalarType::Boolean,
        ScalarType::Smallint => sql::ast::ScalarType::Smallint,
        ScalarType::Integer => sql::ast::ScalarType::Integer,
        ScalarType::Bigint => sql::ast::ScalarType::Bigint,
        ScalarType::Real => sql::ast::ScalarType::Real,
        ScalarType::DoublePrecision => sql::ast::ScalarType::DoublePrecision,
        ScalarType::Numeric => sql::ast::ScalarType::Numeric,
        ScalarType::Text => sql::ast::ScalarType::Text,
        ScalarType::Uuid => sql::ast::ScalarType::Uuid,
        ScalarType::Timestamp => sql::ast::ScalarType::Timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_expression::expression::EnumValue;
    use query_engine_metadata::metadata::{ColumnInfo, Nullable, TableDescriptor};
    use similar_asserts::assert_eq;

    fn binding(r#type: ScalarType, converter: ValueConverter) -> PropertyBinding {
        PropertyBinding {
            property: "field".to_string(),
            table: TableDescriptor {
                schema: None,
                name: "table".to_string(),
            },
            column: ColumnInfo {
                name: "field".to_string(),
                r#type,
                nullable: Nullable::Nullable,
            },
            converter,
            join_column: None,
        }
    }

    fn stored(
        r#type: ScalarType,
        converter: ValueConverter,
        value: Value,
    ) -> Option<sql::string::Value> {
        translate_value(&binding(r#type, converter), &value)
            .ok()
            .map(|param| param.value)
    }

    #[test]
    fn identity_requires_matching_kinds() {
        assert_eq!(
            stored(ScalarType::Boolean, ValueConverter::Identity, Value::Bool(true)),
            Some(sql::string::Value::Bool(true))
        );
        assert_eq!(
            stored(ScalarType::Text, ValueConverter::Identity, Value::Integer(3)),
            None
        );
        assert_eq!(
            stored(
                ScalarType::Numeric,
                ValueConverter::Identity,
                Value::Decimal("12.50".to_string())
            ),
            Some(sql::string::Value::Numeric("12.50".to_string()))
        );
        assert_eq!(
            stored(
                ScalarType::Numeric,
                ValueConverter::Identity,
                Value::Decimal("12,50".to_string())
            ),
            None
        );
        assert_eq!(
            stored(
                ScalarType::Timestamp,
                ValueConverter::Identity,
                Value::Text("2024-01-31T10:00:00Z".to_string())
            ),
            Some(sql::string::Value::String("2024-01-31T10:00:00Z".to_string()))
        );
        assert_eq!(
            stored(ScalarType::Real, ValueConverter::Identity, Value::Float(f64::NAN)),
            None
        );
    }

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(
            stored(ScalarType::Smallint, ValueConverter::Identity, Value::Integer(40_000)),
            None
        );
        assert_eq!(
            stored(ScalarType::Integer, ValueConverter::Identity, Value::Integer(40_000)),
            Some(sql::string::Value::Int8(40_000))
        );
    }

    #[test]
    fn integers_in_float_columns_must_be_exact() {
        assert_eq!(
            stored(
                ScalarType::DoublePrecision,
                ValueConverter::Identity,
                Value::Integer(9_007_199_254_740_992)
            ),
            Some(sql::string::Value::Float8(9_007_199_254_740_992.0))
        );
        assert_eq!(
            stored(
                ScalarType::DoublePrecision,
                ValueConverter::Identity,
                Value::Integer(9_007_199_254_740_993)
            ),
            None
        );
        assert_eq!(
            stored(ScalarType::DoublePrecision, ValueConverter::Identity, Value::Integer(i64::MAX)),
            None
        );
        assert_eq!(
            stored(ScalarType::Real, ValueConverter::Identity, Value::Integer(16_777_217)),
            None
        );
        assert_eq!(
            stored(ScalarType::Real, ValueConverter::Identity, Value::Integer(-12)),
            Some(sql::string::Value::Float8(-12.0))
        );
    }

    #[test]
    fn floats_are_range_checked_for_real_columns() {
        assert_eq!(
            stored(ScalarType::Real, ValueConverter::Identity, Value::Float(1e300)),
            None
        );
        assert_eq!(
            stored(ScalarType::Real, ValueConverter::Identity, Value::Float(-1e39)),
            None
        );
        assert_eq!(
            stored(ScalarType::Real, ValueConverter::Identity, Value::Float(2.5)),
            Some(sql::string::Value::Float8(2.5))
        );
        assert_eq!(
            stored(ScalarType::DoublePrecision, ValueConverter::Identity, Value::Float(1e300)),
            Some(sql::string::Value::Float8(1e300))
        );
    }

    #[test]
    fn timestamps_are_parsed_before_binding() {
        for text in [
            "2024-01-31T10:00:00Z",
            "2024-01-31T10:00:00+02:00",
            "2024-01-31T10:00:00.250",
        ] {
            assert_eq!(
                stored(ScalarType::Timestamp, ValueConverter::Identity, Value::Text(text.to_string())),
                Some(sql::string::Value::String(text.to_string())),
                "{text}"
            );
        }
        for text in ["definitely not a date", "2024-13-01T00:00:00Z", "2024-01-31"] {
            assert_eq!(
                stored(ScalarType::Timestamp, ValueConverter::Identity, Value::Text(text.to_string())),
                None,
                "{text}"
            );
        }
    }

    #[test]
    fn converters_change_the_storage_representation() {
        let shipping = Value::Enum(EnumValue::new("AddressType", "Shipping", 1));
        assert_eq!(
            stored(ScalarType::Smallint, ValueConverter::EnumAsInteger, shipping.clone()),
            Some(sql::string::Value::Int8(1))
        );
        assert_eq!(
            stored(ScalarType::Text, ValueConverter::EnumAsText, shipping.clone()),
            Some(sql::string::Value::String("Shipping".to_string()))
        );
        assert_eq!(
            stored(ScalarType::Integer, ValueConverter::EnumAsText, shipping),
            None
        );
        assert_eq!(
            stored(ScalarType::Integer, ValueConverter::BooleanAsInteger, Value::Bool(true)),
            Some(sql::string::Value::Int8(1))
        );
        let key = uuid::Uuid::from_u128(0x1234);
        assert_eq!(
            stored(ScalarType::Text, ValueConverter::UuidAsText, Value::Uuid(key)),
            Some(sql::string::Value::String(
                "00000000-0000-0000-0000-000000001234".to_string()
            ))
        );
    }

    #[test]
    fn unconvertible_values_name_the_property_and_column() {
        let error = translate_value(
            &binding(ScalarType::Uuid, ValueConverter::Identity),
            &Value::Text("nope".to_string()),
        )
        .unwrap_err();
        assert_eq!(
            error,
            InvalidPredicate::Unconvertible {
                property: "field".to_string(),
                kind: "text",
                value: "\"nope\"".to_string(),
                column_type: "uuid".to_string(),
                converter: "identity".to_string(),
            }
        );
    }

    #[test]
    fn parameters_carry_the_column_type() {
        let param = translate_value(
            &binding(ScalarType::Bigint, ValueConverter::Identity),
            &Value::Integer(7),
        )
        .unwrap();
        assert_eq!(param.r#type, sql::ast::ScalarType::Bigint);
    }
}
