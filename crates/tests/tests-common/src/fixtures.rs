//! The storefront entity mappings used by the test suites.
//!
//! `static/storefront/configuration.json` describes the same mappings.

use query_engine_metadata::metadata::*;

pub const CUSTOMER: &str = "Customer";
pub const CUSTOMER_ADDRESS: &str = "CustomerAddress";
pub const INVOICE: &str = "Invoice";

fn table(schema_name: Option<&str>, table_name: &str) -> TableInfo {
    TableInfo {
        schema_name: schema_name.map(String::from),
        table_name: table_name.to_string(),
    }
}

fn column(name: &str, r#type: ScalarType, nullable: Nullable) -> ColumnInfo {
    ColumnInfo {
        name: name.to_string(),
        r#type,
        nullable,
    }
}

fn property(name: &str, column: ColumnInfo) -> PropertyInfo {
    PropertyInfo {
        name: name.to_string(),
        extension_table: None,
        column,
        converter: ValueConverter::Identity,
    }
}

fn extension_property(
    name: &str,
    extension_table: &str,
    column: ColumnInfo,
    converter: ValueConverter,
) -> PropertyInfo {
    PropertyInfo {
        name: name.to_string(),
        extension_table: Some(extension_table.to_string()),
        column,
        converter,
    }
}

/// Customers keep notes and preferences in extension tables.
pub fn customer() -> EntityInfo {
    EntityInfo {
        primary_table: table(None, "customers"),
        primary_key: "key".to_string(),
        extension_tables: vec![
            ExtensionTableInfo {
                table: table(None, "customer_notes"),
                join_column: "customer_key".to_string(),
            },
            ExtensionTableInfo {
                table: table(None, "customer_preferences"),
                join_column: "customer_key".to_string(),
            },
        ],
        properties: vec![
            property("key", column("key", ScalarType::Uuid, Nullable::NonNullable)),
            property(
                "email",
                column("email", ScalarType::Text, Nullable::NonNullable),
            ),
            extension_property(
                "note",
                "customer_notes",
                column("note", ScalarType::Text, Nullable::Nullable),
                ValueConverter::Identity,
            ),
            extension_property(
                "newsletter",
                "customer_preferences",
                column("newsletter", ScalarType::Integer, Nullable::NonNullable),
                ValueConverter::BooleanAsInteger,
            ),
        ],
    }
}

/// Addresses live in a single table; the address type is stored as its discriminant.
pub fn customer_address() -> EntityInfo {
    EntityInfo {
        primary_table: table(None, "customer_addresses"),
        primary_key: "key".to_string(),
        extension_tables: vec![],
        properties: vec![
            property("key", column("key", ScalarType::Uuid, Nullable::NonNullable)),
            property(
                "customerKey",
                column("customer_key", ScalarType::Uuid, Nullable::NonNullable),
            ),
            PropertyInfo {
                name: "addressType".to_string(),
                extension_table: None,
                column: column("address_type", ScalarType::Smallint, Nullable::NonNullable),
                converter: ValueConverter::EnumAsInteger,
            },
            property(
                "isDefault",
                column("is_default", ScalarType::Boolean, Nullable::NonNullable),
            ),
            property(
                "fullName",
                column("full_name", ScalarType::Text, Nullable::Nullable),
            ),
            property(
                "address1",
                column("address1", ScalarType::Text, Nullable::Nullable),
            ),
            property(
                "address2",
                column("address2", ScalarType::Text, Nullable::Nullable),
            ),
            property(
                "locality",
                column("locality", ScalarType::Text, Nullable::Nullable),
            ),
            property(
                "region",
                column("region", ScalarType::Text, Nullable::Nullable),
            ),
            property(
                "postalCode",
                column("postal_code", ScalarType::Text, Nullable::Nullable),
            ),
            property(
                "countryCode",
                column("country_code", ScalarType::Text, Nullable::Nullable),
            ),
            property(
                "phone",
                column("phone", ScalarType::Text, Nullable::Nullable),
            ),
        ],
    }
}

/// Invoices live in the `billing` schema with payment flags in an extension table.
pub fn invoice() -> EntityInfo {
    EntityInfo {
        primary_table: table(Some("billing"), "invoices"),
        primary_key: "key".to_string(),
        extension_tables: vec![ExtensionTableInfo {
            table: table(Some("billing"), "invoice_flags"),
            join_column: "invoice_key".to_string(),
        }],
        properties: vec![
            property("key", column("key", ScalarType::Uuid, Nullable::NonNullable)),
            property(
                "invoiceNumber",
                column("invoice_number", ScalarType::Text, Nullable::NonNullable),
            ),
            PropertyInfo {
                name: "status".to_string(),
                extension_table: None,
                column: column("status", ScalarType::Text, Nullable::NonNullable),
                converter: ValueConverter::EnumAsText,
            },
            property(
                "total",
                column("total", ScalarType::Numeric, Nullable::NonNullable),
            ),
            property(
                "invoiceDate",
                column("invoice_date", ScalarType::Timestamp, Nullable::NonNullable),
            ),
            extension_property(
                "paid",
                "invoice_flags",
                column("paid", ScalarType::Smallint, Nullable::NonNullable),
                ValueConverter::BooleanAsInteger,
            ),
        ],
    }
}

/// All storefront entities.
pub fn storefront_metadata() -> Metadata {
    Metadata {
        entities: EntitiesInfo(
            [
                (CUSTOMER.to_string(), customer()),
                (CUSTOMER_ADDRESS.to_string(), customer_address()),
                (INVOICE.to_string(), invoice()),
            ]
            .into_iter()
            .collect(),
        ),
    }
}

/// Only the customer entity, used where a second entity family is registered separately.
pub fn customer_metadata() -> Metadata {
    Metadata {
        entities: EntitiesInfo([(CUSTOMER.to_string(), customer())].into_iter().collect()),
    }
}

/// Only the invoice entity.
pub fn invoice_metadata() -> Metadata {
    Metadata {
        entities: EntitiesInfo([(INVOICE.to_string(), invoice())].into_iter().collect()),
    }
}

/// A registry of every storefront entity.
pub fn storefront_registry() -> EntityRegistry {
    match EntityRegistry::new(&storefront_metadata()) {
        Ok(registry) => registry,
        Err(err) => panic!("storefront fixtures do not register: {err}"),
    }
}
