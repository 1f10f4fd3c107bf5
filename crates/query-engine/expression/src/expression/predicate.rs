//! Predicates over entity properties.

use std::fmt;
use std::sync::Arc;

use enum_iterator::Sequence;
use nonempty::NonEmpty;

use super::error::InvalidPredicate;
use super::values::Value;

/// The comparison operators a predicate may use. There is no negation and no
/// raw SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Like,
    In,
    IsNull,
    IsNotNull,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::GreaterThan => "greaterThan",
            Operator::LessThan => "lessThan",
            Operator::GreaterOrEqual => "greaterOrEqual",
            Operator::LessOrEqual => "lessOrEqual",
            Operator::Like => "like",
            Operator::In => "in",
            Operator::IsNull => "isNull",
            Operator::IsNotNull => "isNotNull",
        };
        write!(f, "{name}")
    }
}

/// Operators comparing a property with a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Like,
}

impl Operator {
    fn binary(self) -> Option<BinaryOperator> {
        match self {
            Operator::Equals => Some(BinaryOperator::Equals),
            Operator::NotEquals => Some(BinaryOperator::NotEquals),
            Operator::GreaterThan => Some(BinaryOperator::GreaterThan),
            Operator::LessThan => Some(BinaryOperator::LessThan),
            Operator::GreaterOrEqual => Some(BinaryOperator::GreaterOrEqual),
            Operator::LessOrEqual => Some(BinaryOperator::LessOrEqual),
            Operator::Like => Some(BinaryOperator::Like),
            Operator::In | Operator::IsNull | Operator::IsNotNull => None,
        }
    }

    /// What the operator expects on its right hand side.
    fn expected_operand(self) -> &'static str {
        match self {
            Operator::In => "a set of values",
            Operator::IsNull | Operator::IsNotNull => "no operand",
            _ => "a single value",
        }
    }
}

/// The right hand side of a comparison, as the caller supplied it.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    None,
    Value(Value),
    Set(Vec<Value>),
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Operand::Set(values.into_iter().map(Into::into).collect())
    }
}

impl From<()> for Operand {
    fn from((): ()) -> Self {
        Operand::None
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Operand::Value(value.into())
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Value(value.into())
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Value(value.into())
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Value(value.into())
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Value(value.into())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Value(value.into())
    }
}

impl From<uuid::Uuid> for Operand {
    fn from(value: uuid::Uuid) -> Self {
        Operand::Value(value.into())
    }
}

impl From<super::values::EnumValue> for Operand {
    fn from(value: super::values::EnumValue) -> Self {
        Operand::Value(value.into())
    }
}

/// The test applied to a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Test {
    Binary {
        operator: BinaryOperator,
        value: Value,
    },
    In(NonEmpty<Value>),
    IsNull,
    IsNotNull,
}

/// A single test on one property.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub property: String,
    pub test: Test,
}

impl Comparison {
    /// Check that the operand fits the operator and build the comparison.
    pub fn new(
        property: impl Into<String>,
        operator: Operator,
        operand: impl Into<Operand>,
    ) -> Result<Comparison, InvalidPredicate> {
        let property = property.into();
        let mismatch = |property: String| InvalidPredicate::OperandMismatch {
            property,
            operator: operator.to_string(),
            expected: operator.expected_operand(),
        };
        let test = match (operator, operand.into()) {
            (Operator::In, Operand::Set(values)) => match NonEmpty::from_vec(values) {
                Some(values) => Test::In(values),
                None => return Err(InvalidPredicate::EmptyInList { property }),
            },
            (Operator::IsNull, Operand::None) => Test::IsNull,
            (Operator::IsNotNull, Operand::None) => Test::IsNotNull,
            (operator, Operand::Value(value)) => match operator.binary() {
                Some(operator) => Test::Binary { operator, value },
                None => return Err(mismatch(property)),
            },
            _ => return Err(mismatch(property)),
        };
        Ok(Comparison { property, test })
    }
}

/// A tree of comparisons. Subtrees are shared between expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Comparison(Comparison),
    And(Arc<Predicate>, Arc<Predicate>),
    Or(Arc<Predicate>, Arc<Predicate>),
}

impl Predicate {
    /// The comparisons of this predicate, depth first and left to right.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut comparisons = vec![];
        self.collect_comparisons(&mut comparisons);
        comparisons
    }

    fn collect_comparisons<'a>(&'a self, comparisons: &mut Vec<&'a Comparison>) {
        match self {
            Predicate::Comparison(comparison) => comparisons.push(comparison),
            Predicate::And(left, right) | Predicate::Or(left, right) => {
                left.collect_comparisons(comparisons);
                right.collect_comparisons(comparisons);
            }
        }
    }
}
