//! Handle filtering/where clauses translation.

use query_engine_expression::expression::{
    BinaryOperator, Comparison, InvalidPredicate, Predicate, Test,
};
use query_engine_sql::sql;

use super::values;
use crate::translation::error::Error;
use crate::translation::helpers::{Env, State};

/// Translate a predicate to a boolean SQL expression.
///
/// Comparisons are visited depth first, left to right, so parameters and
/// joins appear in the order the predicate mentions them.
pub fn translate_expression(
    env: &Env,
    state: &mut State,
    predicate: &Predicate,
) -> Result<sql::ast::Expression, Error> {
    match predicate {
        Predicate::And(left, right) => {
            let left = translate_expression(env, state, left)?;
            let right = translate_expression(env, state, right)?;
            Ok(sql::helpers::and(left, right))
        }
        Predicate::Or(left, right) => {
            let left = translate_expression(env, state, left)?;
            let right = translate_expression(env, state, right)?;
            Ok(sql::helpers::or(left, right))
        }
        Predicate::Comparison(comparison) => translate_comparison(env, state, comparison),
    }
}

fn translate_comparison(
    env: &Env,
    state: &mut State,
    comparison: &Comparison,
) -> Result<sql::ast::Expression, Error> {
    let binding = env.lookup_property(&comparison.property)?;
    let column = state.column_of(env, binding);

    match &comparison.test {
        Test::Binary { operator, value } => {
            if *operator == BinaryOperator::Like && !binding.column.r#type.supports_pattern_matching()
            {
                return Err(InvalidPredicate::PatternOnNonText {
                    property: comparison.property.clone(),
                    column_type: binding.column.r#type.to_string(),
                }
                .into());
            }
            let param = values::translate_value(binding, value)?;
            Ok(sql::ast::Expression::BinaryOperation {
                left: Box::new(column),
                operator: translate_operator(*operator),
                right: Box::new(sql::ast::Expression::Parameter(param)),
            })
        }
        Test::In(values) => {
            let right = values
                .iter()
                .map(|value| {
                    values::translate_value(binding, value).map(sql::ast::Expression::Parameter)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(sql::ast::Expression::BinaryArrayOperation {
                left: Box::new(column),
                operator: sql::ast::BinaryArrayOperator::In,
                right,
            })
        }
        Test::IsNull => Ok(sql::ast::Expression::UnaryOperation {
            expression: Box::new(column),
            operator: sql::ast::UnaryOperator::IsNull,
        }),
        Test::IsNotNull => Ok(sql::ast::Expression::UnaryOperation {
            expression: Box::new(column),
            operator: sql::ast::UnaryOperator::IsNotNull,
        }),
    }
}

fn translate_operator(operator: BinaryOperator) -> sql::ast::BinaryOperator {
    match operator {
        BinaryOperator::Equals => sql::ast::BinaryOperator::Equals,
        BinaryOperator::NotEquals => sql::ast::BinaryOperator::NotEquals,
        BinaryOperator::GreaterThan => sql::ast::BinaryOperator::GreaterThan,
        BinaryOperator::LessThan => sql::ast::BinaryOperator::LessThan,
        BinaryOperator::GreaterOrEqual => sql::ast::BinaryOperator::GreaterThanOrEqualTo,
        BinaryOperator::LessOrEqual => sql::ast::BinaryOperator::LessThanOrEqualTo,
        BinaryOperator::Like => sql::ast::BinaryOperator::Like,
    }
}
