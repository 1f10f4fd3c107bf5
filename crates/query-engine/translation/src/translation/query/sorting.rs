//! Convert the sort keys of an expression to a SQL ORDER BY clause.

use query_engine_expression::expression::{OrderDirection, SortKey};
use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::{Env, State};

/// Sort keys referring to extension table columns join those tables through `state`.
pub fn translate_order_by(
    env: &Env,
    state: &mut State,
    sort_keys: &[SortKey],
) -> Result<sql::ast::OrderBy, Error> {
    let elements = sort_keys
        .iter()
        .map(|key| {
            let binding = env.lookup_property(&key.property)?;
            Ok(sql::ast::OrderByElement {
                target: state.column_of(env, binding),
                direction: match key.direction {
                    OrderDirection::Ascending => sql::ast::OrderByDirection::Asc,
                    OrderDirection::Descending => sql::ast::OrderByDirection::Desc,
                },
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(sql::ast::OrderBy { elements })
}
