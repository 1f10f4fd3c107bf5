//! The query expression: predicate, ordering and window.

use std::num::NonZeroU64;
use std::sync::Arc;

use super::error::{Error, InvalidPredicate};
use super::predicate::{Comparison, Operand, Operator, Predicate};

/// Direction of a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, enum_iterator::Sequence)]
pub enum OrderDirection {
    Ascending,
    Descending,
}

/// Sort by a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub property: String,
    pub direction: OrderDirection,
}

/// A validated window of rows: skip `offset` rows, then return at most `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: NonZeroU64,
}

impl Window {
    pub fn new(offset: i64, limit: i64) -> Result<Window, InvalidPredicate> {
        let offset = u64::try_from(offset).map_err(|_| InvalidPredicate::NegativeOffset(offset))?;
        let limit = u64::try_from(limit)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or(InvalidPredicate::NonPositiveLimit(limit))?;
        Ok(Window { offset, limit })
    }
}

/// Which entities to fetch and in what order.
///
/// The default expression matches every row, in no particular order.
/// All operations return a new expression and leave `self` untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryExpression {
    predicate: Option<Arc<Predicate>>,
    order_by: Vec<SortKey>,
    window: Option<Window>,
}

impl QueryExpression {
    pub fn new() -> QueryExpression {
        QueryExpression::default()
    }

    /// `None` means match-all.
    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_deref()
    }

    pub fn sort_keys(&self) -> &[SortKey] {
        &self.order_by
    }

    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Add a comparison, ANDed with the current predicate.
    pub fn where_(
        &self,
        property: impl Into<String>,
        operator: Operator,
        operand: impl Into<Operand>,
    ) -> Result<QueryExpression, Error> {
        let comparison = Comparison::new(property, operator, operand)?;
        let filter = QueryExpression {
            predicate: Some(Arc::new(Predicate::Comparison(comparison))),
            ..QueryExpression::default()
        };
        Ok(self.and(&filter))
    }

    /// Both predicates must hold. A match-all side is ignored.
    ///
    /// Sort keys are concatenated, self's first; the window of `other`, if
    /// set, replaces self's.
    pub fn and(&self, other: &QueryExpression) -> QueryExpression {
        let predicate = match (&self.predicate, &other.predicate) {
            (None, predicate) | (predicate, None) => predicate.clone(),
            (Some(left), Some(right)) => Some(Arc::new(Predicate::And(
                Arc::clone(left),
                Arc::clone(right),
            ))),
        };
        self.merged(other, predicate)
    }

    /// Either predicate must hold. A match-all side matches everything.
    ///
    /// Sort keys and windows merge as in [`QueryExpression::and`].
    pub fn or(&self, other: &QueryExpression) -> QueryExpression {
        let predicate = match (&self.predicate, &other.predicate) {
            (None, _) | (_, None) => None,
            (Some(left), Some(right)) => Some(Arc::new(Predicate::Or(
                Arc::clone(left),
                Arc::clone(right),
            ))),
        };
        self.merged(other, predicate)
    }

    fn merged(&self, other: &QueryExpression, predicate: Option<Arc<Predicate>>) -> QueryExpression {
        QueryExpression {
            predicate,
            order_by: self
                .order_by
                .iter()
                .chain(other.order_by.iter())
                .cloned()
                .collect(),
            window: other.window.or(self.window),
        }
    }

    /// Append a sort key. Rows equal on every key come back in no particular order.
    pub fn order_by(&self, property: impl Into<String>, direction: OrderDirection) -> QueryExpression {
        let mut order_by = self.order_by.clone();
        order_by.push(SortKey {
            property: property.into(),
            direction,
        });
        QueryExpression {
            predicate: self.predicate.clone(),
            order_by,
            window: self.window,
        }
    }

    /// Restrict the result to a window. A later call replaces the window.
    pub fn page(&self, offset: i64, limit: i64) -> Result<QueryExpression, Error> {
        let window = Window::new(offset, limit)?;
        Ok(QueryExpression {
            predicate: self.predicate.clone(),
            order_by: self.order_by.clone(),
            window: Some(window),
        })
    }

    /// Every property the expression refers to: predicate comparisons depth
    /// first, then sort keys. Duplicates are kept.
    pub fn referenced_properties(&self) -> Vec<&str> {
        let mut properties: Vec<&str> = self
            .predicate
            .iter()
            .flat_map(|predicate| predicate.comparisons())
            .map(|comparison| comparison.property.as_str())
            .collect();
        properties.extend(self.order_by.iter().map(|key| key.property.as_str()));
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn email_is(email: &str) -> QueryExpression {
        QueryExpression::new()
            .where_("email", Operator::Equals, email)
            .unwrap()
    }

    #[test]
    fn composition_leaves_operands_untouched() {
        let left = email_is("a@b.com");
        let right = email_is("c@d.com").order_by("email", OrderDirection::Descending);
        let left_before = left.clone();
        let right_before = right.clone();

        let combined = left.or(&right).page(0, 25).unwrap();

        assert_eq!(left, left_before);
        assert_eq!(right, right_before);
        assert!(matches!(combined.predicate(), Some(Predicate::Or(_, _))));
        assert_eq!(combined.sort_keys().len(), 1);
        assert_eq!(left.window(), None);
    }

    #[test]
    fn where_ands_with_the_existing_predicate() {
        let expression = email_is("a@b.com")
            .where_("note", Operator::Like, "%vip%")
            .unwrap();
        match expression.predicate() {
            Some(Predicate::And(left, right)) => {
                assert!(matches!(**left, Predicate::Comparison(_)));
                assert!(matches!(**right, Predicate::Comparison(_)));
            }
            other => panic!("expected an AND, got {other:?}"),
        }
    }

    #[test]
    fn match_all_is_identity_for_and_and_absorbing_for_or() {
        let all = QueryExpression::new();
        let filter = email_is("a@b.com");

        assert_eq!(all.and(&filter), filter);
        assert_eq!(filter.and(&all), filter);
        assert_eq!(all.or(&filter).predicate(), None);
        assert_eq!(filter.or(&all).predicate(), None);
    }

    #[test]
    fn sort_keys_concatenate_and_windows_take_the_other_side() {
        let left = QueryExpression::new()
            .order_by("email", OrderDirection::Ascending)
            .page(10, 10)
            .unwrap();
        let right = QueryExpression::new().order_by("key", OrderDirection::Descending);

        let combined = left.and(&right);
        let properties: Vec<&str> = combined
            .sort_keys()
            .iter()
            .map(|key| key.property.as_str())
            .collect();
        assert_eq!(properties, vec!["email", "key"]);
        assert_eq!(combined.window(), left.window());

        let windowed = right.page(0, 5).unwrap();
        assert_eq!(left.and(&windowed).window(), windowed.window());
    }

    #[test]
    fn page_validates_its_arguments() {
        let expression = QueryExpression::new();
        assert_eq!(
            expression.page(-1, 10),
            Err(Error::InvalidPredicate(InvalidPredicate::NegativeOffset(-1)))
        );
        assert_eq!(
            expression.page(0, 0),
            Err(Error::InvalidPredicate(InvalidPredicate::NonPositiveLimit(0)))
        );
        assert_eq!(
            expression.page(0, -3),
            Err(Error::InvalidPredicate(InvalidPredicate::NonPositiveLimit(-3)))
        );
        let paged = expression.page(0, 25).unwrap();
        assert_eq!(paged.window().map(|w| (w.offset, w.limit.get())), Some((0, 25)));
    }

    #[test]
    fn page_twice_keeps_the_last_window() {
        let expression = QueryExpression::new()
            .page(0, 25)
            .unwrap()
            .page(50, 10)
            .unwrap();
        assert_eq!(
            expression.window().map(|w| (w.offset, w.limit.get())),
            Some((50, 10))
        );
    }

    #[test]
    fn referenced_properties_list_predicate_then_sort_keys() {
        let expression = email_is("a@b.com")
            .where_("note", Operator::IsNotNull, ())
            .unwrap()
            .order_by("email", OrderDirection::Ascending);
        assert_eq!(
            expression.referenced_properties(),
            vec!["email", "note", "email"]
        );
    }
}
