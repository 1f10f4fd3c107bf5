//! Domain types with a registered storage mapping.

/// A domain type that can be queried.
///
/// `NAME` is the name the entity is registered under in the mapping metadata.
pub trait Entity {
    const NAME: &'static str;
}
