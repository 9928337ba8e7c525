//! Entity trait: identity + continuity across state changes.

/// A persisted record with a store-assigned identity and a user-facing key.
///
/// Two entities with the same `id()` are the same record even when every other
/// attribute (including the business key) has been edited.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Human-assigned key shown to users (e.g. a part number).
    fn business_key(&self) -> &str;
}
