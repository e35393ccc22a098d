//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity is assigned by the store on first save, so a freshly built entity
/// may not carry one yet (it is *transient*).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if the entity has been stored.
    fn id(&self) -> Option<Self::Id>;

    /// Stamp the store-assigned identifier onto the entity.
    fn assign_id(&mut self, id: Self::Id);

    fn is_transient(&self) -> bool {
        self.id().is_none()
    }
}
