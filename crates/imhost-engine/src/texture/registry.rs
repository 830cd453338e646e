use std::collections::HashMap;
use std::hash::Hash;

/// Opaque texture handle as carried by GUI draw commands.
///
/// `0` is reserved for "no texture" and is never issued by a registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextureId(pub usize);

impl TextureId {
    pub const NONE: TextureId = TextureId(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

/// Bidirectional map between `TextureId` handles and host texture resources.
///
/// Handles are issued sequentially starting at 1. Registering the same resource twice
/// returns the same handle. Single-threaded; owned by the overlay host.
#[derive(Debug)]
pub struct TextureRegistry<T> {
    by_id: HashMap<TextureId, T>,
    by_resource: HashMap<T, TextureId>,
    next: usize,
}

impl<T> TextureRegistry<T>
where
    T: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            by_resource: HashMap::new(),
            next: 1,
        }
    }

    /// Returns the handle of `resource`, issuing a new one on first sight.
    pub fn get_or_create(&mut self, resource: &T) -> TextureId {
        if let Some(&id) = self.by_resource.get(resource) {
            return id;
        }

        let id = TextureId(self.next);
        self.next += 1;

        self.by_resource.insert(resource.clone(), id);
        self.by_id.insert(id, resource.clone());

        log::trace!("texture registry: issued {:?}", id);
        id
    }

    /// Looks up the resource behind `id`. `TextureId::NONE` never resolves.
    pub fn resolve(&self, id: TextureId) -> Option<&T> {
        self.by_id.get(&id)
    }

    /// Drops a single mapping. Returns the resource if `id` was registered.
    ///
    /// Handles are not recycled until `clear()`.
    pub fn remove(&mut self, id: TextureId) -> Option<T> {
        let resource = self.by_id.remove(&id)?;
        self.by_resource.remove(&resource);
        Some(resource)
    }

    /// Purges every mapping and restarts handle numbering at 1.
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_resource.clear();
        self.next = 1;
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl<T> Default for TextureRegistry<T>
where
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_resource_same_handle() {
        let mut reg = TextureRegistry::new();
        let a = reg.get_or_create(&"atlas");
        let b = reg.get_or_create(&"atlas");
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.resolve(a), Some(&"atlas"));
    }

    #[test]
    fn handle_zero_is_never_issued() {
        let mut reg = TextureRegistry::new();
        for i in 0..64u32 {
            assert!(!reg.get_or_create(&i).is_none());
        }
        assert_eq!(reg.resolve(TextureId::NONE), None);
    }

    #[test]
    fn distinct_resources_get_distinct_handles() {
        let mut reg = TextureRegistry::new();
        let a = reg.get_or_create(&1u8);
        let b = reg.get_or_create(&2u8);
        assert_ne!(a, b);
        assert_eq!(reg.resolve(b), Some(&2));
    }

    #[test]
    fn clear_restarts_numbering() {
        let mut reg = TextureRegistry::new();
        reg.get_or_create(&"a");
        reg.get_or_create(&"b");
        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.get_or_create(&"c"), TextureId(1));
    }

    #[test]
    fn remove_drops_both_directions() {
        let mut reg = TextureRegistry::new();
        let a = reg.get_or_create(&"a");
        assert_eq!(reg.remove(a), Some("a"));
        assert_eq!(reg.resolve(a), None);
        assert_eq!(reg.remove(a), None);

        // re-registering issues a fresh handle
        let again = reg.get_or_create(&"a");
        assert_ne!(again, a);
    }
}
