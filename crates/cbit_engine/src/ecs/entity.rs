//! Entity implementation

use slotmap::Key;

slotmap::new_key_type! {
    /// Generational entity handle
    ///
    /// A handle stays valid until its entity is destroyed. A destroyed slot
    /// may be reused, but the reused handle carries a newer generation and
    /// never compares equal to the stale one.
    pub struct Entity;
}

impl Entity {
    /// Packed index and generation, stable for the lifetime of the entity
    pub fn id(&self) -> u64 {
        self.data().as_ffi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_entity_is_default() {
        assert!(Entity::default().is_null());
        assert_eq!(Entity::null(), Entity::default());
    }
}
