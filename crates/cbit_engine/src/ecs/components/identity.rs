//! Identity components carried by every game object

use crate::ecs::Component;

/// Human-readable label; not required to be unique
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagComponent {
    /// The label
    pub tag: String,
}

impl TagComponent {
    /// Create a tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl Component for TagComponent {}

/// Persistent identity that survives save and load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdComponent {
    /// UUID text, e.g. `"1b4e28ba-2fa1-11d2-883f-0016d3cca427"`
    pub uuid: String,
}

impl IdComponent {
    /// Wrap an existing identifier
    pub fn new(uuid: impl Into<String>) -> Self {
        Self { uuid: uuid.into() }
    }

    /// Generate a fresh random (v4) identifier
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

impl Component for IdComponent {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct_uuids() {
        let a = IdComponent::generate();
        let b = IdComponent::generate();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(&a.uuid).is_ok());
    }
}
