//! System trait

use super::Registry;

/// Per-frame logic that runs over a world's registry
///
/// Systems are registered with [`World::add_system`](super::World::add_system)
/// and run in registration order on every [`World::update`](super::World::update).
pub trait System {
    /// Human-readable name used in log output
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Advance the system by `delta_time` seconds
    fn update(&mut self, registry: &mut Registry, delta_time: f32);
}
