//! Query sets for multi-component views

use super::{Component, Entity, Registry};

/// A set of component types an entity must carry to appear in a view
///
/// Implemented for tuples of one to six components:
/// `registry.view::<(CameraComponent, TransformComponent)>()`.
pub trait Query {
    /// Whether `entity` carries every component in the set
    fn matches(registry: &Registry, entity: Entity) -> bool;
}

macro_rules! impl_query_for_tuple {
    ($($component:ident),+) => {
        impl<$($component: Component),+> Query for ($($component,)+) {
            fn matches(registry: &Registry, entity: Entity) -> bool {
                true $(&& registry.has::<$component>(entity))+
            }
        }
    };
}

impl_query_for_tuple!(A);
impl_query_for_tuple!(A, B);
impl_query_for_tuple!(A, B, C);
impl_query_for_tuple!(A, B, C, D);
impl_query_for_tuple!(A, B, C, D, E);
impl_query_for_tuple!(A, B, C, D, E, F);
