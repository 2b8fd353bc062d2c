//! Lighting system
//!
//! Gathers light components into the per-frame [`LightEnvironment`].

use crate::ecs::components::{
    CameraComponent, DirectionalLightComponent, PointLightComponent, SpotLightComponent,
};
use crate::ecs::Registry;
use crate::foundation::math::{utils, Vec3};
use crate::render::{
    DirectionalLight, LightEnvironment, PointLight, SpotLight, MAX_DIRECTIONAL_LIGHTS,
    MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS,
};

/// Builds the light environment from ECS light components
#[derive(Debug, Default)]
pub struct LightingSystem {
    environment: LightEnvironment,
}

impl LightingSystem {
    /// Create a lighting system
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the environment for this frame
    ///
    /// Spot lights on camera entities are placed at `view_position`.
    pub fn build_environment(
        &mut self,
        registry: &Registry,
        view_position: Vec3,
    ) -> &LightEnvironment {
        let env = &mut self.environment;
        env.clear();
        env.view_position = view_position;

        for (_, light) in registry.query::<DirectionalLightComponent>() {
            env.directional.push(DirectionalLight {
                direction: safe_normalize(light.direction),
                color: light.color,
                ambient: light.ambient,
            });
        }

        for (_, light) in registry.query::<PointLightComponent>() {
            env.point.push(PointLight {
                position: light.position,
                color: light.color,
                constant: light.constant,
                linear: light.linear,
                quadratic: light.quadratic,
            });
        }

        for (entity, light) in registry.query::<SpotLightComponent>() {
            let position = if registry.has::<CameraComponent>(entity) {
                view_position
            } else {
                light.position
            };
            env.spot.push(SpotLight {
                position,
                direction: safe_normalize(light.direction),
                color: light.color,
                cut_off_cos: utils::deg_to_rad(light.cut_off).cos(),
                outer_cut_off_cos: utils::deg_to_rad(light.outer_cut_off).cos(),
            });
        }

        truncate_with_warning(&mut env.directional, MAX_DIRECTIONAL_LIGHTS, "directional");
        truncate_with_warning(&mut env.point, MAX_POINT_LIGHTS, "point");
        truncate_with_warning(&mut env.spot, MAX_SPOT_LIGHTS, "spot");

        &self.environment
    }

    /// Environment from the last build
    pub fn environment(&self) -> &LightEnvironment {
        &self.environment
    }
}

fn safe_normalize(direction: Vec3) -> Vec3 {
    direction.try_normalize(f32::EPSILON).unwrap_or_else(|| Vec3::new(0.0, -1.0, 0.0))
}

fn truncate_with_warning<T>(lights: &mut Vec<T>, max: usize, kind: &str) {
    if lights.len() > max {
        log::warn!("{} {} lights in scene, only the first {} are used", lights.len(), kind, max);
        lights.truncate(max);
    }
}
