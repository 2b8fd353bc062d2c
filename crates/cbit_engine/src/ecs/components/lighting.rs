//! Light components
//!
//! Pure data; the lighting system turns these into a per-frame light
//! environment for the renderer. Spot cone angles are stored in degrees.

use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Sun-style light with parallel rays
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLightComponent {
    /// Direction the light travels, world space
    pub direction: Vec3,
    /// Diffuse color
    pub color: Vec3,
    /// Ambient contribution
    pub ambient: Vec3,
}

impl Component for DirectionalLightComponent {}

impl Default for DirectionalLightComponent {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, -0.3),
            color: Vec3::new(1.0, 1.0, 1.0),
            ambient: Vec3::new(0.1, 0.1, 0.1),
        }
    }
}

/// Omnidirectional light with distance attenuation
#[derive(Debug, Clone, PartialEq)]
pub struct PointLightComponent {
    /// World space position
    pub position: Vec3,
    /// Diffuse color
    pub color: Vec3,
    /// Constant attenuation term
    pub constant: f32,
    /// Linear attenuation term
    pub linear: f32,
    /// Quadratic attenuation term
    pub quadratic: f32,
}

impl Component for PointLightComponent {}

impl Default for PointLightComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            color: Vec3::new(1.0, 1.0, 1.0),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

/// Cone light
///
/// A spot light on an entity that also has a camera follows the active view
/// position (a flashlight).
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLightComponent {
    /// World space position
    pub position: Vec3,
    /// Direction the cone points
    pub direction: Vec3,
    /// Diffuse color
    pub color: Vec3,
    /// Inner cone half-angle in degrees
    pub cut_off: f32,
    /// Outer cone half-angle in degrees
    pub outer_cut_off: f32,
}

impl Component for SpotLightComponent {}

impl Default for SpotLightComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            direction: Vec3::new(0.0, 0.0, -1.0),
            color: Vec3::new(1.0, 1.0, 1.0),
            cut_off: 12.5,
            outer_cut_off: 17.5,
        }
    }
}

/// Factory functions for light components
pub struct LightFactory;

impl LightFactory {
    /// Directional light; the direction is normalized
    pub fn directional(direction: Vec3, color: Vec3, ambient: Vec3) -> DirectionalLightComponent {
        DirectionalLightComponent {
            direction: direction.normalize(),
            color,
            ambient,
        }
    }

    /// Point light with the default attenuation curve
    pub fn point(position: Vec3, color: Vec3) -> PointLightComponent {
        PointLightComponent {
            position,
            color,
            ..Default::default()
        }
    }

    /// Spot light; the outer angle is widened to at least the inner angle
    pub fn spot(
        position: Vec3,
        direction: Vec3,
        color: Vec3,
        cut_off: f32,
        outer_cut_off: f32,
    ) -> SpotLightComponent {
        SpotLightComponent {
            position,
            direction: direction.normalize(),
            color,
            cut_off,
            outer_cut_off: outer_cut_off.max(cut_off),
        }
    }
}
