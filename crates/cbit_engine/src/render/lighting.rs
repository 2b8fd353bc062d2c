//! Per-frame light environment handed to the renderer
//!
//! Light counts are capped the way a uniform buffer would cap them. Spot cone
//! angles are stored as cosines, ready for the fragment stage.

use crate::foundation::math::Vec3;

/// Maximum directional lights per frame
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;
/// Maximum point lights per frame
pub const MAX_POINT_LIGHTS: usize = 8;
/// Maximum spot lights per frame
pub const MAX_SPOT_LIGHTS: usize = 4;

/// Directional light data
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Normalized direction the light travels
    pub direction: Vec3,
    /// Diffuse color
    pub color: Vec3,
    /// Ambient color
    pub ambient: Vec3,
}

/// Point light data
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    /// World position
    pub position: Vec3,
    /// Diffuse color
    pub color: Vec3,
    /// Constant attenuation
    pub constant: f32,
    /// Linear attenuation
    pub linear: f32,
    /// Quadratic attenuation
    pub quadratic: f32,
}

/// Spot light data
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    /// World position
    pub position: Vec3,
    /// Normalized cone direction
    pub direction: Vec3,
    /// Diffuse color
    pub color: Vec3,
    /// Cosine of the inner cone angle
    pub cut_off_cos: f32,
    /// Cosine of the outer cone angle
    pub outer_cut_off_cos: f32,
}

/// All lights affecting one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightEnvironment {
    /// Directional lights
    pub directional: Vec<DirectionalLight>,
    /// Point lights
    pub point: Vec<PointLight>,
    /// Spot lights
    pub spot: Vec<SpotLight>,
    /// Eye position used for specular terms
    pub view_position: Vec3,
}

impl LightEnvironment {
    /// Remove every light
    pub fn clear(&mut self) {
        self.directional.clear();
        self.point.clear();
        self.spot.clear();
    }

    /// Total number of lights
    pub fn len(&self) -> usize {
        self.directional.len() + self.point.len() + self.spot.len()
    }

    /// Whether no lights are present
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
