//! On-disk scene format
//!
//! ```json
//! {
//!   "name": "level_1",
//!   "type": "scene",
//!   "entities": [
//!     { "tag": "Player", "uuid": "…",
//!       "transform": { "position": [0, 0, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1] },
//!       "cube": { "color": [1, 0, 0, 1] } }
//!   ]
//! }
//! ```
//!
//! Component blocks are optional and omitted when the entity lacks the
//! component. Vectors are fixed-length arrays; a wrong length is a parse error.

use serde::{Deserialize, Serialize};

use super::SceneError;
use crate::ecs::components::{
    CameraComponent, CubeComponent, DirectionalLightComponent, IdComponent, PointLightComponent,
    QuadComponent, SpotLightComponent, TagComponent, TextureComponent, TransformComponent,
};
use crate::ecs::{EcsError, Entity, GameObject, Registry, World};
use crate::foundation::math::{Vec3, Vec4};

/// Value of the top-level `type` field
pub const SCENE_DOCUMENT_TYPE: &str = "scene";

fn default_document_type() -> String {
    SCENE_DOCUMENT_TYPE.to_string()
}

/// A whole scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Scene name at save time; informational on load
    #[serde(default)]
    pub name: String,
    /// Always `"scene"`
    #[serde(rename = "type", default = "default_document_type")]
    pub kind: String,
    /// One record per saved entity
    pub entities: Vec<EntityRecord>,
}

impl SceneDocument {
    /// Empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: default_document_type(),
            entities: Vec::new(),
        }
    }

    /// Parse and validate a document
    ///
    /// The text must be a JSON object with an `entities` array. Nothing is
    /// mutated here, so callers can validate before touching a world.
    pub fn parse(json: &str) -> Result<Self, SceneError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let Some(object) = value.as_object() else {
            return Err(SceneError::Malformed("top level is not an object".to_string()));
        };
        if !object.get("entities").is_some_and(serde_json::Value::is_array) {
            return Err(SceneError::Malformed("missing \"entities\" array".to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Pretty-printed JSON
    ///
    /// JSON has no representation for NaN or infinity, so a document holding
    /// one is rejected instead of being written as `null`.
    pub fn to_json_string(&self) -> Result<String, SceneError> {
        self.check_finite()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fail on the first entity carrying a NaN or infinite value
    pub fn check_finite(&self) -> Result<(), SceneError> {
        for record in &self.entities {
            if let Some(field) = record.non_finite_field() {
                return Err(SceneError::Malformed(format!(
                    "entity '{}' ({}) has a non-finite {}",
                    record.tag, record.uuid, field
                )));
            }
        }
        Ok(())
    }

    /// Snapshot every entity that has both a tag and an id
    pub fn capture(name: &str, world: &World) -> Self {
        let registry = world.registry();
        let entities = registry
            .view::<(TagComponent, IdComponent)>()
            .into_iter()
            .filter_map(|entity| EntityRecord::capture(registry, entity))
            .collect();

        Self {
            name: name.to_string(),
            kind: default_document_type(),
            entities,
        }
    }

    /// Create one game object per record, keeping the saved identifiers
    ///
    /// Returns the number of entities created.
    pub fn spawn_into(&self, world: &mut World) -> Result<usize, SceneError> {
        for record in &self.entities {
            let mut object = world.create_game_object(&record.tag);
            record.apply(&mut object)?;
        }
        Ok(self.entities.len())
    }

    /// Record with the given identifier
    pub fn find(&self, uuid: &str) -> Option<&EntityRecord> {
        self.entities.iter().find(|record| record.uuid == uuid)
    }
}

/// One saved entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    /// Tag text
    pub tag: String,
    /// Persistent identifier
    pub uuid: String,
    /// Transform block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformRecord>,
    /// Camera block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraRecord>,
    /// Directional light block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directional_light: Option<DirectionalLightRecord>,
    /// Point light block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_light: Option<PointLightRecord>,
    /// Spot light block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_light: Option<SpotLightRecord>,
    /// Quad block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quad: Option<ColorRecord>,
    /// Cube block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cube: Option<ColorRecord>,
    /// Texture block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureRecord>,
}

impl EntityRecord {
    /// Record with only the mandatory identity fields
    pub fn new(tag: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            uuid: uuid.into(),
            transform: None,
            camera: None,
            directional_light: None,
            point_light: None,
            spot_light: None,
            quad: None,
            cube: None,
            texture: None,
        }
    }

    fn capture(registry: &Registry, entity: Entity) -> Option<Self> {
        let tag = registry.get::<TagComponent>(entity)?;
        let id = registry.get::<IdComponent>(entity)?;

        Some(Self {
            tag: tag.tag.clone(),
            uuid: id.uuid.clone(),
            transform: registry.get::<TransformComponent>(entity).map(Into::into),
            camera: registry.get::<CameraComponent>(entity).map(Into::into),
            directional_light: registry.get::<DirectionalLightComponent>(entity).map(Into::into),
            point_light: registry.get::<PointLightComponent>(entity).map(Into::into),
            spot_light: registry.get::<SpotLightComponent>(entity).map(Into::into),
            quad: registry.get::<QuadComponent>(entity).map(|quad| ColorRecord::from(quad.color)),
            cube: registry.get::<CubeComponent>(entity).map(|cube| ColorRecord::from(cube.color)),
            texture: registry
                .get::<TextureComponent>(entity)
                .map(|texture| TextureRecord { path: texture.path.clone() }),
        })
    }

    /// Name of the first field holding NaN or infinity
    pub fn non_finite_field(&self) -> Option<&'static str> {
        fn optional(value: &Option<f32>) -> &[f32] {
            value.as_ref().map_or(&[][..], std::slice::from_ref)
        }

        let mut fields: Vec<(&'static str, &[f32])> = Vec::new();
        if let Some(transform) = &self.transform {
            fields.push(("transform.position", &transform.position));
            fields.push(("transform.rotation", &transform.rotation));
            fields.push(("transform.scale", &transform.scale));
        }
        if let Some(camera) = &self.camera {
            fields.push(("camera.fov", std::slice::from_ref(&camera.fov)));
            fields.push(("camera.nearClip", std::slice::from_ref(&camera.near_clip)));
            fields.push(("camera.farClip", std::slice::from_ref(&camera.far_clip)));
            let target = camera.target.as_ref().map_or(&[][..], |target| &target[..]);
            fields.push(("camera.target", target));
            fields.push(("camera.distance", optional(&camera.distance)));
            fields.push(("camera.yaw", optional(&camera.yaw)));
            fields.push(("camera.pitch", optional(&camera.pitch)));
        }
        if let Some(light) = &self.directional_light {
            fields.push(("directionalLight.direction", &light.direction));
            fields.push(("directionalLight.color", &light.color));
            fields.push(("directionalLight.ambient", &light.ambient));
        }
        if let Some(light) = &self.point_light {
            fields.push(("pointLight.position", &light.position));
            fields.push(("pointLight.color", &light.color));
            fields.push(("pointLight.constant", std::slice::from_ref(&light.constant)));
            fields.push(("pointLight.linear", std::slice::from_ref(&light.linear)));
            fields.push(("pointLight.quadratic", std::slice::from_ref(&light.quadratic)));
        }
        if let Some(light) = &self.spot_light {
            fields.push(("spotLight.position", &light.position));
            fields.push(("spotLight.direction", &light.direction));
            fields.push(("spotLight.color", &light.color));
            fields.push(("spotLight.cutOff", std::slice::from_ref(&light.cut_off)));
            fields.push(("spotLight.outerCutOff", std::slice::from_ref(&light.outer_cut_off)));
        }
        if let Some(quad) = &self.quad {
            fields.push(("quad.color", &quad.color));
        }
        if let Some(cube) = &self.cube {
            fields.push(("cube.color", &cube.color));
        }

        fields
            .into_iter()
            .find(|(_, values)| values.iter().any(|value| !value.is_finite()))
            .map(|(name, _)| name)
    }

    /// Write this record's identity and component blocks onto `object`
    ///
    /// Existing components of the same type are overwritten.
    pub fn apply(&self, object: &mut GameObject<'_>) -> Result<(), EcsError> {
        object.add_or_replace_component(TagComponent::new(&self.tag))?;
        object.add_or_replace_component(IdComponent::new(&self.uuid))?;

        if let Some(transform) = &self.transform {
            object.add_or_replace_component(TransformComponent::from(transform))?;
        }
        if let Some(camera) = &self.camera {
            object.add_or_replace_component(CameraComponent::from(camera))?;
        }
        if let Some(light) = &self.directional_light {
            object.add_or_replace_component(DirectionalLightComponent::from(light))?;
        }
        if let Some(light) = &self.point_light {
            object.add_or_replace_component(PointLightComponent::from(light))?;
        }
        if let Some(light) = &self.spot_light {
            object.add_or_replace_component(SpotLightComponent::from(light))?;
        }
        if let Some(quad) = &self.quad {
            object.add_or_replace_component(QuadComponent::new(quad.into()))?;
        }
        if let Some(cube) = &self.cube {
            object.add_or_replace_component(CubeComponent::new(cube.into()))?;
        }
        if let Some(texture) = &self.texture {
            object.add_or_replace_component(TextureComponent::new(&texture.path))?;
        }
        Ok(())
    }
}

fn to_array3(v: &Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

fn from_array3(a: [f32; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

/// `transform` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRecord {
    /// Position
    pub position: [f32; 3],
    /// Euler rotation in degrees
    pub rotation: [f32; 3],
    /// Scale
    pub scale: [f32; 3],
}

impl From<&TransformComponent> for TransformRecord {
    fn from(transform: &TransformComponent) -> Self {
        Self {
            position: to_array3(&transform.position),
            rotation: to_array3(&transform.rotation),
            scale: to_array3(&transform.scale),
        }
    }
}

impl From<&TransformRecord> for TransformComponent {
    fn from(record: &TransformRecord) -> Self {
        Self::new(
            from_array3(record.position),
            from_array3(record.rotation),
            from_array3(record.scale),
        )
    }
}

/// `camera` block
///
/// The orbit fields are optional so that files written without them still
/// load; missing values take the component defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraRecord {
    /// Primary flag
    pub is_primary: bool,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clip distance
    pub near_clip: f32,
    /// Far clip distance
    pub far_clip: f32,
    /// Orbit target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<[f32; 3]>,
    /// Orbit distance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    /// Orbit yaw in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaw: Option<f32>,
    /// Orbit pitch in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f32>,
}

impl From<&CameraComponent> for CameraRecord {
    fn from(camera: &CameraComponent) -> Self {
        Self {
            is_primary: camera.is_primary,
            fov: camera.fov,
            near_clip: camera.near_clip,
            far_clip: camera.far_clip,
            target: Some(to_array3(&camera.target)),
            distance: Some(camera.distance),
            yaw: Some(camera.yaw),
            pitch: Some(camera.pitch),
        }
    }
}

impl From<&CameraRecord> for CameraComponent {
    fn from(record: &CameraRecord) -> Self {
        let defaults = Self::default();
        Self {
            fov: record.fov,
            near_clip: record.near_clip,
            far_clip: record.far_clip,
            is_primary: record.is_primary,
            target: record.target.map_or(defaults.target, from_array3),
            distance: record.distance.unwrap_or(defaults.distance),
            yaw: record.yaw.unwrap_or(defaults.yaw),
            pitch: record.pitch.unwrap_or(defaults.pitch),
        }
    }
}

/// `directionalLight` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLightRecord {
    /// Direction
    pub direction: [f32; 3],
    /// Diffuse color
    pub color: [f32; 3],
    /// Ambient color
    pub ambient: [f32; 3],
}

impl From<&DirectionalLightComponent> for DirectionalLightRecord {
    fn from(light: &DirectionalLightComponent) -> Self {
        Self {
            direction: to_array3(&light.direction),
            color: to_array3(&light.color),
            ambient: to_array3(&light.ambient),
        }
    }
}

impl From<&DirectionalLightRecord> for DirectionalLightComponent {
    fn from(record: &DirectionalLightRecord) -> Self {
        Self {
            direction: from_array3(record.direction),
            color: from_array3(record.color),
            ambient: from_array3(record.ambient),
        }
    }
}

/// `pointLight` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLightRecord {
    /// Position
    pub position: [f32; 3],
    /// Diffuse color
    pub color: [f32; 3],
    /// Constant attenuation
    pub constant: f32,
    /// Linear attenuation
    pub linear: f32,
    /// Quadratic attenuation
    pub quadratic: f32,
}

impl From<&PointLightComponent> for PointLightRecord {
    fn from(light: &PointLightComponent) -> Self {
        Self {
            position: to_array3(&light.position),
            color: to_array3(&light.color),
            constant: light.constant,
            linear: light.linear,
            quadratic: light.quadratic,
        }
    }
}

impl From<&PointLightRecord> for PointLightComponent {
    fn from(record: &PointLightRecord) -> Self {
        Self {
            position: from_array3(record.position),
            color: from_array3(record.color),
            constant: record.constant,
            linear: record.linear,
            quadratic: record.quadratic,
        }
    }
}

/// `spotLight` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotLightRecord {
    /// Position
    pub position: [f32; 3],
    /// Direction
    pub direction: [f32; 3],
    /// Diffuse color
    pub color: [f32; 3],
    /// Inner cone angle in degrees
    pub cut_off: f32,
    /// Outer cone angle in degrees
    pub outer_cut_off: f32,
}

impl From<&SpotLightComponent> for SpotLightRecord {
    fn from(light: &SpotLightComponent) -> Self {
        Self {
            position: to_array3(&light.position),
            direction: to_array3(&light.direction),
            color: to_array3(&light.color),
            cut_off: light.cut_off,
            outer_cut_off: light.outer_cut_off,
        }
    }
}

impl From<&SpotLightRecord> for SpotLightComponent {
    fn from(record: &SpotLightRecord) -> Self {
        Self {
            position: from_array3(record.position),
            direction: from_array3(record.direction),
            color: from_array3(record.color),
            cut_off: record.cut_off,
            outer_cut_off: record.outer_cut_off,
        }
    }
}

/// `quad` / `cube` block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRecord {
    /// RGBA color
    pub color: [f32; 4],
}

impl From<Vec4> for ColorRecord {
    fn from(color: Vec4) -> Self {
        Self {
            color: [color.x, color.y, color.z, color.w],
        }
    }
}

impl From<&ColorRecord> for Vec4 {
    fn from(record: &ColorRecord) -> Self {
        let [r, g, b, a] = record.color;
        Vec4::new(r, g, b, a)
    }
}

/// `texture` block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRecord {
    /// Image path
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(SceneDocument::parse("[1, 2, 3]"), Err(SceneError::Malformed(_))));
    }

    #[test]
    fn test_parse_requires_entities_array() {
        assert!(matches!(
            SceneDocument::parse(r#"{ "name": "default_scene" }"#),
            Err(SceneError::Malformed(_))
        ));
        assert!(matches!(
            SceneDocument::parse(r#"{ "entities": {} }"#),
            Err(SceneError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(SceneDocument::parse("{ not json"), Err(SceneError::Json(_))));
    }

    #[test]
    fn test_parse_rejects_wrong_length_vectors() {
        let json = r#"{ "entities": [ { "tag": "A", "uuid": "1",
            "transform": { "position": [1, 2], "rotation": [0, 0, 0], "scale": [1, 1, 1] } } ] }"#;
        assert!(matches!(SceneDocument::parse(json), Err(SceneError::Json(_))));

        let json = r#"{ "entities": [
            { "tag": "A", "uuid": "1", "quad": { "color": [1, 0, 0, 1, 5] } }
        ] }"#;
        assert!(SceneDocument::parse(json).is_err());
    }

    #[test]
    fn test_parse_requires_tag_and_uuid() {
        let json = r#"{ "entities": [ { "tag": "NoId" } ] }"#;
        assert!(matches!(SceneDocument::parse(json), Err(SceneError::Json(_))));
    }

    #[test]
    fn test_absent_blocks_are_omitted() {
        let mut document = SceneDocument::new("bare");
        document.entities.push(EntityRecord::new("Empty", "abc"));
        let json = document.to_json_string().unwrap();

        assert!(json.contains("\"type\": \"scene\""));
        assert!(!json.contains("transform"));
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_camera_without_orbit_fields_uses_defaults() {
        let json = r#"{ "entities": [ { "tag": "Cam", "uuid": "c",
            "camera": { "isPrimary": true, "fov": 60, "nearClip": 0.5, "farClip": 50 } } ] }"#;
        let document = SceneDocument::parse(json).unwrap();
        let camera = CameraComponent::from(document.entities[0].camera.as_ref().unwrap());

        let defaults = CameraComponent::default();
        assert!((camera.fov - 60.0).abs() < f32::EPSILON);
        assert_eq!(camera.distance, defaults.distance);
        assert_eq!(camera.target, defaults.target);
    }

    #[test]
    fn test_non_finite_values_are_named() {
        let mut record = EntityRecord::new("Lamp", "lamp-1");
        assert_eq!(record.non_finite_field(), None);

        record.point_light = Some(PointLightRecord::from(&PointLightComponent {
            quadratic: f32::INFINITY,
            ..Default::default()
        }));
        assert_eq!(record.non_finite_field(), Some("pointLight.quadratic"));

        let mut document = SceneDocument::new("lit");
        document.entities.push(record);
        match document.to_json_string() {
            Err(SceneError::Malformed(message)) => {
                assert!(message.contains("lamp-1"));
                assert!(message.contains("pointLight.quadratic"));
            }
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_field_names_match_file_format() {
        let mut record = EntityRecord::new("Light", "l");
        record.spot_light = Some(SpotLightRecord::from(&SpotLightComponent::default()));
        let light = DirectionalLightComponent::default();
        record.directional_light = Some(DirectionalLightRecord::from(&light));
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"spotLight\""));
        assert!(json.contains("\"outerCutOff\""));
        assert!(json.contains("\"directionalLight\""));
    }
}
