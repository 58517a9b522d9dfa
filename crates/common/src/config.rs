use std::fmt;
use std::path::Path;
use std::str::FromStr;

use aphrodite_math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::{CameraController, CameraState, EngineState, Mesh};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown scene kind: {0}")]
    UnknownScene(String),
}

/// Built-in meshes the demos can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Triangle,
    Quad,
    Plane,
    #[default]
    Cube,
}

impl SceneKind {
    pub const ALL: [SceneKind; 4] = [Self::Triangle, Self::Quad, Self::Plane, Self::Cube];

    pub fn mesh(self) -> Mesh {
        match self {
            Self::Triangle => Mesh::triangle(),
            Self::Quad => Mesh::quad(),
            Self::Plane => Mesh::plane(10, 10),
            Self::Cube => Mesh::cube(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Triangle => "triangle",
            Self::Quad => "quad",
            Self::Plane => "plane",
            Self::Cube => "cube",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownScene(s.to_string()))
    }
}

/// Demo configuration, typically loaded from YAML. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub scene: SceneKind,
    pub engine: EngineState,
    pub camera: CameraState,
    pub controller: CameraController,
    /// Scales texture coordinates in the fragment stage.
    pub texture_multiplier: Vector2,
    /// Model spin in radians per second about each axis.
    pub rotation_speed: Vector3,
    /// Model placement in world space.
    pub model_position: Vector3,
    pub anisotropy: u16,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            scene: SceneKind::default(),
            engine: EngineState {
                clear_color: Vector3::new(0.2, 0.3, 0.3),
            },
            camera: CameraState::default(),
            controller: CameraController::default(),
            texture_multiplier: Vector2::new(1.0, 1.0),
            rotation_speed: Vector3::new(0.5, 1.0, 0.0),
            model_position: Vector3::new(0.0, 0.0, -3.0),
            anisotropy: 16,
        }
    }
}

impl DemoConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::debug!(path = %path.display(), scene = %config.scene, "loaded demo config");
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn scene_kind_parsing() {
        assert_eq!("cube".parse::<SceneKind>().unwrap(), SceneKind::Cube);
        assert_eq!("Plane".parse::<SceneKind>().unwrap(), SceneKind::Plane);
        assert!(matches!(
            "sphere".parse::<SceneKind>(),
            Err(ConfigError::UnknownScene(_))
        ));
        for kind in SceneKind::ALL {
            assert_eq!(kind.to_string().parse::<SceneKind>().unwrap(), kind);
        }
    }

    #[test]
    fn scene_meshes() {
        assert_eq!(SceneKind::Triangle.mesh().index_count(), 3);
        assert_eq!(SceneKind::Cube.mesh().index_count(), 36);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let yaml = r#"
scene: quad
camera:
  position: { x: 0.0, y: 1.0, z: 5.0 }
  far: 100.0
texture_multiplier: { x: 4.0, y: 4.0 }
"#;
        let config = DemoConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.scene, SceneKind::Quad);
        assert_eq!(config.camera.position, Vector3::new(0.0, 1.0, 5.0));
        assert_eq!(config.camera.far, 100.0);
        assert_eq!(config.camera.near, 1.0);
        assert_eq!(config.texture_multiplier, Vector2::new(4.0, 4.0));
        assert_eq!(config.anisotropy, 16);
    }

    #[test]
    fn yaml_round_trip() {
        let config = DemoConfig::default();
        let text = config.to_yaml().unwrap();
        assert_eq!(DemoConfig::from_yaml(&text).unwrap(), config);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scene: triangle\nanisotropy: 4").unwrap();
        let config = DemoConfig::load(file.path()).unwrap();
        assert_eq!(config.scene, SceneKind::Triangle);
        assert_eq!(config.anisotropy, 4);
    }

    #[test]
    fn load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = DemoConfig::load(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "scene: [not, a, scene]").unwrap();
        assert!(matches!(DemoConfig::load(&bad), Err(ConfigError::Yaml(_))));
    }
}
