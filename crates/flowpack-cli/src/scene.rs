//! Scene files: a container width, its configuration and the items to lay out.

use std::fs;
use std::path::{Path, PathBuf};

use flowpack_core::{ConfigError, FlowConfig, Item};
use flowpack_layout::FlowLayout;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from loading a scene.
#[derive(Debug, Error)]
pub(crate) enum SceneError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// Malformed JSON
    #[error("invalid JSON scene: {0}")]
    Json(#[from] serde_json::Error),
    /// Malformed YAML
    #[error("invalid YAML scene: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// Extension is not json, yaml or yml
    #[error("unsupported scene format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
    /// Configuration rejected by validation
    #[error("invalid container configuration: {0}")]
    Config(#[from] ConfigError),
}

/// A container to lay out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Scene {
    /// Container width, padding included
    pub(crate) width: i32,
    /// Container settings
    #[serde(default)]
    pub(crate) config: FlowConfig,
    /// Items in arrangement order
    #[serde(default)]
    pub(crate) items: Vec<Item>,
}

impl Scene {
    /// Load a scene, picking the parser from the file extension.
    pub(crate) fn load(path: &Path) -> Result<Self, SceneError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let content = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let scene = match extension.as_str() {
            "json" => Self::from_json(&content)?,
            "yaml" | "yml" => Self::from_yaml(&content)?,
            _ => return Err(SceneError::UnsupportedFormat(path.display().to_string())),
        };
        debug!(
            path = %path.display(),
            items = scene.items.len(),
            width = scene.width,
            "loaded scene"
        );
        Ok(scene)
    }

    /// Parse a JSON scene.
    pub(crate) fn from_json(content: &str) -> Result<Self, SceneError> {
        let scene: Self = serde_json::from_str(content)?;
        scene.validated()
    }

    /// Parse a YAML scene.
    pub(crate) fn from_yaml(content: &str) -> Result<Self, SceneError> {
        let scene: Self = serde_yaml_ng::from_str(content)?;
        scene.validated()
    }

    fn validated(mut self) -> Result<Self, SceneError> {
        self.config.validate()?;
        self.items = self.items.into_iter().map(Item::sanitized).collect();
        Ok(self)
    }

    /// Build a container holding the scene's items.
    pub(crate) fn into_flow(self) -> FlowLayout {
        FlowLayout::new(self.config).with_items(self.items)
    }
}
