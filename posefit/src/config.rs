//! Editor configuration. Every field has a default, so a partial JSON file
//! (or none at all) is valid.

use crate::error::{Error, Result};
use crate::geometry::transform::Transform;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Extra reach beyond a vertex radius when hit testing.
    pub pick_tolerance: f64,
    pub problems_dir: PathBuf,
    pub states_dir: PathBuf,
    pub solutions_dir: PathBuf,
    pub poses_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            scale: 15.0,
            offset_x: 100.0,
            offset_y: 0.0,
            pick_tolerance: 0.0,
            problems_dir: PathBuf::from("./problems"),
            states_dir: PathBuf::from("./states"),
            solutions_dir: PathBuf::from("./solutions"),
            poses_dir: PathBuf::from("./poses_ids"),
        }
    }
}

impl EditorConfig {
    /// Defaults with every directory placed under `root`.
    pub fn rooted(root: &Path) -> Self {
        EditorConfig {
            problems_dir: root.join("problems"),
            states_dir: root.join("states"),
            solutions_dir: root.join("solutions"),
            poses_dir: root.join("poses_ids"),
            ..EditorConfig::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::parse("config", e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = crate::store::read_text(path)?;
        let cfg = EditorConfig::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn transform(&self) -> Result<Transform> {
        Transform::new(self.scale, self.offset_x, self.offset_y)
    }
}
