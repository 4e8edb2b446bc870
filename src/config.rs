//! Configuration for the layout reconstruction pipeline.
//!
//! All tunables live in explicit config structs threaded through the calls
//! instead of implicit global defaults. The top-level [`LayoutConfig`] can
//! be loaded from a single YAML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Panorama and floor-plane geometry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PanoConfig {
    /// Panorama width in pixels (number of boundary columns).
    /// Default: 1024
    pub coor_w: usize,

    /// Panorama height in pixels.
    /// Default: 512
    pub coor_h: usize,

    /// Floor-plane image width in pixels.
    /// Default: 1024
    pub floor_w: usize,

    /// Floor-plane image height in pixels.
    /// Default: 512
    pub floor_h: usize,

    /// Assumed camera height above the reference plane, in the same pixel
    /// units as the floor plane. Conventional default carried over from the
    /// upstream detector.
    /// Default: 50.0
    pub camera_height: f32,

    /// Pixel-per-unit ratio applied when projecting onto the floor plane.
    /// Default: 1.0
    pub m_ratio: f32,
}

impl Default for PanoConfig {
    fn default() -> Self {
        Self {
            coor_w: 1024,
            coor_h: 512,
            floor_w: 1024,
            floor_h: 512,
            camera_height: 50.0,
            m_ratio: 1.0,
        }
    }
}

impl PanoConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for panorama dimensions.
    pub fn with_pano_size(mut self, coor_w: usize, coor_h: usize) -> Self {
        self.coor_w = coor_w;
        self.coor_h = coor_h;
        self
    }

    /// Builder-style setter for floor-plane dimensions.
    pub fn with_floor_size(mut self, floor_w: usize, floor_h: usize) -> Self {
        self.floor_w = floor_w;
        self.floor_h = floor_h;
        self
    }

    /// Builder-style setter for camera height.
    pub fn with_camera_height(mut self, value: f32) -> Self {
        self.camera_height = value;
        self
    }

    /// Floor-plane X coordinate of the camera (image center).
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.floor_w as f32 / 2.0 - 0.5
    }

    /// Floor-plane Y coordinate of the camera (image center).
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.floor_h as f32 / 2.0 - 0.5
    }
}

/// Configuration for the robust consensus vote.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VoteConfig {
    /// Maximum spread (in floor-plane pixels) a consensus span may cover.
    /// Default: 3.0
    pub tolerance: f32,

    /// Minimum fraction of the samples a span must contain to be valid.
    /// Default: 0.4
    pub min_span_fraction: f32,
}

impl Default for VoteConfig {
    fn default() -> Self {
        Self {
            tolerance: 3.0,
            min_span_fraction: 0.4,
        }
    }
}

impl VoteConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the span tolerance.
    pub fn with_tolerance(mut self, value: f32) -> Self {
        self.tolerance = value;
        self
    }
}

/// Configuration for wall-boundary reconstruction.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructConfig {
    /// Assume exactly four walls and force strict X/Y alternation.
    /// Default: true
    pub force_cuboid: bool,

    /// Score below which a conflicting wall stops being demoted and a
    /// forced geometric correction is applied instead.
    /// Default: -1.0
    pub score_floor: f32,

    /// Score penalty applied when a conflicting wall is demoted back to
    /// pending. Must exceed any vote score so demoted walls resolve last.
    /// Default: 100.0
    pub score_penalty: f32,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            force_cuboid: true,
            score_floor: -1.0,
            score_penalty: 100.0,
        }
    }
}

impl ReconstructConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the cuboid assumption.
    pub fn with_force_cuboid(mut self, value: bool) -> Self {
        self.force_cuboid = value;
        self
    }
}

/// Full pipeline configuration, loadable from a single YAML file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Panorama and floor-plane geometry.
    #[serde(default)]
    pub pano: PanoConfig,

    /// Consensus vote settings.
    #[serde(default)]
    pub vote: VoteConfig,

    /// Reconstruction settings.
    #[serde(default)]
    pub reconstruct: ReconstructConfig,
}

impl LayoutConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone)]
pub enum ConfigLoadError {
    /// I/O error
    Io(String),
    /// Parse error
    Parse(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigLoadError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}
