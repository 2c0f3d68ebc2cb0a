//! Pipeline configuration.
//!
//! Every key is optional; a missing key takes its default. A config file is
//! YAML:
//!
//! ```yaml
//! classifier: heuristic
//! association: graph
//! padding: 4000
//! snap: 8000
//! pictures:
//!   max_images: 2
//!   min_area_fraction: 0.05
//! region_names:
//!   "14": Left_PSIS
//! calibration:
//!   1: { dx: -25000, dy: 0 }
//! ```
use crate::annotations::associate::{
    AssociationMode, AssociationSettings, DEFAULT_NEAREST_K, DEFAULT_PADDING_EMU,
    DEFAULT_SNAP_EMU,
};
use crate::common::{Error, Result};
use crate::ooxml::drawings::ScalingMode;
use crate::regions::calibrate::Calibration;
use crate::regions::classify::ClassifierMode;
use crate::regions::layout::PictureSelection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_BONE_SET: &str = "Bony Pelvis";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub classifier: ClassifierMode,
    pub association: AssociationMode,
    /// K for nearest association
    pub nearest_k: usize,
    /// Label box padding (EMU)
    pub padding: i64,
    /// Junction grid cell (EMU); below 1 means no merging
    pub snap: i64,
    pub scaling: ScalingMode,
    /// `bone_name` of text annotations
    pub bone_set: String,
    pub pictures: PictureSelection,
    /// Leave slide 1 out when processing every slide
    pub skip_title_slide: bool,
    /// Shape id to anatomical name, taking precedence over color names
    pub region_names: HashMap<String, String>,
    /// Image index to offset, applied after partitioning
    pub calibration: Calibration,
    /// Write `all_colored_regions.json`
    pub aggregate: bool,
    /// Process slides on the rayon pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierMode::default(),
            association: AssociationMode::default(),
            nearest_k: DEFAULT_NEAREST_K,
            padding: DEFAULT_PADDING_EMU,
            snap: DEFAULT_SNAP_EMU,
            scaling: ScalingMode::default(),
            bone_set: DEFAULT_BONE_SET.to_string(),
            pictures: PictureSelection::default(),
            skip_title_slide: true,
            region_names: HashMap::new(),
            calibration: Calibration::new(),
            aggregate: true,
            parallel: true,
        }
    }
}

impl PipelineConfig {
    /// Read a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_saphyr::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges. Run again after overriding fields by hand.
    ///
    /// A `snap` below 1 is accepted and treated as 1.
    pub fn validate(&self) -> Result<()> {
        if self.padding < 0 {
            return Err(Error::Config(format!("padding must not be negative, got {}", self.padding)));
        }
        if self.nearest_k == 0 {
            return Err(Error::Config("nearest_k must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.pictures.min_area_fraction) {
            return Err(Error::Config(format!(
                "pictures.min_area_fraction must be within 0..=1, got {}",
                self.pictures.min_area_fraction
            )));
        }
        Ok(())
    }

    pub fn association_settings(&self) -> AssociationSettings {
        AssociationSettings {
            mode: self.association,
            nearest_k: self.nearest_k,
            padding: self.padding,
            snap: self.snap.max(1),
        }
    }
}
