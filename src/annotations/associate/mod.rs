//! Label-to-line association strategies.
//!
//! An associator decides, for each label box on a slide, which white lines
//! point away from it and where they end. Two strategies exist:
//!
//! - [`GraphAssociator`]: lines form a graph whose nodes are grid-snapped
//!   endpoints; everything reachable from the label is followed to its
//!   dangling ends.
//! - [`NearestAssociator`]: the K lines with an endpoint closest to the
//!   label center, each pointing at its far endpoint.
mod graph;
mod nearest;

pub use graph::{GraphAssociator, JunctionGraph};
pub use nearest::NearestAssociator;

use crate::annotations::lines::ConnectorLine;
use crate::common::geometry::{BoundingBox, Point};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NEAREST_K: usize = 2;
pub const DEFAULT_PADDING_EMU: i64 = 4000;
pub const DEFAULT_SNAP_EMU: i64 = 8000;

/// Lines and target points found for one label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Association {
    pub pointer_lines: Vec<ConnectorLine>,
    pub target_regions: Vec<Point>,
}

/// Associates every label of a slide with the slide's lines.
pub trait LabelAssociator: Send + Sync {
    /// One [`Association`] per label box, in the same order.
    fn associate(&self, labels: &[BoundingBox], lines: &[ConnectorLine]) -> Vec<Association>;
}

/// Which association strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AssociationMode {
    #[default]
    Graph,
    Nearest,
}

/// Strategy selection with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssociationSettings {
    pub mode: AssociationMode,
    pub nearest_k: usize,
    pub padding: i64,
    pub snap: i64,
}

impl Default for AssociationSettings {
    fn default() -> Self {
        Self {
            mode: AssociationMode::default(),
            nearest_k: DEFAULT_NEAREST_K,
            padding: DEFAULT_PADDING_EMU,
            snap: DEFAULT_SNAP_EMU,
        }
    }
}

impl AssociationSettings {
    pub fn associator(&self) -> Box<dyn LabelAssociator> {
        match self.mode {
            AssociationMode::Graph => Box::new(GraphAssociator::new(self.padding, self.snap)),
            AssociationMode::Nearest => Box::new(NearestAssociator::new(self.nearest_k)),
        }
    }
}

/// Order points by distance from `center`, then by position.
pub(crate) fn sort_by_distance(points: &mut [Point], center: (f64, f64)) {
    points.sort_by(|a, b| {
        a.distance_squared_to(center)
            .total_cmp(&b.distance_squared_to(center))
            .then_with(|| a.cmp(b))
    });
}
