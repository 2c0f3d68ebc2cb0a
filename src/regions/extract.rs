//! Colored region extraction from freeform shapes.
use crate::common::geometry::BoundingBox;
use crate::ooxml::drawings::{ScalingMode, ShapePath, Transform};
use crate::ooxml::opc::Relationships;
use crate::ooxml::pptx::{Hyperlink, Shape, ShapeType, Slide};
use crate::regions::classify::{ColorClassifier, resolve_anatomical_name};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A filled freeform shape recognised as an anatomical region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColoredRegion {
    pub anatomical_name: String,
    /// Uppercase hex fill, without `#`
    pub color: String,
    pub color_name: String,
    pub shape_id: String,
    /// Slide a click on the region jumps to
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hyperlink_target: Option<u32>,
    pub path_data: Vec<ShapePath>,
    /// Slide-space shape box, used for partitioning
    #[serde(skip)]
    pub bounds: BoundingBox,
    /// Source image the region was assigned to
    #[serde(skip)]
    pub image_index: Option<usize>,
}

impl ColoredRegion {
    /// Horizontal center of the shape box.
    #[inline]
    pub fn centroid_x(&self) -> f64 {
        self.bounds.center().0
    }

    /// Shift every path coordinate in place.
    pub fn translate(&mut self, dx: i64, dy: i64) {
        for path in &mut self.path_data {
            path.translate(dx, dy);
        }
    }
}

/// Turns the freeform shapes of a slide into [`ColoredRegion`]s.
pub struct RegionExtractor<'a> {
    classifier: &'a dyn ColorClassifier,
    scaling: ScalingMode,
    name_overrides: &'a HashMap<String, String>,
}

impl<'a> RegionExtractor<'a> {
    pub fn new(
        classifier: &'a dyn ColorClassifier,
        scaling: ScalingMode,
        name_overrides: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            classifier,
            scaling,
            name_overrides,
        }
    }

    /// Extract every qualifying region, in document order.
    ///
    /// A shape qualifies when its fill resolves to an RGB value the
    /// classifier accepts and its custom geometry yields at least one
    /// non-empty path.
    pub fn extract(&self, slide: &Slide, rels: &Relationships) -> Vec<ColoredRegion> {
        let labels: Vec<String> = slide.text_labels().collect();
        slide
            .shapes_of(ShapeType::Shape)
            .filter_map(|shape| self.extract_shape(shape, &labels, rels))
            .collect()
    }

    fn extract_shape(
        &self,
        shape: &Shape,
        labels: &[String],
        rels: &Relationships,
    ) -> Option<ColoredRegion> {
        let color = shape.fill.as_ref()?.resolved_rgb()?;
        let Some(matched) = self.classifier.classify(color) else {
            debug!(shape_id = %shape.id, color = %color, "fill not classified, skipping shape");
            return None;
        };

        let placement = shape.placement.unwrap_or(Transform::ZERO);
        let path_data: Vec<ShapePath> = shape
            .paths
            .iter()
            .map(|raw| raw.decode(&placement, self.scaling))
            .filter(|path| !path.commands.is_empty())
            .collect();
        if path_data.is_empty() {
            debug!(shape_id = %shape.id, "classified shape has no path geometry, skipping");
            return None;
        }

        let anatomical_name = match self.name_overrides.get(&shape.id) {
            Some(name) => name.clone(),
            None => resolve_anatomical_name(matched.anatomical_name, labels),
        };
        let hyperlink_target = shape
            .hyperlink_r_id()
            .and_then(|r_id| Hyperlink::resolve(r_id, rels))
            .and_then(|link| link.target_slide);

        debug!(shape_id = %shape.id, name = %anatomical_name, paths = path_data.len(), "extracted region");
        Some(ColoredRegion {
            anatomical_name,
            color: color.to_hex(),
            color_name: matched.color_name.to_string(),
            shape_id: shape.id.clone(),
            hyperlink_target,
            path_data,
            bounds: placement.bounds(),
            image_index: None,
        })
    }
}
