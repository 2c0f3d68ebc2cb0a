//! Shape transforms (`a:xfrm`) and group coordinate frames.
//!
//! A transform places a shape's box in the coordinate space of its container.
//! Top-level shapes live directly in slide space; shapes inside `p:grpSp`
//! live in the group's child space and are mapped out through [`GroupFrame`].
use crate::common::geometry::{BoundingBox, Point};
use crate::common::unit::rotation_to_radians;
use crate::common::xml::{Namespace, XmlElement};
use serde::Serialize;

/// Placement of a shape: offset, extent, rotation and flips.
///
/// `rotation` is kept in raw units (1/60000 degree); see
/// [`rotation_to_degrees`](crate::common::unit::rotation_to_degrees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Transform {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub rotation: i64,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Transform {
    /// Transform used when a shape has no usable `a:off`/`a:ext` pair.
    pub const ZERO: Transform = Transform {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
        rotation: 0,
        flip_h: false,
        flip_v: false,
    };

    /// Read an `a:xfrm` element.
    ///
    /// Missing `a:off` or `a:ext` children yield [`Transform::ZERO`]; missing
    /// attributes on present children read as 0.
    pub fn from_element(xfrm: &XmlElement) -> Self {
        let (Some(off), Some(ext)) = (
            xfrm.child(Namespace::DrawingML, "off"),
            xfrm.child(Namespace::DrawingML, "ext"),
        ) else {
            return Self::ZERO;
        };

        Self {
            x: off.attr_i64("x").unwrap_or(0),
            y: off.attr_i64("y").unwrap_or(0),
            width: ext.attr_i64("cx").unwrap_or(0),
            height: ext.attr_i64("cy").unwrap_or(0),
            rotation: xfrm.attr_i64("rot").unwrap_or(0),
            flip_h: xfrm.attr_bool("flipH").unwrap_or(false),
            flip_v: xfrm.attr_bool("flipV").unwrap_or(false),
        }
    }

    /// Unrotated bounding box.
    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }

    /// Real start and end points of a straight line stored as a box.
    ///
    /// Line shapes store the unrotated box of the segment from its top-left
    /// to its bottom-right corner (the other diagonal when flipped) plus a
    /// rotation about the box center. The half-diagonal vector is flipped,
    /// rotated by the shape rotation and added to / subtracted from the
    /// center; results are rounded to whole EMU.
    pub fn endpoints(&self) -> (Point, Point) {
        let (cx, cy) = self.bounds().center();
        let mut hx = self.width as f64 / 2.0;
        let mut hy = self.height as f64 / 2.0;
        if self.flip_h {
            hx = -hx;
        }
        if self.flip_v {
            hy = -hy;
        }

        let (sin, cos) = rotation_to_radians(self.rotation).sin_cos();
        let vx = cos * hx - sin * hy;
        let vy = sin * hx + cos * hy;
        (
            Point::from_f64(cx - vx, cy - vy),
            Point::from_f64(cx + vx, cy + vy),
        )
    }
}

/// Child coordinate frame of a group shape (`p:grpSpPr/a:xfrm`).
///
/// Children of a group are positioned in the space spanned by
/// `chOff`/`chExt`, which the group stretches onto its own `off`/`ext`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupFrame {
    placement: Transform,
    child_x: i64,
    child_y: i64,
    child_width: i64,
    child_height: i64,
}

impl GroupFrame {
    /// Read the frame from a group's `a:xfrm`.
    ///
    /// A group without `chOff`/`chExt` maps its children one to one.
    pub fn from_element(xfrm: &XmlElement) -> Self {
        let placement = Transform::from_element(xfrm);
        let ch_off = xfrm.child(Namespace::DrawingML, "chOff");
        let ch_ext = xfrm.child(Namespace::DrawingML, "chExt");
        match (ch_off, ch_ext) {
            (Some(off), Some(ext)) => Self {
                placement,
                child_x: off.attr_i64("x").unwrap_or(0),
                child_y: off.attr_i64("y").unwrap_or(0),
                child_width: ext.attr_i64("cx").unwrap_or(0),
                child_height: ext.attr_i64("cy").unwrap_or(0),
            },
            _ => Self {
                placement,
                child_x: placement.x,
                child_y: placement.y,
                child_width: placement.width,
                child_height: placement.height,
            },
        }
    }

    /// Map a transform from the group's child space into the group's parent space.
    ///
    /// Group rotation is not applied to children.
    pub fn map(&self, t: Transform) -> Transform {
        let sx = scale_factor(self.placement.width, self.child_width);
        let sy = scale_factor(self.placement.height, self.child_height);
        Transform {
            x: self.placement.x + ((t.x - self.child_x) as f64 * sx).round() as i64,
            y: self.placement.y + ((t.y - self.child_y) as f64 * sy).round() as i64,
            width: (t.width as f64 * sx).round() as i64,
            height: (t.height as f64 * sy).round() as i64,
            flip_h: t.flip_h ^ self.placement.flip_h,
            flip_v: t.flip_v ^ self.placement.flip_v,
            ..t
        }
    }
}

fn scale_factor(extent: i64, child_extent: i64) -> f64 {
    if child_extent == 0 {
        1.0
    } else {
        extent as f64 / child_extent as f64
    }
}
