//! Per-page geometry metadata captured from the rasterizer.
//!
//! The paper-size class and orientation are coarse buckets forwarded to the
//! sanitization service as matching hints; they are never used for geometry
//! math inside this crate.

use serde::Serialize;

/// Page rotation recorded by the rasterizer.
///
/// Passed through to the service as metadata; bounding boxes are not
/// rotated by this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Snap arbitrary degrees reported by an engine to a quarter turn.
    /// Anything that is not a multiple of 90 falls back to no rotation.
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees.rem_euclid(360) {
            90 => Rotation::R90,
            180 => Rotation::R180,
            270 => Rotation::R270,
            _ => Rotation::R0,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

/// Coarse ISO paper bucket, guessed from the larger page dimension in points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PaperClass {
    A1,
    A2,
    A3,
    A4,
}

/// Page orientation on the wire: `H` landscape, `V` portrait
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Orientation {
    H,
    V,
}

/// Native page metadata at render scale 1, cached per (document, page)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width_pts: f32,
    pub height_pts: f32,
    pub rotation: Rotation,
}

impl PageGeometry {
    pub fn new(width_pts: f32, height_pts: f32, rotation: Rotation) -> Self {
        Self {
            width_pts,
            height_pts,
            rotation,
        }
    }

    /// Guess the paper bucket from the larger dimension.
    /// Thresholds match the backend's classifier.
    pub fn paper(&self) -> PaperClass {
        let max_dim = self.width_pts.max(self.height_pts);
        if max_dim > 2000.0 {
            PaperClass::A1
        } else if max_dim > 1500.0 {
            PaperClass::A2
        } else if max_dim > 1100.0 {
            PaperClass::A3
        } else {
            PaperClass::A4
        }
    }

    pub fn orientation(&self) -> Orientation {
        if self.width_pts >= self.height_pts {
            Orientation::H
        } else {
            Orientation::V
        }
    }
}
