//! Geometric types and conversions between the three coordinate spaces:
//! raw surface pixels, normalized unit space, and document points.
//!
//! All conversions are pure functions. Rotation is carried as page metadata
//! and is never folded into these coordinates.

/// Point in surface-local pixel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rectangle in surface pixel coordinates, corner order as drawn
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl PixelRect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a rectangle from two drag endpoints
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Absolute width, independent of drag direction
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).abs()
    }

    /// Absolute height, independent of drag direction
    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).abs()
    }
}

/// Rectangle in normalized unit space.
///
/// Invariant: every coordinate lies in [0, 1] and `x1 <= x2`, `y1 <= y2`.
/// Only [`to_normalized`] constructs these from user input, so the invariant
/// holds regardless of drag direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl NormRect {
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// True when either dimension collapsed to zero
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Rectangle in document points (1/72 inch), the space the sanitization
/// service expects
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl PointRect {
    /// Wire representation: `[x1, y1, x2, y2]`
    pub fn to_bbox(self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// Convert a pixel rectangle to normalized unit space.
///
/// Coordinates are clamped to the surface bounds and canonicalized so the
/// result always satisfies the [`NormRect`] invariant, whatever direction
/// the rectangle was dragged in.
pub fn to_normalized(rect: PixelRect, surface_w: f32, surface_h: f32) -> NormRect {
    let x1 = rect.x1.clamp(0.0, surface_w);
    let x2 = rect.x2.clamp(0.0, surface_w);
    let y1 = rect.y1.clamp(0.0, surface_h);
    let y2 = rect.y2.clamp(0.0, surface_h);
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };

    NormRect {
        x1: min_x / surface_w,
        y1: min_y / surface_h,
        x2: max_x / surface_w,
        y2: max_y / surface_h,
    }
}

/// Scale a normalized rectangle back up to pixels on the current surface.
/// Used only for redraw; stored rectangles stay normalized.
pub fn to_pixels(rect: NormRect, surface_w: f32, surface_h: f32) -> PixelRect {
    PixelRect {
        x1: rect.x1 * surface_w,
        y1: rect.y1 * surface_h,
        x2: rect.x2 * surface_w,
        y2: rect.y2 * surface_h,
    }
}

/// Convert a normalized rectangle to document points.
///
/// `page_w_pts`/`page_h_pts` must be the native page size at scale 1, never
/// the current on-screen surface size, so submitted coordinates stay
/// resolution-independent.
pub fn to_document_points(rect: NormRect, page_w_pts: f32, page_h_pts: f32) -> PointRect {
    PointRect {
        x1: rect.x1 * page_w_pts,
        y1: rect.y1 * page_h_pts,
        x2: rect.x2 * page_w_pts,
        y2: rect.y2 * page_h_pts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn round_trip_reproduces_pixels() {
        let rect = PixelRect::new(13.0, 27.5, 301.0, 444.25);
        let norm = to_normalized(rect, 800.0, 600.0);
        let back = to_pixels(norm, 800.0, 600.0);
        assert!(close(back.x1, 13.0, 1e-3));
        assert!(close(back.y1, 27.5, 1e-3));
        assert!(close(back.x2, 301.0, 1e-3));
        assert!(close(back.y2, 444.25, 1e-3));
    }

    #[test]
    fn canonical_ordering_for_any_drag_direction() {
        // Same rectangle dragged from each of the four corners
        let drags = [
            PixelRect::new(10.0, 20.0, 110.0, 220.0),
            PixelRect::new(110.0, 20.0, 10.0, 220.0),
            PixelRect::new(10.0, 220.0, 110.0, 20.0),
            PixelRect::new(110.0, 220.0, 10.0, 20.0),
        ];
        for drag in drags {
            let norm = to_normalized(drag, 800.0, 600.0);
            assert!(norm.x1 <= norm.x2);
            assert!(norm.y1 <= norm.y2);
            assert!(close(norm.x1, 10.0 / 800.0, 1e-6));
            assert!(close(norm.y2, 220.0 / 600.0, 1e-6));
        }
    }

    #[test]
    fn coordinates_outside_surface_are_clamped() {
        let norm = to_normalized(PixelRect::new(-50.0, -10.0, 900.0, 700.0), 800.0, 600.0);
        assert_eq!(norm.x1, 0.0);
        assert_eq!(norm.y1, 0.0);
        assert_eq!(norm.x2, 1.0);
        assert_eq!(norm.y2, 1.0);
    }

    #[test]
    fn normalized_values_match_reference_scenario() {
        let norm = to_normalized(PixelRect::new(10.0, 10.0, 110.0, 60.0), 800.0, 600.0);
        assert!(close(norm.x1, 0.0125, 1e-3));
        assert!(close(norm.y1, 0.0167, 1e-3));
        assert!(close(norm.x2, 0.1375, 1e-3));
        assert!(close(norm.y2, 0.1, 1e-3));
    }

    #[test]
    fn full_surface_maps_to_full_page_in_points() {
        // Letter page at 1.5x zoom: surface is 918x1188 but conversion must
        // use the native 612x792 size.
        let norm = to_normalized(PixelRect::new(0.0, 0.0, 918.0, 1188.0), 918.0, 1188.0);
        let pts = to_document_points(norm, 612.0, 792.0);
        assert_eq!(pts.to_bbox(), [0.0, 0.0, 612.0, 792.0]);
    }
}
