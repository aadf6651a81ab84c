//! Overlay painting for committed and in-progress rectangles.
//!
//! The overlay is a transparent pixmap aligned 1:1 with the rasterized page
//! surface. Painting is stateless: the pixmap is fully cleared, committed
//! rectangles are scaled up from their normalized form against the current
//! surface size (so zoom changes repaint correctly), and the draft is drawn
//! last in a distinct dashed style.

use tiny_skia::{Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform};

use crate::domain::annotation::ZoneKind;
use crate::domain::geometry::{self, PixelRect};
use crate::session::store::AnnotationStore;

/// Overlay colors as RGBA bytes
#[derive(Clone, Copy, Debug)]
pub struct OverlayStyle {
    pub redact_fill: [u8; 4],
    pub logo_fill: [u8; 4],
    pub committed_stroke: [u8; 4],
    pub draft_fill: [u8; 4],
    pub draft_stroke: [u8; 4],
    pub stroke_width: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            redact_fill: [0, 0, 0, 150],
            logo_fill: [30, 120, 190, 110],
            committed_stroke: [255, 255, 255, 255],
            draft_fill: [0, 0, 0, 60],
            draft_stroke: [255, 255, 255, 230],
            stroke_width: 1.5,
        }
    }
}

/// Allocate a transparent overlay surface matching the page surface
pub fn overlay_surface(width: u32, height: u32) -> Option<Pixmap> {
    Pixmap::new(width, height)
}

/// Repaint the whole overlay for one page.
///
/// Safe to call on every store mutation, page switch, zoom change, or
/// pointer move; it only writes pixels.
pub fn paint_overlay(
    pixmap: &mut Pixmap,
    store: &AnnotationStore,
    document_index: usize,
    page: usize,
    draft: Option<PixelRect>,
    style: &OverlayStyle,
) {
    pixmap.fill(tiny_skia::Color::TRANSPARENT);
    let surface_w = pixmap.width() as f32;
    let surface_h = pixmap.height() as f32;

    for annotation in store.list_for_page(document_index, page) {
        let px = geometry::to_pixels(annotation.normalized, surface_w, surface_h);
        let fill = match annotation.kind {
            ZoneKind::Redact => style.redact_fill,
            ZoneKind::Logo => style.logo_fill,
        };
        fill_rect(pixmap, &px, fill);
        stroke_rect(pixmap, &px, style.committed_stroke, style.stroke_width, None);
    }

    if let Some(draft) = draft {
        // Canonicalize the live drag so the preview never has negative extent
        let norm = geometry::to_normalized(draft, surface_w, surface_h);
        let px = geometry::to_pixels(norm, surface_w, surface_h);
        fill_rect(pixmap, &px, style.draft_fill);
        let dash = StrokeDash::new(vec![6.0, 4.0], 0.0);
        stroke_rect(pixmap, &px, style.draft_stroke, style.stroke_width, dash);
    }
}

fn fill_rect(pixmap: &mut Pixmap, rect: &PixelRect, rgba: [u8; 4]) {
    let Some(skia_rect) = Rect::from_ltrb(rect.x1, rect.y1, rect.x2, rect.y2) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]);
    pixmap.fill_rect(skia_rect, &paint, Transform::identity(), None);
}

fn stroke_rect(
    pixmap: &mut Pixmap,
    rect: &PixelRect,
    rgba: [u8; 4],
    width: f32,
    dash: Option<StrokeDash>,
) {
    let Some(skia_rect) = Rect::from_ltrb(rect.x1, rect.y1, rect.x2, rect.y2) else {
        return;
    };
    let path = PathBuilder::from_rect(skia_rect);
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]);
    paint.anti_alias = true;
    let stroke = Stroke {
        width,
        dash,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
