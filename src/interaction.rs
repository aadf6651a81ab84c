//! Pointer-driven drawing state machine.
//!
//! Translates raw pointer events on the overlay surface into a draft
//! rectangle and, on confirmation, commits it to the annotation store.
//! The machine is independent of rendering: it never blocks on or reads
//! from the rasterization pipeline.
//!
//! States: `Idle -> Drawing -> (PendingConfirm | Idle)`. The release either
//! discards drags below the minimum threshold or parks the draft for an
//! explicit confirm/cancel, so the operator can review placement before it
//! becomes permanent.

use crate::config::DrawConfig;
use crate::domain::annotation::RectId;
use crate::domain::geometry::{PixelRect, Point};
use crate::session::store::AnnotationStore;

/// Current drawing state. The draft stays in pixel space; it is only
/// normalized when committed through the store.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DraftState {
    #[default]
    Idle,
    Drawing {
        start: Point,
        current: Point,
    },
    PendingConfirm {
        draft: PixelRect,
    },
}

/// Drives [`DraftState`] from pointer events.
///
/// Positions must be surface-local (relative to the overlay's bounding box,
/// not the viewport); the caller owns that translation.
#[derive(Debug, Default)]
pub struct DrawController {
    state: DraftState,
    config: DrawConfig,
}

impl DrawController {
    pub fn new(config: DrawConfig) -> Self {
        Self {
            state: DraftState::Idle,
            config,
        }
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    /// The live rectangle the overlay should paint, if any
    pub fn draft_rect(&self) -> Option<PixelRect> {
        match self.state {
            DraftState::Idle => None,
            DraftState::Drawing { start, current } => Some(PixelRect::from_points(start, current)),
            DraftState::PendingConfirm { draft } => Some(draft),
        }
    }

    /// Begin a drag. Ignored unless idle, so a stray second button press
    /// mid-drag cannot restart the draft.
    pub fn pointer_down(&mut self, pos: Point) {
        if self.state == DraftState::Idle {
            self.state = DraftState::Drawing {
                start: pos,
                current: pos,
            };
        }
    }

    /// Update the drag endpoint. No-op outside `Drawing`.
    pub fn pointer_move(&mut self, pos: Point) {
        if let DraftState::Drawing { start, .. } = self.state {
            self.state = DraftState::Drawing {
                start,
                current: pos,
            };
        }
    }

    /// Finish the drag. Drags under the minimum threshold in either
    /// dimension are discarded as accidental clicks.
    pub fn pointer_up(&mut self, pos: Point) {
        if let DraftState::Drawing { start, .. } = self.state {
            let draft = PixelRect::from_points(start, pos);
            if draft.width() < self.config.min_drag_px || draft.height() < self.config.min_drag_px {
                self.state = DraftState::Idle;
            } else {
                self.state = DraftState::PendingConfirm { draft };
            }
        }
    }

    /// Pointer left the surface; treated exactly like a release at the last
    /// known position for robustness.
    pub fn pointer_leave(&mut self) {
        if let DraftState::Drawing { current, .. } = self.state {
            self.pointer_up(current);
        }
    }

    /// Commit the pending draft to the store for the given page and surface.
    /// Returns the new id, or `None` when there was nothing to commit or the
    /// draft normalized to zero area.
    pub fn confirm(
        &mut self,
        store: &mut AnnotationStore,
        document_index: usize,
        page: usize,
        surface_w: f32,
        surface_h: f32,
    ) -> Option<RectId> {
        if let DraftState::PendingConfirm { draft } = self.state {
            self.state = DraftState::Idle;
            store.add_rectangle(document_index, page, draft, surface_w, surface_h)
        } else {
            None
        }
    }

    /// Discard the pending draft
    pub fn cancel(&mut self) {
        if matches!(self.state, DraftState::PendingConfirm { .. }) {
            self.state = DraftState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> DrawController {
        DrawController::new(DrawConfig::default())
    }

    #[test]
    fn tiny_drag_is_discarded_as_a_click() {
        let mut ctl = controller();
        ctl.pointer_down(Point::new(50.0, 50.0));
        ctl.pointer_move(Point::new(51.0, 52.0));
        ctl.pointer_up(Point::new(51.0, 52.0));
        assert_eq!(ctl.state(), DraftState::Idle);
        assert!(ctl.draft_rect().is_none());
    }

    #[test]
    fn real_drag_waits_for_confirmation() {
        let mut ctl = controller();
        ctl.pointer_down(Point::new(10.0, 10.0));
        ctl.pointer_move(Point::new(60.0, 40.0));
        ctl.pointer_up(Point::new(110.0, 60.0));
        assert_eq!(
            ctl.draft_rect(),
            Some(PixelRect::new(10.0, 10.0, 110.0, 60.0))
        );
        assert!(matches!(ctl.state(), DraftState::PendingConfirm { .. }));
    }

    #[test]
    fn confirm_commits_to_the_store() {
        let mut ctl = controller();
        let mut store = AnnotationStore::new();
        ctl.pointer_down(Point::new(10.0, 10.0));
        ctl.pointer_up(Point::new(110.0, 60.0));
        let id = ctl.confirm(&mut store, 0, 2, 800.0, 600.0);
        assert!(id.is_some());
        assert_eq!(ctl.state(), DraftState::Idle);
        assert_eq!(store.list_for_page(0, 2).count(), 1);
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut ctl = controller();
        let mut store = AnnotationStore::new();
        ctl.pointer_down(Point::new(10.0, 10.0));
        ctl.pointer_up(Point::new(110.0, 60.0));
        ctl.cancel();
        assert_eq!(ctl.state(), DraftState::Idle);
        assert!(ctl.confirm(&mut store, 0, 0, 800.0, 600.0).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn pointer_leave_acts_like_release() {
        let mut ctl = controller();
        ctl.pointer_down(Point::new(10.0, 10.0));
        ctl.pointer_move(Point::new(90.0, 70.0));
        ctl.pointer_leave();
        assert_eq!(
            ctl.draft_rect(),
            Some(PixelRect::new(10.0, 10.0, 90.0, 70.0))
        );
    }

    #[test]
    fn events_outside_their_state_are_ignored() {
        let mut ctl = controller();
        // move/up before down
        ctl.pointer_move(Point::new(5.0, 5.0));
        ctl.pointer_up(Point::new(5.0, 5.0));
        assert_eq!(ctl.state(), DraftState::Idle);

        // a second down mid-drag does not restart the draft
        ctl.pointer_down(Point::new(10.0, 10.0));
        ctl.pointer_down(Point::new(99.0, 99.0));
        ctl.pointer_up(Point::new(80.0, 80.0));
        assert_eq!(
            ctl.draft_rect(),
            Some(PixelRect::new(10.0, 10.0, 80.0, 80.0))
        );
    }

    #[test]
    fn reverse_drag_commits_canonicalized() {
        let mut ctl = controller();
        let mut store = AnnotationStore::new();
        ctl.pointer_down(Point::new(110.0, 60.0));
        ctl.pointer_up(Point::new(10.0, 10.0));
        let id = ctl.confirm(&mut store, 0, 0, 800.0, 600.0).unwrap();
        let rect = store.get(id).unwrap().normalized;
        assert!(rect.x1 <= rect.x2 && rect.y1 <= rect.y2);
    }
}
