//! The annotation store: the single mutable source of truth for committed
//! rectangles.
//!
//! All operations are synchronous and immediately consistent. Insertion
//! order is preserved across every mutation because it determines the zone
//! index used to key the submission payload's asset map.

use crate::domain::annotation::{AssetRef, RectAnnotation, RectId, ZoneKind};
use crate::domain::geometry::{self, PixelRect};

#[derive(Debug, Default)]
pub struct AnnotationStore {
    rects: Vec<RectAnnotation>,
    next_id: u64,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a pixel-space rectangle drawn on a surface of the given size.
    ///
    /// The rectangle is normalized and canonicalized before storage. Returns
    /// `None` without mutating anything when either dimension normalizes to
    /// zero (an accidental click or a fully out-of-bounds drag).
    pub fn add_rectangle(
        &mut self,
        document_index: usize,
        page: usize,
        rect: PixelRect,
        surface_w: f32,
        surface_h: f32,
    ) -> Option<RectId> {
        let normalized = geometry::to_normalized(rect, surface_w, surface_h);
        if normalized.is_empty() {
            log::debug!("rejecting zero-area rectangle on doc {document_index} page {page}");
            return None;
        }

        self.next_id += 1;
        let id = RectId(self.next_id);
        self.rects.push(RectAnnotation {
            id,
            document_index,
            page,
            normalized,
            kind: ZoneKind::Redact,
            asset: None,
        });
        Some(id)
    }

    /// Delete by id; no-op when the id is absent
    pub fn remove_rectangle(&mut self, id: RectId) {
        self.rects.retain(|r| r.id != id);
    }

    /// Change a rectangle's kind. Switching away from `Logo` drops any
    /// attached asset so a stale reference can never reach the payload.
    pub fn set_kind(&mut self, id: RectId, kind: ZoneKind) {
        if let Some(rect) = self.rects.iter_mut().find(|r| r.id == id) {
            rect.kind = kind;
            if kind != ZoneKind::Logo {
                rect.asset = None;
            }
        }
    }

    /// Attach a resolved asset reference; no-op unless the kind is `Logo`
    pub fn attach_asset(&mut self, id: RectId, asset: AssetRef) {
        if let Some(rect) = self.rects.iter_mut().find(|r| r.id == id)
            && rect.kind == ZoneKind::Logo
        {
            rect.asset = Some(asset);
        }
    }

    /// Remove every rectangle on one page of one document
    pub fn clear_page(&mut self, document_index: usize, page: usize) {
        self.rects
            .retain(|r| r.document_index != document_index || r.page != page);
    }

    /// Remove everything (session reset)
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Rectangles for one page, in insertion order
    pub fn list_for_page(
        &self,
        document_index: usize,
        page: usize,
    ) -> impl Iterator<Item = &RectAnnotation> {
        self.rects
            .iter()
            .filter(move |r| r.document_index == document_index && r.page == page)
    }

    /// All rectangles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &RectAnnotation> {
        self.rects.iter()
    }

    pub fn get(&self, id: RectId) -> Option<&RectAnnotation> {
        self.rects.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(store: &mut AnnotationStore, doc: usize, page: usize) -> RectId {
        store
            .add_rectangle(doc, page, PixelRect::new(10.0, 10.0, 110.0, 60.0), 800.0, 600.0)
            .unwrap()
    }

    #[test]
    fn zero_area_rectangle_never_enters_the_store() {
        let mut store = AnnotationStore::new();
        assert!(
            store
                .add_rectangle(0, 0, PixelRect::new(50.0, 10.0, 50.0, 90.0), 800.0, 600.0)
                .is_none()
        );
        assert!(
            store
                .add_rectangle(0, 0, PixelRect::new(10.0, 40.0, 90.0, 40.0), 800.0, 600.0)
                .is_none()
        );
        assert_eq!(store.list_for_page(0, 0).count(), 0);
    }

    #[test]
    fn out_of_bounds_drag_that_clamps_to_nothing_is_rejected() {
        let mut store = AnnotationStore::new();
        // Entirely to the right of the surface: clamps to a zero-width strip
        assert!(
            store
                .add_rectangle(0, 0, PixelRect::new(900.0, 10.0, 950.0, 60.0), 800.0, 600.0)
                .is_none()
        );
    }

    #[test]
    fn removed_id_never_listed_again() {
        let mut store = AnnotationStore::new();
        let a = add(&mut store, 0, 0);
        let b = add(&mut store, 0, 0);
        store.remove_rectangle(a);
        let ids: Vec<_> = store.list_for_page(0, 0).map(|r| r.id).collect();
        assert_eq!(ids, vec![b]);
        // removing again is a no-op
        store.remove_rectangle(a);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut store = AnnotationStore::new();
        let a = add(&mut store, 0, 0);
        store.remove_rectangle(a);
        let b = add(&mut store, 0, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn switching_kind_away_from_logo_clears_asset() {
        let mut store = AnnotationStore::new();
        let id = add(&mut store, 0, 0);
        store.set_kind(id, ZoneKind::Logo);
        store.attach_asset(id, AssetRef::new("logo-key"));
        assert!(store.get(id).unwrap().asset.is_some());
        store.set_kind(id, ZoneKind::Redact);
        assert!(store.get(id).unwrap().asset.is_none());
    }

    #[test]
    fn attach_asset_requires_logo_kind() {
        let mut store = AnnotationStore::new();
        let id = add(&mut store, 0, 0);
        store.attach_asset(id, AssetRef::new("logo-key"));
        assert!(store.get(id).unwrap().asset.is_none());
    }

    #[test]
    fn clear_page_leaves_other_pages_alone() {
        let mut store = AnnotationStore::new();
        add(&mut store, 0, 0);
        add(&mut store, 0, 1);
        let other_doc = add(&mut store, 1, 0);
        store.clear_page(0, 0);
        assert_eq!(store.list_for_page(0, 0).count(), 0);
        assert_eq!(store.list_for_page(0, 1).count(), 1);
        assert_eq!(store.list_for_page(1, 0).next().unwrap().id, other_doc);
    }

    #[test]
    fn insertion_order_survives_mutations() {
        let mut store = AnnotationStore::new();
        let a = add(&mut store, 0, 0);
        let b = add(&mut store, 0, 0);
        let c = add(&mut store, 0, 0);
        store.set_kind(b, ZoneKind::Logo);
        store.remove_rectangle(a);
        let ids: Vec<_> = store.list_for_page(0, 0).map(|r| r.id).collect();
        assert_eq!(ids, vec![b, c]);
    }
}
