//! Builds the wire-format zone list for the sanitization service.
//!
//! Zones are emitted walking documents in selection order, pages ascending,
//! rectangles in insertion order. A zone's position in the output array is
//! its cross-reference key: `asset_map[index]` carries the uploaded asset
//! for `logo` zones that have one.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::domain::annotation::{AssetRef, RectId, ZoneKind};
use crate::domain::geometry;
use crate::domain::page::{Orientation, PaperClass};
use crate::render::controller::{probe_geometry, Rasterizer, RenderError};
use crate::session::state::Session;

/// One submitted rectangle in document-point coordinates
#[derive(Clone, Debug, Serialize)]
pub struct Zone {
    #[serde(rename = "file_idx")]
    pub document_index: usize,
    /// Zero-based page number
    pub page: usize,
    /// `[x1, y1, x2, y2]` in points
    pub bbox: [f32; 4],
    pub paper: PaperClass,
    pub orientation: Orientation,
    /// Native page `[width, height]` in points at scale 1
    pub page_size: [f32; 2],
    /// Page rotation in degrees, passed through as metadata
    pub rotation: u16,
    pub kind: ZoneKind,
}

/// A `logo` zone submitted before its asset upload resolved.
/// The zone still redacts; only the overlay is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnresolvedAsset {
    pub zone_index: usize,
    pub rect_id: RectId,
}

/// The assembled submission payload
#[derive(Debug, Default)]
pub struct Submission {
    pub zones: Vec<Zone>,
    /// Zone index -> resolved asset key, only for resolved `logo` zones
    pub asset_map: HashMap<usize, AssetRef>,
    /// Warnings to surface to the operator; never fatal
    pub warnings: Vec<UnresolvedAsset>,
}

/// Re-derive every rectangle's point-space coordinates and assemble the
/// zone list.
///
/// Pages whose native geometry was never cached by a render are probed at
/// scale 1 through the rasterizer; the current on-screen scale is never
/// used, so the output is resolution-independent.
pub async fn build_submission(
    session: &Session,
    rasterizer: &dyn Rasterizer,
) -> Result<Submission, RenderError> {
    let mut submission = Submission::default();

    for doc in &session.documents {
        let pages: BTreeSet<usize> = session
            .store
            .iter()
            .filter(|r| r.document_index == doc.index)
            .map(|r| r.page)
            .collect();

        for page in pages {
            let geometry_for_page = match session.geometry(doc.index, page) {
                Some(cached) => *cached,
                None => probe_geometry(rasterizer, doc.bytes.clone(), page).await?,
            };

            for rect in session.store.list_for_page(doc.index, page) {
                let pts = geometry::to_document_points(
                    rect.normalized,
                    geometry_for_page.width_pts,
                    geometry_for_page.height_pts,
                );
                let zone_index = submission.zones.len();
                submission.zones.push(Zone {
                    document_index: doc.index,
                    page,
                    bbox: pts.to_bbox(),
                    paper: geometry_for_page.paper(),
                    orientation: geometry_for_page.orientation(),
                    page_size: [geometry_for_page.width_pts, geometry_for_page.height_pts],
                    rotation: geometry_for_page.rotation.degrees(),
                    kind: rect.kind,
                });

                if rect.kind == ZoneKind::Logo {
                    match &rect.asset {
                        Some(asset) => {
                            submission.asset_map.insert(zone_index, asset.clone());
                        }
                        None => {
                            log::warn!(
                                "logo zone {zone_index} (rect {}) has no resolved asset; \
                                 it will redact without an overlay",
                                rect.id
                            );
                            submission.warnings.push(UnresolvedAsset {
                                zone_index,
                                rect_id: rect.id,
                            });
                        }
                    }
                }
            }
        }
    }

    Ok(submission)
}
