//! Annotation entity types.
//!
//! A committed annotation is stored in normalized coordinates so it survives
//! zoom changes without recomputation; pixel and point forms are derived on
//! demand by the transform functions in [`super::geometry`].

use serde::Serialize;

use super::geometry::NormRect;

/// Process-unique annotation id, assigned at commit time and never reused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RectId(pub u64);

impl std::fmt::Display for RectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the zone does on the page: black out content, or overlay a
/// replacement asset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    #[default]
    Redact,
    Logo,
}

/// Opaque key for an uploaded replacement asset
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

/// A committed rectangular annotation on one page of one document
#[derive(Clone, Debug, PartialEq)]
pub struct RectAnnotation {
    pub id: RectId,
    /// Index of the document within the session's selection list
    pub document_index: usize,
    /// Zero-based page number
    pub page: usize,
    pub normalized: NormRect,
    pub kind: ZoneKind,
    /// Present only for [`ZoneKind::Logo`]; `None` means the asset upload
    /// has not resolved yet
    pub asset: Option<AssetRef>,
}
