//! Pure domain types: geometry, page metadata, and annotation entities

pub mod annotation;
pub mod geometry;
pub mod page;

pub use annotation::{AssetRef, RectAnnotation, RectId, ZoneKind};
pub use geometry::{NormRect, PixelRect, Point, PointRect};
pub use page::{Orientation, PageGeometry, PaperClass, Rotation};
