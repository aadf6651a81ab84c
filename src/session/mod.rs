//! Mutable session state: the document selection and the annotation store

pub mod state;
pub mod store;

pub use state::{Document, Session};
pub use store::AnnotationStore;
