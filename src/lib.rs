//! zonemark: the interactive annotation core for document sanitization.
//!
//! An operator marks rectangular zones on rendered document pages, either to
//! redact content or to overlay a replacement asset. This crate owns the
//! hard parts of that flow:
//!
//! - the per-document, per-page annotation store ([`session`]),
//! - the conversions between pointer pixels, normalized unit space, and
//!   document points ([`domain::geometry`]),
//! - the cancellable page-render pipeline with stale-result suppression
//!   ([`render`]),
//! - the pointer-driven drawing state machine ([`interaction`]) and the
//!   overlay painter ([`overlay`]),
//! - payload assembly and submission to the remote service ([`submit`]).
//!
//! The rasterization engine is consumed through the [`render::Rasterizer`]
//! trait; UI chrome (file pickers, buttons, windowing) lives outside the
//! crate and drives it through these modules. All state is session-local
//! and discarded on [`session::Session::reset`].

pub mod config;
pub mod domain;
pub mod interaction;
pub mod overlay;
pub mod render;
pub mod session;
pub mod submit;

pub use config::{DrawConfig, SubmitConfig};
pub use domain::{AssetRef, NormRect, PixelRect, Point, RectAnnotation, RectId, ZoneKind};
pub use interaction::{DraftState, DrawController};
pub use render::{Rasterizer, RenderController, RenderError, RenderEvent, RenderedPage};
pub use session::{AnnotationStore, Document, Session};
pub use submit::{build_submission, SubmitClient, SubmitError, Submission};
