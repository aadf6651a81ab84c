//! Asynchronous, cancellable page rasterization

pub mod controller;

pub use controller::{
    probe_geometry, Rasterizer, RenderController, RenderError, RenderEvent, RenderedPage,
};
