//! Cancellable page rendering with stale-result suppression.
//!
//! One controller drives one display surface. Every request takes a fresh
//! monotonically increasing token; a completion is only published if its
//! token is still the latest one, so a slow early render can never overwrite
//! the surface after a faster later one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::future::BoxFuture;
use image::RgbaImage;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::page::{PageGeometry, Rotation};
use crate::session::state::Document;

/// Rasterization failure, as seen by the controller's consumer
#[derive(Debug, Error)]
pub enum RenderError {
    /// The engine acknowledged a cancellation. Never published as an event;
    /// a superseded render simply disappears.
    #[error("render cancelled")]
    Cancelled,
    /// Any other engine failure. The previously displayed surface stays up.
    #[error("rasterizer failed: {0}")]
    Engine(String),
}

/// One rasterized page as produced by the engine
pub struct RenderedPage {
    pub pixels: RgbaImage,
    /// Native page width in points at scale 1
    pub width_pts: f32,
    /// Native page height in points at scale 1
    pub height_pts: f32,
    pub rotation: Rotation,
}

/// Boundary to the external rasterization engine.
///
/// Implementations live outside this crate. The returned future must be
/// drop-cancellable; cancellation is best-effort and the controller ignores
/// late completions either way.
pub trait Rasterizer: Send + Sync {
    fn render(
        &self,
        bytes: Arc<[u8]>,
        page: usize,
        scale: f32,
    ) -> BoxFuture<'static, Result<RenderedPage, RenderError>>;
}

/// Completion events published to the overlay/UI side
#[derive(Debug)]
pub enum RenderEvent {
    /// A render finished and is still the latest request. The consumer
    /// should swap in the surface, cache the geometry, and repaint the
    /// overlay at the new size.
    Completed {
        token: u64,
        document: usize,
        page: usize,
        scale: f32,
        surface: RgbaImage,
        geometry: PageGeometry,
    },
    /// A render failed for a reason other than cancellation. Retryable by
    /// re-requesting; the previous surface remains displayed.
    Failed {
        token: u64,
        document: usize,
        page: usize,
        error: RenderError,
    },
}

/// Owns the single in-flight render task for one surface
pub struct RenderController {
    rasterizer: Arc<dyn Rasterizer>,
    events: mpsc::Sender<RenderEvent>,
    latest: Arc<AtomicU64>,
    inflight: Option<JoinHandle<()>>,
}

impl RenderController {
    /// Create a controller and the event stream its consumer drains
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> (Self, mpsc::Receiver<RenderEvent>) {
        let (events, rx) = mpsc::channel(16);
        (
            Self {
                rasterizer,
                events,
                latest: Arc::new(AtomicU64::new(0)),
                inflight: None,
            },
            rx,
        )
    }

    /// Start rendering a page, superseding any render still in flight.
    ///
    /// The previous task is aborted best-effort; if the engine finishes
    /// anyway, the stale completion is dropped by the token comparison.
    /// Returns the request token.
    pub fn request_render(&mut self, document: &Document, page: usize, scale: f32) -> u64 {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(prior) = self.inflight.take() {
            prior.abort();
        }

        log::debug!(
            "render request {token}: doc {} page {page} at {scale}x",
            document.index
        );

        let fut = self.rasterizer.render(document.bytes.clone(), page, scale);
        let latest = Arc::clone(&self.latest);
        let events = self.events.clone();
        let doc_index = document.index;

        self.inflight = Some(tokio::spawn(async move {
            let result = fut.await;

            if latest.load(Ordering::SeqCst) != token {
                log::debug!("render {token} superseded, dropping completion");
                return;
            }

            let event = match result {
                Ok(rendered) => {
                    let geometry =
                        PageGeometry::new(rendered.width_pts, rendered.height_pts, rendered.rotation);
                    RenderEvent::Completed {
                        token,
                        document: doc_index,
                        page,
                        scale,
                        surface: rendered.pixels,
                        geometry,
                    }
                }
                Err(RenderError::Cancelled) => {
                    log::debug!("render {token} cancelled by engine");
                    return;
                }
                Err(error) => {
                    log::error!("render {token} failed: {error}");
                    RenderEvent::Failed {
                        token,
                        document: doc_index,
                        page,
                        error,
                    }
                }
            };

            // The receiver going away just means the session is shutting down
            let _ = events.send(event).await;
        }));

        token
    }

    /// Whether a token still corresponds to the most recent request
    pub fn is_current(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }
}

/// Fetch a page's native geometry by rendering at scale 1.
///
/// Used by the payload builder when a page was never displayed; deliberately
/// independent of the current on-screen scale and of the controller's token
/// stream.
pub async fn probe_geometry(
    rasterizer: &dyn Rasterizer,
    bytes: Arc<[u8]>,
    page: usize,
) -> Result<PageGeometry, RenderError> {
    let rendered = rasterizer.render(bytes, page, 1.0).await?;
    Ok(PageGeometry::new(
        rendered.width_pts,
        rendered.height_pts,
        rendered.rotation,
    ))
}
