//! Configuration for drawing behavior and submission

use serde::{Deserialize, Serialize};

/// Interactive drawing settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Minimum drag size in pixels; releases below this in either dimension
    /// are treated as accidental clicks and discarded
    pub min_drag_px: f32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self { min_drag_px: 4.0 }
    }
}

/// Settings for talking to the sanitization service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Full URL of the sanitize endpoint
    pub endpoint: String,
    /// Client name the service uses to version stored templates
    pub client_name: String,
    /// Match threshold forwarded to the service
    pub threshold: f32,
}

impl SubmitConfig {
    pub fn new(endpoint: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client_name: client_name.into(),
            threshold: 0.9,
        }
    }
}
