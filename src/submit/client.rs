//! HTTP client for the remote sanitization service.
//!
//! The service takes one multipart form per batch: the original document
//! bytes, the JSON zone list, the zone-index-to-asset map, free-text erase
//! terms, a text replacement mapping, and a match threshold. The response is
//! handed back as-is (manifest, archive, or single file) for a packaging
//! collaborator to unpack; this crate does not post-process results.
//!
//! A failed submission leaves the session untouched, so the operator can
//! retry without redrawing anything.

use std::collections::HashMap;

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

use crate::config::SubmitConfig;
use crate::session::state::Session;

use super::payload::Submission;

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Network or protocol failure while talking to the service
    #[error("submission transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status
    #[error("sanitization service returned {status}: {body}")]
    Service {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to encode submission payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One processed output file named by the service manifest
#[derive(Debug, Clone, Deserialize)]
pub struct OutputFile {
    #[serde(rename = "originalName")]
    pub original_name: String,
    #[serde(default)]
    pub path: Option<String>,
}

/// JSON manifest response
#[derive(Debug, Clone, Deserialize)]
pub struct OutputManifest {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub files: Vec<OutputFile>,
    #[serde(default)]
    pub template_id: Option<String>,
    /// Zones the service matched with low confidence
    #[serde(default)]
    pub low_conf: serde_json::Value,
}

/// Whatever the service sent back, classified by content type
#[derive(Debug)]
pub enum SubmitResponse {
    Manifest(OutputManifest),
    Archive(Vec<u8>),
    File {
        name: Option<String>,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseShape {
    Manifest,
    Archive,
    File,
}

fn classify_content_type(content_type: &str) -> ResponseShape {
    let ct = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    if ct == "application/json" {
        ResponseShape::Manifest
    } else if ct == "application/zip" || ct == "application/x-zip-compressed" {
        ResponseShape::Archive
    } else {
        ResponseShape::File
    }
}

fn filename_from_disposition(disposition: &str) -> Option<String> {
    disposition.split(';').find_map(|part| {
        let part = part.trim();
        part.strip_prefix("filename=")
            .map(|name| name.trim_matches('"').to_string())
    })
}

/// Posts assembled submissions to the sanitize endpoint
pub struct SubmitClient {
    http: reqwest::Client,
    config: SubmitConfig,
}

impl SubmitClient {
    pub fn new(config: SubmitConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Upload every session document together with the zone list.
    ///
    /// `erase_terms` are free-text strings the service should find and
    /// remove; `replacements` maps found text to its substitute.
    pub async fn submit(
        &self,
        session: &Session,
        submission: &Submission,
        erase_terms: &[String],
        replacements: &HashMap<String, String>,
    ) -> Result<SubmitResponse, SubmitError> {
        let mut form = Form::new()
            .text("template_zones", serde_json::to_string(&submission.zones)?)
            .text("image_map", serde_json::to_string(&submission.asset_map)?)
            .text("manual_names", serde_json::to_string(erase_terms)?)
            .text("text_replacements", serde_json::to_string(replacements)?)
            .text("threshold", self.config.threshold.to_string())
            .text("client_name", self.config.client_name.clone());

        for doc in &session.documents {
            let part = Part::bytes(doc.bytes.to_vec())
                .file_name(doc.name.clone())
                .mime_str("application/pdf")?;
            form = form.part("files", part);
        }

        log::info!(
            "submitting {} zones across {} documents to {}",
            submission.zones.len(),
            session.documents.len(),
            self.config.endpoint
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubmitError::Service { status, body });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        match classify_content_type(&content_type) {
            ResponseShape::Manifest => Ok(SubmitResponse::Manifest(response.json().await?)),
            ResponseShape::Archive => Ok(SubmitResponse::Archive(response.bytes().await?.to_vec())),
            ResponseShape::File => {
                let name = response
                    .headers()
                    .get(CONTENT_DISPOSITION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(filename_from_disposition);
                Ok(SubmitResponse::File {
                    name,
                    bytes: response.bytes().await?.to_vec(),
                })
            }
        }
    }
}
