//! Payload assembly and submission to the sanitization service

pub mod client;
pub mod payload;

pub use client::{OutputFile, OutputManifest, SubmitClient, SubmitError, SubmitResponse};
pub use payload::{build_submission, Submission, UnresolvedAsset, Zone};
