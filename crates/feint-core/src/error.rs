//! Error types for the feint core library, one enum per tool concern.

use std::path::PathBuf;

/// Errors from JWT segment decoding and forgery.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Token did not split into header.payload.signature.
    #[error("invalid JWT format: expected 3 dot-separated segments, found {0}")]
    PartCount(usize),

    /// Segment is not valid base64url.
    #[error("segment is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Segment decoded but is not JSON.
    #[error("segment is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Segment is JSON but not an object.
    #[error("decoded segment is not a JSON object")]
    NotAnObject,
}

/// Errors from OTP candidate enumeration.
#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    /// Width outside the supported range.
    #[error("candidate width must be 1..={max}, got {got}")]
    WidthOutOfRange { got: usize, max: usize },

    /// Excluded character is not a digit.
    #[error("excluded digit must be 0-9, got {0:?}")]
    NotADigit(char),

    /// Exclusion position does not exist in the candidate.
    #[error("exclusion position {pos} is outside the candidate width {width}")]
    PositionOutOfRange { pos: usize, width: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors from synthetic file generation.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Size value is negative or not a number.
    #[error("file size must be a non-negative number, got {0}")]
    BadSize(f64),

    /// Requested file cannot hold the format signature.
    #[error("requested size {requested} bytes is smaller than the {kind} signature ({signature} bytes)")]
    SizeTooSmall {
        requested: u64,
        kind: &'static str,
        signature: usize,
    },

    /// Chunk ceiling of zero would never make progress.
    #[error("chunk size must be at least 1 byte")]
    ZeroChunk,

    /// Destination directory could not be created.
    #[error("unable to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors from opaque-token decode/encode.
#[derive(Debug, thiserror::Error)]
pub enum TamperError {
    /// Token is not valid base64 even after padding correction.
    #[error("token is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Token decoded but is not JSON.
    #[error("token is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Token is JSON but not an object.
    #[error("decoded token is not a JSON object")]
    NotAnObject,
}

/// Errors from the HTTP probe session.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Client construction or header material was invalid.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Request could not be sent or the response never arrived.
    #[error("network error: {message}")]
    Network { message: String },
}
