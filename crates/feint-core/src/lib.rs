//! Core primitives for the feint red-team toolkit: JWT forgery, OTP
//! candidate enumeration, synthetic file generation, and bearer-token
//! tamper/replay. The four tool modules are independent of each other;
//! only the [`Claims`] alias is shared.

pub mod error;
pub mod jwt;
pub mod otp;
pub mod probe;
pub mod synth;
pub mod tamper;

/// Decoded token claim set.
///
/// Token payload schemas are not fixed in advance, so values stay
/// dynamically typed JSON.
pub type Claims = serde_json::Map<String, serde_json::Value>;
