//! Encoding of typed components back into the wire format.
//!
//! Output carries both `_type` and `type` on every top-level element.
//! The `type` value is written as stored, so a component whose `type_tag`
//! differs from its kind only decodes again with
//! `DecodeOptions { enforce_type_tag: false }`.

use crate::types::Component;

/// Encode components as a compact JSON array.
pub fn encode(components: &[Component]) -> Result<String, serde_json::Error> {
    serde_json::to_string(components)
}

/// Encode components as an indented JSON array.
pub fn encode_pretty(components: &[Component]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(components)
}

/// Encode components as a `serde_json::Value` array.
pub fn to_value(components: &[Component]) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(components)
}
