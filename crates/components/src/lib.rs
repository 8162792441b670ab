//! sdui-components: server-driven UI component schema and decoding.
//!
//! Provides typed records for every component kind a server may send
//! (Banner, Card, Button, Product, Transaction, Dashboard, Chart,
//! Profile, Settings) and a single `decode()` entry point that turns a
//! `_type`-tagged JSON array into an ordered `Vec<Component>`.
//!
//! Decoding is strict by default: one malformed element fails the whole
//! payload. `decode_lenient()` is the explicit alternative that skips
//! bad elements and reports them.

pub mod deserialize;
pub mod serialize;
pub mod source;
pub mod types;

pub use deserialize::{
    decode, decode_component, decode_lenient, decode_value, decode_with, DecodeError,
    DecodeOptions, LenientDecode,
};
pub use serialize::{encode, encode_pretty, to_value};
pub use source::{ComponentSource, FileSource, SourceError, StaticSource, SAMPLE_PAYLOAD};
pub use types::*;
