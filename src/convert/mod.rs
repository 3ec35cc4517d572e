//! Conversion pipeline: request model, service client, background worker
//!
//! - `request.rs` - output format, option flags, and the POST body
//! - `client.rs` - blocking HTTP client and response-envelope decoding
//! - `worker.rs` - per-submission background thread and outcome channel

pub mod client;
pub mod request;
pub mod worker;

pub use client::{ConvertClient, DEFAULT_ENDPOINT};
pub use request::{ConversionRequest, Format, OptionSet, OPTION_ALL_DAY_EVENTS};
pub use worker::{ConversionOutcome, ConversionWorker};
