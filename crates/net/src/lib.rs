#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for pagesum
//!
//! This crate owns the process-wide HTTP client and the per-URL fetch step
//! that turns every transport result into a reported [`FetchOutcome`].
//!
//! [`FetchOutcome`]: pagesum_types::FetchOutcome

mod client;
mod fetch;

pub use client::{parse_url, NetClient, NetConfig};
pub use fetch::{process_url, PageFetcher};
