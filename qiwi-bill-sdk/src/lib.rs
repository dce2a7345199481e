//! Typed client for the QIWI bill payments REST API.
//!
//! The [`objects`] module holds the wire DTOs and the checkout form URL
//! builder. The HTTP client lives in [`client`] and is gated behind the
//! `client` cargo feature (on by default).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;

/// Client name stamped into `customFields.apiClient` of every bill.
pub const CLIENT_NAME: &str = "rust_sdk";

/// Client version stamped into `customFields.apiClientVersion`.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL of the bills API. Every bill and refund path is joined onto it.
pub const BILLS_URL: &str = "https://api.qiwi.com/partner/bill/v1/bills/";

/// Base URL of the hosted checkout form.
pub const PAYMENT_URL: &str = "https://oplata.qiwi.com/create";
