//! Outbound request construction and dispatch.

mod service;

pub use service::{BodyFormat, RequestService, TokenResolver};
