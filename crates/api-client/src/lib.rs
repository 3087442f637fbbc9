pub mod client;
pub mod error;
pub mod service;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use service::{ListingRequest, SummarizeResponse, VideoService};
pub use vidbrief_core;
