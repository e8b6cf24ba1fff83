//! Recording infrastructure module
//!
//! Downloads call recordings from the telephony provider into scoped
//! temporary files.

mod http_fetcher;

pub use http_fetcher::HttpRecordingFetcher;
