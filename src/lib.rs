pub use client::AthleClient;
pub use error::{AthleError, Result};
pub use model::*;
pub use pipeline::{ScrapeOptions, COMPETITIONS_PER_PAGE, DEFAULT_DELAY};
pub use progress::{NullProgress, Progress};

pub mod client;
pub mod error;
pub mod model;
mod pipeline;
pub mod progress;
pub(crate) mod scraper;
