pub mod crawler;
pub mod extractor;
pub mod fetcher;
pub mod logger;
pub mod registry;
pub mod throttle;
pub mod urls;
pub mod writer;

// Exporting types for convenience
pub use crawler::{Crawler, ReviewRecord};
pub use extractor::{Extractor, Review};
pub use fetcher::{Fetcher, ScrapeError};
pub use registry::CategoryRegistry;
pub use throttle::Throttle;
