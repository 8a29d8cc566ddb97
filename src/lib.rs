pub mod parser;
pub mod scraper;
pub mod types;
pub mod utils;
pub mod writer;

pub use scraper::WebScraper;

pub(crate) const SOURCE_URL: &str =
    "https://www.soyfreelancer.com/blog/codigos-postales-costa-rica/";

// The source blocks generic client user-agents, so we present a browser one.
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
