mod extract;
mod fetch;
mod generate;

pub use extract::PlainTextExtractor;
pub use fetch::HttpFetcher;
pub use generate::ChatGenerator;
