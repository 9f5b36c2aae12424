// Feed ingestion
// Turns RSS/Atom documents into items the image processor can work on

pub mod parser;

pub use parser::parse_feed;
