pub mod analyzers;
pub mod config;
pub mod parsers;
pub mod types;
