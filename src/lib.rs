pub mod config;
pub mod error;
pub mod freshness;
pub mod ingestor;
pub mod parser;
pub mod report;
pub mod runner;
pub mod sqlite_pragma;
pub mod store;
pub mod types;
pub mod walker;
