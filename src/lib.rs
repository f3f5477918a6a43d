pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod pipeline;

pub use db::Database;
