pub mod client;
pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod types;
