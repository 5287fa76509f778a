// Triton benchmark - Library root for testing

pub mod bench;
pub mod config;
pub mod error;
pub mod http_client;
pub mod models;
pub mod tokenizer;
