//! Integration tests for the asc crate.

mod cli_output;
mod client_http;
mod config_loading;
mod output_registry;
mod pagination_engine;
