//! asc: App Store Connect from Rust
//!
//! A client library and CLI for the App Store Connect JSON:API endpoints. Response
//! types share one shape (`data` plus `links`), so pagination and output rendering
//! are generic: the pagination engine follows `links.next` cursors for any list
//! response, and the output registry maps each concrete response type to the
//! function that turns it into table rows.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pagination;
pub mod types;

pub use client::{AscClient, RequestContext};
pub use error::{ApiError, OutputError, PaginationError};
pub use output::{print_output, render_by_registry, OutputFormat, OutputRegistry, Renderable};
pub use pagination::{paginate_all, paginate_all_as, PaginatedResponse};
