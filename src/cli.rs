//! CLI domain: parse, route, and error mapping only.
//! Rendering lives in `crate::output`; the route table calls into the client.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{
    AppArg, AppScopedListCommands, AppsCommands, BetaGroupsCommands, BetaTestersCommands,
    BuildsCommands, Cli, Commands, ConfigCommands, ListArgs, OutputArgs, SimpleListCommands,
    WebhooksCommands,
};
pub use route::RunContext;
