//! CLI parse: clap types for asc. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// asc - App Store Connect from the command line
#[derive(Parser, Debug)]
#[command(name = "asc", version)]
#[command(about = "App Store Connect from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// How a command prints its result.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format: json, table, markdown (md). Defaults to output.default_format.
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Paging flags for list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Page size (1-200)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
    pub limit: Option<u32>,

    /// Resume from a links.next URL
    #[arg(long)]
    pub next: Option<String>,

    /// Follow links.next and combine every page
    #[arg(long)]
    pub paginate: bool,
}

/// An `--app` id, falling back to `ASC_APP_ID`.
#[derive(Args, Debug, Clone)]
pub struct AppArg {
    /// App id
    #[arg(long = "app", env = "ASC_APP_ID")]
    pub app_id: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apps
    Apps {
        #[command(subcommand)]
        command: AppsCommands,
    },
    /// App Store versions
    Versions {
        #[command(subcommand)]
        command: VersionsCommands,
    },
    /// Builds
    Builds {
        #[command(subcommand)]
        command: BuildsCommands,
    },
    /// TestFlight pre-release versions
    PreReleaseVersions {
        #[command(subcommand)]
        command: PreReleaseVersionsCommands,
    },
    /// TestFlight beta groups
    BetaGroups {
        #[command(subcommand)]
        command: BetaGroupsCommands,
    },
    /// TestFlight beta testers
    BetaTesters {
        #[command(subcommand)]
        command: BetaTestersCommands,
    },
    /// Bundle identifiers
    BundleIds {
        #[command(subcommand)]
        command: SimpleListCommands,
    },
    /// Signing certificates
    Certificates {
        #[command(subcommand)]
        command: SimpleListCommands,
    },
    /// Provisioning profiles
    Profiles {
        #[command(subcommand)]
        command: SimpleListCommands,
    },
    /// Team users
    Users {
        #[command(subcommand)]
        command: SimpleListCommands,
    },
    /// Customer reviews
    Reviews {
        #[command(subcommand)]
        command: ReviewsCommands,
    },
    /// Webhooks
    Webhooks {
        #[command(subcommand)]
        command: WebhooksCommands,
    },
    /// Configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AppsCommands {
    /// List apps
    List {
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show one app
    Get {
        /// App id
        #[arg(long)]
        id: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show an app together with its App Store versions
    Overview {
        /// App id
        #[arg(long)]
        id: String,
        /// Number of versions to include (1-200)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=200))]
        limit: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// `list` scoped to an app.
#[derive(Subcommand, Debug)]
pub enum AppScopedListCommands {
    /// List for an app
    List {
        #[command(flatten)]
        app: AppArg,
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

pub type VersionsCommands = AppScopedListCommands;
pub type PreReleaseVersionsCommands = AppScopedListCommands;
pub type ReviewsCommands = AppScopedListCommands;

#[derive(Subcommand, Debug)]
pub enum BuildsCommands {
    /// List builds for an app
    List {
        #[command(flatten)]
        app: AppArg,
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the app a build belongs to
    App {
        /// Build id
        #[arg(long)]
        build: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum BetaGroupsCommands {
    /// List beta groups for an app
    List {
        #[command(flatten)]
        app: AppArg,
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Public link usage metrics for a group
    Metrics {
        /// Beta group id
        #[arg(long)]
        group: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Beta group ids linked to an app
    Linkages {
        #[command(flatten)]
        app: AppArg,
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum BetaTestersCommands {
    /// List beta testers for an app
    List {
        #[command(flatten)]
        app: AppArg,
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Remove a beta tester
    Delete {
        /// Beta tester id
        #[arg(long, conflicts_with = "email", required_unless_present = "email")]
        id: Option<String>,
        /// Look the tester up by email instead of id
        #[arg(long)]
        email: Option<String>,
        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Account-wide `list`.
#[derive(Subcommand, Debug)]
pub enum SimpleListCommands {
    /// List all
    List {
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum WebhooksCommands {
    /// List webhooks for an app
    List {
        #[command(flatten)]
        app: AppArg,
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List deliveries of a webhook
    Deliveries {
        /// Webhook id
        #[arg(long)]
        webhook: String,
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Delete a webhook
    Delete {
        /// Webhook id
        #[arg(long)]
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        confirm: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration with secrets masked
    Show,
    /// Write a starter config file
    Init {
        /// Destination (default: ASC_CONFIG_PATH or the global config path)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
