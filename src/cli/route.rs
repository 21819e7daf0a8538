//! CLI route: single route table and run context. Dispatches to the client and
//! the output registry.

use crate::cli::parse::{
    AppScopedListCommands, AppsCommands, BetaGroupsCommands, BetaTestersCommands, BuildsCommands,
    Commands, ConfigCommands, ListArgs, OutputArgs, SimpleListCommands, WebhooksCommands,
};
use crate::client::{endpoints, AscClient, Endpoint, ListOptions, RequestContext};
use crate::config::{validation_failed, AscConfig, ConfigLoader};
use crate::error::{ApiError, OutputError};
use crate::output::{print_output, OutputFormat, Renderable};
use crate::pagination::PaginatedResponse;
use crate::types::{
    AppOverview, AppResponse, AppStoreVersionsResponse, AppsResponse, BetaGroupMetricsResponse,
    BetaGroupsResponse, BetaTesterDeleteResult, BetaTestersResponse, BuildAppLinkageResponse,
    BuildsResponse, BundleIdsResponse, CertificatesResponse, CustomerReviewsResponse,
    LinkagesResponse, PreReleaseVersionsResponse, ProfilesResponse, UsersResponse,
    WebhookDeleteResult, WebhookDeliveriesResponse, WebhooksResponse,
};
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Runtime context for CLI execution: loaded config and the root request context.
pub struct RunContext {
    config: AscConfig,
    config_path: Option<PathBuf>,
    request: RequestContext,
    client: Option<AscClient>,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path.as_deref() {
            Some(path) => ConfigLoader::load_with_path(path)?,
            None => ConfigLoader::load()?,
        };
        let mut context = Self::from_config(config);
        context.config_path = config_path;
        Ok(context)
    }

    /// Run context over an already-loaded config.
    pub fn from_config(config: AscConfig) -> Self {
        Self {
            config,
            config_path: None,
            request: RequestContext::new(),
            client: None,
        }
    }

    /// Use `client` for API commands instead of building one from config.
    pub fn with_client(mut self, client: AscClient) -> Self {
        self.client = Some(client);
        self
    }

    pub fn config(&self) -> &AscConfig {
        &self.config
    }

    /// Root context; cancelling it aborts the running command.
    pub fn request_context(&self) -> &RequestContext {
        &self.request
    }

    fn client(&self) -> Result<AscClient, ApiError> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        self.config.validate().map_err(|errors| validation_failed(&errors))?;
        AscClient::from_config(&self.config)
    }

    /// Resolve `--output` against the configured default and reject `--pretty`
    /// misuse before any request is made.
    fn output_options(&self, args: &OutputArgs) -> Result<(OutputFormat, bool), ApiError> {
        let format = match args.output.as_deref() {
            Some(raw) => raw.parse::<OutputFormat>()?,
            None => self.config.default_output_format()?,
        };
        if args.pretty && format != OutputFormat::Json {
            return Err(OutputError::PrettyRequiresJson.into());
        }
        Ok((format, args.pretty))
    }

    /// Execute a parsed command, writing its result to `out`.
    pub async fn execute(&self, command: &Commands, out: &mut dyn Write) -> Result<(), ApiError> {
        match command {
            Commands::Apps { command } => self.handle_apps(command, out).await,
            Commands::Versions { command } => {
                let AppScopedListCommands::List { app, list, output } = command;
                self.list::<AppStoreVersionsResponse>(
                    endpoints::app_store_versions(&app.app_id),
                    list,
                    output,
                    out,
                )
                .await
            }
            Commands::Builds { command } => self.handle_builds(command, out).await,
            Commands::PreReleaseVersions { command } => {
                let AppScopedListCommands::List { app, list, output } = command;
                self.list::<PreReleaseVersionsResponse>(
                    endpoints::pre_release_versions(&app.app_id),
                    list,
                    output,
                    out,
                )
                .await
            }
            Commands::BetaGroups { command } => self.handle_beta_groups(command, out).await,
            Commands::BetaTesters { command } => self.handle_beta_testers(command, out).await,
            Commands::BundleIds { command } => {
                let SimpleListCommands::List { list, output } = command;
                self.list::<BundleIdsResponse>(endpoints::bundle_ids(), list, output, out)
                    .await
            }
            Commands::Certificates { command } => {
                let SimpleListCommands::List { list, output } = command;
                self.list::<CertificatesResponse>(endpoints::certificates(), list, output, out)
                    .await
            }
            Commands::Profiles { command } => {
                let SimpleListCommands::List { list, output } = command;
                self.list::<ProfilesResponse>(endpoints::profiles(), list, output, out)
                    .await
            }
            Commands::Users { command } => {
                let SimpleListCommands::List { list, output } = command;
                self.list::<UsersResponse>(endpoints::users(), list, output, out)
                    .await
            }
            Commands::Reviews { command } => {
                let AppScopedListCommands::List { app, list, output } = command;
                self.list::<CustomerReviewsResponse>(
                    endpoints::customer_reviews(&app.app_id),
                    list,
                    output,
                    out,
                )
                .await
            }
            Commands::Webhooks { command } => self.handle_webhooks(command, out).await,
            Commands::Config { command } => self.handle_config(command, out),
        }
    }

    async fn handle_apps(&self, command: &AppsCommands, out: &mut dyn Write) -> Result<(), ApiError> {
        match command {
            AppsCommands::List { list, output } => {
                self.list::<AppsResponse>(endpoints::apps(), list, output, out)
                    .await
            }
            AppsCommands::Get { id, output } => {
                self.get::<AppResponse>(endpoints::app(id), output, out).await
            }
            AppsCommands::Overview { id, limit, output } => {
                let (format, pretty) = self.output_options(output)?;
                let client = self.client()?;
                let app: AppResponse = client.get(&self.request, &endpoints::app(id)).await?;
                let versions: AppStoreVersionsResponse = client
                    .list(
                        &self.request,
                        &endpoints::app_store_versions(id),
                        &ListOptions {
                            limit: *limit,
                            next: None,
                        },
                    )
                    .await?;
                let overview = AppOverview { app, versions };
                render(&overview, format, pretty, out)
            }
        }
    }

    async fn handle_builds(&self, command: &BuildsCommands, out: &mut dyn Write) -> Result<(), ApiError> {
        match command {
            BuildsCommands::List { app, list, output } => {
                self.list::<BuildsResponse>(endpoints::builds(&app.app_id), list, output, out)
                    .await
            }
            BuildsCommands::App { build, output } => {
                self.get::<BuildAppLinkageResponse>(endpoints::build_app_linkage(build), output, out)
                    .await
            }
        }
    }

    async fn handle_beta_groups(
        &self,
        command: &BetaGroupsCommands,
        out: &mut dyn Write,
    ) -> Result<(), ApiError> {
        match command {
            BetaGroupsCommands::List { app, list, output } => {
                self.list::<BetaGroupsResponse>(endpoints::beta_groups(&app.app_id), list, output, out)
                    .await
            }
            BetaGroupsCommands::Metrics { group, output } => {
                self.get::<BetaGroupMetricsResponse>(endpoints::beta_group_metrics(group), output, out)
                    .await
            }
            BetaGroupsCommands::Linkages { app, list, output } => {
                self.list::<LinkagesResponse>(
                    endpoints::app_beta_group_linkages(&app.app_id),
                    list,
                    output,
                    out,
                )
                .await
            }
        }
    }

    async fn handle_beta_testers(
        &self,
        command: &BetaTestersCommands,
        out: &mut dyn Write,
    ) -> Result<(), ApiError> {
        match command {
            BetaTestersCommands::List { app, list, output } => {
                self.list::<BetaTestersResponse>(endpoints::beta_testers(&app.app_id), list, output, out)
                    .await
            }
            BetaTestersCommands::Delete {
                id,
                email,
                confirm,
                output,
            } => {
                require_confirm(*confirm)?;
                let (format, pretty) = self.output_options(output)?;
                let client = self.client()?;

                let (id, email) = match (id, email) {
                    (Some(id), _) => (id.clone(), String::new()),
                    (None, Some(email)) => {
                        let lookup = Endpoint::new(&["v1", "betaTesters"]).filter("email", email.as_str());
                        let found: BetaTestersResponse = client
                            .list(&self.request, &lookup, &ListOptions { limit: Some(1), next: None })
                            .await?;
                        let tester = found.data.into_iter().next().ok_or_else(|| {
                            ApiError::InvalidArgument(format!("no beta tester with email {}", email))
                        })?;
                        (tester.id, email.clone())
                    }
                    (None, None) => {
                        return Err(ApiError::InvalidArgument("--id or --email is required".to_string()))
                    }
                };

                client.delete(&self.request, &endpoints::beta_tester(&id)).await?;
                info!(tester_id = %id, "Deleted beta tester");
                render(
                    &BetaTesterDeleteResult {
                        id,
                        email,
                        deleted: true,
                    },
                    format,
                    pretty,
                    out,
                )
            }
        }
    }

    async fn handle_webhooks(&self, command: &WebhooksCommands, out: &mut dyn Write) -> Result<(), ApiError> {
        match command {
            WebhooksCommands::List { app, list, output } => {
                self.list::<WebhooksResponse>(endpoints::webhooks(&app.app_id), list, output, out)
                    .await
            }
            WebhooksCommands::Deliveries {
                webhook,
                list,
                output,
            } => {
                self.list::<WebhookDeliveriesResponse>(
                    endpoints::webhook_deliveries(webhook),
                    list,
                    output,
                    out,
                )
                .await
            }
            WebhooksCommands::Delete {
                id,
                confirm,
                output,
            } => {
                require_confirm(*confirm)?;
                let (format, pretty) = self.output_options(output)?;
                let client = self.client()?;
                client.delete(&self.request, &endpoints::webhook(id)).await?;
                info!(webhook_id = %id, "Deleted webhook");
                render(
                    &WebhookDeleteResult {
                        id: id.clone(),
                        deleted: true,
                    },
                    format,
                    pretty,
                    out,
                )
            }
        }
    }

    fn handle_config(&self, command: &ConfigCommands, out: &mut dyn Write) -> Result<(), ApiError> {
        match command {
            ConfigCommands::Show => {
                if let Err(errors) = self.config.validate() {
                    for error in &errors {
                        warn!(problem = %error, "Configuration problem");
                    }
                }
                out.write_all(self.config.to_toml()?.as_bytes())?;
                Ok(())
            }
            ConfigCommands::Init { path, force } => {
                let target = path
                    .clone()
                    .or_else(|| self.config_path.clone())
                    .or_else(ConfigLoader::init_path)
                    .ok_or_else(|| {
                        ApiError::ConfigError(
                            "cannot determine a config path; pass --path".to_string(),
                        )
                    })?;
                write_template(&target, *force)?;
                writeln!(out, "Wrote {}", target.display())?;
                Ok(())
            }
        }
    }

    async fn get<T>(&self, endpoint: Endpoint, output: &OutputArgs, out: &mut dyn Write) -> Result<(), ApiError>
    where
        T: Renderable + DeserializeOwned,
    {
        let (format, pretty) = self.output_options(output)?;
        let client = self.client()?;
        let value: T = client.get(&self.request, &endpoint).await?;
        render(&value, format, pretty, out)
    }

    /// One page, or every page with `--paginate`.
    ///
    /// When pagination fails part-way the pages fetched so far are still printed,
    /// a warning goes to stderr, and the error is returned.
    async fn list<R>(
        &self,
        endpoint: Endpoint,
        list: &ListArgs,
        output: &OutputArgs,
        out: &mut dyn Write,
    ) -> Result<(), ApiError>
    where
        R: PaginatedResponse + DeserializeOwned + Default + 'static,
    {
        let (format, pretty) = self.output_options(output)?;
        let client = self.client()?;
        let options = ListOptions {
            limit: list.limit,
            next: list.next.clone(),
        };

        if !list.paginate {
            let page: R = client.list(&self.request, &endpoint, &options).await?;
            return render(&page, format, pretty, out);
        }

        let outcome = client
            .list_all::<R>(&self.request, &endpoint, &options)
            .await?;
        render(&outcome.value, format, pretty, out)?;
        match outcome.error {
            None => Ok(()),
            Some(err) => {
                warn!(path = %endpoint.path(), error = %err, "Pagination stopped early");
                eprintln!(
                    "warning: pagination stopped early, showing {} items fetched before the error",
                    outcome.value.data_len()
                );
                Err(err.into())
            }
        }
    }
}

fn render(value: &dyn Renderable, format: OutputFormat, pretty: bool, out: &mut dyn Write) -> Result<(), ApiError> {
    print_output(value, format, pretty, out)?;
    out.flush()?;
    Ok(())
}

fn require_confirm(confirm: bool) -> Result<(), ApiError> {
    if confirm {
        Ok(())
    } else {
        Err(ApiError::InvalidArgument(
            "--confirm is required to delete".to_string(),
        ))
    }
}

fn write_template(path: &Path, force: bool) -> Result<(), ApiError> {
    if path.exists() && !force {
        return Err(ApiError::ConfigError(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, AscConfig::template()?)?;
    Ok(())
}
