//! `confmark publish` command implementation.

use std::path::PathBuf;

use clap::Args;
use confmark_config::{CliSettings, Config};
use confmark_confluence::{
    ConfluenceClient, DryRunResult, PagePublisher, PublishAction, PublishConfig, PublishResult,
};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Page title (default: first H1 heading).
    #[arg(short, long)]
    title: Option<String>,

    /// Confluence base URL (overrides config).
    #[arg(long, env = "CONFLUENCE_BASE_URL")]
    base_url: Option<String>,

    /// Space key (overrides config).
    #[arg(long, env = "CONFMARK_SPACE")]
    space: Option<String>,

    /// Parent page ID for new pages (overrides config).
    #[arg(long)]
    parent: Option<String>,

    /// Update this page ID instead of looking the page up by title.
    #[arg(long)]
    page_id: Option<String>,

    /// Version message for the update.
    #[arg(short, long)]
    message: Option<String>,

    /// Preview changes without updating Confluence.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover confmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or publishing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            space_key: self.space.clone(),
            parent_id: self.parent.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");
        if config.confluence.is_none() {
            print_config_help(&output);
        }
        let conf = config.require_confluence()?;

        let space_key = match (&conf.space_key, &self.page_id) {
            (Some(space_key), _) => space_key.clone(),
            (None, Some(_)) => String::new(),
            (None, None) => {
                return Err(CliError::Validation(
                    "space key required: pass --space or set confluence.space_key".to_owned(),
                ));
            }
        };

        let client = ConfluenceClient::new(&conf.base_url, &conf.auth()?);

        let markdown = std::fs::read_to_string(&self.markdown_file)?;
        output.info(&format!("Converting {}...", self.markdown_file.display()));

        let publisher = PagePublisher::new(
            &client,
            PublishConfig {
                space_key,
                parent_id: conf.parent_id.clone(),
                message: self.message.clone(),
            },
        );
        let title = self.title.as_deref();

        if self.dry_run {
            let result = publisher.dry_run(&markdown, title, self.page_id.as_deref())?;
            print_dry_run_result(&output, &result);
        } else {
            let result = match &self.page_id {
                Some(page_id) => publisher.update(page_id, &markdown, title)?,
                None => publisher.publish(&markdown, title)?,
            };
            print_publish_result(&output, &client, &result);
        }

        Ok(())
    }
}

fn print_config_help(output: &Output) {
    output.info("Add the following to your confmark.toml:");
    output.info("\n[confluence]");
    output.info(r#"base_url = "https://example.atlassian.net/wiki""#);
    output.info(r#"space_key = "DOCS""#);
    output.info(r#"username = "you@example.com""#);
    output.info(r#"api_token = "${CONFLUENCE_API_TOKEN}""#);
    output.info("");
}

fn print_dry_run_result(output: &Output, result: &DryRunResult) {
    output.highlight("\n[DRY RUN] No changes made.");
    output.info(&format!("Title: {}", result.title));

    match &result.existing {
        Some(page) => output.info(&format!(
            "Would update page {} \"{}\" (v{} -> v{})",
            page.id,
            page.title,
            page.version,
            page.version + 1
        )),
        None => output.info("Would create a new page"),
    }

    output.separator();
    output.hint(&result.markup);
    output.separator();
}

fn print_publish_result(output: &Output, client: &ConfluenceClient, result: &PublishResult) {
    match result.action {
        PublishAction::Created => output.success("\nPage created successfully!"),
        PublishAction::Updated => output.success("\nPage updated successfully!"),
    }
    output.info(&format!("ID: {}", result.page.id));
    output.info(&format!("Title: {}", result.page.title));
    output.info(&format!("Version: {}", result.page.version.number));
    match client.page_url(&result.page) {
        Some(url) => output.info(&format!("URL: {url}")),
        None => output.warning("URL: (not returned by server)"),
    }
}
