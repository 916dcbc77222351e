use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use secrecy::SecretString;
use url::Url;

use checkbox_labels::config::ActionConfig;
use checkbox_labels::github::{ActionEvent, GithubRepoName, GithubRepositoryClient};
use checkbox_labels::sync::run;
use checkbox_labels::utils::logging::init_logging;
use checkbox_labels::utils::text::escape_workflow_data;

/// Every option can be passed through the environment variables set by GitHub Actions.
#[derive(clap::Parser)]
struct Opts {
    /// Token used to access the GitHub API.
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    github_token: String,

    /// How label directives are written: `backtick`, `colon`, `asterisk`, `double-asterisk`,
    /// or a custom regular expression capturing the checkbox mark and the label name.
    #[arg(long, env = "INPUT_LABEL-PATTERN")]
    label_pattern: String,

    /// Suppress debug output (`true` or `false`).
    #[arg(long, env = "INPUT_QUIET")]
    quiet: Option<String>,

    /// How far back scheduled runs look for updated issues, e.g. `12H`, `7d` or `1M`.
    #[arg(long, env = "INPUT_OFFSET")]
    offset: Option<String>,

    /// Repository to operate on, as `<owner>/<name>`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Name of the event that triggered the workflow.
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: String,

    /// Path to the JSON payload of the event.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Base URL of the GitHub API.
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<Url>,
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    let config = ActionConfig::from_inputs(
        &opts.label_pattern,
        opts.quiet.as_deref(),
        opts.offset.as_deref(),
    )?;
    init_logging(config.quiet)?;
    tracing::debug!("Using label pattern {}", config.label_pattern);

    let repository: GithubRepoName = opts.repository.parse()?;
    let event = ActionEvent::load(&opts.event_name, opts.event_path.as_deref())?;
    tracing::debug!("Handling {event:?} in {repository}");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;

    runtime.block_on(async move {
        let client = GithubRepositoryClient::new(
            SecretString::new(opts.github_token),
            repository,
            opts.api_url.as_ref(),
        )?;
        run(&client, event, &config, chrono::Utc::now()).await
    })
}

fn main() {
    let opts = Opts::parse();
    if let Err(error) = try_main(opts) {
        // Marks the step as failed in the workflow log.
        println!("::error::{}", escape_workflow_data(&format!("{error:#}")));
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}
