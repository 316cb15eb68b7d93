use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use lumify::client::ReqwestTransport;
use lumify::config::{Config, load_config_from_yaml};
use lumify::credentials::{CredentialType, LumifyCredentials, test_credentials};
use lumify::loader::load_job_from_yaml;
use lumify::operations::{LumifyNode, NodeType};
use lumify::runtime::NodeExecutor;
use lumify::schema::ParameterResolver;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a YAML config file (endpoints, timeout, default policy)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct CredentialArgs {
    /// Lumify API key (lmfy-xxxxx)
    #[arg(long, env = "LUMIFY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Application ID, required for the search operation
    #[arg(long, env = "LUMIFY_APP_ID")]
    app_id: Option<String>,
}

impl CredentialArgs {
    fn into_credentials(self) -> Option<LumifyCredentials> {
        self.api_key.map(|key| LumifyCredentials::new(key, self.app_id))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the node descriptor as JSON
    Describe {
        /// Print the credential descriptor instead
        #[arg(long)]
        credentials: bool,
    },

    /// Execute a job file and print the output batch
    Run {
        /// Path to the job YAML file
        #[arg(long, short)]
        file: PathBuf,

        /// Parameter overrides (key=value)
        #[arg(long, short = 'D', value_parser = parse_key_val)]
        params: Vec<(String, serde_json::Value)>,

        /// Turn item errors into error records instead of aborting
        #[arg(long)]
        continue_on_fail: bool,

        #[command(flatten)]
        credentials: CredentialArgs,
    },

    /// Send the credential test request
    TestCredentials {
        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

fn parse_key_val(s: &str) -> Result<(String, serde_json::Value), String> {
    let pos = s.find('=').ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    let key = s[..pos].to_string();
    let val_str = &s[pos + 1..];
    // Try parsing as JSON, otherwise treat as string
    let val = serde_json::from_str(val_str).unwrap_or_else(|_| serde_json::Value::String(val_str.to_string()));
    Ok((key, val))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from_yaml(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Describe { credentials } => {
            let json = if credentials {
                serde_json::to_string_pretty(&CredentialType::lumify())?
            } else {
                serde_json::to_string_pretty(LumifyNode::default().description())?
            };
            println!("{}", json);
        }

        Commands::Run {
            file,
            params,
            continue_on_fail,
            credentials,
        } => {
            let mut job = load_job_from_yaml(&file)?;
            info!("Loaded job from: {}", file.display());
            job.parameters.extend(params);
            job.continue_on_fail |= continue_on_fail;

            let transport = ReqwestTransport::with_timeout(config.timeout())?;
            let executor = NodeExecutor::new(Arc::new(LumifyNode::new(config.endpoints.clone())), Arc::new(transport))
                .with_resolver(ParameterResolver::new(config.defaults));

            let ctx = job.into_context(credentials.into_credentials());
            let output = executor.execute(&ctx).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::TestCredentials { credentials } => {
            let Some(credentials) = credentials.into_credentials() else {
                bail!("No API key given (use --api-key or LUMIFY_API_KEY)");
            };
            let transport = ReqwestTransport::with_timeout(config.timeout())?;
            let response = test_credentials(&transport, &credentials, &config.endpoints).await?;
            info!("Credentials accepted");
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
