use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn, Level};
use vault_client::config::Config;
use vault_client::logging::init_logging;
use vault_client::search::SearchFilter;
use vault_client::url_builder::DefaultUrlBuilder;
use vault_client::user::UserStatus;
use vault_client::{DocumentService, UserService, VaultClient};

#[derive(Parser, Debug)]
#[command(name = "vault-client")]
#[command(about = "Command line access to a document vault")]
struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// trace, debug, info, warn, error (overrides the config file)
    #[arg(short, long)]
    log_level: Option<String>,

    #[arg(long)]
    log_file: Option<String>,

    /// socks and http proxy, example: socks5://192.168.0.2:10080
    #[arg(long)]
    proxy: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search documents with a filter read from a JSON or YAML file
    Search {
        #[arg(short, long)]
        vault: Option<String>,

        #[arg(short, long)]
        filter: String,

        /// Print decoded documents instead of the raw result envelope
        #[arg(short, long)]
        decode: bool,
    },
    /// List users
    Users {
        #[arg(short, long)]
        status: Option<UserStatus>,

        #[arg(long)]
        full: bool,
    },
    /// Replace a user's API key and print the new one
    ApiKey {
        #[arg(short, long)]
        user: String,
    },
}

fn load_filter(path: &str) -> anyhow::Result<SearchFilter> {
    let content = std::fs::read_to_string(path)?;
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let filter = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(filter)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::from_file(&args.config)?;
    if let Some(proxy) = args.proxy {
        config.proxy = Some(proxy);
    }

    let log_level_name = args.log_level.unwrap_or_else(|| config.log_level.clone());
    let log_level = Level::from_str(&log_level_name).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using WARN level.", log_level_name);
        Level::WARN
    });
    let log_file = args.log_file.or_else(|| config.log_file.clone());
    init_logging(log_level, log_file.as_deref())?;
    info!("Configuration loaded successfully from: {}", args.config);

    let http_client = Arc::new(config.http_client()?);
    let client = Arc::new(VaultClient::new(
        http_client,
        Arc::new(DefaultUrlBuilder::new(&config.api_base)),
        &config.api_key,
    ));

    match args.command {
        Command::Search { vault, filter, decode } => {
            let vault_id = vault
                .or_else(|| config.vault_id.clone())
                .ok_or_else(|| anyhow::anyhow!("no vault given and no vault_id in config"))?;
            let filter = load_filter(&filter)?;
            let result = DocumentService::new(client).search_documents(&vault_id, &filter).await?;

            if decode {
                for (document, decoded) in result.documents.iter().zip(result.decode_documents::<Value>()) {
                    match decoded {
                        Ok(value) => println!("{}", value),
                        Err(e) => warn!("Skipping document {}: {}", document.document_id, e),
                    }
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
        Command::Users { status, full } => {
            let users = UserService::new(client).list(status, full).await?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        Command::ApiKey { user } => {
            let api_key = UserService::new(client).create_api_key(&user).await?;
            println!("{}", api_key);
        }
    }

    Ok(())
}
