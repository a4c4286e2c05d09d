use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dnsmasqapi::config::Settings;
use dnsmasqapi::diag::Diagnostics;
use dnsmasqapi::provider::{schema, DnsEntryData, DnsEntryLookup, DataSource, Provider, Resource};

#[derive(Parser)]
#[command(name = "dnsmasqapi")]
#[command(about = "DNSMasq API provider - manage DNS entries through a remote DNSMasq API")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every DNS entry known to the API
    List,

    /// Look up the tracked IP of a hostname
    Get {
        hostname: String,
    },

    /// Create or update a DNS entry
    Apply {
        hostname: String,
        ip_address: String,
        /// Add the IP to the hostname instead of replacing existing ones
        #[arg(long)]
        append: bool,
    },

    /// Delete all DNS entries for a hostname
    Destroy {
        hostname: String,
    },

    /// Show configuration file location and contents
    Config,

    /// Print the provider schema as JSON
    Schema,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load_optional(&config_path)?;

    let log_level = settings
        .as_ref()
        .map(|s| s.logging.log_level.as_str())
        .unwrap_or("info");
    init_logging(log_level);

    let diags = match cli.command {
        Commands::Config => {
            show_config(&config_path, &settings)?;
            Diagnostics::new()
        }

        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&schema::schema())?);
            Diagnostics::new()
        }

        command => {
            let (provider, mut diags) = configure(settings.unwrap_or_default())?;
            diags.extend(run(&provider, command).await?);
            diags
        }
    };

    for diagnostic in diags.iter() {
        eprintln!("{}", diagnostic);
    }

    Ok(if diags.has_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn configure(settings: Settings) -> Result<(Provider, Diagnostics)> {
    let config = settings.provider_config()?;
    let (provider, diags) =
        Provider::configure(&config).context("Failed to configure the DNSMasq API client")?;
    Ok((provider, diags))
}

async fn run(provider: &Provider, command: Commands) -> Result<Diagnostics> {
    let diags = match command {
        Commands::List => {
            let records = provider.api().list_all().await?;
            for record in records {
                println!("{} -> {}", record.hostname, record.ip);
            }
            Diagnostics::new()
        }

        Commands::Get { hostname } => {
            let mut lookup = DnsEntryLookup::new(&hostname);
            let diags = provider.dns_entry_data_source().read(&mut lookup).await;
            if !diags.has_error() {
                println!("{}", serde_json::to_string_pretty(&lookup)?);
            }
            diags
        }

        Commands::Apply {
            hostname,
            ip_address,
            append,
        } => {
            let mut entry = DnsEntryData::new(&hostname, &ip_address, append);
            let diags = provider.dns_entry_resource().create(&mut entry).await;
            if !diags.has_error() {
                info!("Applied {}", hostname);
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }
            diags
        }

        Commands::Destroy { hostname } => {
            let mut entry = DnsEntryData {
                hostname: hostname.clone(),
                ..Default::default()
            };
            let diags = provider.dns_entry_resource().delete(&mut entry).await;
            if !diags.has_error() {
                println!("Deleted DNS entries for {}", hostname);
            }
            diags
        }

        Commands::Config | Commands::Schema => Diagnostics::new(),
    };

    Ok(diags)
}

fn show_config(config_path: &Path, settings: &Option<Settings>) -> Result<()> {
    println!("Configuration file location: {}\n", config_path.display());

    match settings {
        Some(s) => {
            println!("Current configuration:\n");
            println!("{}", toml::to_string_pretty(s)?);
        }
        None => {
            println!("Configuration file not found.");
            println!("\nCreate a configuration file at the location above, or set DNSMASQ_API_URL.");
            println!("Example configuration:\n");
            println!(
                r#"[provider]
api_url = "https://dns.example.com"
api_port = 8080
ssl_verify = true

[logging]
log_level = "info"
"#
            );
        }
    }

    Ok(())
}
