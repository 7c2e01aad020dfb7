//! CLI harness for exercising wallet logins
//!
//! Runs one login (or a helper operation) against a real configuration and
//! prints the resulting session summary as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use neon_core::{nep2, PrivateKey};
use neon_net::{AssumeConnectivity, ConnectivityProbe, DnsConnectivityProbe};
use neon_session::{
    AddressBook, Collaborators, Nep2Decryptor, Nep6AddressBook, NoopAddressBook, SessionConfig,
    SessionService,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "session-harness")]
#[command(about = "Neon wallet login harness", long_about = None)]
struct Cli {
    /// Session config file (JSON); defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Skip the connectivity probe and report offline
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with a WIF or hex private key
    LoginKey {
        /// WIF or 64-character hex key
        #[arg(short, long, env = "NEON_PRIVATE_KEY")]
        key: String,
    },

    /// Log in to an address without keys
    Watch {
        /// Account address
        #[arg(short, long)]
        address: String,
    },

    /// Log in with a NEP-2 encrypted key
    LoginEncrypted {
        /// NEP-2 encrypted key
        #[arg(short, long)]
        encrypted: String,

        /// Passphrase
        #[arg(short, long, env = "NEON_PASSPHRASE")]
        passphrase: String,

        /// Wallet file to upgrade with the decrypted account
        #[arg(short, long)]
        wallet: Option<PathBuf>,
    },

    /// Encrypt a private key with a passphrase
    Encrypt {
        /// WIF or hex private key; a fresh key is generated when omitted
        #[arg(short, long, env = "NEON_PRIVATE_KEY")]
        key: Option<String>,

        /// Passphrase
        #[arg(short, long, env = "NEON_PASSPHRASE")]
        passphrase: String,
    },

    /// Run the connectivity probe once
    Probe {
        /// Hostname to resolve instead of the configured one
        #[arg(long)]
        host: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SessionConfig::default(),
    };

    match cli.command {
        Commands::LoginKey { key } => {
            let service = build_service(&config, cli.offline, None)?;
            let session = service.login_with_key(&key).await?;
            print_json(&session.summary())?;
        }
        Commands::Watch { address } => {
            let service = build_service(&config, cli.offline, None)?;
            let session = service.login_watch_only(&address).await?;
            print_json(&session.summary())?;
        }
        Commands::LoginEncrypted {
            encrypted,
            passphrase,
            wallet,
        } => {
            let service = build_service(&config, cli.offline, wallet)?;
            let spinner = spinner("Decrypting key")?;
            let outcome = service
                .login_with_encrypted_key(&passphrase, &encrypted)
                .await;
            spinner.finish_and_clear();
            let session = outcome?;
            print_json(&session.summary())?;
        }
        Commands::Encrypt { key, passphrase } => {
            run_encrypt(&config, key, passphrase).await?;
        }
        Commands::Probe { host } => {
            let mut settings = config.probe.clone();
            if let Some(host) = host {
                settings.hostname = host;
            }
            let probe = DnsConnectivityProbe::from_settings(&settings);
            let connected = probe.has_internet_connectivity().await;
            info!("{} reachable: {}", probe.hostname(), connected);
            print_json(&serde_json::json!({
                "hostname": probe.hostname(),
                "hasInternetConnectivity": connected,
            }))?;
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_service(
    config: &SessionConfig,
    offline: bool,
    wallet: Option<PathBuf>,
) -> anyhow::Result<SessionService> {
    let network = config.network();

    let probe: Arc<dyn ConnectivityProbe> = if offline {
        warn!("Connectivity probe disabled");
        Arc::new(AssumeConnectivity(false))
    } else {
        Arc::new(DnsConnectivityProbe::from_settings(&config.probe))
    };

    let address_book: Arc<dyn AddressBook> = match wallet {
        Some(path) => Arc::new(Nep6AddressBook::open(path, network.clone(), config.scrypt)),
        None => Arc::new(NoopAddressBook),
    };

    let collaborators = Collaborators::new(
        Arc::new(Nep2Decryptor::new(config.scrypt, network)),
        address_book,
        Arc::new(|| info!("Balance cache reset")),
        probe,
    );

    Ok(SessionService::new(config.clone(), collaborators)?)
}

async fn run_encrypt(
    config: &SessionConfig,
    key: Option<String>,
    passphrase: String,
) -> anyhow::Result<()> {
    let network = config.network();
    let key = match key {
        Some(key) => PrivateKey::parse(&key, &network)?,
        None => {
            info!("Generating a new private key");
            PrivateKey::generate()
        }
    };
    let address = neon_core::Account::from_private_key(key.clone(), &network)
        .address()
        .to_string();

    let params = config.scrypt;
    let spinner = spinner("Encrypting key")?;
    let encrypted = tokio::task::spawn_blocking(move || {
        nep2::encrypt(&key, &passphrase, &params, &network)
    })
    .await??;
    spinner.finish_and_clear();

    print_json(&serde_json::json!({
        "address": address,
        "encryptedKey": encrypted,
    }))
}

fn spinner(message: &'static str) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
