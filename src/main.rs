//! rxbind CLI
//!
//! Derive receiver UIDs from bind phrases and dispatch them to the configured
//! receiver provider.
//!
//! # Commands
//!
//! - `uid` - Derive the UID for a phrase
//! - `md5` - Print the MD5 digest of a string
//! - `wrap` - Show the exact string the hashed path digests
//! - `supported` - Report whether the configured receiver can bind by phrase
//! - `bind` - Dispatch a phrase to the configured receiver
//! - `init-config` - Write a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use rxbind::algorithm::{self, RxProvider, SerialRxProvider, Uid, UidMode};
use rxbind::{default_config_path, default_dispatcher, RxConfig};

#[derive(Parser)]
#[command(name = "rxbind")]
#[command(version)]
#[command(about = "Derive RC receiver UIDs from bind phrases")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Custom config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Receiver provider (none, ppm, serial, msp, spi, ...)
    #[arg(long, global = true, value_parser = parse_rx_provider)]
    provider: Option<RxProvider>,

    /// Serial receiver protocol (crsf, sbus, ghst, ...)
    #[arg(long, global = true, value_parser = parse_serial_provider)]
    serial_provider: Option<SerialRxProvider>,

    /// UID derivation mode (numeric, hashed, auto)
    #[arg(long, global = true, value_parser = parse_mode)]
    mode: Option<UidMode>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the UID for a bind phrase
    Uid {
        /// The bind phrase
        phrase: String,

        /// Print a JSON object instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Print the MD5 digest of a string
    Md5 {
        /// Input string, hashed as raw UTF-8 bytes
        input: String,
    },

    /// Show the exact string the hashed path digests
    Wrap {
        /// The bind phrase
        phrase: String,
    },

    /// Report whether the configured receiver supports phrase binding
    Supported,

    /// Dispatch a bind phrase to the configured receiver
    Bind {
        /// The bind phrase
        phrase: String,
    },

    /// Write a config file with the current settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_rx_provider(name: &str) -> Result<RxProvider, String> {
    RxProvider::from_name(name).ok_or_else(|| {
        let known: Vec<_> = RxProvider::ALL.iter().map(|p| p.name()).collect();
        format!("unknown provider '{}', expected one of: {}", name, known.join(", "))
    })
}

fn parse_serial_provider(name: &str) -> Result<SerialRxProvider, String> {
    SerialRxProvider::from_name(name).ok_or_else(|| {
        let known: Vec<_> = SerialRxProvider::ALL.iter().map(|p| p.name()).collect();
        format!("unknown serial provider '{}', expected one of: {}", name, known.join(", "))
    })
}

fn parse_mode(name: &str) -> Result<UidMode, String> {
    UidMode::from_name(name)
        .ok_or_else(|| format!("unknown mode '{}', expected numeric, hashed or auto", name))
}

/// JSON form of a derived UID
#[derive(Serialize)]
struct UidReport<'a> {
    phrase: &'a str,
    mode: UidMode,
    uid: Uid,
    hex: String,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Config file and effective settings for commands that read them
fn load_config(cli: &Cli) -> anyhow::Result<(RxConfig, PathBuf)> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = RxConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?
        .with_overrides(cli.provider, cli.serial_provider, cli.mode);
    debug!(?config, "effective config");
    Ok((config, config_path))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Md5 { input } => cmd_md5(input),
        Commands::Wrap { phrase } => cmd_wrap(phrase),
        Commands::Uid { phrase, json } => {
            let (config, _) = load_config(&cli)?;
            cmd_uid(phrase, config.mode, *json)
        }
        Commands::Supported => cmd_supported(&load_config(&cli)?.0),
        Commands::Bind { phrase } => cmd_bind(phrase, &load_config(&cli)?.0),
        Commands::InitConfig { force } => {
            let (config, path) = load_config(&cli)?;
            cmd_init_config(&config, &path, *force)
        }
    }
}

fn cmd_uid(phrase: &str, mode: UidMode, json: bool) -> anyhow::Result<()> {
    let uid = algorithm::derive_uid(phrase, mode)?;

    if json {
        let report = UidReport {
            phrase,
            mode,
            uid,
            hex: hex::encode(uid),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("UID: {}", uid);
        println!("Hex: {:x}", uid);
    }

    Ok(())
}

fn cmd_md5(input: &str) -> anyhow::Result<()> {
    println!("{}", algorithm::md5_hex(input.as_bytes())?);
    Ok(())
}

fn cmd_wrap(phrase: &str) -> anyhow::Result<()> {
    let wrapped = algorithm::wrap_phrase(phrase)?;
    println!("{}", String::from_utf8_lossy(&wrapped));
    Ok(())
}

fn cmd_supported(config: &RxConfig) -> anyhow::Result<()> {
    let (dispatcher, _) = default_dispatcher(config.mode);
    let target = config.provider.target();

    if dispatcher.is_bind_supported(&config.provider) {
        println!("Bind phrase supported for {}", target);
        Ok(())
    } else {
        anyhow::bail!("Bind phrase not supported for {}", target)
    }
}

fn cmd_bind(phrase: &str, config: &RxConfig) -> anyhow::Result<()> {
    let (dispatcher, log) = default_dispatcher(config.mode);

    dispatcher
        .dispatch(&config.provider, phrase)
        .context("Bind not started")?;

    let record = log
        .last()
        .context("Bind dispatched but the receiver reported nothing")?;
    let uid = record.result.context("Receiver could not derive a UID")?;

    println!("Bind started for {}", config.provider.target());
    println!("UID: {}", uid);
    println!("Hex: {:x}", uid);

    Ok(())
}

fn cmd_init_config(config: &RxConfig, path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite it.",
            path.display()
        );
    }

    config.save(path)?;

    println!("Config written to {}", path.display());
    println!("Provider: {}", config.provider.target());
    println!("Mode: {}", config.mode);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn cli_with_config(path: &Path, args: &[&str]) -> Cli {
        let path = path.to_str().unwrap();
        Cli::parse_from(["rxbind", "--config", path].iter().chain(args))
    }

    #[test]
    fn test_config_free_commands_ignore_broken_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(run(cli_with_config(&path, &["md5", "abc"])).is_ok());
        assert!(run(cli_with_config(&path, &["wrap", "test"])).is_ok());
        assert!(run(cli_with_config(&path, &["uid", "test"])).is_err());
        assert!(run(cli_with_config(&path, &["supported"])).is_err());
    }

    #[test]
    fn test_overrides_apply_to_loaded_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let cli = cli_with_config(&path, &["--provider", "spi", "--mode", "numeric", "supported"]);
        let (config, loaded_from) = load_config(&cli).unwrap();
        assert_eq!(loaded_from, path);
        assert_eq!(config.provider.rx_provider, RxProvider::Spi);
        assert_eq!(config.mode, UidMode::Numeric);
        assert!(run(cli).is_err());
    }
}
