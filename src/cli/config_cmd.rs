use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{print_json, OutputFormat, OutputOptions};
use crate::core::config::AppConfig;
use crate::core::session::validate_endpoint;

/// Outcome of `config check`, also its JSON output.
#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub path: PathBuf,
    pub exists: bool,
    pub valid: bool,
    pub base_url: Option<String>,
    pub token_set: bool,
    pub issues: Vec<String>,
}

impl ConfigReport {
    fn missing(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            exists: false,
            valid: false,
            base_url: None,
            token_set: false,
            issues: vec!["No config file found".to_string()],
        }
    }

    fn unreadable(path: &Path, error: String) -> Self {
        Self {
            issues: vec![format!("Failed to load config: {}", error)],
            exists: true,
            ..Self::missing(path)
        }
    }

    fn for_config(path: &Path, config: &AppConfig) -> Self {
        let issues = config.validate();
        Self {
            path: path.to_path_buf(),
            exists: true,
            valid: issues.is_empty(),
            base_url: Some(config.node.base_url.clone()),
            token_set: config.node.token.is_some(),
            issues,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginReport {
    path: PathBuf,
    token_saved: bool,
}

pub fn init(url: Option<String>) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        eprintln!("Config file already exists at {}", path.display());
        eprintln!("Remove it first if you want to regenerate.");
        return Ok(());
    }

    let mut config = AppConfig::default();
    if let Some(url) = url {
        validate_endpoint(&url)?;
        config.node.base_url = url.trim_end_matches('/').to_string();
    }

    let path = config.save().context("Failed to generate config")?;
    println!("Generated config at {}", path.display());
    println!("  Node: {}", config.node.base_url);
    println!("  Run `routstr-admin config login --token <TOKEN>` to authenticate.");
    Ok(())
}

pub fn set_url(url: &str) -> Result<()> {
    validate_endpoint(url)?;

    let mut config = AppConfig::load()?;
    let url = url.trim_end_matches('/').to_string();
    if config.node.base_url != url && config.clear_token() {
        println!("Node changed, stored token removed.");
    }
    config.node.base_url = url;

    let path = config.save()?;
    println!("Node set to {} ({})", config.node.base_url, path.display());
    Ok(())
}

pub fn login(token: &str, opts: &OutputOptions) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Token must not be empty");
    }

    let mut config = AppConfig::load()?;
    config.node.token = Some(token.to_string());
    let path = config.save()?;
    tracing::info!("admin token stored");
    match opts.format {
        OutputFormat::Text => println!("Token saved to {}", path.display()),
        OutputFormat::Json => print_json(
            &LoginReport {
                path,
                token_saved: true,
            },
            opts,
        )?,
    }
    Ok(())
}

pub fn logout() -> Result<()> {
    let mut config = AppConfig::load()?;
    if !config.clear_token() {
        eprintln!("No token stored.");
        return Ok(());
    }
    config.save()?;
    println!("Logged out.");
    Ok(())
}

pub fn check(opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    let report = if !path.exists() {
        ConfigReport::missing(&path)
    } else {
        match AppConfig::load_from(&path) {
            Ok(config) => ConfigReport::for_config(&path, &config),
            Err(e) => ConfigReport::unreadable(&path, e.to_string()),
        }
    };

    if opts.format == OutputFormat::Json {
        print_json(&report, opts)?;
        if report.exists && !report.valid {
            std::process::exit(1);
        }
        return Ok(());
    }

    if !report.exists {
        eprintln!("No config file found at {}", path.display());
        eprintln!("Run `routstr-admin config init` to create one.");
        return Ok(());
    }

    if report.valid {
        println!("Config is valid: {}", path.display());
        if let Some(base_url) = &report.base_url {
            println!("  Node: {}", base_url);
        }
        if report.token_set {
            println!("  Token: set");
        } else {
            println!("  Token: not set");
        }
    } else {
        eprintln!("Config issues found in {}:", path.display());
        for issue in &report.issues {
            eprintln!("  - {}", issue);
        }
        std::process::exit(1);
    }
    Ok(())
}
