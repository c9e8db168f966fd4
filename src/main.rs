mod cli;
mod core;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cli::cost_cmd::CostArgs;
use crate::cli::models_cmd::ModelsArgs;
use crate::cli::output::{detect_color, OutputFormat, OutputOptions};
use crate::core::config::AppConfig;

#[derive(Parser)]
#[command(name = "routstr-admin", about = "Admin CLI for Routstr nodes", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text|json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a request against a model
    Cost(CostArgs),
    /// List models grouped by provider, or update one
    Models(ModelsArgs),
    /// List upstream providers
    Providers,
    /// Show recent node logs
    Logs {
        /// Number of entries to fetch
        #[arg(short = 'n', long, default_value_t = 50)]
        limit: u32,

        /// Only entries at this level (debug|info|warning|error|critical)
        #[arg(short, long)]
        level: Option<String>,
    },
    /// Show node balances
    Balance,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Generate default config file
    Init {
        /// Node admin URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Validate config file
    Check,
    /// Store the admin token
    Login {
        #[arg(long)]
        token: String,
    },
    /// Remove the stored admin token
    Logout,
    /// Point the CLI at another node
    SetUrl { url: String },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("routstr_admin={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = AppConfig::load_or_default().settings;

    let output_opts = OutputOptions {
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::from_setting(cli.format.as_deref().unwrap_or(&settings.default_format))
        },
        pretty: cli.pretty,
        use_color: detect_color(!cli.no_color, &settings.color),
        verbose: cli.verbose,
    };
    tracing::debug!(?output_opts, "starting");

    match cli.command {
        Commands::Cost(args) => cli::cost_cmd::run(args, &output_opts).await?,
        Commands::Models(args) => cli::models_cmd::run(args, &output_opts).await?,
        Commands::Providers => cli::providers_cmd::run(&output_opts).await?,
        Commands::Logs { limit, level } => cli::logs_cmd::run(limit, level, &output_opts).await?,
        Commands::Balance => cli::balance_cmd::run(&output_opts).await?,
        Commands::Config { action } => match action {
            ConfigAction::Init { url } => cli::config_cmd::init(url)?,
            ConfigAction::Check => cli::config_cmd::check(&output_opts)?,
            ConfigAction::Login { token } => cli::config_cmd::login(&token, &output_opts)?,
            ConfigAction::Logout => cli::config_cmd::logout()?,
            ConfigAction::SetUrl { url } => cli::config_cmd::set_url(&url)?,
        },
    }

    Ok(())
}
