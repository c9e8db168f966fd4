use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::node;
use crate::cli::output::{print_json, OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::core::cost::catalog::{group_by_provider, provider_key};
use crate::core::cost::units::PriceUnit;
use crate::core::models::model::{Model, ModelOverride};

#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub action: Option<ModelsAction>,

    /// Only list models from this provider
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Include disabled models
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Subcommand, Debug)]
pub enum ModelsAction {
    /// Store a pricing/name/enabled override for a model
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Model ID
    pub model: String,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// Enable the model
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,

    /// Disable the model
    #[arg(long)]
    pub disable: bool,

    #[arg(long)]
    pub input_price: Option<f64>,

    #[arg(long)]
    pub output_price: Option<f64>,

    /// Minimum charge per request
    #[arg(long)]
    pub min_cost: Option<f64>,

    /// Set the minimum to the one recommended for the model's context window
    #[arg(long, conflicts_with = "min_cost")]
    pub recommended_min: bool,

    /// Unit of --input-price/--output-price (million|token)
    #[arg(long, default_value = "million")]
    pub unit: PriceUnit,
}

impl UpdateArgs {
    fn to_override(&self) -> ModelOverride {
        let mut over =
            ModelOverride::from_prices(self.input_price, self.output_price, self.min_cost, self.unit);
        over.name = self.name.clone();
        over.enabled = match (self.enable, self.disable) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        over
    }
}

/// Models to list: filtered by provider and, unless `all`, enabled only.
fn select_models(models: Vec<Model>, provider: Option<&str>, all: bool) -> Vec<Model> {
    let provider = provider.map(str::to_lowercase);
    models
        .into_iter()
        .filter(|m| all || m.enabled)
        .filter(|m| provider.as_deref().map_or(true, |p| provider_key(m) == p))
        .collect()
}

pub async fn run(args: ModelsArgs, opts: &OutputOptions) -> Result<()> {
    match args.action {
        Some(ModelsAction::Update(update)) => update_model(update, opts).await,
        None => list(args.provider.as_deref(), args.all, opts).await,
    }
}

async fn list(provider: Option<&str>, all: bool, opts: &OutputOptions) -> Result<()> {
    let client = node::connect()?;
    let models = client
        .list_models()
        .await
        .map_err(|e| node::on_admin_error(&client, e))?;

    let groups = group_by_provider(&select_models(models, provider, all));

    match opts.format {
        OutputFormat::Text => println!("{}", renderer::render_model_groups(&groups, opts.use_color)),
        OutputFormat::Json => print_json(&groups, opts)?,
    }
    Ok(())
}

async fn update_model(args: UpdateArgs, opts: &OutputOptions) -> Result<()> {
    let client = node::connect()?;
    let mut over = args.to_override();

    if args.recommended_min {
        let current = client
            .get_model(&args.model)
            .await
            .map_err(|e| node::on_admin_error(&client, e))?;
        let priced = current.apply_override(&over);
        over.min_cost_per_request = Some(priced.recommended_min_cost());
    }

    if over.is_empty() {
        anyhow::bail!("Nothing to update for '{}'", args.model);
    }

    let updated = client
        .update_model(&args.model, &over)
        .await
        .map_err(|e| node::on_admin_error(&client, e))?;
    tracing::info!(model = %updated.id, "model override saved");

    match opts.format {
        OutputFormat::Text => {
            let groups = group_by_provider(std::slice::from_ref(&updated));
            println!("Updated {}", updated.id);
            println!("{}", renderer::render_model_groups(&groups, opts.use_color));
        }
        OutputFormat::Json => print_json(&updated, opts)?,
    }
    Ok(())
}
