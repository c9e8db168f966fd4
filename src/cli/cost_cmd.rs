use anyhow::Result;
use clap::Args;

use crate::cli::node;
use crate::cli::output::{print_json, OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::core::cost::units::PriceUnit;
use crate::core::models::cost::CostReport;
use crate::core::models::model::{Model, ModelOverride};

#[derive(Args, Debug)]
pub struct CostArgs {
    /// Model ID (e.g. openai/gpt-4o)
    pub model: String,

    /// Input (prompt) tokens
    #[arg(short, long, default_value_t = 0)]
    pub input: u64,

    /// Output (completion) tokens
    #[arg(short, long, default_value_t = 0)]
    pub output: u64,

    /// Override the input price
    #[arg(long)]
    pub input_price: Option<f64>,

    /// Override the output price
    #[arg(long)]
    pub output_price: Option<f64>,

    /// Override the minimum charge per request
    #[arg(long)]
    pub min_cost: Option<f64>,

    /// Unit of --input-price/--output-price (million|token)
    #[arg(long, default_value = "million")]
    pub unit: PriceUnit,

    /// Context window, used for the recommended minimum
    #[arg(long)]
    pub context_length: Option<u64>,

    /// Price from the flags only, without contacting the node
    #[arg(long)]
    pub offline: bool,
}

impl CostArgs {
    fn pricing_override(&self) -> ModelOverride {
        ModelOverride::from_prices(self.input_price, self.output_price, self.min_cost, self.unit)
    }
}

pub async fn run(args: CostArgs, opts: &OutputOptions) -> Result<()> {
    let base = if args.offline {
        Model::from_pricing(&args.model, 0.0, 0.0)
    } else {
        let client = node::connect()?;
        client
            .get_model(&args.model)
            .await
            .map_err(|e| node::on_admin_error(&client, e))?
    };

    let mut model = base.apply_override(&args.pricing_override());
    if let Some(len) = args.context_length {
        model.context_length = Some(i64::try_from(len).unwrap_or(i64::MAX));
    }
    tracing::debug!(model = %model.id, input = args.input, output = args.output, "pricing request");

    let report = CostReport::build(model, args.input, args.output);

    match opts.format {
        OutputFormat::Text => println!("{}", renderer::render_cost(&report, opts.use_color)),
        OutputFormat::Json => {
            print_json(&report, opts)?;
            if opts.verbose {
                for issue in report.model.pricing_issues() {
                    eprintln!("{}", issue);
                }
            }
        }
    }
    Ok(())
}
