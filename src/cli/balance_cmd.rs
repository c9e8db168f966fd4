use anyhow::Result;

use crate::cli::node;
use crate::cli::output::{print_json, OutputFormat, OutputOptions};
use crate::cli::renderer;

pub async fn run(opts: &OutputOptions) -> Result<()> {
    let client = node::connect()?;
    let summary = client
        .balances()
        .await
        .map_err(|e| node::on_admin_error(&client, e))?;

    match opts.format {
        OutputFormat::Text => println!("{}", renderer::render_balances(&summary, opts.use_color)),
        OutputFormat::Json => print_json(&summary, opts)?,
    }
    Ok(())
}
