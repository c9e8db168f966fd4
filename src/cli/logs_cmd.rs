use anyhow::Result;

use crate::cli::node;
use crate::cli::output::{print_json, OutputFormat, OutputOptions};
use crate::cli::renderer;

const LEVELS: &[&str] = &["debug", "info", "warning", "error", "critical"];

pub async fn run(limit: u32, level: Option<String>, opts: &OutputOptions) -> Result<()> {
    if let Some(level) = &level {
        if !LEVELS.contains(&level.to_lowercase().as_str()) {
            anyhow::bail!(
                "Invalid level '{}' (must be one of {})",
                level,
                LEVELS.join("|")
            );
        }
    }

    let client = node::connect()?;
    let entries = client
        .list_logs(limit, level.as_deref())
        .await
        .map_err(|e| node::on_admin_error(&client, e))?;

    match opts.format {
        OutputFormat::Text => println!("{}", renderer::render_logs(&entries, opts.use_color)),
        OutputFormat::Json => print_json(&entries, opts)?,
    }
    Ok(())
}
