use colored::{control, ColoredString, Colorize};

use crate::core::cost::catalog::ProviderGroup;
use crate::core::cost::units::per_million_to_per_token;
use crate::core::formatter::{
    format_balance, format_cost, format_price_per_million, format_timestamp, format_tokens,
};
use crate::core::models::balance::BalanceSummary;
use crate::core::models::cost::CostReport;
use crate::core::models::log::LogEntry;
use crate::core::models::provider::UpstreamProvider;

/// Render the cost of one request.
///
/// Layout:
/// ```text
///  openai/gpt-4o
///   Tokens    1.0K in / 1.0K out
///   Prices    in $1.00/M ($0.00000100/token)  out $2.00/M ($0.000002/token)
///   Cost      $0.0060 (minimum applied)
///   Breakdown Input: $0.0010 | Output: $0.0020 | Minimum: $0.0060
///   Minimum   $0.0060 per request (recommended $0.0010)
///   Reaches   6.0K input or 3.0K output or 3.0K + 1.5K tokens
/// ```
pub fn render_cost(report: &CostReport, use_color: bool) -> String {
    control::set_override(use_color);

    let model = &report.model;
    let result = &report.result;
    let estimate = &report.minimum_tokens;

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(" {}", model.display_name()).bold().to_string());
    lines.push(format!(
        "  {}    {} in / {} out",
        "Tokens".cyan(),
        format_tokens(report.input_tokens),
        format_tokens(report.output_tokens)
    ));
    lines.push(format!(
        "  {}    in {} ({}/token)  out {} ({}/token)",
        "Prices".cyan(),
        format_price_per_million(model.input_cost),
        format_cost(per_million_to_per_token(model.input_cost)),
        format_price_per_million(model.output_cost),
        format_cost(per_million_to_per_token(model.output_cost))
    ));

    let cost = format_cost(result.final_cost);
    let cost_line = if result.is_minimum_applied {
        format!("{} {}", cost, "(minimum applied)".yellow())
    } else {
        cost
    };
    lines.push(format!("  {}      {}", "Cost".cyan(), cost_line));

    if !report.breakdown.is_empty() {
        lines.push(format!("  {} {}", "Breakdown".cyan(), report.breakdown));
    }

    if result.min_cost_per_request > 0.0 {
        lines.push(format!(
            "  {}   {} per request (recommended {})",
            "Minimum".cyan(),
            format_cost(result.min_cost_per_request),
            format_cost(report.recommended_min_cost)
        ));
        lines.push(format!(
            "  {}   {} input or {} output or {} + {} tokens",
            "Reaches".cyan(),
            format_tokens(estimate.input_tokens_only),
            format_tokens(estimate.output_tokens_only),
            format_tokens(estimate.balanced_tokens.input),
            format_tokens(estimate.balanced_tokens.output)
        ));
    }

    if let Some(message) = &report.validation.message {
        lines.push(format!("  {}", message.dimmed()));
    }

    for issue in model.pricing_issues() {
        lines.push(format!("  {}", issue.red()));
    }

    lines.join("\n")
}

fn enabled_marker(enabled: bool) -> ColoredString {
    if enabled {
        "●".green()
    } else {
        "○".dimmed()
    }
}

/// Render the model catalog grouped by provider.
pub fn render_model_groups(groups: &[ProviderGroup], use_color: bool) -> String {
    control::set_override(use_color);

    if groups.is_empty() {
        return "No models found.".to_string();
    }

    let mut sections: Vec<String> = Vec::new();
    for group in groups {
        let mut lines: Vec<String> = Vec::new();
        let count = group.models.len();
        lines.push(
            format!(
                " {} ({} model{})",
                group.provider,
                count,
                if count == 1 { "" } else { "s" }
            )
            .bold()
            .to_string(),
        );

        let width = group
            .models
            .iter()
            .map(|m| m.display_name().chars().count())
            .max()
            .unwrap_or(0);

        for model in &group.models {
            let context = model
                .context_window()
                .map(|c| format!("  {} {}", "ctx".cyan(), format_tokens(c)))
                .unwrap_or_default();
            lines.push(format!(
                "  {} {:<width$}  {} {}  {} {}  {} {}{}",
                enabled_marker(model.enabled),
                model.display_name(),
                "in".cyan(),
                format_price_per_million(model.input_cost),
                "out".cyan(),
                format_price_per_million(model.output_cost),
                "min".cyan(),
                format_cost(model.min_cost()),
                context,
                width = width
            ));
            for issue in model.pricing_issues() {
                lines.push(format!("    {}", issue.red()));
            }
        }
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n")
}

pub fn render_providers(providers: &[UpstreamProvider], use_color: bool) -> String {
    control::set_override(use_color);

    if providers.is_empty() {
        return "No upstream providers configured.".to_string();
    }

    providers
        .iter()
        .map(|p| {
            let key = if p.has_api_key() {
                "key set".normal()
            } else {
                "no key".red()
            };
            let fee = p
                .provider_fee
                .map(|f| format!("  fee x{:.2}", f))
                .unwrap_or_default();
            format!(
                " {} {:>3}  {:<12} {}  {}{}",
                enabled_marker(p.enabled),
                p.id,
                p.provider_type.bold(),
                p.base_url,
                key,
                fee
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn colored_level(level: &str) -> ColoredString {
    match level.to_uppercase().as_str() {
        "ERROR" | "CRITICAL" => level.red().bold(),
        "WARNING" | "WARN" => level.yellow(),
        "DEBUG" => level.dimmed(),
        _ => level.normal(),
    }
}

/// One line per entry: "<time> <LEVEL> <logger> <message>  key=value ..."
pub fn render_logs(entries: &[LogEntry], use_color: bool) -> String {
    control::set_override(use_color);

    if entries.is_empty() {
        return "No log entries.".to_string();
    }

    entries
        .iter()
        .map(|entry| {
            let mut line = String::new();
            if let Some(ts) = &entry.timestamp {
                line.push_str(&format!("{} ", format_timestamp(ts).dimmed()));
            }
            line.push_str(&format!("{:<8}", colored_level(entry.level_or_default())));
            if let Some(name) = &entry.name {
                line.push_str(&format!(" {}", name.cyan()));
            }
            line.push_str(&format!(" {}", entry.message));
            if let Some(request_id) = &entry.request_id {
                line.push_str(&format!("  {}", format!("request_id={}", request_id).dimmed()));
            }
            let extra = entry.extra_pairs();
            if !extra.is_empty() {
                line.push_str(&format!("  {}", extra.join(" ").dimmed()));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_balances(summary: &BalanceSummary, use_color: bool) -> String {
    control::set_override(use_color);

    let unit = summary.unit.as_str();
    let mut lines: Vec<String> = vec![
        " Balances".bold().to_string(),
        format!(
            "  {}    {}",
            "Wallet".cyan(),
            format_balance(summary.total_wallet, unit)
        ),
        format!(
            "  {}     {}",
            "Users".cyan(),
            format_balance(summary.user_balances, unit)
        ),
        format!(
            "  {}     {}",
            "Owner".cyan(),
            format_balance(summary.owner_balance, unit)
        ),
    ];

    if !summary.mints.is_empty() {
        lines.push(format!("  {}:", "By Mint".cyan()));
        for mint in &summary.mints {
            match &mint.error {
                Some(err) => lines.push(format!("    {}  {}", mint.mint_url, err.red())),
                None => lines.push(format!(
                    "    {}  wallet {}  users {}  owner {}",
                    mint.mint_url,
                    format_balance(mint.wallet_balance, &mint.unit),
                    format_balance(mint.user_balance, &mint.unit),
                    format_balance(mint.owner_balance, &mint.unit)
                )),
            }
        }
    }

    lines.join("\n")
}
