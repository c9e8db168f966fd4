use chrono::{DateTime, Local, Utc};

use crate::core::models::cost::CostCalculationResult;

/// Format a cost with more decimals the smaller it is, so fractions of a
/// cent stay distinguishable. Zero is "Free".
///
/// A cost of exactly 0.000001 still gets 8 decimals ("$0.00000100").
pub fn format_cost(cost: f64) -> String {
    if cost == 0.0 {
        "Free".to_string()
    } else if cost <= 0.000001 {
        format!("${:.8}", cost)
    } else if cost < 0.001 {
        format!("${:.6}", cost)
    } else if cost < 0.01 {
        format!("${:.4}", cost)
    } else {
        format!("${:.3}", cost)
    }
}

/// Returns e.g. "Input: $0.0010 | Output: $0.0020 | Minimum: $0.0050".
/// Zero parts are left out.
pub fn format_cost_breakdown(result: &CostCalculationResult) -> String {
    let mut parts: Vec<String> = Vec::new();

    if result.input_cost > 0.0 {
        parts.push(format!("Input: {}", format_cost(result.input_cost)));
    }
    if result.output_cost > 0.0 {
        parts.push(format!("Output: {}", format_cost(result.output_cost)));
    }
    if result.is_minimum_applied {
        parts.push(format!(
            "Minimum: {}",
            format_cost(result.min_cost_per_request)
        ));
    }

    parts.join(" | ")
}

/// Returns "$2.50/M" for a per-million-tokens price, "Free" for zero.
pub fn format_price_per_million(price: f64) -> String {
    if price == 0.0 {
        "Free".to_string()
    } else {
        format!("${:.2}/M", price)
    }
}

pub fn format_tokens(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        format!("{}", count)
    }
}

/// Returns "2025-01-31 14:05:09" in local time.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Returns "1,234,567 msat".
pub fn format_balance(amount: i64, unit: &str) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{} {}", sign, grouped, unit)
}
