use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::cost::engine::calculate_min_cost_per_request;
use crate::core::cost::units::PriceUnit;

/// A model as served by the node's admin API.
///
/// Prices are in the node's display currency per 1,000,000 tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Upstream provider label (e.g., "openai")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub input_cost: f64,
    #[serde(default)]
    pub output_cost: f64,
    /// Floor charge per request; unset is treated as 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cost_per_request: Option<f64>,
    /// Maximum token window as sent by the node. Only positive values are
    /// used for pricing, see [`Model::context_window`].
    #[serde(
        default,
        rename = "contextLength",
        alias = "context_length",
        deserialize_with = "lenient_context_length",
        skip_serializing_if = "Option::is_none"
    )]
    pub context_length: Option<i64>,
}

fn default_true() -> bool {
    true
}

/// Accepts any JSON number (or null). Fractions are truncated; anything else
/// is treated as absent.
fn lenient_context_length<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    })
}

/// Local customization layered on top of a model. Absent fields keep the
/// model's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cost_per_request: Option<f64>,
}

impl ModelOverride {
    /// Pricing override from operator input. Token prices are normalized to
    /// per-million; the per-request minimum is taken as is.
    pub fn from_prices(
        input_price: Option<f64>,
        output_price: Option<f64>,
        min_cost: Option<f64>,
        unit: PriceUnit,
    ) -> Self {
        Self {
            input_cost: input_price.map(|p| unit.to_per_million(p)),
            output_cost: output_price.map(|p| unit.to_per_million(p)),
            min_cost_per_request: min_cost,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Model {
    /// Build a model from bare prices, with nothing else known about it.
    pub fn from_pricing(id: &str, input_cost: f64, output_cost: f64) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            provider: None,
            enabled: true,
            input_cost,
            output_cost,
            min_cost_per_request: None,
            context_length: None,
        }
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }

    pub fn min_cost(&self) -> f64 {
        self.min_cost_per_request.unwrap_or(0.0)
    }

    /// The context length if it is usable, i.e. positive.
    pub fn context_window(&self) -> Option<u64> {
        self.context_length
            .and_then(|len| u64::try_from(len).ok())
            .filter(|&len| len > 0)
    }

    /// Suggested floor derived from the context window.
    pub fn recommended_min_cost(&self) -> f64 {
        calculate_min_cost_per_request(self.context_window(), self.input_cost)
    }

    pub fn apply_override(&self, over: &ModelOverride) -> Self {
        let mut model = self.clone();
        if let Some(name) = &over.name {
            model.name = Some(name.clone());
        }
        if let Some(enabled) = over.enabled {
            model.enabled = enabled;
        }
        if let Some(input_cost) = over.input_cost {
            model.input_cost = input_cost;
        }
        if let Some(output_cost) = over.output_cost {
            model.output_cost = output_cost;
        }
        if let Some(min_cost) = over.min_cost_per_request {
            model.min_cost_per_request = Some(min_cost);
        }
        model
    }

    /// Pricing problems worth showing to the operator. Nothing here is
    /// rejected; the cost engine computes with whatever values it is given.
    pub fn pricing_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.input_cost < 0.0 {
            issues.push(format!(
                "Model '{}': negative input_cost {}",
                self.id, self.input_cost
            ));
        }
        if self.output_cost < 0.0 {
            issues.push(format!(
                "Model '{}': negative output_cost {}",
                self.id, self.output_cost
            ));
        }
        if self.min_cost() < 0.0 {
            issues.push(format!(
                "Model '{}': negative min_cost_per_request {}",
                self.id,
                self.min_cost()
            ));
        }
        if let Some(len) = self.context_length.filter(|&len| len <= 0) {
            issues.push(format!(
                "Model '{}': contextLength is {}, using the 1000-token default",
                self.id, len
            ));
        }
        issues
    }
}
