use serde::{Deserialize, Serialize};

use crate::core::cost::engine::{
    calculate_request_cost, estimate_minimum_tokens_for_cost, validate_request_cost,
};
use crate::core::formatter::format_cost_breakdown;
use crate::core::models::model::Model;

/// Cost of one request, before and after the per-request minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostCalculationResult {
    pub input_cost: f64,
    pub output_cost: f64,
    /// input_cost + output_cost
    pub base_cost: f64,
    pub min_cost_per_request: f64,
    /// max(base_cost, min_cost_per_request)
    pub final_cost: f64,
    pub is_minimum_applied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestCostValidation {
    pub is_valid: bool,
    pub actual_cost: f64,
    pub minimum_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancedTokens {
    pub input: u64,
    pub output: u64,
}

/// Token counts that would reach the per-request minimum on usage alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumTokenEstimate {
    pub input_tokens_only: u64,
    pub output_tokens_only: u64,
    pub balanced_tokens: BalancedTokens,
}

/// Everything shown for one priced request.
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    pub model: Model,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub result: CostCalculationResult,
    pub breakdown: String,
    pub validation: RequestCostValidation,
    pub minimum_tokens: MinimumTokenEstimate,
    pub recommended_min_cost: f64,
}

impl CostReport {
    pub fn build(model: Model, input_tokens: u64, output_tokens: u64) -> Self {
        let result = calculate_request_cost(input_tokens, output_tokens, &model);
        Self {
            breakdown: format_cost_breakdown(&result),
            validation: validate_request_cost(&model, input_tokens, output_tokens),
            minimum_tokens: estimate_minimum_tokens_for_cost(&model),
            recommended_min_cost: model.recommended_min_cost(),
            result,
            model,
            input_tokens,
            output_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_collects_engine_outputs() {
        let mut model = Model::from_pricing("m", 1.0, 2.0);
        model.min_cost_per_request = Some(0.005);
        let report = CostReport::build(model, 1000, 1000);
        assert!(report.result.is_minimum_applied);
        assert_eq!(report.breakdown, "Input: $0.0010 | Output: $0.0020 | Minimum: $0.0050");
        assert!(report.validation.message.is_some());
        assert!(report.minimum_tokens.input_tokens_only >= 5000);
        assert!((report.recommended_min_cost - 0.001).abs() < 1e-12);
    }

    #[test]
    fn report_serializes_result_fields() {
        let report = CostReport::build(Model::from_pricing("m", 1.0, 1.0), 0, 0);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["result"]["final_cost"], 0.0);
        assert_eq!(json["result"]["is_minimum_applied"], false);
        assert!(json["validation"].get("message").is_none());
    }
}
