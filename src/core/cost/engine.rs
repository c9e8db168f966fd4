use crate::core::models::cost::{
    BalancedTokens, CostCalculationResult, MinimumTokenEstimate, RequestCostValidation,
};
use crate::core::models::model::Model;

const TOKENS_PER_PRICE_UNIT: f64 = 1_000_000.0;

/// Tokens charged when a model has no known context window.
const DEFAULT_MIN_TOKENS: f64 = 1_000.0;
/// Lowest floor, in tokens, for models with a tiny context window.
const FLOOR_MIN_TOKENS: f64 = 100.0;

/// Cost of a request with the model's per-request minimum enforced.
pub fn calculate_request_cost(
    input_tokens: u64,
    output_tokens: u64,
    model: &Model,
) -> CostCalculationResult {
    let input_cost = input_tokens as f64 / TOKENS_PER_PRICE_UNIT * model.input_cost;
    let output_cost = output_tokens as f64 / TOKENS_PER_PRICE_UNIT * model.output_cost;
    let base_cost = input_cost + output_cost;
    let min_cost_per_request = model.min_cost();
    let final_cost = base_cost.max(min_cost_per_request);

    CostCalculationResult {
        input_cost,
        output_cost,
        base_cost,
        min_cost_per_request,
        final_cost,
        is_minimum_applied: final_cost > base_cost,
    }
}

/// Always valid: the minimum is applied to the charge, never used to reject.
pub fn validate_request_cost(
    model: &Model,
    input_tokens: u64,
    output_tokens: u64,
) -> RequestCostValidation {
    let result = calculate_request_cost(input_tokens, output_tokens, model);

    let message = result.is_minimum_applied.then(|| {
        format!(
            "Minimum charge of ${:.6} applied",
            result.min_cost_per_request
        )
    });

    RequestCostValidation {
        is_valid: true,
        actual_cost: result.final_cost,
        minimum_cost: result.min_cost_per_request,
        message,
    }
}

fn tokens_for_cost(cost: f64, price: f64) -> u64 {
    if price > 0.0 {
        (cost * TOKENS_PER_PRICE_UNIT / price).ceil() as u64
    } else {
        0
    }
}

/// How many tokens reach the minimum charge on their own. Rounds up so the
/// estimate never falls short of the minimum.
pub fn estimate_minimum_tokens_for_cost(model: &Model) -> MinimumTokenEstimate {
    let min_cost = model.min_cost();
    if min_cost <= 0.0 {
        return MinimumTokenEstimate::default();
    }

    let half = min_cost / 2.0;
    MinimumTokenEstimate {
        input_tokens_only: tokens_for_cost(min_cost, model.input_cost),
        output_tokens_only: tokens_for_cost(min_cost, model.output_cost),
        balanced_tokens: BalancedTokens {
            input: tokens_for_cost(half, model.input_cost),
            output: tokens_for_cost(half, model.output_cost),
        },
    }
}

/// Default minimum charge for a model, derived from its context window so a
/// full-context request is never near free.
pub fn calculate_min_cost_per_request(context_length: Option<u64>, input_cost: f64) -> f64 {
    match context_length {
        Some(len) if len > 0 => {
            let cost_for_full_context = len as f64 / TOKENS_PER_PRICE_UNIT * input_cost;
            let minimum_floor = FLOOR_MIN_TOKENS / TOKENS_PER_PRICE_UNIT * input_cost;
            cost_for_full_context.max(minimum_floor)
        }
        _ => DEFAULT_MIN_TOKENS / TOKENS_PER_PRICE_UNIT * input_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(input: f64, output: f64, min: Option<f64>) -> Model {
        let mut m = Model::from_pricing("test/model", input, output);
        m.min_cost_per_request = min;
        m
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn minimum_applied_for_small_request() {
        let m = model(1.0, 2.0, Some(0.005));
        let r = calculate_request_cost(1000, 1000, &m);
        assert!(close(r.input_cost, 0.001));
        assert!(close(r.output_cost, 0.002));
        assert!(close(r.base_cost, 0.003));
        assert!(close(r.final_cost, 0.005));
        assert!(r.is_minimum_applied);
    }

    #[test]
    fn minimum_not_applied_for_large_request() {
        let m = model(1.0, 2.0, Some(0.005));
        let r = calculate_request_cost(1_000_000, 2_000_000, &m);
        assert!(close(r.input_cost, 1.0));
        assert!(close(r.output_cost, 4.0));
        assert!(close(r.base_cost, 5.0));
        assert!(close(r.final_cost, 5.0));
        assert!(!r.is_minimum_applied);
    }

    #[test]
    fn zero_tokens_costs_the_minimum() {
        let m = model(1.0, 2.0, Some(0.005));
        assert!(close(calculate_request_cost(0, 0, &m).final_cost, 0.005));

        let free = model(1.0, 2.0, None);
        let r = calculate_request_cost(0, 0, &free);
        assert_eq!(r.final_cost, 0.0);
        assert_eq!(r.min_cost_per_request, 0.0);
        assert!(!r.is_minimum_applied);
    }

    #[test]
    fn final_cost_bounds_hold_across_inputs() {
        let models = [
            model(0.0, 0.0, None),
            model(0.5, 1.5, Some(0.0001)),
            model(3.0, 15.0, Some(0.02)),
            model(60.0, 120.0, Some(1.0)),
        ];
        let counts = [0u64, 1, 999, 10_000, 250_000, 4_000_000];
        for m in &models {
            for &i in &counts {
                for &o in &counts {
                    let r = calculate_request_cost(i, o, m);
                    assert!(r.final_cost >= r.base_cost);
                    assert!(r.final_cost >= r.min_cost_per_request);
                    assert_eq!(r.is_minimum_applied, r.final_cost > r.base_cost);
                    if r.base_cost >= r.min_cost_per_request {
                        assert!(!r.is_minimum_applied);
                    }
                }
            }
        }
    }

    #[test]
    fn base_cost_scales_linearly() {
        let m = model(3.0, 15.0, Some(0.0001));
        let one = calculate_request_cost(12_000, 3_000, &m);
        for k in [2u64, 5, 40] {
            let scaled = calculate_request_cost(12_000 * k, 3_000 * k, &m);
            assert!(!one.is_minimum_applied && !scaled.is_minimum_applied);
            assert!((scaled.base_cost - k as f64 * one.base_cost).abs() < 1e-9);
        }
    }

    #[test]
    fn validation_is_always_valid() {
        let m = model(1.0, 2.0, Some(0.005));
        let v = validate_request_cost(&m, 1000, 1000);
        assert!(v.is_valid);
        assert!(close(v.actual_cost, 0.005));
        assert!(close(v.minimum_cost, 0.005));
        assert_eq!(v.message.as_deref(), Some("Minimum charge of $0.005000 applied"));
    }

    #[test]
    fn validation_has_no_message_without_minimum() {
        let m = model(1.0, 2.0, Some(0.005));
        let v = validate_request_cost(&m, 1_000_000, 0);
        assert!(v.is_valid);
        assert!(close(v.actual_cost, 1.0));
        assert!(v.message.is_none());
    }

    #[test]
    fn estimate_is_zero_without_minimum() {
        assert_eq!(
            estimate_minimum_tokens_for_cost(&model(1.0, 2.0, None)),
            MinimumTokenEstimate::default()
        );
        assert_eq!(
            estimate_minimum_tokens_for_cost(&model(7.0, 9.0, Some(0.0))),
            MinimumTokenEstimate::default()
        );
    }

    #[test]
    fn estimate_rounds_up() {
        let m = model(1.0, 2.0, Some(0.25));
        let e = estimate_minimum_tokens_for_cost(&m);
        assert_eq!(e.input_tokens_only, 250_000);
        assert_eq!(e.output_tokens_only, 125_000);
        assert_eq!(
            e.balanced_tokens,
            BalancedTokens {
                input: 125_000,
                output: 62_500
            }
        );

        // 0.001 * 1e6 / 3.0 = 333.33.. -> 334
        let odd = model(3.0, 0.0, Some(0.001));
        let e = estimate_minimum_tokens_for_cost(&odd);
        assert_eq!(e.input_tokens_only, 334);
        assert_eq!(e.output_tokens_only, 0);
        assert_eq!(e.balanced_tokens.output, 0);
    }

    #[test]
    fn estimate_reaches_minimum() {
        let m = model(3.0, 7.0, Some(0.0123));
        let e = estimate_minimum_tokens_for_cost(&m);
        let r = calculate_request_cost(e.input_tokens_only, 0, &m);
        assert!(r.base_cost >= m.min_cost() - 1e-12);
        let r = calculate_request_cost(0, e.output_tokens_only, &m);
        assert!(r.base_cost >= m.min_cost() - 1e-12);
    }

    #[test]
    fn min_cost_without_context_length() {
        assert!(close(calculate_min_cost_per_request(None, 5.0), 0.005));
        assert!(close(calculate_min_cost_per_request(Some(0), 5.0), 0.005));
    }

    #[test]
    fn min_cost_from_context_length() {
        assert!(close(calculate_min_cost_per_request(Some(8192), 5.0), 0.04096));
    }

    #[test]
    fn min_cost_floor_for_tiny_context() {
        // 50 tokens of context is below the 100-token floor
        assert!(close(calculate_min_cost_per_request(Some(50), 5.0), 0.0005));
    }
}
