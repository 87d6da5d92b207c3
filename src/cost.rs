//! Rough model-cost estimates for qualification runs.
//!
//! Token counts are approximated at four characters per token; good enough
//! for budgeting, not for billing.
use chrono::Utc;

use crate::models::CostEstimate;

pub const DEFAULT_PRICING_MODEL: &str = "anthropic.claude-3-5-sonnet-20241022-v2:0";

/// USD per one million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input: f64,
    pub output: f64,
}

const PRICING: [(&str, ModelPricing); 8] = [
    (
        "anthropic.claude-3-5-sonnet-20241022-v2:0",
        ModelPricing { input: 3.00, output: 15.00 },
    ),
    (
        "anthropic.claude-3-haiku-20240307-v1:0",
        ModelPricing { input: 0.25, output: 1.25 },
    ),
    ("amazon.nova-lite-v1:0", ModelPricing { input: 0.06, output: 0.24 }),
    ("amazon.nova-pro-v1:0", ModelPricing { input: 0.80, output: 3.20 }),
    (
        "amazon.titan-text-premier-v1:0",
        ModelPricing { input: 0.50, output: 1.50 },
    ),
    (
        "amazon.titan-text-express-v1",
        ModelPricing { input: 0.13, output: 0.17 },
    ),
    ("ai21.jamba-1-5-mini-v1:0", ModelPricing { input: 0.20, output: 0.40 }),
    (
        "meta.llama3-8b-instruct-v1:0",
        ModelPricing { input: 0.30, output: 0.60 },
    ),
];

/// Pricing for `model_id`, falling back to Claude 3.5 Sonnet v2.
pub fn pricing_for(model_id: &str) -> ModelPricing {
    PRICING
        .iter()
        .find(|(id, _)| *id == model_id)
        .or_else(|| PRICING.iter().find(|(id, _)| *id == DEFAULT_PRICING_MODEL))
        .map(|(_, pricing)| *pricing)
        .unwrap_or(ModelPricing {
            input: 3.00,
            output: 15.00,
        })
}

pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

pub fn calculate_cost(input_text: &str, output_text: &str, model_id: &str) -> CostEstimate {
    let pricing = pricing_for(model_id);
    let input_tokens = estimate_tokens(input_text);
    let output_tokens = estimate_tokens(output_text);

    let input_cost = input_tokens as f64 / 1_000_000.0 * pricing.input;
    let output_cost = output_tokens as f64 / 1_000_000.0 * pricing.output;

    CostEstimate {
        model_id: model_id.to_string(),
        input_tokens,
        output_tokens,
        input_cost,
        output_cost,
        total_cost: input_cost + output_cost,
        timestamp: Utc::now(),
    }
}
