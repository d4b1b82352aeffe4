//! Strategy synthesis: (idea, business model) -> StrategyReport.
//!
//! `TemplateSynthesizer` fills fixed English templates and never fails.
//! Other backends plug in through the `Synthesizer` trait and must fail
//! closed: either a complete report or an error, never a partial one.

use thiserror::Error;

use crate::model::BusinessModel;
use crate::report::{owned, GoToMarket, MarketSizing, ProductMarketFit, StrategyReport, Vision};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("synthesis backend failed: {0}")]
    Backend(String),
    #[error("synthesis timed out after {millis}ms")]
    Timeout { millis: u64 },
    #[error("synthesis backend returned an unreadable report: {0}")]
    InvalidResponse(String),
    #[error("synthesis backend returned an incomplete report (missing: {})", .0.join(", "))]
    Incomplete(Vec<String>),
}

/// Produces a strategy report for a product idea.
pub trait Synthesizer {
    fn synthesize(&self, idea: &str, model: BusinessModel) -> Result<StrategyReport, SynthesisError>;
}

/// Deterministic template-based synthesizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateSynthesizer;

impl Synthesizer for TemplateSynthesizer {
    fn synthesize(&self, idea: &str, model: BusinessModel) -> Result<StrategyReport, SynthesisError> {
        Ok(synthesize(idea, model))
    }
}

pub const CORE_VALUES: [&str; 4] = ["Innovation", "User-Centricity", "Scalability", "Excellence"];
pub const NORTH_STAR: &str = "10M active users with 95% satisfaction rate";

pub const KEY_DRIVERS: [&str; 4] = [
    "Digital transformation",
    "Remote work adoption",
    "Mobile-first behavior",
    "AI integration",
];

pub const VALUE_PROPOSITION: &str =
    "Reduce operational costs by 40% while improving user experience and scalability.";

pub const VALIDATION_STEPS: [&str; 5] = [
    "User interviews",
    "MVP testing",
    "Beta program",
    "Pilot partnerships",
    "Market validation",
];

pub const TIMELINE: [&str; 4] = [
    "Q1: MVP launch",
    "Q2: User acquisition",
    "Q3: Feature expansion",
    "Q4: Scale & optimize",
];

pub const METRICS: [&str; 4] = [
    "User acquisition cost",
    "Monthly recurring revenue",
    "Customer lifetime value",
    "Net promoter score",
];

/// Build the full report from templates. Total and deterministic.
///
/// An empty idea is substituted as-is; keeping it non-blank is the wizard's job.
pub fn synthesize(idea: &str, model: BusinessModel) -> StrategyReport {
    StrategyReport {
        vision: vision_for(idea),
        market_sizing: market_sizing(),
        product_market_fit: product_market_fit_for(idea, model),
        go_to_market: go_to_market_for(model),
    }
}

/// Vision block. Depends on the idea only.
pub fn vision_for(idea: &str) -> Vision {
    let lower = idea.to_lowercase();
    Vision {
        title: format!("{idea} - Strategic Vision"),
        mission: format!(
            "To revolutionize how people interact with {lower} by creating an intuitive, scalable solution that addresses core market needs."
        ),
        vision: format!(
            "To become the leading platform in the {lower} space, serving millions of users globally by 2027."
        ),
        values: owned(&CORE_VALUES),
        north_star: NORTH_STAR.to_string(),
    }
}

/// Market sizing reference record. Constant for every idea and model.
pub fn market_sizing() -> MarketSizing {
    MarketSizing {
        total_market: "$45.2B".to_string(),
        servicable_market: "$12.8B".to_string(),
        reachable_market: "$3.2B".to_string(),
        growth_rate: "23% CAGR".to_string(),
        key_drivers: owned(&KEY_DRIVERS),
    }
}

pub fn product_market_fit_for(idea: &str, model: BusinessModel) -> ProductMarketFit {
    let lower = idea.to_lowercase();
    ProductMarketFit {
        target_customer: model.playbook().target_customer.to_string(),
        problem_statement: format!(
            "Current solutions in the {lower} space are fragmented, expensive, and difficult to use."
        ),
        solution: format!(
            "A unified, AI-powered platform that simplifies {lower} management with intelligent automation."
        ),
        value_proposition: VALUE_PROPOSITION.to_string(),
        validation_steps: owned(&VALIDATION_STEPS),
    }
}

pub fn go_to_market_for(model: BusinessModel) -> GoToMarket {
    let playbook = model.playbook();
    GoToMarket {
        strategy: playbook.strategy.to_string(),
        channels: owned(&playbook.channels),
        pricing: playbook.pricing.to_string(),
        timeline: owned(&TIMELINE),
        metrics: owned(&METRICS),
    }
}
