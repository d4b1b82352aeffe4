//! Strategy report value types.
//!
//! Field names serialize the same way the exported report document is laid
//! out: top-level `vision`/`tam`/`pmf`/`gtm`, camelCase inside.

use serde::{Deserialize, Serialize};

/// A complete strategy report. Built once per synthesis and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub vision: Vision,
    #[serde(rename = "tam")]
    pub market_sizing: MarketSizing,
    #[serde(rename = "pmf")]
    pub product_market_fit: ProductMarketFit,
    #[serde(rename = "gtm")]
    pub go_to_market: GoToMarket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vision {
    pub title: String,
    pub mission: String,
    pub vision: String,
    pub values: Vec<String>,
    pub north_star: String,
}

/// TAM / SAM / SOM estimates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSizing {
    pub total_market: String,
    /// Serialized as `servicableMarket`; existing exports use that spelling.
    pub servicable_market: String,
    pub reachable_market: String,
    pub growth_rate: String,
    pub key_drivers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMarketFit {
    pub target_customer: String,
    pub problem_statement: String,
    pub solution: String,
    pub value_proposition: String,
    pub validation_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoToMarket {
    pub strategy: String,
    pub channels: Vec<String>,
    pub pricing: String,
    pub timeline: Vec<String>,
    pub metrics: Vec<String>,
}

impl StrategyReport {
    /// Dotted paths of every field that is blank or an empty list.
    ///
    /// A report from an outside source is only accepted when this is empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let text = [
            ("vision.title", &self.vision.title),
            ("vision.mission", &self.vision.mission),
            ("vision.vision", &self.vision.vision),
            ("vision.northStar", &self.vision.north_star),
            ("tam.totalMarket", &self.market_sizing.total_market),
            ("tam.servicableMarket", &self.market_sizing.servicable_market),
            ("tam.reachableMarket", &self.market_sizing.reachable_market),
            ("tam.growthRate", &self.market_sizing.growth_rate),
            ("pmf.targetCustomer", &self.product_market_fit.target_customer),
            ("pmf.problemStatement", &self.product_market_fit.problem_statement),
            ("pmf.solution", &self.product_market_fit.solution),
            ("pmf.valueProposition", &self.product_market_fit.value_proposition),
            ("gtm.strategy", &self.go_to_market.strategy),
            ("gtm.pricing", &self.go_to_market.pricing),
        ];
        let lists = [
            ("vision.values", &self.vision.values),
            ("tam.keyDrivers", &self.market_sizing.key_drivers),
            ("pmf.validationSteps", &self.product_market_fit.validation_steps),
            ("gtm.channels", &self.go_to_market.channels),
            ("gtm.timeline", &self.go_to_market.timeline),
            ("gtm.metrics", &self.go_to_market.metrics),
        ];

        let mut missing: Vec<&'static str> = text
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| *k)
            .collect();
        missing.extend(
            lists
                .iter()
                .filter(|(_, v)| v.is_empty() || v.iter().any(|s| s.trim().is_empty()))
                .map(|(k, _)| *k),
        );
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
