//! Business-model categories and the per-category go-to-market playbook.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The business model a product idea is pursued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessModel {
    /// B2C products with mass market appeal
    Consumer,
    /// Enterprise solutions and business tools
    B2B,
    /// Multi-sided marketplaces and ecosystems
    Platform,
}

impl BusinessModel {
    pub const ALL: [BusinessModel; 3] = [
        BusinessModel::Consumer,
        BusinessModel::B2B,
        BusinessModel::Platform,
    ];

    /// Stable token used on the command line, in config and on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            BusinessModel::Consumer => "consumer",
            BusinessModel::B2B => "b2b",
            BusinessModel::Platform => "platform",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BusinessModel::Consumer => "Consumer",
            BusinessModel::B2B => "B2B",
            BusinessModel::Platform => "Platform",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BusinessModel::Consumer => "B2C products with mass market appeal",
            BusinessModel::B2B => "Enterprise solutions and business tools",
            BusinessModel::Platform => "Multi-sided marketplaces and ecosystems",
        }
    }

    /// Parse a category token, falling back to `Platform` for anything unknown.
    ///
    /// This is the only place the fallback lives. Prefer `str::parse` and
    /// handle the error; use this only where a category must be produced.
    pub fn parse_or_platform(token: &str) -> BusinessModel {
        token.parse().unwrap_or_else(|_| {
            tracing::warn!(token, "unrecognized business model, falling back to platform");
            BusinessModel::Platform
        })
    }

    pub fn playbook(&self) -> &'static Playbook {
        match self {
            BusinessModel::Consumer => &CONSUMER_PLAYBOOK,
            BusinessModel::B2B => &B2B_PLAYBOOK,
            BusinessModel::Platform => &PLATFORM_PLAYBOOK,
        }
    }
}

impl fmt::Display for BusinessModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown business model '{0}' (expected consumer, b2b or platform)")]
pub struct UnknownBusinessModel(pub String);

impl FromStr for BusinessModel {
    type Err = UnknownBusinessModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "consumer" | "b2c" => Ok(BusinessModel::Consumer),
            "b2b" => Ok(BusinessModel::B2B),
            "platform" => Ok(BusinessModel::Platform),
            _ => Err(UnknownBusinessModel(s.to_string())),
        }
    }
}

/// Everything in a report that varies with the business model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playbook {
    pub target_customer: &'static str,
    pub strategy: &'static str,
    pub channels: [&'static str; 3],
    pub pricing: &'static str,
}

const CONSUMER_PLAYBOOK: Playbook = Playbook {
    target_customer: "Tech-savvy millennials and Gen Z users",
    strategy: "Viral growth with social media marketing",
    channels: ["Social media", "App stores", "Influencer partnerships"],
    pricing: "Freemium with premium tiers",
};

const B2B_PLAYBOOK: Playbook = Playbook {
    target_customer: "Mid-market companies with 50-500 employees",
    strategy: "Sales-led growth with enterprise partnerships",
    channels: ["Direct sales", "Partner channels", "Content marketing"],
    pricing: "Subscription-based with enterprise licensing",
};

const PLATFORM_PLAYBOOK: Playbook = Playbook {
    target_customer: "Platform creators and service providers",
    strategy: "Platform-driven growth with ecosystem partnerships",
    channels: ["API partnerships", "Developer community", "Platform integrations"],
    pricing: "Transaction-based with platform fees",
};
