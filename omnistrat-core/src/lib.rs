//! omnistrat-core: strategy synthesis and the four-step strategy wizard

pub mod export;
pub mod model;
pub mod report;
pub mod synthesis;
pub mod wizard;

pub use export::{file_name, read_report, to_document, write_report, ExportError};
pub use model::{BusinessModel, Playbook, UnknownBusinessModel};
pub use report::{GoToMarket, MarketSizing, ProductMarketFit, StrategyReport, Vision};
pub use synthesis::{synthesize, SynthesisError, Synthesizer, TemplateSynthesizer};
pub use wizard::{Action, Blocked, Step, WizardState};
