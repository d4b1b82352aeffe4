//! Four-step wizard: idea -> business model -> generation -> report.
//!
//! The state is a plain value. Every user event is an [`Action`]; applying
//! it consumes the current state and returns the next one. An action whose
//! guard fails leaves the state untouched, and [`WizardState::check`] tells
//! the caller why so it can render the control as disabled.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::BusinessModel;
use crate::report::StrategyReport;
use crate::synthesis::{SynthesisError, Synthesizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Idea,
    Model,
    Generating,
    Report,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Idea, Step::Model, Step::Generating, Step::Report];

    pub fn index(&self) -> usize {
        match self {
            Step::Idea => 0,
            Step::Model => 1,
            Step::Generating => 2,
            Step::Report => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Idea => "Product Idea",
            Step::Model => "Business Model",
            Step::Generating => "Strategy Generation",
            Step::Report => "Strategic Report",
        }
    }

    /// One step back, if there is one.
    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::Idea => None,
            Step::Model => Some(Step::Idea),
            Step::Generating => Some(Step::Model),
            Step::Report => Some(Step::Generating),
        }
    }
}

/// A user event fed into the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetProductIdea(String),
    AdvanceToModel,
    SelectBusinessModel(BusinessModel),
    AdvanceToGeneration,
    /// First half of `generate()`: marks a synthesis as in flight.
    BeginGeneration,
    /// Second half of `generate()`: delivers the synthesis outcome.
    CompleteGeneration(Result<StrategyReport, SynthesisError>),
    /// Return from GENERATING to an already generated report without regenerating.
    ViewReport,
    Back,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetProductIdea(_) => "set_product_idea",
            Action::AdvanceToModel => "advance_to_model",
            Action::SelectBusinessModel(_) => "select_business_model",
            Action::AdvanceToGeneration => "advance_to_generation",
            Action::BeginGeneration => "begin_generation",
            Action::CompleteGeneration(_) => "complete_generation",
            Action::ViewReport => "view_report",
            Action::Back => "back",
            Action::Reset => "reset",
        }
    }
}

/// Why an action is currently disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Blocked {
    #[error("{action} is not available on the {} step", .step.title())]
    WrongStep { action: &'static str, step: Step },
    #[error("enter a product idea first")]
    BlankIdea,
    #[error("select a business model first")]
    ModelUnset,
    #[error("a strategy is already being generated")]
    AlreadyGenerating,
    #[error("no generation is in progress")]
    NotGenerating,
    #[error("no report has been generated yet")]
    NoReport,
    #[error("the report was generated from different inputs; generate again")]
    ReportStale,
    #[error("already at the first step")]
    AtFirstStep,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WizardState {
    step: Step,
    product_idea: String,
    business_model: Option<BusinessModel>,
    report: Option<StrategyReport>,
    /// Inputs the current `report` was built from.
    generated_from: Option<(String, BusinessModel)>,
    generating: bool,
    last_error: Option<SynthesisError>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn product_idea(&self) -> &str {
        &self.product_idea
    }

    pub fn business_model(&self) -> Option<BusinessModel> {
        self.business_model
    }

    pub fn report(&self) -> Option<&StrategyReport> {
        self.report.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// The most recent synthesis failure, kept until the next attempt or reset.
    pub fn last_error(&self) -> Option<&SynthesisError> {
        self.last_error.as_ref()
    }

    /// Whether `action` would be applied in the current state.
    pub fn check(&self, action: &Action) -> Result<(), Blocked> {
        let on = |step: Step| {
            if self.step == step {
                Ok(())
            } else {
                Err(Blocked::WrongStep {
                    action: action.name(),
                    step: self.step,
                })
            }
        };

        match action {
            Action::SetProductIdea(_) => on(Step::Idea),
            Action::AdvanceToModel => {
                on(Step::Idea)?;
                if self.product_idea.trim().is_empty() {
                    return Err(Blocked::BlankIdea);
                }
                Ok(())
            }
            Action::SelectBusinessModel(_) => on(Step::Model),
            Action::AdvanceToGeneration => {
                on(Step::Model)?;
                if self.business_model.is_none() {
                    return Err(Blocked::ModelUnset);
                }
                Ok(())
            }
            Action::BeginGeneration => {
                on(Step::Generating)?;
                if self.generating {
                    return Err(Blocked::AlreadyGenerating);
                }
                if self.business_model.is_none() {
                    return Err(Blocked::ModelUnset);
                }
                Ok(())
            }
            Action::CompleteGeneration(_) => {
                if !self.generating {
                    return Err(Blocked::NotGenerating);
                }
                on(Step::Generating)
            }
            Action::ViewReport => {
                on(Step::Generating)?;
                if self.generating {
                    return Err(Blocked::AlreadyGenerating);
                }
                let Some((idea, model)) = &self.generated_from else {
                    return Err(Blocked::NoReport);
                };
                if self.report.is_none() {
                    return Err(Blocked::NoReport);
                }
                if *idea != self.product_idea || Some(*model) != self.business_model {
                    return Err(Blocked::ReportStale);
                }
                Ok(())
            }
            Action::Back => {
                if self.step.previous().is_none() {
                    return Err(Blocked::AtFirstStep);
                }
                Ok(())
            }
            Action::Reset => on(Step::Report),
        }
    }

    /// Apply `action`, returning the next state. Disabled actions are no-ops.
    pub fn apply(mut self, action: Action) -> WizardState {
        if let Err(blocked) = self.check(&action) {
            debug!(action = action.name(), step = ?self.step, %blocked, "action blocked");
            return self;
        }
        debug!(action = action.name(), step = ?self.step, "applying action");

        match action {
            Action::SetProductIdea(text) => {
                self.product_idea = text;
            }
            Action::AdvanceToModel => {
                self.step = Step::Model;
            }
            Action::SelectBusinessModel(model) => {
                self.business_model = Some(model);
            }
            Action::AdvanceToGeneration => {
                self.step = Step::Generating;
            }
            Action::BeginGeneration => {
                self.generating = true;
                self.last_error = None;
            }
            Action::CompleteGeneration(Ok(report)) => {
                info!(model = ?self.business_model, "strategy report generated");
                self.generated_from = self
                    .business_model
                    .map(|model| (self.product_idea.clone(), model));
                self.report = Some(report);
                self.generating = false;
                self.step = Step::Report;
            }
            Action::CompleteGeneration(Err(err)) => {
                warn!(error = %err, "strategy generation failed; returning to business model step");
                self.generating = false;
                self.last_error = Some(err);
                self.step = Step::Model;
            }
            Action::ViewReport => {
                self.step = Step::Report;
            }
            Action::Back => {
                if self.generating {
                    debug!("leaving generation step; in-flight result will be discarded");
                    self.generating = false;
                }
                if let Some(prev) = self.step.previous() {
                    self.step = prev;
                }
            }
            Action::Reset => {
                self = WizardState::new();
            }
        }

        self
    }

    /// Run a full `generate()`: begin, synthesize, complete.
    ///
    /// On failure the wizard lands on the business model step with both
    /// inputs intact and the error available from [`WizardState::last_error`].
    pub fn generate(self, synthesizer: &dyn Synthesizer) -> WizardState {
        if let Err(blocked) = self.check(&Action::BeginGeneration) {
            debug!(%blocked, "generate blocked");
            return self;
        }
        let state = self.apply(Action::BeginGeneration);
        let Some(model) = state.business_model else {
            return state;
        };

        info!(model = model.id(), "generating strategy report");
        let result = synthesizer.synthesize(&state.product_idea, model);
        state.apply(Action::CompleteGeneration(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::{synthesize, TemplateSynthesizer};

    const IDEA: &str = "AI-powered personal finance assistant";

    struct FailingSynthesizer;

    impl Synthesizer for FailingSynthesizer {
        fn synthesize(&self, _idea: &str, _model: BusinessModel) -> Result<StrategyReport, SynthesisError> {
            Err(SynthesisError::Backend("upstream unavailable".into()))
        }
    }

    fn at_generation(idea: &str, model: BusinessModel) -> WizardState {
        WizardState::new()
            .apply(Action::SetProductIdea(idea.into()))
            .apply(Action::AdvanceToModel)
            .apply(Action::SelectBusinessModel(model))
            .apply(Action::AdvanceToGeneration)
    }

    #[test]
    fn test_starts_at_idea() {
        let s = WizardState::new();
        assert_eq!(s.step(), Step::Idea);
        assert_eq!(s.product_idea(), "");
        assert_eq!(s.business_model(), None);
        assert!(s.report().is_none());
    }

    #[test]
    fn test_blank_idea_blocks_advance() {
        let s = WizardState::new().apply(Action::SetProductIdea("   \t\n".into()));
        assert_eq!(s.check(&Action::AdvanceToModel), Err(Blocked::BlankIdea));
        let after = s.clone().apply(Action::AdvanceToModel);
        assert_eq!(after, s);
        assert_eq!(after.step(), Step::Idea);
    }

    #[test]
    fn test_idea_stored_raw() {
        let s = WizardState::new().apply(Action::SetProductIdea("  padded idea  ".into()));
        assert_eq!(s.product_idea(), "  padded idea  ");
    }

    #[test]
    fn test_unset_model_blocks_generation_step() {
        let s = WizardState::new()
            .apply(Action::SetProductIdea(IDEA.into()))
            .apply(Action::AdvanceToModel);
        assert_eq!(s.check(&Action::AdvanceToGeneration), Err(Blocked::ModelUnset));
        let after = s.clone().apply(Action::AdvanceToGeneration);
        assert_eq!(after, s);
        assert_eq!(after.step(), Step::Model);
    }

    #[test]
    fn test_actions_rejected_on_wrong_step() {
        let s = WizardState::new();
        assert_eq!(
            s.check(&Action::SelectBusinessModel(BusinessModel::B2B)),
            Err(Blocked::WrongStep {
                action: "select_business_model",
                step: Step::Idea
            })
        );
        assert!(s.check(&Action::Reset).is_err());
        assert_eq!(s.check(&Action::Back), Err(Blocked::AtFirstStep));
    }

    #[test]
    fn test_full_flow_reaches_report() {
        let s = at_generation(IDEA, BusinessModel::B2B).generate(&TemplateSynthesizer);
        assert_eq!(s.step(), Step::Report);
        assert!(!s.is_generating());
        assert_eq!(s.report(), Some(&synthesize(IDEA, BusinessModel::B2B)));
    }

    #[test]
    fn test_generate_only_on_generation_step() {
        let s = WizardState::new()
            .apply(Action::SetProductIdea(IDEA.into()))
            .apply(Action::AdvanceToModel)
            .apply(Action::SelectBusinessModel(BusinessModel::Consumer));
        let after = s.clone().generate(&TemplateSynthesizer);
        assert_eq!(after, s);
    }

    #[test]
    fn test_duplicate_begin_is_blocked() {
        let s = at_generation(IDEA, BusinessModel::Consumer).apply(Action::BeginGeneration);
        assert!(s.is_generating());
        assert_eq!(s.check(&Action::BeginGeneration), Err(Blocked::AlreadyGenerating));
        let again = s.clone().generate(&TemplateSynthesizer);
        assert_eq!(again, s);
    }

    #[test]
    fn test_failure_returns_to_model_with_inputs() {
        let s = at_generation(IDEA, BusinessModel::Platform).generate(&FailingSynthesizer);
        assert_eq!(s.step(), Step::Model);
        assert_eq!(s.product_idea(), IDEA);
        assert_eq!(s.business_model(), Some(BusinessModel::Platform));
        assert!(s.report().is_none());
        assert!(!s.is_generating());
        assert!(matches!(s.last_error(), Some(SynthesisError::Backend(_))));

        // Retry without retyping anything.
        let s = s.apply(Action::AdvanceToGeneration).generate(&TemplateSynthesizer);
        assert_eq!(s.step(), Step::Report);
        assert!(s.last_error().is_none());
    }

    #[test]
    fn test_back_during_generation_discards_late_result() {
        let s = at_generation(IDEA, BusinessModel::B2B)
            .apply(Action::BeginGeneration)
            .apply(Action::Back);
        assert_eq!(s.step(), Step::Model);
        assert!(!s.is_generating());

        let late = Ok(synthesize(IDEA, BusinessModel::B2B));
        assert_eq!(
            s.check(&Action::CompleteGeneration(late.clone())),
            Err(Blocked::NotGenerating)
        );
        let after = s.clone().apply(Action::CompleteGeneration(late));
        assert_eq!(after, s);
        assert!(after.report().is_none());
    }

    #[test]
    fn test_back_keeps_entered_data() {
        let s = at_generation(IDEA, BusinessModel::Consumer)
            .apply(Action::Back)
            .apply(Action::Back);
        assert_eq!(s.step(), Step::Idea);
        assert_eq!(s.product_idea(), IDEA);
        assert_eq!(s.business_model(), Some(BusinessModel::Consumer));
    }

    #[test]
    fn test_back_from_report_does_not_regenerate() {
        let s = at_generation(IDEA, BusinessModel::B2B).generate(&TemplateSynthesizer);
        let original = s.report().cloned();

        let s = s.apply(Action::Back);
        assert_eq!(s.step(), Step::Generating);
        assert_eq!(s.report().cloned(), original);

        let s = s.apply(Action::ViewReport);
        assert_eq!(s.step(), Step::Report);
        assert_eq!(s.report().cloned(), original);
    }

    #[test]
    fn test_view_report_requires_matching_inputs() {
        let s = at_generation(IDEA, BusinessModel::B2B);
        assert_eq!(s.check(&Action::ViewReport), Err(Blocked::NoReport));

        let s = s
            .generate(&TemplateSynthesizer)
            .apply(Action::Back)
            .apply(Action::Back)
            .apply(Action::SelectBusinessModel(BusinessModel::Consumer))
            .apply(Action::AdvanceToGeneration);
        assert_eq!(s.check(&Action::ViewReport), Err(Blocked::ReportStale));
    }

    #[test]
    fn test_reset_clears_everything() {
        let s = at_generation(IDEA, BusinessModel::Platform)
            .generate(&TemplateSynthesizer)
            .apply(Action::Reset);
        assert_eq!(s, WizardState::new());
        assert_eq!(s.step(), Step::Idea);
        assert_eq!(s.product_idea(), "");
        assert_eq!(s.business_model(), None);
        assert!(s.report().is_none());
    }

    #[test]
    fn test_reset_only_from_report() {
        let s = at_generation(IDEA, BusinessModel::Platform);
        assert!(s.check(&Action::Reset).is_err());
        assert_eq!(s.clone().apply(Action::Reset), s);
    }

    #[test]
    fn test_step_metadata() {
        let titles: Vec<_> = Step::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(
            titles,
            vec!["Product Idea", "Business Model", "Strategy Generation", "Strategic Report"]
        );
        assert_eq!(Step::Report.index(), 3);
        assert_eq!(Step::Idea.previous(), None);
    }
}
