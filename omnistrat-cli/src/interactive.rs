//! Line-oriented terminal front end for the strategy wizard.
//!
//! Every keystroke becomes a wizard `Action`; this module only renders and
//! never changes wizard state on its own.

use anyhow::Result;
use omnistrat_core::{export, Action, BusinessModel, Step, Synthesizer, WizardState};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::render::{render_models, render_progress, render_report};
use crate::suggestions::{self, SUGGESTIONS};

enum Flow {
    Continue(WizardState),
    Quit(WizardState),
}

pub struct Session<'a, R, W> {
    input: R,
    out: W,
    synthesizer: &'a dyn Synthesizer,
    export_dir: PathBuf,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, out: W, synthesizer: &'a dyn Synthesizer, export_dir: &Path) -> Self {
        Self {
            input,
            out,
            synthesizer,
            export_dir: export_dir.to_path_buf(),
        }
    }

    /// Drive the wizard until the user quits or input ends.
    pub fn run(mut self) -> Result<WizardState> {
        let mut state = WizardState::new();
        loop {
            writeln!(self.out, "\n{}\n", render_progress(state.step()))?;
            let flow = match state.step() {
                Step::Idea => self.idea_step(state)?,
                Step::Model => self.model_step(state)?,
                Step::Generating => self.generation_step(state)?,
                Step::Report => self.report_step(state)?,
            };
            match flow {
                Flow::Continue(next) => state = next,
                Flow::Quit(last) => return Ok(last),
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}> ")?;
        self.out.flush()?;
        let mut s = String::new();
        if self.input.read_line(&mut s)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(s.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Apply `action`, telling the user when it is disabled.
    fn dispatch(&mut self, state: WizardState, action: Action) -> Result<WizardState> {
        if let Err(blocked) = state.check(&action) {
            writeln!(self.out, "  ! {blocked}")?;
            return Ok(state);
        }
        Ok(state.apply(action))
    }

    fn idea_step(&mut self, state: WizardState) -> Result<Flow> {
        writeln!(self.out, "What's your product idea?")?;
        if !state.product_idea().is_empty() {
            writeln!(self.out, "Current: {}", state.product_idea())?;
        }
        writeln!(self.out, "Need inspiration? Type :<n> to use one of these (:r for a random one):")?;
        for (i, s) in SUGGESTIONS.iter().take(suggestions::SHOWN).enumerate() {
            writeln!(self.out, "  {}. {s}", i + 1)?;
        }
        writeln!(self.out, "Blank line keeps the current idea; :q quits.")?;

        let Some(line) = self.read_line("idea")? else {
            return Ok(Flow::Quit(state));
        };

        let trimmed = line.trim().to_string();
        let state = match trimmed.as_str() {
            ":q" => return Ok(Flow::Quit(state)),
            ":r" => self.dispatch(state, Action::SetProductIdea(suggestions::random().to_string()))?,
            "" => state,
            cmd if cmd.starts_with(':') => match cmd[1..].parse::<usize>().ok().and_then(suggestions::pick) {
                Some(s) => self.dispatch(state, Action::SetProductIdea(s.to_string()))?,
                None => {
                    writeln!(self.out, "  ! unknown command {cmd}")?;
                    return Ok(Flow::Continue(state));
                }
            },
            _ => self.dispatch(state, Action::SetProductIdea(line))?,
        };

        Ok(Flow::Continue(self.dispatch(state, Action::AdvanceToModel)?))
    }

    fn model_step(&mut self, state: WizardState) -> Result<Flow> {
        writeln!(self.out, "Choose your business model for: {}", state.product_idea())?;
        if let Some(err) = state.last_error() {
            writeln!(self.out, "  ! Generation failed: {err}")?;
        }
        write!(self.out, "{}", render_models(state.business_model()))?;
        writeln!(self.out, "Pick 1-3 (or consumer/b2b/platform), blank to continue, b = back, q = quit.")?;

        let Some(line) = self.read_line("model")? else {
            return Ok(Flow::Quit(state));
        };

        let choice = line.trim();
        let state = match choice {
            "q" => return Ok(Flow::Quit(state)),
            "b" => return Ok(Flow::Continue(self.dispatch(state, Action::Back)?)),
            "" => state,
            _ => {
                let model = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| BusinessModel::ALL.get(i).copied())
                    .or_else(|| choice.parse::<BusinessModel>().ok());
                match model {
                    Some(m) => self.dispatch(state, Action::SelectBusinessModel(m))?,
                    None => {
                        writeln!(self.out, "  ! unknown business model '{choice}'")?;
                        return Ok(Flow::Continue(state));
                    }
                }
            }
        };

        Ok(Flow::Continue(self.dispatch(state, Action::AdvanceToGeneration)?))
    }

    fn generation_step(&mut self, state: WizardState) -> Result<Flow> {
        let model = state.business_model().map(|m| m.title()).unwrap_or("-");
        writeln!(self.out, "Ready to generate a strategy for: {} ({model})", state.product_idea())?;
        writeln!(self.out, "Sections: Vision Document, TAM Analysis, PMF Playbook, GTM Strategy")?;
        let mut hint = String::from("g = generate, b = back, q = quit");
        if state.check(&Action::ViewReport).is_ok() {
            hint.push_str(", v = view existing report");
        }
        writeln!(self.out, "{hint}")?;

        let Some(line) = self.read_line("generate")? else {
            return Ok(Flow::Quit(state));
        };

        let next = match line.trim() {
            "q" => return Ok(Flow::Quit(state)),
            "b" => self.dispatch(state, Action::Back)?,
            "v" => self.dispatch(state, Action::ViewReport)?,
            "g" | "" => {
                if let Err(blocked) = state.check(&Action::BeginGeneration) {
                    writeln!(self.out, "  ! {blocked}")?;
                    return Ok(Flow::Continue(state));
                }
                writeln!(self.out, "Generating...")?;
                state.generate(self.synthesizer)
            }
            other => {
                writeln!(self.out, "  ! unknown command '{other}'")?;
                state
            }
        };
        Ok(Flow::Continue(next))
    }

    fn report_step(&mut self, state: WizardState) -> Result<Flow> {
        if let Some(report) = state.report() {
            write!(self.out, "{}", render_report(report))?;
        }
        writeln!(self.out, "e = export, n = new strategy, b = back, q = quit")?;

        let Some(line) = self.read_line("report")? else {
            return Ok(Flow::Quit(state));
        };

        let next = match line.trim() {
            "q" => return Ok(Flow::Quit(state)),
            "b" => self.dispatch(state, Action::Back)?,
            "n" => self.dispatch(state, Action::Reset)?,
            "e" => {
                self.export(&state)?;
                state
            }
            "" => state,
            other => {
                writeln!(self.out, "  ! unknown command '{other}'")?;
                state
            }
        };
        Ok(Flow::Continue(next))
    }

    /// Export failures are reported and otherwise ignored.
    fn export(&mut self, state: &WizardState) -> Result<()> {
        let Some(report) = state.report() else {
            writeln!(self.out, "  ! nothing to export")?;
            return Ok(());
        };
        match export::write_report(&self.export_dir, state.product_idea(), report) {
            Ok(path) => writeln!(self.out, "Wrote {}", path.display())?,
            Err(e) => writeln!(self.out, "  ! export failed: {e}")?,
        }
        Ok(())
    }
}
