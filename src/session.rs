use thiserror::Error;

use crate::calculator::{CalculatorOutput, DashboardFigures, calculate};
use crate::config::{CalculatorConfig, ConfigResult, validate_config};
use crate::format::DisplayCurrency;
use crate::input::{CalculatorInput, InputField, ProjectDetails};
use crate::reference::ReferenceTable;
use crate::roster::TeamRoster;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("unknown team member '{0}'")]
    UnknownMember(String),
}

/// One interactive calculator session.
///
/// The session owns the current input value and the output derived from it.
/// Every edit, preset load or reset swaps in a new input and recomputes the
/// output before returning, so callers never observe the two out of step.
pub struct CalculatorSession {
    config: CalculatorConfig,
    input: CalculatorInput,
    output: CalculatorOutput,
    currency: DisplayCurrency,
    reference: ReferenceTable,
}

impl CalculatorSession {
    pub fn new(config: CalculatorConfig) -> Self {
        Self::with_input(config, CalculatorInput::default())
    }

    pub fn with_input(config: CalculatorConfig, input: CalculatorInput) -> Self {
        let output = calculate(&input, &config);
        Self {
            config,
            input,
            output,
            currency: DisplayCurrency::default(),
            reference: ReferenceTable::default(),
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn input(&self) -> &CalculatorInput {
        &self.input
    }

    pub fn output(&self) -> &CalculatorOutput {
        &self.output
    }

    pub fn currency(&self) -> DisplayCurrency {
        self.currency
    }

    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }

    pub fn dashboard(&self) -> DashboardFigures {
        DashboardFigures::build(&self.input, &self.config)
    }

    fn commit(&mut self, input: CalculatorInput) -> &CalculatorOutput {
        self.output = calculate(&input, &self.config);
        self.input = input;
        log::debug!(
            "recomputed: gross_margin={:.2} net_profit={:.0} rating={}",
            self.output.gross_margin,
            self.output.net_profit,
            self.output.margin_rating
        );
        &self.output
    }

    /// Swaps in a whole input. Team days keyed by ids outside the roster are refused.
    pub fn replace_input(
        &mut self,
        input: CalculatorInput,
    ) -> Result<&CalculatorOutput, SessionError> {
        ensure_known_members(&input, &self.config.roster)?;
        Ok(self.commit(input))
    }

    pub fn set_field(&mut self, field: InputField, value: f64) -> &CalculatorOutput {
        let next = self.input.clone().with_field(field, value);
        self.commit(next)
    }

    pub fn set_team_days(
        &mut self,
        member_id: &str,
        days: f64,
    ) -> Result<&CalculatorOutput, SessionError> {
        if !self.config.roster.contains(member_id) {
            return Err(SessionError::UnknownMember(member_id.to_string()));
        }
        let next = self.input.clone().with_team_days(member_id, days);
        Ok(self.commit(next))
    }

    pub fn set_include_overhead(&mut self, include_overhead: bool) -> &CalculatorOutput {
        let next = self.input.clone().with_include_overhead(include_overhead);
        self.commit(next)
    }

    pub fn set_project(&mut self, project: ProjectDetails) -> &CalculatorOutput {
        let next = self.input.clone().with_project(project);
        self.commit(next)
    }

    /// Loads the preset named `key`. Returns `false`, leaving the input untouched, for an
    /// unknown key.
    pub fn apply_preset(&mut self, key: &str) -> bool {
        match self.config.presets.apply(key, self.input.clone()) {
            Some(next) => {
                log::debug!("applied preset '{key}'");
                self.commit(next);
                true
            }
            None => {
                log::warn!("ignoring unknown preset '{key}'");
                false
            }
        }
    }

    /// Restores the default input. The overhead toggle is a display setting and survives.
    pub fn reset(&mut self) -> &CalculatorOutput {
        let next = CalculatorInput::default().with_include_overhead(self.input.include_overhead);
        log::debug!("input reset to defaults");
        self.commit(next)
    }

    pub fn set_currency(&mut self, currency: DisplayCurrency) {
        self.currency = currency;
    }

    pub fn set_reference(&mut self, reference: ReferenceTable) {
        self.reference = reference;
    }

    /// Swaps the configuration after validating it, then recomputes the output.
    pub fn replace_config(&mut self, config: CalculatorConfig) -> ConfigResult<&CalculatorOutput> {
        validate_config(&config)?;
        self.config = config;
        let input = self.input.clone();
        Ok(self.commit(input))
    }
}

pub fn ensure_known_members(
    input: &CalculatorInput,
    roster: &TeamRoster,
) -> Result<(), SessionError> {
    match input.team_days.keys().find(|id| !roster.contains(id)) {
        Some(id) => Err(SessionError::UnknownMember(id.clone())),
        None => Ok(()),
    }
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}
