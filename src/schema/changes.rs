//! Change-effect rules
//!
//! Reactions to edits are a declarative rule table rather than event
//! handlers: each rule watches one option and maps its new value to a list
//! of effects the consumer applies to the form state. Effects never touch
//! the store; they describe UI adjustments and forced values.

use serde::{Deserialize, Serialize};

/// One adjustment triggered by a change rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeEffect {
    /// Force another option to a value.
    SetValue { option: String, value: String },
    /// Grey out a field so the forced value cannot be edited.
    DisableField { option: String },
    /// Undo a previous `DisableField`.
    EnableField { option: String },
    /// Replace a field's description text.
    SetDescription { option: String, text: String },
}

/// Value-specific effects within a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCase {
    /// Values of the watched option this case applies to.
    pub values: Vec<String>,
    pub effects: Vec<ChangeEffect>,
}

/// Reaction table for one watched option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRule {
    /// The option whose edits trigger this rule.
    pub option: String,
    pub cases: Vec<ChangeCase>,
    /// Effects applied when no case matches the new value.
    #[serde(default)]
    pub otherwise: Vec<ChangeEffect>,
}

impl ChangeRule {
    pub fn new(option: &str) -> Self {
        ChangeRule {
            option: option.to_string(),
            cases: Vec::new(),
            otherwise: Vec::new(),
        }
    }

    /// Add a case for a single value.
    pub fn on_value(mut self, value: &str, effects: Vec<ChangeEffect>) -> Self {
        self.cases.push(ChangeCase {
            values: vec![value.to_string()],
            effects,
        });
        self
    }

    pub fn otherwise(mut self, effects: Vec<ChangeEffect>) -> Self {
        self.otherwise = effects;
        self
    }

    /// Effects for the given new value: the first matching case wins,
    /// falling back to `otherwise`.
    pub fn effects_for(&self, value: &str) -> &[ChangeEffect] {
        for case in &self.cases {
            if case.values.iter().any(|v| v == value) {
                return &case.effects;
            }
        }
        &self.otherwise
    }
}
