//! Declarative visibility dependencies
//!
//! A field carries zero or more [`DependsClause`]s. The field is visible when
//! any clause matches (disjunction); within one clause every condition must
//! hold (conjunction), and `reverse` negates the clause as a whole. A field
//! with no clauses is always visible.

use serde::{Deserialize, Serialize};

/// What a condition expects of the referenced option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expect {
    /// The option holds exactly this string.
    Equals(String),
    /// The option is unset (or empty).
    Unset,
}

/// One condition over a sibling option of the same section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub option: String,
    pub expect: Expect,
}

impl Condition {
    /// Whether `actual` satisfies this condition. Inactive or missing
    /// options are passed as `None`.
    pub fn accepts(&self, actual: Option<&str>) -> bool {
        match &self.expect {
            Expect::Equals(wanted) => actual == Some(wanted.as_str()),
            Expect::Unset => actual.is_none() || actual == Some(""),
        }
    }
}

/// A conjunction of conditions, optionally negated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependsClause {
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub reverse: bool,
}

impl DependsClause {
    /// Clause matching when `option` equals `value`.
    pub fn equals(option: &str, value: &str) -> Self {
        DependsClause {
            conditions: vec![Condition {
                option: option.to_string(),
                expect: Expect::Equals(value.to_string()),
            }],
            reverse: false,
        }
    }

    /// Clause matching when `option` is unset.
    pub fn unset(option: &str) -> Self {
        DependsClause {
            conditions: vec![Condition {
                option: option.to_string(),
                expect: Expect::Unset,
            }],
            reverse: false,
        }
    }

    /// Clause matching whenever `option` does NOT equal `value`.
    pub fn not_equals(option: &str, value: &str) -> Self {
        let mut clause = DependsClause::equals(option, value);
        clause.reverse = true;
        clause
    }

    /// Add an equality condition to this clause.
    pub fn and_equals(mut self, option: &str, value: &str) -> Self {
        self.conditions.push(Condition {
            option: option.to_string(),
            expect: Expect::Equals(value.to_string()),
        });
        self
    }

    /// Add an unset condition to this clause.
    pub fn and_unset(mut self, option: &str) -> Self {
        self.conditions.push(Condition {
            option: option.to_string(),
            expect: Expect::Unset,
        });
        self
    }

    /// Evaluate this clause against an option lookup.
    pub fn matches(&self, lookup: &mut dyn FnMut(&str) -> Option<String>) -> bool {
        let all_hold = self
            .conditions
            .iter()
            .all(|c| c.accepts(lookup(&c.option).as_deref()));
        all_hold != self.reverse
    }

    /// Options this clause reads.
    pub fn referenced_options(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|c| c.option.as_str())
    }
}
