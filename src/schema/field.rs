//! Field definitions
//!
//! A [`Field`] describes one uci option of a form section: its widget kind,
//! datatype, choice lists, default, visibility dependencies and the validator
//! bound to it. Fields are plain data; nothing here renders or validates.

use serde::{Deserialize, Serialize};

use super::depends::DependsClause;

/// The widget family a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free-form text input, optionally with suggested values.
    Value,
    /// Single choice from a closed list.
    ListValue,
    /// Multiple choices from a closed list; stored as a uci list.
    MultiValue,
    /// Editable list of free-form values; stored as a uci list.
    DynamicList,
    /// Boolean stored as `1` / `0`.
    Flag,
    /// Action button; never stores a value.
    Button,
}

/// Built-in datatype checks, matching the uci validation vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Datatype {
    Port,
    UInteger,
    Hostname,
}

/// Named validation rules a field can bind to. The engine dispatches these
/// to the functions in the `validators` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorRef {
    /// No other section of the same type holds the same value.
    UniqueValue,
    /// The password rule dispatching on server type and encrypt method.
    ServerPassword,
    /// Lowercase hyphenated UUID.
    Uuid,
    /// ACME account email address.
    Email,
}

/// One selectable value with an optional display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The file-upload action delegated by a button field. The upload itself is
/// the consumer's job; the schema only names the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadAction {
    /// What is being uploaded, e.g. "certificate".
    pub item: String,
    /// Target file stem under the certificate directory.
    pub file_stem: String,
}

/// One option of a form section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub option: String,
    pub kind: FieldKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Datatype>,
    /// Closed value set for `ListValue` / `MultiValue`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Suggested values for a `Value` field; free input stays allowed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// An empty value is rejected while the field is active.
    #[serde(default)]
    pub required: bool,
    /// Shown only in the edit modal, not as a grid column.
    #[serde(default)]
    pub modal_only: bool,
    /// Editable directly in the grid row.
    #[serde(default)]
    pub editable: bool,
    /// Input masking hint for password-like values.
    #[serde(default)]
    pub password: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<DependsClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator: Option<ValidatorRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadAction>,
}

impl Field {
    pub fn new(kind: FieldKind, option: &str, title: &str) -> Self {
        Field {
            option: option.to_string(),
            kind,
            title: title.to_string(),
            description: None,
            datatype: None,
            choices: Vec::new(),
            suggestions: Vec::new(),
            default: None,
            required: false,
            modal_only: false,
            editable: false,
            password: false,
            depends: Vec::new(),
            validator: None,
            upload: None,
        }
    }

    /// Add a labeled choice.
    pub fn choice(&mut self, value: &str, label: &str) -> &mut Self {
        self.choices.push(Choice {
            value: value.to_string(),
            label: Some(label.to_string()),
        });
        self
    }

    /// Add a choice whose label is the value itself.
    pub fn choice_plain(&mut self, value: &str) -> &mut Self {
        self.choices.push(Choice {
            value: value.to_string(),
            label: None,
        });
        self
    }

    /// Add a suggested value for free-form input.
    pub fn suggest(&mut self, value: &str) -> &mut Self {
        self.suggestions.push(Choice {
            value: value.to_string(),
            label: None,
        });
        self
    }

    /// Add a labeled suggestion.
    pub fn suggest_labeled(&mut self, value: &str, label: &str) -> &mut Self {
        self.suggestions.push(Choice {
            value: value.to_string(),
            label: Some(label.to_string()),
        });
        self
    }

    /// Add a visibility clause requiring `option == value`.
    pub fn depends_on(&mut self, option: &str, value: &str) -> &mut Self {
        self.depends.push(DependsClause::equals(option, value));
        self
    }

    /// Add an arbitrary visibility clause.
    pub fn depends_when(&mut self, clause: DependsClause) -> &mut Self {
        self.depends.push(clause);
        self
    }

    /// Whether the value persists as a uci list rather than a single option.
    pub fn is_list(&self) -> bool {
        matches!(self.kind, FieldKind::MultiValue | FieldKind::DynamicList)
    }

    /// Whether any choice carries the given value.
    pub fn has_choice(&self, value: &str) -> bool {
        self.choices.iter().any(|c| c.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_lookup() {
        let mut field = Field::new(FieldKind::ListValue, "network", "Network");
        field.choice("tcp", "TCP").choice("udp", "UDP").choice("", "Both");
        assert!(field.has_choice("udp"));
        assert!(field.has_choice(""));
        assert!(!field.has_choice("icmp"));
    }

    #[test]
    fn test_list_kinds() {
        assert!(Field::new(FieldKind::DynamicList, "tls_alpn", "TLS ALPN").is_list());
        assert!(Field::new(FieldKind::MultiValue, "tls_cipher_suites", "Cipher suites").is_list());
        assert!(!Field::new(FieldKind::Value, "port", "Port").is_list());
    }

    #[test]
    fn test_depends_accumulate() {
        let mut field = Field::new(FieldKind::Value, "username", "Username");
        field
            .depends_on("type", "http")
            .depends_on("type", "naive")
            .depends_on("type", "socks");
        assert_eq!(field.depends.len(), 3);
    }
}
