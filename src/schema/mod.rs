//! Declarative form schema
//!
//! The schema describes the whole server administration form as data:
//! sections, fields, visibility dependencies, validator bindings and
//! change-effect rules. [`server_form`] builds it as a pure function of the
//! runtime's [`Features`](crate::models::Features); the same inputs always
//! yield the same schema. Rendering and store access live elsewhere.

mod changes;
mod depends;
mod field;
mod server_form;

pub use changes::{ChangeCase, ChangeEffect, ChangeRule};
pub use depends::{Condition, DependsClause, Expect};
pub use field::{Choice, Datatype, Field, FieldKind, UploadAction, ValidatorRef};
pub use server_form::{
    server_form, TRANSPORT_DESC, TRANSPORT_DESC_HTTP, TRANSPORT_DESC_QUIC,
};

use serde::{Deserialize, Serialize};

/// How a section schema addresses sections of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionMode {
    /// Exactly one section, addressed by name.
    Named,
    /// Every section of the type, one grid row each.
    Grid,
}

/// One form section over uci sections of a fixed type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSchema {
    pub mode: SectionMode,
    /// The uci section type covered.
    pub section_type: String,
    /// Section name for `Named` mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Rows can be added and removed.
    #[serde(default)]
    pub addremove: bool,
    /// Rows can be reordered.
    #[serde(default)]
    pub sortable: bool,
    /// Field descriptions are suppressed in the grid view.
    #[serde(default)]
    pub nodescriptions: bool,
    /// Modal title for editing one entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal_title: Option<String>,
    /// Modal title for creating an entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_title: Option<String>,
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ChangeRule>,
}

impl SectionSchema {
    /// A named single-section schema.
    pub fn named(section_type: &str, name: &str, title: &str) -> Self {
        SectionSchema {
            mode: SectionMode::Named,
            section_type: section_type.to_string(),
            name: Some(name.to_string()),
            title: Some(title.to_string()),
            addremove: false,
            sortable: false,
            nodescriptions: false,
            modal_title: None,
            add_title: None,
            fields: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// A grid schema over all sections of a type.
    pub fn grid(section_type: &str) -> Self {
        SectionSchema {
            mode: SectionMode::Grid,
            section_type: section_type.to_string(),
            name: None,
            title: None,
            addremove: false,
            sortable: false,
            nodescriptions: false,
            modal_title: None,
            add_title: None,
            fields: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// Append a field and hand it back for configuration. Mirrors how the
    /// form declares options one after another.
    pub fn option(&mut self, kind: FieldKind, option: &str, title: &str) -> &mut Field {
        self.fields.push(Field::new(kind, option, title));
        self.fields.last_mut().unwrap()
    }

    /// Look up a field by option name.
    pub fn field(&self, option: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.option == option)
    }

    /// All change rules watching the given option.
    pub fn rules_for(&self, option: &str) -> impl Iterator<Item = &ChangeRule> {
        let option = option.to_string();
        self.changes.iter().filter(move |r| r.option == option)
    }
}

/// The complete form: one uci package, several sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSchema {
    /// The uci package the form edits.
    pub package: String,
    pub title: String,
    pub sections: Vec<SectionSchema>,
}

impl FormSchema {
    /// The section schema covering the given uci section type.
    pub fn section_of_type(&self, section_type: &str) -> Option<&SectionSchema> {
        self.sections
            .iter()
            .find(|s| s.section_type == section_type)
    }
}
