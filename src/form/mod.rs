//! Form engine
//!
//! Binds a [`SectionSchema`] to a configuration snapshot: computes which
//! fields are active, validates draft entries, writes validated values back
//! into the document, and interprets the change-effect rules. The engine
//! holds no state of its own; every operation takes the document explicitly.

use std::fmt;

use log::{debug, warn};
use thiserror::Error;

use crate::schema::{
    ChangeEffect, Datatype, Field, FieldKind, FormSchema, SectionMode, SectionSchema, ValidatorRef,
};
use crate::uci::{is_boolean, truthy, UciDocument, UciError, UciSection};
use crate::validators;

/// Dependency chains longer than this are treated as broken. The guard only
/// trips on schemas with circular dependencies.
const MAX_DEPENDENCY_DEPTH: u8 = 8;

/// One validation finding for a single option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub option: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.option, self.message)
    }
}

/// A validation finding located within a whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub section: String,
    pub option: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.option, self.message)
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("no such section: {0}")]
    NoSuchSection(String),

    #[error("validation failed with {} finding(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("{0}")]
    InvalidSectionName(String),

    #[error(transparent)]
    Uci(#[from] UciError),
}

enum Write {
    Set(String),
    SetList(Vec<String>),
    Remove,
}

/// Engine over one section schema.
pub struct SectionForm<'a> {
    schema: &'a SectionSchema,
}

impl<'a> SectionForm<'a> {
    pub fn new(schema: &'a SectionSchema) -> Self {
        SectionForm { schema }
    }

    /// Whether the field for `option` is visible given the entry's values.
    /// Dependencies cascade: a referenced option whose own field is hidden
    /// counts as unset.
    pub fn is_active(&self, entry: &UciSection, option: &str) -> bool {
        self.active_at(entry, option, MAX_DEPENDENCY_DEPTH)
    }

    fn active_at(&self, entry: &UciSection, option: &str, depth: u8) -> bool {
        let Some(field) = self.schema.field(option) else {
            // Options without a field are outside the form's control.
            return true;
        };
        if field.depends.is_empty() {
            return true;
        }
        if depth == 0 {
            warn!("dependency chain exceeds depth limit at option '{}'", option);
            return false;
        }
        field.depends.iter().any(|clause| {
            clause.matches(&mut |referenced| self.effective_value(entry, referenced, depth - 1))
        })
    }

    /// The value dependency evaluation sees for `option`: its stored value
    /// while its field is active, otherwise unset. An option with no
    /// declared field has no form value and is unset here even when the
    /// document stores a stale value for it.
    fn effective_value(&self, entry: &UciSection, option: &str, depth: u8) -> Option<String> {
        if self.schema.field(option).is_none() {
            return None;
        }
        if !self.active_at(entry, option, depth) {
            return None;
        }
        entry.get(option).map(str::to_string)
    }

    /// Active value with the field default substituted for unset options,
    /// the way a rendered form would present it.
    fn presented_value(&self, entry: &UciSection, option: &str) -> Option<String> {
        if !self.is_active(entry, option) {
            return None;
        }
        match entry.get(option) {
            Some(v) if !v.is_empty() => Some(v.to_string()),
            _ => self
                .schema
                .field(option)
                .and_then(|f| f.default.clone()),
        }
    }

    /// Validate a draft entry against the schema. `doc` supplies the sibling
    /// sections for uniqueness scans; `section_id` names the entry under
    /// edit so it is excluded from them. Collects every finding.
    pub fn validate(
        &self,
        doc: &UciDocument,
        section_id: &str,
        entry: &UciSection,
    ) -> Vec<ValidationError> {
        let mut findings = Vec::new();

        for field in &self.schema.fields {
            if field.kind == FieldKind::Button {
                continue;
            }
            if !self.is_active(entry, &field.option) {
                continue;
            }

            if field.is_list() {
                self.validate_list(field, entry, &mut findings);
                continue;
            }

            let value = entry.get(&field.option).unwrap_or("");

            if value.is_empty() {
                if field.kind == FieldKind::Flag {
                    continue;
                }
                if field.required && field.default.is_none() {
                    push(&mut findings, field, "Expecting: non-empty value".to_string());
                } else if let Some(validator) = field.validator {
                    if let Err(message) = self.run_validator(validator, doc, section_id, entry, field, value) {
                        push(&mut findings, field, message);
                    }
                }
                continue;
            }

            if field.kind == FieldKind::Flag {
                if !is_boolean(value) {
                    push(&mut findings, field, "Expecting: valid boolean value".to_string());
                }
                continue;
            }

            if !field.choices.is_empty() && !field.has_choice(value) {
                push(&mut findings, field, "Expecting: one of the listed values".to_string());
                continue;
            }

            if let Some(datatype) = field.datatype {
                if let Err(message) = check_datatype(datatype, value) {
                    push(&mut findings, field, message);
                    continue;
                }
            }

            if let Some(validator) = field.validator {
                if let Err(message) = self.run_validator(validator, doc, section_id, entry, field, value) {
                    push(&mut findings, field, message);
                }
            }
        }

        findings
    }

    fn validate_list(&self, field: &Field, entry: &UciSection, findings: &mut Vec<ValidationError>) {
        let items = entry.get_list(&field.option);
        if items.is_empty() {
            if field.required {
                push(findings, field, "Expecting: non-empty value".to_string());
            }
            return;
        }
        for item in items {
            if !field.choices.is_empty() && !field.has_choice(item) {
                push(findings, field, "Expecting: one of the listed values".to_string());
                continue;
            }
            if let Some(datatype) = field.datatype {
                if let Err(message) = check_datatype(datatype, item) {
                    push(findings, field, message);
                }
            }
        }
    }

    fn run_validator(
        &self,
        validator: ValidatorRef,
        doc: &UciDocument,
        section_id: &str,
        entry: &UciSection,
        field: &Field,
        value: &str,
    ) -> Result<(), String> {
        match validator {
            ValidatorRef::UniqueValue => validators::unique_value(
                doc,
                &self.schema.section_type,
                &field.option,
                section_id,
                value,
            ),
            ValidatorRef::ServerPassword => {
                let server_type = self.presented_value(entry, "type");
                let encrypt_method = self.presented_value(entry, "shadowsocks_encrypt_method");
                validators::server_password(server_type.as_deref(), encrypt_method.as_deref(), value)
            }
            ValidatorRef::Uuid => validators::uuid_string(value),
            ValidatorRef::Email => validators::email_address(value),
        }
    }

    /// Write a validated draft into the document. Options of inactive
    /// fields are pruned, empty optional values removed, flag values
    /// normalized to `1`/`0` with the default elided where the field allows
    /// it. Options the schema does not declare are left untouched.
    pub fn save(
        &self,
        doc: &mut UciDocument,
        section_id: &str,
        draft: &UciSection,
    ) -> Result<(), FormError> {
        if doc.section(section_id).is_none() {
            return Err(FormError::NoSuchSection(section_id.to_string()));
        }

        let findings = self.validate(doc, section_id, draft);
        if !findings.is_empty() {
            return Err(FormError::Validation(findings));
        }

        let mut writes: Vec<(String, Write)> = Vec::new();
        for field in &self.schema.fields {
            if field.kind == FieldKind::Button {
                continue;
            }
            let write = if !self.is_active(draft, &field.option) {
                Write::Remove
            } else if field.is_list() {
                let items: Vec<String> = draft
                    .get_list(&field.option)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                if items.is_empty() {
                    Write::Remove
                } else {
                    Write::SetList(items)
                }
            } else if field.kind == FieldKind::Flag {
                let value = match draft.get(&field.option).filter(|v| !v.is_empty()) {
                    Some(v) if truthy(v) => "1".to_string(),
                    Some(_) => "0".to_string(),
                    None => field.default.clone().unwrap_or_else(|| "0".to_string()),
                };
                if !field.required && field.default.as_deref() == Some(value.as_str()) {
                    Write::Remove
                } else {
                    Write::Set(value)
                }
            } else {
                let value = draft
                    .get(&field.option)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .or_else(|| field.default.clone());
                match value {
                    Some(v) => Write::Set(v),
                    None => Write::Remove,
                }
            };
            writes.push((field.option.clone(), write));
        }

        let Some(section) = doc.section_mut(section_id) else {
            return Err(FormError::NoSuchSection(section_id.to_string()));
        };
        for (option, write) in writes {
            match write {
                Write::Set(value) => section.set(&option, &value),
                Write::SetList(items) => section.set_list(&option, items),
                Write::Remove => {
                    if section.remove(&option) {
                        debug!("pruned option '{}'", option);
                    }
                }
            }
        }
        Ok(())
    }

    /// Create a new entry with a validated identifier.
    pub fn add_section(&self, doc: &mut UciDocument, name: &str) -> Result<(), FormError> {
        validators::uci_identifier(name).map_err(FormError::InvalidSectionName)?;
        doc.add_named_section(&self.schema.section_type, name)?;
        Ok(())
    }

    /// Delete an entry.
    pub fn remove_section(&self, doc: &mut UciDocument, name: &str) -> Result<(), FormError> {
        if !doc.remove_section(name) {
            return Err(FormError::NoSuchSection(name.to_string()));
        }
        Ok(())
    }

    /// An entry's display label, defaulting to its section id. The default
    /// is written back so later loads see it.
    pub fn default_label(&self, doc: &mut UciDocument, section_id: &str) -> Result<String, FormError> {
        let Some(section) = doc.section_mut(section_id) else {
            return Err(FormError::NoSuchSection(section_id.to_string()));
        };
        match section.get("label") {
            Some(label) if !label.is_empty() => Ok(label.to_string()),
            _ => {
                section.set("label", section_id);
                Ok(section_id.to_string())
            }
        }
    }

    /// The adjustments triggered by setting `option` to `value`.
    pub fn change_effects(&self, option: &str, value: &str) -> Vec<&ChangeEffect> {
        self.schema
            .rules_for(option)
            .flat_map(|rule| rule.effects_for(value).iter())
            .collect()
    }
}

fn push(findings: &mut Vec<ValidationError>, field: &Field, message: String) {
    findings.push(ValidationError {
        option: field.option.clone(),
        message,
    });
}

fn check_datatype(datatype: Datatype, value: &str) -> Result<(), String> {
    match datatype {
        Datatype::Port => validators::port(value),
        Datatype::UInteger => validators::uinteger(value),
        Datatype::Hostname => validators::hostname(value),
    }
}

/// Validate every section a schema covers. Unnamed sections are skipped;
/// they cannot be addressed for editing or uniqueness scans.
pub fn check_document(schema: &FormSchema, doc: &UciDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for section_schema in &schema.sections {
        let form = SectionForm::new(section_schema);
        match section_schema.mode {
            SectionMode::Named => {
                let Some(name) = section_schema.name.as_deref() else {
                    continue;
                };
                let Some(section) = doc.section(name) else {
                    debug!("section '{}' not present, skipping", name);
                    continue;
                };
                collect(&mut findings, name, form.validate(doc, name, section));
            }
            SectionMode::Grid => {
                for section in doc.sections_of_type(&section_schema.section_type) {
                    let Some(name) = section.name() else {
                        warn!(
                            "skipping unnamed section of type '{}'",
                            section_schema.section_type
                        );
                        continue;
                    };
                    collect(&mut findings, name, form.validate(doc, name, section));
                }
            }
        }
    }

    findings
}

fn collect(findings: &mut Vec<Finding>, section: &str, errors: Vec<ValidationError>) {
    for error in errors {
        findings.push(Finding {
            section: section.to_string(),
            option: error.option,
            message: error.message,
        });
    }
}
