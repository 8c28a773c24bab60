use std::fmt;

use linked_hash_map::LinkedHashMap;
use log::debug;
use thiserror::Error;

/// Error raised while parsing or editing a uci document.
#[derive(Debug, Error)]
pub enum UciError {
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("section already exists: {0}")]
    DuplicateSection(String),

    #[error("invalid uci identifier: {0}")]
    BadIdentifier(String),
}

/// Value of a single uci key: either one `option` or a repeated `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Single(String),
    List(Vec<String>),
}

impl OptionValue {
    /// The value as a plain string, if this is an `option` entry.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            OptionValue::Single(value) => Some(value.as_str()),
            OptionValue::List(_) => None,
        }
    }

    /// The value as a slice of items, treating an `option` as a one-item list.
    pub fn items(&self) -> Vec<&str> {
        match self {
            OptionValue::Single(value) => vec![value.as_str()],
            OptionValue::List(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// One `config <type> ['<name>']` block with its options in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UciSection {
    section_type: String,
    name: Option<String>,
    entries: LinkedHashMap<String, OptionValue>,
}

impl UciSection {
    fn new(section_type: &str, name: Option<&str>) -> Self {
        UciSection {
            section_type: section_type.to_string(),
            name: name.map(str::to_string),
            entries: LinkedHashMap::new(),
        }
    }

    pub fn section_type(&self) -> &str {
        &self.section_type
    }

    /// The section name; anonymous sections have none.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get an `option` value. Returns `None` for unset keys and for lists.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(OptionValue::as_single)
    }

    /// Get a `list` value. A plain `option` yields a one-item list,
    /// matching how uci itself promotes scalars.
    pub fn get_list(&self, key: &str) -> Vec<&str> {
        self.entries.get(key).map(OptionValue::items).unwrap_or_default()
    }

    /// Interpret an option as a uci boolean. Unset or unrecognized is `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).is_some_and(truthy)
    }

    pub fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key).and_then(|v| v.parse::<u16>().ok())
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.to_string(), OptionValue::Single(value.to_string()));
    }

    pub fn set_list<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.entries.insert(key.to_string(), OptionValue::List(values));
    }

    /// Remove a key. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// All keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn push_list_item(&mut self, key: &str, value: &str) {
        match self.entries.get_mut(key) {
            Some(OptionValue::List(values)) => values.push(value.to_string()),
            Some(single @ OptionValue::Single(_)) => {
                // `option` followed by `list` under one key; keep both items.
                let first = single.as_single().unwrap_or_default().to_string();
                *single = OptionValue::List(vec![first, value.to_string()]);
            }
            None => {
                self.entries
                    .insert(key.to_string(), OptionValue::List(vec![value.to_string()]));
            }
        }
    }
}

/// One uci package: its sections in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UciDocument {
    package: Option<String>,
    sections: Vec<UciSection>,
}

/// True for names uci accepts as section or option identifiers.
pub(crate) fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// True for the spellings uci reads as boolean truth.
pub fn truthy(value: &str) -> bool {
    matches!(value, "1" | "yes" | "on" | "true" | "enabled")
}

/// True for any spelling uci recognizes as a boolean, truthy or falsy.
pub fn is_boolean(value: &str) -> bool {
    truthy(value) || matches!(value, "0" | "no" | "off" | "false" | "disabled")
}

impl UciDocument {
    pub fn new() -> Self {
        UciDocument::default()
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn set_package(&mut self, name: &str) {
        self.package = Some(name.to_string());
    }

    pub fn sections(&self) -> impl Iterator<Item = &UciSection> {
        self.sections.iter()
    }

    pub fn sections_of_type<'a>(
        &'a self,
        section_type: &'a str,
    ) -> impl Iterator<Item = &'a UciSection> {
        self.sections
            .iter()
            .filter(move |s| s.section_type == section_type)
    }

    /// Look up a named section.
    pub fn section(&self, name: &str) -> Option<&UciSection> {
        self.sections
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut UciSection> {
        self.sections
            .iter_mut()
            .find(|s| s.name.as_deref() == Some(name))
    }

    /// Append a named section. The name must be a valid uci identifier
    /// and must not collide with an existing section.
    pub fn add_named_section(
        &mut self,
        section_type: &str,
        name: &str,
    ) -> Result<&mut UciSection, UciError> {
        if !is_valid_identifier(name) {
            return Err(UciError::BadIdentifier(name.to_string()));
        }
        if self.section(name).is_some() {
            return Err(UciError::DuplicateSection(name.to_string()));
        }
        self.sections.push(UciSection::new(section_type, Some(name)));
        Ok(self.sections.last_mut().unwrap())
    }

    /// Append an anonymous section.
    pub fn add_anonymous_section(&mut self, section_type: &str) -> &mut UciSection {
        self.sections.push(UciSection::new(section_type, None));
        self.sections.last_mut().unwrap()
    }

    /// Remove a named section. Returns whether it existed.
    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name.as_deref() != Some(name));
        self.sections.len() != before
    }

    /// Parse `/etc/config` text: `package`, `config`, `option` and `list`
    /// statements, `#` comments, quoted or bare values.
    pub fn parse(input: &str) -> Result<Self, UciError> {
        let mut doc = UciDocument::new();

        for (index, raw_line) in input.lines().enumerate() {
            let line_no = index + 1;
            let tokens = tokenize(raw_line, line_no)?;
            let Some((keyword, args)) = tokens.split_first() else {
                continue;
            };

            match keyword.as_str() {
                "package" => match args {
                    [name] => doc.package = Some(name.clone()),
                    _ => {
                        return Err(parse_error(line_no, "package takes exactly one name"));
                    }
                },
                "config" => match args {
                    [section_type] => {
                        doc.add_anonymous_section(section_type);
                    }
                    [section_type, name] => {
                        if !is_valid_identifier(name) {
                            return Err(parse_error(
                                line_no,
                                &format!("invalid section name '{}'", name),
                            ));
                        }
                        doc.sections
                            .push(UciSection::new(section_type, Some(name)));
                    }
                    _ => {
                        return Err(parse_error(line_no, "config takes a type and optional name"));
                    }
                },
                "option" | "list" => {
                    let [key, value] = args else {
                        return Err(parse_error(
                            line_no,
                            &format!("{} takes a key and a value", keyword),
                        ));
                    };
                    let Some(section) = doc.sections.last_mut() else {
                        return Err(parse_error(line_no, "entry outside of any config section"));
                    };
                    if keyword == "option" {
                        if section.has(key) {
                            debug!("duplicate option '{}' on line {}, keeping last", key, line_no);
                        }
                        section.set(key, value);
                    } else {
                        section.push_list_item(key, value);
                    }
                }
                other => {
                    return Err(parse_error(line_no, &format!("unknown keyword '{}'", other)));
                }
            }
        }

        Ok(doc)
    }
}

fn parse_error(line: usize, reason: &str) -> UciError {
    UciError::Parse {
        line,
        reason: reason.to_string(),
    }
}

/// Split one line into tokens, honoring single quotes (literal), double
/// quotes and backslash escapes, and `#` comments outside quotes.
fn tokenize(line: &str, line_no: usize) -> Result<Vec<String>, UciError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        match chars.peek() {
            None | Some('#') => break,
            _ => {}
        }

        let mut token = String::new();
        while let Some(&ch) = chars.peek() {
            match ch {
                c if c.is_whitespace() => break,
                '#' => break,
                '\\' => {
                    chars.next();
                    match chars.next() {
                        Some(c) => token.push(c),
                        None => return Err(parse_error(line_no, "dangling escape")),
                    }
                }
                '\'' => {
                    chars.next();
                    loop {
                        match chars.next() {
                            Some('\'') => break,
                            Some(c) => token.push(c),
                            None => {
                                return Err(parse_error(line_no, "unterminated single quote"));
                            }
                        }
                    }
                }
                '"' => {
                    chars.next();
                    loop {
                        match chars.next() {
                            Some('"') => break,
                            Some('\\') => match chars.next() {
                                Some(c) => token.push(c),
                                None => {
                                    return Err(parse_error(line_no, "dangling escape"));
                                }
                            },
                            Some(c) => token.push(c),
                            None => {
                                return Err(parse_error(line_no, "unterminated double quote"));
                            }
                        }
                    }
                }
                _ => {
                    token.push(ch);
                    chars.next();
                }
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}

/// Quote a value the way `uci export` does: single quotes, with embedded
/// single quotes spliced out as `'\''`.
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

impl fmt::Display for UciDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if let Some(package) = &self.package {
            writeln!(f, "package {}", package)?;
            first = false;
        }
        for section in &self.sections {
            if !first {
                writeln!(f)?;
            }
            first = false;
            match &section.name {
                Some(name) => writeln!(f, "config {} {}", section.section_type, quote(name))?,
                None => writeln!(f, "config {}", section.section_type)?,
            }
            for (key, value) in section.entries() {
                match value {
                    OptionValue::Single(v) => writeln!(f, "\toption {} {}", key, quote(v))?,
                    OptionValue::List(items) => {
                        for item in items {
                            writeln!(f, "\tlist {} {}", key, quote(item))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
