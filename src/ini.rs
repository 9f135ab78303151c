//! INI text codec
//!
//! Reads and writes the `[section]` / `key = value` format the emulator
//! consumes. Sections and keys keep their file order and are case-sensitive.
//!
//! Supported input:
//! - Sections: `[name]`
//! - Entries: `key = value` or `key: value` (split at the first delimiter)
//! - Comments: whole lines starting with `#` or `;`
//! - Continuation: an indented line extends the previous entry's value
//!
//! Output always uses `key = value` and leaves a blank line after each section.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct SyntaxError {
    pub line: usize,
    pub kind: SyntaxErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("entry appears before any [section] header")]
    MissingSectionHeader,

    #[error("section header is missing its closing ']'")]
    UnterminatedHeader,

    #[error("expected `key = value`")]
    MissingDelimiter,

    #[error("entry has an empty key")]
    EmptyKey,

    #[error("section [{0}] appears more than once")]
    DuplicateSection(String),

    #[error("key {key:?} appears more than once in [{section}]")]
    DuplicateKey { section: String, key: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct IniSection {
    name: String,
    entries: Vec<(String, String)>,
}

impl IniSection {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An ordered INI document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        let mut doc = Self::new();
        // Entry an indented line would continue, as (section, entry) indices
        let mut open_entry: Option<(usize, usize)> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            let error = |kind| SyntaxError {
                line: line_no,
                kind,
            };

            if trimmed.is_empty() {
                open_entry = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            if line.starts_with(char::is_whitespace)
                && let Some((s, e)) = open_entry
            {
                let value = &mut doc.sections[s].entries[e].1;
                value.push('\n');
                value.push_str(trimmed);
                continue;
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .ok_or_else(|| error(SyntaxErrorKind::UnterminatedHeader))?
                    .trim();
                if doc.has_section(name) {
                    return Err(error(SyntaxErrorKind::DuplicateSection(name.to_string())));
                }
                doc.sections.push(IniSection {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                open_entry = None;
                continue;
            }

            let section_idx = doc
                .sections
                .len()
                .checked_sub(1)
                .ok_or_else(|| error(SyntaxErrorKind::MissingSectionHeader))?;
            let split = trimmed
                .find(['=', ':'])
                .ok_or_else(|| error(SyntaxErrorKind::MissingDelimiter))?;
            let key = trimmed[..split].trim();
            let value = trimmed[split + 1..].trim();
            if key.is_empty() {
                return Err(error(SyntaxErrorKind::EmptyKey));
            }

            let section = &mut doc.sections[section_idx];
            if section.get(key).is_some() {
                return Err(error(SyntaxErrorKind::DuplicateKey {
                    section: section.name.clone(),
                    key: key.to_string(),
                }));
            }
            section.entries.push((key.to_string(), value.to_string()));
            open_entry = Some((section_idx, section.entries.len() - 1));
        }

        Ok(doc)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.section(section).is_some()
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Insert or replace a value. New sections and keys are appended.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let value = value.into();
        let idx = match self.sections.iter().position(|s| s.name == section) {
            Some(idx) => idx,
            None => {
                self.sections.push(IniSection {
                    name: section.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        let entries = &mut self.sections[idx].entries;
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key.to_string(), value)),
        }
    }

    /// Section names in file order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "{} = {}", key, value.replace('\n', "\n\t"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
