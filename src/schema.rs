//! Configuration schema
//!
//! The fixed table of sections and fields the emulator understands, together
//! with the typed values a [`Snapshot`] holds for each of them. Load-time
//! coercion and save-time serialization are both driven by this table.

use std::fmt;
use thiserror::Error;

pub const THEME_OPTIONS: &[&str] = &["White", "Green", "Amber", "Game boy", "80s"];
pub const NOTE_OPTIONS: &[&str] = &["C", "D", "E", "F", "G", "A", "B"];
pub const REFRESH_RATE_OPTIONS: &[&str] = &["30hz", "60hz", "90hz", "120hz"];
pub const VARIANT_OPTIONS: &[&str] = &["Standard", "Super"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("{field} expects {expected}, got {value}")]
    TypeMismatch {
        field: Field,
        expected: &'static str,
        value: Value,
    },
}

/// Sections of the persisted file, in the order they are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Display,
    Sound,
    Performance,
    DebugLogs,
    Extension,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Display,
        Section::Sound,
        Section::Performance,
        Section::DebugLogs,
        Section::Extension,
    ];

    /// Header text as it appears between the brackets
    pub fn name(self) -> &'static str {
        match self {
            Section::Display => "Display",
            Section::Sound => "Sound",
            Section::Performance => "Performance",
            Section::DebugLogs => "Debug_logs",
            Section::Extension => "Extension",
        }
    }

    /// Fields belonging to this section, in schema order
    pub fn fields(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |f| f.section() == self)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One of a closed option list; the empty string means "unset"
    Choice(&'static [&'static str]),
    /// Integer with UI-level bounds (inclusive)
    Integer { min: i64, max: i64 },
    Boolean,
}

impl FieldKind {
    fn type_name(self) -> &'static str {
        match self {
            FieldKind::Choice(_) => "a text choice",
            FieldKind::Integer { .. } => "an integer",
            FieldKind::Boolean => "a boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn matches(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (Value::Text(_), FieldKind::Choice(_))
                | (Value::Integer(_), FieldKind::Integer { .. })
                | (Value::Boolean(_), FieldKind::Boolean)
        )
    }
}

/// Persisted text form: booleans as `true`/`false`, integers in decimal,
/// text verbatim.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
        }
    }
}

/// Every key the configuration file carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    WindowScale,
    Theme,
    PixelBoundary,
    Note,
    Speed,
    RefreshRate,
    InstructionExecution,
    RegisterChanges,
    MemoryAccess,
    StackOperations,
    InputKeys,
    Timers,
    PerformanceMetrics,
    Variant,
}

impl Field {
    /// Schema order, which is also the order fields are written in
    pub const ALL: [Field; 14] = [
        Field::WindowScale,
        Field::Theme,
        Field::PixelBoundary,
        Field::Note,
        Field::Speed,
        Field::RefreshRate,
        Field::InstructionExecution,
        Field::RegisterChanges,
        Field::MemoryAccess,
        Field::StackOperations,
        Field::InputKeys,
        Field::Timers,
        Field::PerformanceMetrics,
        Field::Variant,
    ];

    pub const DEBUG_LOGS: [Field; 7] = [
        Field::InstructionExecution,
        Field::RegisterChanges,
        Field::MemoryAccess,
        Field::StackOperations,
        Field::InputKeys,
        Field::Timers,
        Field::PerformanceMetrics,
    ];

    pub fn section(self) -> Section {
        match self {
            Field::WindowScale | Field::Theme | Field::PixelBoundary => Section::Display,
            Field::Note => Section::Sound,
            Field::Speed | Field::RefreshRate => Section::Performance,
            Field::InstructionExecution
            | Field::RegisterChanges
            | Field::MemoryAccess
            | Field::StackOperations
            | Field::InputKeys
            | Field::Timers
            | Field::PerformanceMetrics => Section::DebugLogs,
            Field::Variant => Section::Extension,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Field::WindowScale => "window_scale",
            Field::Theme => "theme",
            Field::PixelBoundary => "pixel_boundary",
            Field::Note => "note",
            Field::Speed => "speed",
            Field::RefreshRate => "refresh_rate",
            Field::InstructionExecution => "instruction_execution",
            Field::RegisterChanges => "register_changes",
            Field::MemoryAccess => "memory_access",
            Field::StackOperations => "stack_operations",
            Field::InputKeys => "input_keys",
            Field::Timers => "timers",
            Field::PerformanceMetrics => "performance_metrics",
            Field::Variant => "variant",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::WindowScale => FieldKind::Integer { min: 10, max: 60 },
            Field::Theme => FieldKind::Choice(THEME_OPTIONS),
            Field::Note => FieldKind::Choice(NOTE_OPTIONS),
            Field::Speed => FieldKind::Integer { min: 1, max: 1500 },
            Field::RefreshRate => FieldKind::Choice(REFRESH_RATE_OPTIONS),
            Field::Variant => FieldKind::Choice(VARIANT_OPTIONS),
            Field::PixelBoundary
            | Field::InstructionExecution
            | Field::RegisterChanges
            | Field::MemoryAccess
            | Field::StackOperations
            | Field::InputKeys
            | Field::Timers
            | Field::PerformanceMetrics => FieldKind::Boolean,
        }
    }

    pub fn default_value(self) -> Value {
        match self {
            Field::WindowScale => Value::Integer(20),
            Field::Theme => Value::Text(String::new()),
            Field::Note => Value::Text("A".to_string()),
            Field::Speed => Value::Integer(700),
            Field::RefreshRate => Value::Text("60hz".to_string()),
            Field::Variant => Value::Text("Standard".to_string()),
            _ => Value::Boolean(false),
        }
    }

    /// Label shown next to the control
    pub fn label(self) -> &'static str {
        match self {
            Field::WindowScale => "Scale:",
            Field::Theme => "Theme:",
            Field::PixelBoundary => "Pixel outline",
            Field::Note => "Sound note:",
            Field::Speed => "Speed:",
            Field::RefreshRate => "Refresh rate:",
            Field::InstructionExecution => "Instruction execution",
            Field::RegisterChanges => "Register change",
            Field::MemoryAccess => "Memory access",
            Field::StackOperations => "Stack",
            Field::InputKeys => "Input",
            Field::Timers => "Timer",
            Field::PerformanceMetrics => "Performance metrics",
            Field::Variant => "Extension:",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section().name(), self.key())
    }
}

/// A fully-populated set of values, one per schema field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    values: Vec<Value>,
}

impl Snapshot {
    /// Snapshot made entirely of schema defaults
    pub fn defaults() -> Self {
        Self {
            values: Field::ALL.iter().map(|f| f.default_value()).collect(),
        }
    }

    pub fn get(&self, field: Field) -> &Value {
        &self.values[field.index()]
    }

    /// Replace a field's value; the value must match the field's declared type
    pub fn set(&mut self, field: Field, value: Value) -> Result<(), SnapshotError> {
        let kind = field.kind();
        if !value.matches(kind) {
            return Err(SnapshotError::TypeMismatch {
                field,
                expected: kind.type_name(),
                value,
            });
        }
        self.values[field.index()] = value;
        Ok(())
    }

    /// Builder-style [`Snapshot::set`]
    pub fn with(mut self, field: Field, value: Value) -> Result<Self, SnapshotError> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Text of a choice field; empty for fields of another kind
    pub fn text(&self, field: Field) -> &str {
        match self.get(field) {
            Value::Text(text) => text,
            _ => "",
        }
    }

    pub fn integer(&self, field: Field) -> Option<i64> {
        match self.get(field) {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn boolean(&self, field: Field) -> bool {
        matches!(self.get(field), Value::Boolean(true))
    }

    /// Iterate `(field, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &Value)> {
        Field::ALL.into_iter().zip(self.values.iter())
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::defaults()
    }
}
