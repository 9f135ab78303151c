//! Configuration store
//!
//! Loads the emulator configuration file into a [`Snapshot`], creating the
//! file from schema defaults when it does not exist, and writes snapshots back.
//! Stored text is coerced to each field's declared type on load; a file that
//! is missing any schema key is rejected as a whole.

use crate::constant::CONFIG_FILE_NAME;
use crate::ini::{IniDocument, SyntaxError};
use crate::schema::{Field, FieldKind, Section, Snapshot, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("missing section [{0}]")]
    MissingSection(Section),

    #[error("missing key {0}")]
    MissingKey(Field),

    #[error("{field} = {value:?} is not an integer")]
    InvalidInteger { field: Field, value: String },
}

/// Reads and writes one configuration file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration, writing defaults first if the file is absent
    pub fn load(&self) -> Result<Snapshot, ConfigError> {
        if !self.path.exists() {
            info!("No config at {:?}, writing defaults", self.path);
            let snapshot = Snapshot::defaults();
            self.save(&snapshot)?;
            return Ok(snapshot);
        }

        let text = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        let snapshot = parse_snapshot(&text).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        info!("Load config from {:?}", self.path);
        Ok(snapshot)
    }

    /// Load for interactive startup: on failure the defaults are returned
    /// together with the error, and the file is left untouched.
    pub fn load_or_default(&self) -> (Snapshot, Option<ConfigError>) {
        match self.load() {
            Ok(snapshot) => (snapshot, None),
            Err(e) => {
                error!("Falling back to defaults: {}", e);
                (Snapshot::defaults(), Some(e))
            }
        }
    }

    /// Overwrite the file with every field of `snapshot`, in schema order.
    /// The text goes to a sibling temporary file that is then renamed over the
    /// target.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), ConfigError> {
        let text = render_snapshot(snapshot).to_string();
        let write_error = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, text).map_err(write_error)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(write_error(e));
        }

        info!("Save config to {:?}", self.path);
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(CONFIG_FILE_NAME)
    }
}

/// Coerce a configuration file's text into a snapshot
pub fn parse_snapshot(text: &str) -> Result<Snapshot, ParseError> {
    let doc = IniDocument::parse(text)?;
    let mut snapshot = Snapshot::defaults();

    for field in Field::ALL {
        let section = field.section();
        if !doc.has_section(section.name()) {
            return Err(ParseError::MissingSection(section));
        }
        let raw = doc
            .get(section.name(), field.key())
            .ok_or(ParseError::MissingKey(field))?;
        let value = coerce(field, raw)?;
        debug!("{} = {}", field, value);
        // coerce() always yields the declared kind
        let _ = snapshot.set(field, value);
    }

    Ok(snapshot)
}

/// Lay a snapshot out as an INI document in schema order
pub fn render_snapshot(snapshot: &Snapshot) -> IniDocument {
    let mut doc = IniDocument::new();
    for (field, value) in snapshot.iter() {
        doc.set(field.section().name(), field.key(), value.to_string());
    }
    doc
}

fn coerce(field: Field, raw: &str) -> Result<Value, ParseError> {
    match field.kind() {
        FieldKind::Choice(_) => Ok(Value::Text(raw.to_string())),
        FieldKind::Integer { .. } => raw.trim().parse().map(Value::Integer).map_err(|_| {
            ParseError::InvalidInteger {
                field,
                value: raw.to_string(),
            }
        }),
        FieldKind::Boolean => Ok(Value::Boolean(raw == "true")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const DEFAULT_FILE: &str = "\
[Display]
window_scale = 20
theme =
pixel_boundary = false

[Sound]
note = A

[Performance]
speed = 700
refresh_rate = 60hz

[Debug_logs]
instruction_execution = false
register_changes = false
memory_access = false
stack_operations = false
input_keys = false
timers = false
performance_metrics = false

[Extension]
variant = Standard

";

    const CUSTOM_FILE: &str = "\
[Display]
window_scale = 20
theme = White
pixel_boundary = false

[Sound]
note = A

[Performance]
speed = 1500
refresh_rate = 60hz

[Debug_logs]
instruction_execution = true
register_changes = true
memory_access = true
stack_operations = true
input_keys = true
timers = true
performance_metrics = true

[Extension]
variant = Super
";

    fn setup_test_store() -> (ConfigStore, PathBuf) {
        let test_dir = std::env::temp_dir().join(format!("test_config_{}", Uuid::new_v4()));
        fs::create_dir_all(&test_dir).unwrap();
        let store = ConfigStore::new(test_dir.join(CONFIG_FILE_NAME));
        (store, test_dir)
    }

    fn cleanup_test_dir(test_dir: &Path) {
        let _ = fs::remove_dir_all(test_dir);
    }

    fn parse_error(err: ConfigError) -> ParseError {
        match err {
            ConfigError::Parse { source, .. } => source,
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let (store, test_dir) = setup_test_store();
        assert!(!store.path().exists());

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot, Snapshot::defaults());
        assert!(store.path().exists(), "load should create the file");
        // An unset choice is written as `key = ` with nothing after the delimiter
        let written = fs::read_to_string(store.path()).unwrap();
        assert_eq!(written.replace("theme = \n", "theme =\n"), DEFAULT_FILE);

        let again = store.load().unwrap();
        assert_eq!(again, snapshot);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_leaves_no_tmp() {
        let (_, test_dir) = setup_test_store();
        let store = ConfigStore::new(test_dir.join("nested").join("emu").join("config.ini"));

        store.save(&Snapshot::defaults()).unwrap();
        assert!(store.path().exists());
        assert!(!store.tmp_path().exists());

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_round_trip() {
        let (store, test_dir) = setup_test_store();

        let snapshot = Snapshot::defaults()
            .with(Field::WindowScale, Value::Integer(45))
            .unwrap()
            .with(Field::Theme, Value::Text("Game boy".to_string()))
            .unwrap()
            .with(Field::PixelBoundary, Value::Boolean(true))
            .unwrap()
            .with(Field::Note, Value::Text("F".to_string()))
            .unwrap()
            .with(Field::Speed, Value::Integer(1))
            .unwrap()
            .with(Field::RefreshRate, Value::Text("120hz".to_string()))
            .unwrap()
            .with(Field::Timers, Value::Boolean(true))
            .unwrap()
            .with(Field::Variant, Value::Text("Super".to_string()))
            .unwrap();

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), snapshot);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_custom_file_and_partial_update() {
        let (store, test_dir) = setup_test_store();
        fs::write(store.path(), CUSTOM_FILE).unwrap();

        let mut snapshot = store.load().unwrap();
        assert_eq!(snapshot.integer(Field::Speed), Some(1500));
        assert_eq!(snapshot.text(Field::Variant), "Super");
        for field in Field::DEBUG_LOGS {
            assert!(snapshot.boolean(field), "{} should be true", field);
        }

        snapshot.set(Field::Speed, Value::Integer(200)).unwrap();
        store.save(&snapshot).unwrap();

        let expected = format!("{}\n", CUSTOM_FILE.replace("speed = 1500", "speed = 200"));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), expected);

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let (store, test_dir) = setup_test_store();
        fs::write(store.path(), CUSTOM_FILE.replace("timers = true\n", "")).unwrap();

        let err = parse_error(store.load().unwrap_err());
        assert_eq!(err, ParseError::MissingKey(Field::Timers));

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let text = CUSTOM_FILE.replace("[Extension]\nvariant = Super\n", "");
        let err = parse_snapshot(&text).unwrap_err();
        assert_eq!(err, ParseError::MissingSection(Section::Extension));
    }

    #[test]
    fn test_non_numeric_integer_is_rejected() {
        let (store, test_dir) = setup_test_store();
        fs::write(
            store.path(),
            CUSTOM_FILE.replace("speed = 1500", "speed = notanumber"),
        )
        .unwrap();

        let err = parse_error(store.load().unwrap_err());
        assert_eq!(
            err,
            ParseError::InvalidInteger {
                field: Field::Speed,
                value: "notanumber".to_string(),
            }
        );
        // A broken file is never overwritten by load
        assert!(
            fs::read_to_string(store.path())
                .unwrap()
                .contains("notanumber")
        );

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_boolean_literal_is_strict() {
        for (raw, expected) in [
            ("true", true),
            ("True", false),
            ("TRUE", false),
            ("1", false),
            ("yes", false),
            ("false", false),
            ("", false),
        ] {
            let text = CUSTOM_FILE.replace("input_keys = true", &format!("input_keys = {}", raw));
            let snapshot = parse_snapshot(&text).unwrap();
            assert_eq!(snapshot.boolean(Field::InputKeys), expected, "raw: {:?}", raw);
        }
    }

    #[test]
    fn test_empty_choice_round_trips() {
        let (store, test_dir) = setup_test_store();
        fs::write(store.path(), CUSTOM_FILE.replace("theme = White", "theme =")).unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.text(Field::Theme), "");

        store.save(&snapshot).unwrap();
        assert!(
            fs::read_to_string(store.path())
                .unwrap()
                .contains("\ntheme = \n")
        );
        assert_eq!(store.load().unwrap().text(Field::Theme), "");

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_out_of_range_and_unknown_values_pass_through() {
        let text = CUSTOM_FILE
            .replace("window_scale = 20", "window_scale = 200")
            .replace("note = A", "note = H");
        let snapshot = parse_snapshot(&text).unwrap();

        assert_eq!(snapshot.integer(Field::WindowScale), Some(200));
        assert_eq!(snapshot.text(Field::Note), "H");
    }

    #[test]
    fn test_unknown_entries_are_ignored() {
        let text = format!("[Audio]\nvolume = 3\n\n{}", CUSTOM_FILE).replace(
            "[Sound]\nnote = A\n",
            "[Sound]\nnote = A\nwaveform = square\n",
        );
        let snapshot = parse_snapshot(&text).unwrap();
        let rendered = render_snapshot(&snapshot).to_string();

        assert_eq!(snapshot.text(Field::Note), "A");
        assert!(!rendered.contains("volume"));
        assert!(!rendered.contains("waveform"));
    }

    #[test]
    fn test_syntax_error_is_a_parse_error() {
        let (store, test_dir) = setup_test_store();
        fs::write(store.path(), "speed = 700\n").unwrap();

        let err = parse_error(store.load().unwrap_err());
        assert!(matches!(err, ParseError::Syntax(SyntaxError { line: 1, .. })));

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_load_or_default_keeps_broken_file() {
        let (store, test_dir) = setup_test_store();
        fs::write(store.path(), "[Display]\n").unwrap();

        let (snapshot, err) = store.load_or_default();
        assert_eq!(snapshot, Snapshot::defaults());
        assert!(matches!(err, Some(ConfigError::Parse { .. })));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[Display]\n");

        cleanup_test_dir(&test_dir);
    }

    #[test]
    fn test_write_error_is_reported() {
        let (_, test_dir) = setup_test_store();
        // The target path is an existing directory, so the rename fails
        let blocked = test_dir.join("blocked");
        fs::create_dir_all(blocked.join("inner")).unwrap();
        let store = ConfigStore::new(&blocked);

        let err = store.save(&Snapshot::defaults()).unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }));
        assert!(!store.tmp_path().exists());

        cleanup_test_dir(&test_dir);
    }
}
