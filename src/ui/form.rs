use crate::schema::{Field, Snapshot, SnapshotError, Value};

/// Current value of every control in the window.
///
/// Seeded once from the loaded snapshot; converted back into a fresh
/// snapshot each time the user saves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub window_scale: i64,
    pub theme: String,
    pub pixel_boundary: bool,
    pub note: String,
    pub speed: i64,
    pub refresh_rate: String,
    pub variant: String,
    /// Flags in `Field::DEBUG_LOGS` order
    pub debug_logs: [bool; 7],
}

impl SettingsForm {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            window_scale: snapshot.integer(Field::WindowScale).unwrap_or_default(),
            theme: snapshot.text(Field::Theme).to_string(),
            pixel_boundary: snapshot.boolean(Field::PixelBoundary),
            note: snapshot.text(Field::Note).to_string(),
            speed: snapshot.integer(Field::Speed).unwrap_or_default(),
            refresh_rate: snapshot.text(Field::RefreshRate).to_string(),
            variant: snapshot.text(Field::Variant).to_string(),
            debug_logs: Field::DEBUG_LOGS.map(|field| snapshot.boolean(field)),
        }
    }

    pub fn to_snapshot(&self) -> Result<Snapshot, SnapshotError> {
        let mut snapshot = Snapshot::defaults();
        for field in Field::ALL {
            snapshot.set(field, self.value(field))?;
        }
        Ok(snapshot)
    }

    fn value(&self, field: Field) -> Value {
        match field {
            Field::WindowScale => Value::Integer(self.window_scale),
            Field::Theme => Value::Text(self.theme.clone()),
            Field::PixelBoundary => Value::Boolean(self.pixel_boundary),
            Field::Note => Value::Text(self.note.clone()),
            Field::Speed => Value::Integer(self.speed),
            Field::RefreshRate => Value::Text(self.refresh_rate.clone()),
            Field::Variant => Value::Text(self.variant.clone()),
            debug => Value::Boolean(
                Self::debug_index(debug).is_some_and(|i| self.debug_logs[i]),
            ),
        }
    }

    pub fn debug_flag_mut(&mut self, field: Field) -> Option<&mut bool> {
        Self::debug_index(field).map(|i| &mut self.debug_logs[i])
    }

    fn debug_index(field: Field) -> Option<usize> {
        Field::DEBUG_LOGS.iter().position(|f| *f == field)
    }
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from_snapshot(&Snapshot::defaults())
    }
}
