use crate::constant::UNSET_LABEL;
use crate::schema::{Field, FieldKind};
use crate::ui::form::SettingsForm;
use egui::{ComboBox, DragValue, Grid, RichText, Ui};

/// The labeled groups of controls making up the window body
pub struct Panels;

impl Panels {
    pub fn show(ui: &mut Ui, form: &mut SettingsForm) {
        ui.columns(2, |columns| {
            Self::group(&mut columns[0], "Display", |ui| {
                Grid::new("display_grid").num_columns(2).show(ui, |ui| {
                    integer_row(ui, Field::WindowScale, &mut form.window_scale);
                    choice_row(ui, Field::Theme, &mut form.theme);
                    ui.label("");
                    ui.checkbox(&mut form.pixel_boundary, Field::PixelBoundary.label());
                    ui.end_row();
                });
            });
            Self::group(&mut columns[0], "Sound", |ui| {
                Grid::new("sound_grid").num_columns(2).show(ui, |ui| {
                    choice_row(ui, Field::Note, &mut form.note);
                });
            });
            Self::group(&mut columns[0], "Performance", |ui| {
                Grid::new("performance_grid").num_columns(2).show(ui, |ui| {
                    choice_row(ui, Field::RefreshRate, &mut form.refresh_rate);
                    integer_row(ui, Field::Speed, &mut form.speed);
                });
            });

            Self::group(&mut columns[1], "Debug Logs", |ui| {
                // Two columns of flags, filled top to bottom
                let flags = Field::DEBUG_LOGS;
                let (left, right) = flags.split_at(4);
                Grid::new("debug_grid").num_columns(2).show(ui, |ui| {
                    for (row, field) in left.iter().enumerate() {
                        debug_checkbox(ui, form, *field);
                        if let Some(field) = right.get(row) {
                            debug_checkbox(ui, form, *field);
                        }
                        ui.end_row();
                    }
                });
            });
            Self::group(&mut columns[1], "Chip-8", |ui| {
                Grid::new("chip8_grid").num_columns(2).show(ui, |ui| {
                    choice_row(ui, Field::Variant, &mut form.variant);
                });
            });
        });
    }

    fn group(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(title).strong());
            ui.add_space(4.0);
            add_contents(ui);
        });
        ui.add_space(6.0);
    }
}

fn choice_row(ui: &mut Ui, field: Field, value: &mut String) {
    let options: &[&str] = match field.kind() {
        FieldKind::Choice(options) => options,
        _ => &[],
    };

    ui.label(field.label());
    ComboBox::from_id_salt(field.key())
        .width(110.0)
        .selected_text(choice_text(value))
        .show_ui(ui, |ui| {
            ui.selectable_value(value, String::new(), UNSET_LABEL);
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
    ui.end_row();
}

/// Bounds only apply while dragging; a value loaded from disk outside them is
/// kept until the user edits it.
fn integer_row(ui: &mut Ui, field: Field, value: &mut i64) {
    ui.label(field.label());
    let mut drag = DragValue::new(value).speed(1.0);
    if let FieldKind::Integer { min, max } = field.kind() {
        drag = drag.range(min..=max).clamp_existing_to_range(false);
    }
    ui.add(drag);
    ui.end_row();
}

fn debug_checkbox(ui: &mut Ui, form: &mut SettingsForm, field: Field) {
    if let Some(flag) = form.debug_flag_mut(field) {
        ui.checkbox(flag, field.label());
    }
}

fn choice_text(value: &str) -> &str {
    if value.is_empty() { UNSET_LABEL } else { value }
}
