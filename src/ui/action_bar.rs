use egui::{Align, Color32, Layout, RichText, Ui};

pub enum ActionBarAction {
    Save,
}

/// Message shown next to the Save button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

pub struct ActionBar;

impl ActionBar {
    pub fn show(ui: &mut Ui, status: Option<&StatusLine>) -> Option<ActionBarAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if let Some(status) = status {
                let color = if status.is_error {
                    Color32::from_rgb(180, 40, 40)
                } else {
                    Color32::from_gray(90)
                };
                ui.label(RichText::new(status.text.as_str()).small().color(color))
                    .on_hover_text(status.text.as_str());
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let button = egui::Button::new(RichText::new("Save").size(14.0))
                    .min_size(egui::vec2(90.0, 28.0));
                if ui.add(button).on_hover_text("Write config file").clicked() {
                    action = Some(ActionBarAction::Save);
                }
            });
        });

        action
    }
}
