use crate::config::ConfigStore;
use crate::style::configure_style;
use crate::ui::action_bar::{ActionBar, ActionBarAction, StatusLine};
use crate::ui::form::SettingsForm;
use crate::ui::panels::Panels;
use chrono::Local;
use tracing::{error, info};

pub struct ConfiguratorApp {
    store: ConfigStore,
    form: SettingsForm,
    status: Option<StatusLine>,
}

impl ConfiguratorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: ConfigStore) -> Self {
        configure_style(&cc.egui_ctx);
        Self::with_store(store)
    }

    /// Seed the controls from the store. A file that cannot be loaded leaves
    /// the defaults on screen and is only replaced when the user saves.
    pub fn with_store(store: ConfigStore) -> Self {
        let (snapshot, load_error) = store.load_or_default();
        let status = load_error.map(|e| StatusLine::error(format!("{} (showing defaults)", e)));

        Self {
            form: SettingsForm::from_snapshot(&snapshot),
            store,
            status,
        }
    }

    /// Collect every control into a snapshot and write it out
    fn save(&mut self) {
        let result = self
            .form
            .to_snapshot()
            .map_err(|e| e.to_string())
            .and_then(|snapshot| self.store.save(&snapshot).map_err(|e| e.to_string()));

        self.status = Some(match result {
            Ok(()) => {
                info!("Settings saved");
                StatusLine::info(format!(
                    "Saved to {} at {}",
                    self.store.path().display(),
                    Local::now().format("%H:%M:%S")
                ))
            }
            Err(e) => {
                error!("Failed to save settings: {}", e);
                StatusLine::error(e)
            }
        });
    }
}

impl eframe::App for ConfiguratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("action_bar_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            if let Some(ActionBarAction::Save) = ActionBar::show(ui, self.status.as_ref()) {
                self.save();
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            Panels::show(ui, &mut self.form);
        });
    }
}
