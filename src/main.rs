use chip8_config::app::ConfiguratorApp;
use chip8_config::config::ConfigStore;
use chip8_config::constant;
use chip8_config::ui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(constant::DEFAULT_LOG_FILTER)),
        )
        .init();

    let store = std::env::args()
        .nth(1)
        .map(ConfigStore::new)
        .unwrap_or_default();
    let options = ui::viewport::build_viewport();

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(ConfiguratorApp::new(cc, store)))),
    )
}
