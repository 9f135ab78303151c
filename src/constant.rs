// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 620.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 440.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Emulator configuration";

/// File the emulator reads its settings from, relative to the working directory
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Log filter used when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "chip8_config=info";

/// Text shown for a choice that has nothing selected
pub const UNSET_LABEL: &str = "(unset)";
