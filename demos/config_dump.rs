//! Print the emulator configuration without opening the window
//!
//! Run with: cargo run --example config_dump -- [CONFIG_PATH]

use chip8_config::config::ConfigStore;
use chip8_config::schema::Section;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = std::env::args()
        .nth(1)
        .map(ConfigStore::new)
        .unwrap_or_default();

    // Creates the file with defaults when it does not exist yet
    let snapshot = store.load()?;

    println!("Config file: {}\n", store.path().display());
    for section in Section::ALL {
        println!("[{}]", section);
        for field in section.fields() {
            println!("  {:<24} {}", field.key(), snapshot.get(field));
        }
    }

    Ok(())
}
