use std::fs;
use std::path::Path;
use std::process;

use flick_core::settings::{self, Settings, SettingsError};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

/// One-line summary printed after a successful check.
pub fn summarize(s: &Settings) -> String {
    format!(
        "OK: locales={}, autocorrect={}, history_depth={}, max_suggestions={}, long_press_ms={}",
        s.locale.enabled.join(","),
        s.typing.autocorrect,
        s.suggestions.history_depth,
        s.suggestions.max_suggestions,
        s.gesture.long_press_ms,
    )
}

pub fn check(content: &str) -> Result<Settings, SettingsError> {
    settings::parse_settings_toml(content)
}

pub fn settings_validate(file: &Path) {
    let content = die!(
        fs::read_to_string(file),
        "Error reading {}: {}",
        file.display()
    );
    let s = die!(check(&content), "Error: {}");
    println!("{}", summarize(&s));
}
