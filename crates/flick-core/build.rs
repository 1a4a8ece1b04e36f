fn main() {
    // Validate embedded data files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
    validate_word_list(
        "src/dict/en_us.txt",
        include_str!("src/dict/en_us.txt"),
    );
}

fn validate_toml(path: &str, content: &str) {
    if content.parse::<toml::Value>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}

fn validate_word_list(path: &str, content: &str) {
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.split('\t').count() > 2 {
            panic!("{path}:{}: expected `word` or `typo<TAB>correction`", i + 1);
        }
    }
}
