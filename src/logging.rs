use std::str::FromStr;

use log::LevelFilter;

/// Route panics and `log` records to the browser console.
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
    log::set_max_level(LevelFilter::Info);
}

/// Narrow or widen console output once the page config is known.
pub fn apply_level(level: &str) {
    match parse_level(level) {
        Some(filter) => log::set_max_level(filter),
        None => log::warn!("Unknown log level {:?}, keeping {}", level, log::max_level()),
    }
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(level.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels_case_insensitively() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
    }

    #[test]
    fn rejects_unknown_levels() {
        assert_eq!(parse_level("loud"), None);
        assert_eq!(parse_level(""), None);
    }
}
