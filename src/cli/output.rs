use std::io::IsTerminal;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_setting(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub use_color: bool,
    pub verbose: bool,
}

/// Colors are on when allowed by the flag and the config setting, NO_COLOR is
/// unset, and stdout is a terminal ("always" skips the last two checks).
pub fn detect_color(color_flag: bool, setting: &str) -> bool {
    if !color_flag || setting == "never" {
        return false;
    }
    if setting == "always" {
        return true;
    }
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Print a value as JSON, pretty when requested.
pub fn print_json<T: Serialize>(value: &T, opts: &OutputOptions) -> anyhow::Result<()> {
    let json = if opts.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_setting() {
        assert_eq!(OutputFormat::from_setting("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_setting("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from_setting("bogus"), OutputFormat::Text);
    }

    #[test]
    fn color_disabled_by_flag_or_setting() {
        assert!(!detect_color(false, "always"));
        assert!(!detect_color(true, "never"));
        assert!(detect_color(true, "always"));
    }
}
