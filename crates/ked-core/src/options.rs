//! Runtime options: the `:set` directive parser.
//!
//! Option values live on [`Config`](crate::config::Config) (global) and on
//! each [`Window`](crate::window::Window) (display flags). This module only
//! parses; [`Editor::apply_set`](crate::editor::Editor::apply_set) applies.
//!
//! # Supported syntax
//!
//! | Syntax           | Effect                        |
//! |------------------|-------------------------------|
//! | `:set option`    | Enable boolean / show numeric |
//! | `:set nooption`  | Disable boolean               |
//! | `:set option!`   | Toggle boolean                |
//! | `:set option?`   | Query current value           |
//! | `:set option=N`  | Assign numeric value          |
//! | `:set`           | Show changed options          |
//! | `:set all`       | Show all options              |
//!
//! # Option names
//!
//! | Full name | Abbrev | Type    | Scope  | Default |
//! |-----------|--------|---------|--------|---------|
//! | `tabstop` | `ts`   | integer | global | 8       |
//! | `wrap`    |        | bool    | window | false   |
//! | `number`  | `nu`   | bool    | window | true    |

/// A parsed `:set` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `:set option`: enable a boolean option.
    On(String),

    /// `:set nooption`: disable a boolean option.
    Off(String),

    /// `:set option!`: toggle a boolean option.
    Toggle(String),

    /// `:set option?`: query the current value.
    Query(String),

    /// `:set option=value`: assign a value.
    Assign(String, String),

    /// `:set` with no arguments.
    ShowChanged,

    /// `:set all`.
    ShowAll,
}

/// The options this editor knows, by canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionName {
    TabStop,
    Wrap,
    Number,
}

impl OptionName {
    /// Resolve a full name or abbreviation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "tabstop" | "ts" => Some(Self::TabStop),
            "wrap" => Some(Self::Wrap),
            "number" | "nu" => Some(Self::Number),
            _ => None,
        }
    }

    /// Canonical (full) name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TabStop => "tabstop",
            Self::Wrap => "wrap",
            Self::Number => "number",
        }
    }

    #[must_use]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Wrap | Self::Number)
    }
}

/// Returns `true` if `name` is a known boolean option.
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    OptionName::parse(name).is_some_and(OptionName::is_bool)
}

/// Returns `true` if `name` is a known numeric option.
#[must_use]
pub fn is_numeric_option(name: &str) -> bool {
    OptionName::parse(name).is_some_and(|o| !o.is_bool())
}

/// Parse the full `:set` arguments string into directives.
///
/// An empty argument string produces [`SetDirective::ShowChanged`].
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return vec![SetDirective::ShowChanged];
    }
    trimmed.split_whitespace().map(parse_set_arg).collect()
}

/// Parse a single `:set` argument into a directive.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }

    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }

    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }

    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }

    // `number` starts with "no" too, so only strip when the rest is a
    // known boolean.
    if let Some(name) = arg.strip_prefix("no") {
        if is_bool_option(name) {
            return SetDirective::Off(name.to_string());
        }
    }

    // Bare numeric option name = query its value.
    if is_numeric_option(arg) {
        return SetDirective::Query(arg.to_string());
    }

    SetDirective::On(arg.to_string())
}

/// Format a boolean option for display: `"name"` or `"noname"`.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        name.to_string()
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_set_arg ─────────────────────────────────────────────────────

    #[test]
    fn parse_boolean_on() {
        assert_eq!(parse_set_arg("number"), SetDirective::On("number".into()));
        assert_eq!(parse_set_arg("wrap"), SetDirective::On("wrap".into()));
    }

    #[test]
    fn parse_boolean_off() {
        assert_eq!(parse_set_arg("nonumber"), SetDirective::Off("number".into()));
        assert_eq!(parse_set_arg("nonu"), SetDirective::Off("nu".into()));
        assert_eq!(parse_set_arg("nowrap"), SetDirective::Off("wrap".into()));
    }

    #[test]
    fn parse_toggle_and_query() {
        assert_eq!(parse_set_arg("wrap!"), SetDirective::Toggle("wrap".into()));
        assert_eq!(parse_set_arg("nu?"), SetDirective::Query("nu".into()));
    }

    #[test]
    fn parse_assign() {
        assert_eq!(
            parse_set_arg("ts=2"),
            SetDirective::Assign("ts".into(), "2".into())
        );
        assert_eq!(
            parse_set_arg("tabstop="),
            SetDirective::Assign("tabstop".into(), String::new())
        );
    }

    #[test]
    fn bare_numeric_is_query() {
        assert_eq!(parse_set_arg("ts"), SetDirective::Query("ts".into()));
        assert_eq!(
            parse_set_arg("tabstop"),
            SetDirective::Query("tabstop".into())
        );
    }

    #[test]
    fn number_not_confused_with_no_prefix() {
        assert_eq!(parse_set_arg("number"), SetDirective::On("number".into()));
    }

    #[test]
    fn unknown_option_still_parses() {
        assert_eq!(parse_set_arg("foobar"), SetDirective::On("foobar".into()));
        assert_eq!(
            parse_set_arg("nofoobar"),
            SetDirective::On("nofoobar".into())
        );
    }

    // ── parse_set ────────────────────────────────────────────────────────

    #[test]
    fn empty_is_show_changed() {
        assert_eq!(parse_set("  "), vec![SetDirective::ShowChanged]);
        assert_eq!(parse_set("all"), vec![SetDirective::ShowAll]);
    }

    #[test]
    fn multiple_args() {
        assert_eq!(
            parse_set("nonu ts=4 wrap!"),
            vec![
                SetDirective::Off("nu".into()),
                SetDirective::Assign("ts".into(), "4".into()),
                SetDirective::Toggle("wrap".into()),
            ]
        );
    }

    // ── OptionName ───────────────────────────────────────────────────────

    #[test]
    fn option_names_and_abbreviations() {
        assert_eq!(OptionName::parse("ts"), Some(OptionName::TabStop));
        assert_eq!(OptionName::parse("nu"), Some(OptionName::Number));
        assert_eq!(OptionName::parse("wrap"), Some(OptionName::Wrap));
        assert_eq!(OptionName::parse("mber"), None);
        assert_eq!(OptionName::Number.as_str(), "number");
        assert!(is_bool_option("wrap"));
        assert!(is_numeric_option("tabstop"));
        assert!(!is_numeric_option("wrap"));
    }

    #[test]
    fn format_bool_on_off() {
        assert_eq!(format_bool("wrap", true), "wrap");
        assert_eq!(format_bool("wrap", false), "nowrap");
    }
}
