//! Parsing of the free-text materials block.
//!
//! Each line is split into a description and a quantity by a three-tier
//! heuristic:
//!
//! 1. split on runs of tabs/semicolons or on gaps of two or more whitespace
//!    characters, keeping the first two parts;
//! 2. otherwise split on the last single space;
//! 3. otherwise the whole line is the description and the quantity is empty.
//!
//! Lines break on `\n`, `\r` and the rarer Unicode line and record
//! separators (vertical tab, form feed, `\x1c`..`\x1e`, NEL, U+2028, U+2029).
//!
//! Descriptions that themselves contain tabs, semicolons or wide gaps are
//! split in the wrong place. Existing data depends on this exact behaviour, so
//! it is kept as is.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub description: String,
    /// May be empty.
    pub quantity: String,
}

impl Material {
    fn new(description: &str, quantity: &str) -> Self {
        Self {
            description: description.trim().to_string(),
            quantity: quantity.trim().to_string(),
        }
    }

    fn is_blank(&self) -> bool {
        self.description.trim().is_empty() && self.quantity.trim().is_empty()
    }
}

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| {
        Regex::new(r"[\t;]+|\s{2,}").expect("separator pattern is valid")
    })
}

const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Parse one raw line. Blank lines yield `None`.
pub fn parse_line(raw: &str) -> Option<Material> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = separator().split(line);
    if let (Some(description), Some(quantity)) = (parts.next(), parts.next()) {
        return Some(Material::new(description, quantity));
    }

    if let Some((description, quantity)) = line.rsplit_once(' ') {
        return Some(Material::new(description, quantity));
    }

    Some(Material::new(line, ""))
}

/// Parse every line of the materials block, dropping lines that carry neither
/// a description nor a quantity.
pub fn parse_materials(text: &str) -> Vec<Material> {
    text.split(LINE_BREAKS)
        .filter_map(parse_line)
        .filter(|material| !material.is_blank())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(raw: &str) -> Option<(String, String)> {
        parse_line(raw).map(|m| (m.description, m.quantity))
    }

    fn pair(description: &str, quantity: &str) -> Option<(String, String)> {
        Some((description.to_string(), quantity.to_string()))
    }

    #[test]
    fn tab_separated() {
        assert_eq!(parsed("Widget A\t10"), pair("Widget A", "10"));
    }

    #[test]
    fn wide_gap_separated() {
        assert_eq!(parsed("Widget B  5"), pair("Widget B", "5"));
        assert_eq!(parsed("Cable 3x2.5mm      120 m"), pair("Cable 3x2.5mm", "120 m"));
    }

    #[test]
    fn semicolon_runs_collapse() {
        assert_eq!(parsed("Bolt M8;;;40"), pair("Bolt M8", "40"));
        assert_eq!(parsed("Nut M8 ; 40"), pair("Nut M8", "40"));
    }

    #[test]
    fn extra_columns_are_dropped() {
        assert_eq!(parsed("Elbow 90\t4\tgalvanized"), pair("Elbow 90", "4"));
    }

    #[test]
    fn trailing_separator_gives_empty_quantity() {
        assert_eq!(parsed("Gasket;"), pair("Gasket", ""));
    }

    #[test]
    fn last_single_space() {
        assert_eq!(parsed("Pressure gauge 0-10 bar 2"), pair("Pressure gauge 0-10 bar", "2"));
    }

    #[test]
    fn single_token() {
        assert_eq!(parsed("SingleToken"), pair("SingleToken", ""));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parsed("   Valve 3  "), pair("Valve", "3"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parsed(""), None);
        assert_eq!(parsed("   \t  "), None);
    }

    #[test]
    fn internal_wide_gap_missplits() {
        // known limitation of the heuristic
        assert_eq!(parsed("Steel  pipe 6m 3"), pair("Steel", "pipe 6m 3"));
    }

    #[test]
    fn materials_block() {
        let text = "Widget A\t10\r\n\r\n   \nWidget B  5\nSingleToken\n;\n";
        let materials = parse_materials(text);
        assert_eq!(
            materials,
            vec![
                Material::new("Widget A", "10"),
                Material::new("Widget B", "5"),
                Material::new("SingleToken", ""),
            ]
        );
    }

    #[test]
    fn unicode_line_separators_break_lines() {
        assert_eq!(
            parse_materials("one\u{2028}two 5\nx\x0cy 3"),
            vec![
                Material::new("one", ""),
                Material::new("two", "5"),
                Material::new("x", ""),
                Material::new("y", "3"),
            ]
        );
        assert_eq!(
            parse_materials("Bolt\t4\u{85}Nut\x1e9\x0bWasher;2\u{2029}"),
            vec![
                Material::new("Bolt", "4"),
                Material::new("Nut", ""),
                Material::new("9", ""),
                Material::new("Washer", "2"),
            ]
        );
    }

    #[test]
    fn quantity_only_line_is_kept() {
        assert_eq!(parse_materials(";7"), vec![Material::new("", "7")]);
    }

    #[test]
    fn only_blank_lines() {
        assert!(parse_materials("\n  \n\t\n").is_empty());
        assert!(parse_materials("").is_empty());
    }
}
