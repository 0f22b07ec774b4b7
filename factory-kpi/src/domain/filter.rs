use std::fmt;

/// Restricts a dataset to one production line or leaves it whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineFilter {
    #[default]
    All,
    Line(String),
}

impl LineFilter {
    /// Maps a selector value to a filter. Empty input and `all` (any case)
    /// select every line; anything else names a single line verbatim.
    pub fn parse(selector: Option<&str>) -> Self {
        match selector.map(str::trim) {
            None | Some("") => LineFilter::All,
            Some(s) if s.eq_ignore_ascii_case("all") => LineFilter::All,
            Some(s) => LineFilter::Line(s.to_string()),
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        match self {
            LineFilter::All => true,
            LineFilter::Line(id) => id == line,
        }
    }
}

impl fmt::Display for LineFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineFilter::All => f.write_str("All"),
            LineFilter::Line(id) => f.write_str(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_selector_variants() {
        assert_eq!(LineFilter::parse(None), LineFilter::All);
        assert_eq!(LineFilter::parse(Some("  ")), LineFilter::All);
        assert_eq!(LineFilter::parse(Some("ALL")), LineFilter::All);
        assert_eq!(
            LineFilter::parse(Some("Line B")),
            LineFilter::Line("Line B".to_string())
        );
    }

    #[test]
    fn single_line_filter_matches_exactly() {
        let f = LineFilter::Line("Line A".to_string());
        assert!(f.matches("Line A"));
        assert!(!f.matches("Line a"));
        assert!(LineFilter::All.matches("anything"));
    }
}
