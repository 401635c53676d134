pub const DEFAULT_DOCK_TARGET_INSET: &str = "0px 10px auto auto";

const AUTO: &str = "auto";

/// CSS-shorthand inset, one length (or "auto") per edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inset {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl Inset {
    /// Expands a 1/2/3/4-token shorthand string. A single token positions
    /// the top edge only; two tokens are [vertical, horizontal]; three are
    /// [top, horizontal, bottom]; four are [top, right, bottom, left].
    /// Any other token count yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<&str> = value.split_whitespace().collect();
        match parts.as_slice() {
            [top] => Some(Self {
                top: (*top).to_string(),
                right: AUTO.to_string(),
                bottom: AUTO.to_string(),
                left: AUTO.to_string(),
            }),
            [vertical, horizontal] => Some(Self {
                top: (*vertical).to_string(),
                right: (*horizontal).to_string(),
                bottom: (*vertical).to_string(),
                left: (*horizontal).to_string(),
            }),
            [top, horizontal, bottom] => Some(Self {
                top: (*top).to_string(),
                right: (*horizontal).to_string(),
                bottom: (*bottom).to_string(),
                left: (*horizontal).to_string(),
            }),
            [top, right, bottom, left] => Some(Self {
                top: (*top).to_string(),
                right: (*right).to_string(),
                bottom: (*bottom).to_string(),
                left: (*left).to_string(),
            }),
            _ => None,
        }
    }

    pub fn parse_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(Self::default_dock)
    }

    pub fn default_dock() -> Self {
        Self {
            top: "0px".to_string(),
            right: "10px".to_string(),
            bottom: AUTO.to_string(),
            left: AUTO.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inset(top: &str, right: &str, bottom: &str, left: &str) -> Inset {
        Inset {
            top: top.to_string(),
            right: right.to_string(),
            bottom: bottom.to_string(),
            left: left.to_string(),
        }
    }

    #[test]
    fn one_token_positions_top_only() {
        assert_eq!(
            Inset::parse("10px"),
            Some(inset("10px", "auto", "auto", "auto"))
        );
    }

    #[test]
    fn two_tokens_expand_vertical_horizontal() {
        assert_eq!(
            Inset::parse("10px 20px"),
            Some(inset("10px", "20px", "10px", "20px"))
        );
    }

    #[test]
    fn three_tokens_expand_top_horizontal_bottom() {
        assert_eq!(
            Inset::parse("1px 2px 3px"),
            Some(inset("1px", "2px", "3px", "2px"))
        );
    }

    #[test]
    fn four_tokens_map_directly() {
        assert_eq!(
            Inset::parse("1px 2px 3px 4px"),
            Some(inset("1px", "2px", "3px", "4px"))
        );
    }

    #[test]
    fn empty_and_overlong_strings_are_rejected() {
        assert_eq!(Inset::parse(""), None);
        assert_eq!(Inset::parse("   "), None);
        assert_eq!(Inset::parse("1px 2px 3px 4px 5px"), None);
    }

    #[test]
    fn default_dock_matches_shorthand() {
        assert_eq!(
            Inset::parse(DEFAULT_DOCK_TARGET_INSET),
            Some(Inset::default_dock())
        );
    }
}
