use crate::model::Span;
use {once_cell::sync::Lazy, regex::Regex};

/// Anchored on the trimmed input so surrounding prose disqualifies the match;
/// `1e5`, `2.3E7` and `1.5e-3` all qualify, `release 2.0` does not.
static SCI_NOTATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?\d+(?:\.\d+)?)[eE]([+-]?)(\d+)$").expect("regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub display: String,
    /// Character range of the exponent within `display`, to be superscripted.
    pub exponent: Option<Span>,
}

/// Rewrites scientific-notation cell text into the canonical display form
/// `<mantissa>×10<exponent>` and reports where the exponent sits in the
/// output. Non-matching text passes through unchanged. Never fails.
pub fn normalize(raw: &str) -> NormalizedText {
    let Some(caps) = SCI_NOTATION_RE.captures(raw.trim()) else {
        return NormalizedText {
            display: raw.to_string(),
            exponent: None,
        };
    };

    let mantissa = &caps[1];
    let exponent = match &caps[2] {
        "-" => format!("-{}", &caps[3]),
        _ => caps[3].to_string(),
    };
    let display = format!("{mantissa}×10{exponent}");

    // mantissa and exponent are ASCII; "×10" is three characters.
    let start = mantissa.len() + 3;
    let end = start + exponent.len();
    NormalizedText {
        display,
        exponent: Some(Span::new(start, end)),
    }
}
