//! Cleaning and deduplication of extracted codes.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// `<digits>[.<digits>]E+<digits>`, the shape spreadsheets give long
/// numeric codes.
static SCIENTIFIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\.(\d+))?[eE]\+(\d+)$").expect("Invalid scientific notation regex")
});

/// Longest exponent expanded. Codes in any coding system are far shorter.
const MAX_EXPONENT: usize = 30;

/// A code and its description from one coding system's column pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodePair {
    pub code: String,
    pub label: String,
}

impl CodePair {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.label.is_empty()
    }
}

/// Strip embedded line breaks and surrounding whitespace.
pub fn clean_cell(raw: &str) -> String {
    raw.replace(['\r', '\n'], "").trim().to_string()
}

/// Expand a code mangled into scientific notation back to its integer form.
///
/// `"1E+05"` becomes `"100000"` and `"1.23E+3"` becomes `"1230"`. Anything
/// else, including a mantissa with more decimals than the exponent covers
/// or an exponent above 30, is returned unchanged.
pub fn repair_scientific_notation(code: &str) -> String {
    let Some(caps) = SCIENTIFIC_REGEX.captures(code) else {
        return code.to_string();
    };
    let whole = &caps[1];
    let fraction = caps.get(2).map_or("", |m| m.as_str());
    let Ok(exponent) = caps[3].parse::<usize>() else {
        return code.to_string();
    };
    if fraction.len() > exponent || exponent > MAX_EXPONENT {
        return code.to_string();
    }
    let mut digits = format!("{whole}{fraction}");
    digits.extend(std::iter::repeat_n('0', exponent - fraction.len()));
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Drop repeated pairs, keeping the first occurrence of each.
pub fn dedupe_pairs(pairs: Vec<CodePair>) -> Vec<CodePair> {
    let mut seen = BTreeSet::new();
    pairs
        .into_iter()
        .filter(|pair| seen.insert(pair.clone()))
        .collect()
}

/// Whether an ICD-style code ends in a `.x` wildcard.
pub fn has_wildcard(code: &str) -> bool {
    code.contains(".x") || code.contains(".X")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repairs_scientific_codes() {
        assert_eq!(repair_scientific_notation("1E+05"), "100000");
        assert_eq!(repair_scientific_notation("3.7E+2"), "370");
        assert_eq!(repair_scientific_notation("1.23456E+5"), "123456");
        assert_eq!(repair_scientific_notation("1.23456E+3"), "1.23456E+3");
        assert_eq!(repair_scientific_notation("A00.9"), "A00.9");
        assert_eq!(repair_scientific_notation("22298006"), "22298006");
        assert_eq!(repair_scientific_notation("1E+30").len(), 31);
        assert_eq!(repair_scientific_notation("1E+31"), "1E+31");
        assert_eq!(repair_scientific_notation("1E+999999999"), "1E+999999999");
        assert_eq!(
            repair_scientific_notation("1E+18446744073709551615"),
            "1E+18446744073709551615"
        );
        assert_eq!(
            repair_scientific_notation("1E+99999999999999999999999"),
            "1E+99999999999999999999999"
        );
    }

    #[test]
    fn cleans_line_breaks() {
        assert_eq!(clean_cell(" Acute\nmyocardial\r\n infarction "), "Acutemyocardial infarction");
    }

    #[test]
    fn dedupe_keeps_first_seen_order() {
        let pairs = vec![
            CodePair::new("B", "b"),
            CodePair::new("A", "a"),
            CodePair::new("B", "b"),
            CodePair::new("B", "other"),
        ];
        assert_eq!(
            dedupe_pairs(pairs),
            vec![
                CodePair::new("B", "b"),
                CodePair::new("A", "a"),
                CodePair::new("B", "other"),
            ]
        );
    }

    #[test]
    fn wildcard_detection() {
        assert!(has_wildcard("B99.x"));
        assert!(has_wildcard("B99.X"));
        assert!(!has_wildcard("B99.9"));
    }
}
