//! Value-set kinds and content types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VocabError;

/// How a value set defines its membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSetKind {
    /// Members are enumerated concepts.
    Extensional,
    /// Members are defined by an intent rule.
    Intensional,
    /// Members are references to other value sets.
    Grouping,
}

impl ValueSetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Extensional => "extensional",
            Self::Intensional => "intensional",
            Self::Grouping => "grouping",
        }
    }

    /// Infer the kind of a value set that does not declare one.
    ///
    /// A subsets content sheet always means grouping; otherwise an intent
    /// makes the set intensional.
    pub fn infer(content_type: Option<ContentType>, intent: &str) -> Self {
        if content_type == Some(ContentType::Subsets) {
            Self::Grouping
        } else if !intent.is_empty() {
            Self::Intensional
        } else {
            Self::Extensional
        }
    }
}

impl fmt::Display for ValueSetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueSetKind {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "extensional" => Ok(Self::Extensional),
            "intensional" => Ok(Self::Intensional),
            "grouping" => Ok(Self::Grouping),
            _ => Err(VocabError::UnknownKind(s.to_string())),
        }
    }
}

/// Shape of the content sheet of a value-set workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Concepts,
    Drugs,
    Subsets,
}

impl ContentType {
    /// Value written to the `Content Type` description row.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concepts => "concepts",
            Self::Drugs => "drugs",
            Self::Subsets => "subsets",
        }
    }

    /// Name of the sheet holding the content rows.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Self::Concepts => "Concepts",
            Self::Drugs => "Drugs",
            Self::Subsets => "Subsets",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concepts" => Ok(Self::Concepts),
            "drugs" => Ok(Self::Drugs),
            "subsets" => Ok(Self::Subsets),
            _ => Err(VocabError::UnknownContentType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            "Grouping".parse::<ValueSetKind>().unwrap(),
            ValueSetKind::Grouping
        );
        assert!("Procedure".parse::<ValueSetKind>().is_err());
    }

    #[test]
    fn inference_order() {
        assert_eq!(
            ValueSetKind::infer(Some(ContentType::Subsets), "anything"),
            ValueSetKind::Grouping
        );
        assert_eq!(
            ValueSetKind::infer(Some(ContentType::Concepts), "ICD-10: B99.x"),
            ValueSetKind::Intensional
        );
        assert_eq!(
            ValueSetKind::infer(None, ""),
            ValueSetKind::Extensional
        );
    }

    #[test]
    fn content_type_sheet_names() {
        assert_eq!(ContentType::Drugs.sheet_name(), "Drugs");
        assert_eq!("subsets".parse::<ContentType>().unwrap(), ContentType::Subsets);
    }

    #[test]
    fn parse_errors_name_the_input() {
        let errors = [
            "Procedure".parse::<ValueSetKind>().unwrap_err(),
            "Devices".parse::<ContentType>().unwrap_err(),
        ];
        for err in errors {
            let input = match &err {
                VocabError::UnknownKind(input) | VocabError::UnknownContentType(input) => input,
            };
            assert!(err.to_string().ends_with(input.as_str()));
        }
    }
}
