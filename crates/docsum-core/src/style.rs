//! # Summary Styles
//!
//! The fixed set of styles a summary can be generated in. Adding a style is
//! a contract change: the prompt table in `docsum-summarizer`, the database
//! CHECK constraint and the API validation message all key off this enum.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Style tag governing how the summarization service is prompted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryStyle {
    /// Two or three sentences.
    #[serde(rename = "brief")]
    Brief,
    /// All main points and key details.
    #[serde(rename = "detailed")]
    Detailed,
    /// Key takeaways as a bulleted list.
    #[serde(rename = "bullet-points")]
    BulletPoints,
}

impl SummaryStyle {
    /// Every supported style, in declaration order.
    pub const ALL: [SummaryStyle; 3] = [Self::Brief, Self::Detailed, Self::BulletPoints];

    /// Return the wire representation of this style.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Detailed => "detailed",
            Self::BulletPoints => "bullet-points",
        }
    }
}

impl std::fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryStyle {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| ModelError::UnknownStyle(s.to_string()))
    }
}
