use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ScoringError;

/// How two texts are compared.
///
/// Deserialisation goes through [`FromStr`], so names are case-insensitive
/// and accept the `semantic`/`jaccard` aliases everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ScoringMethod {
    /// Cosine similarity of sentence embeddings.
    #[default]
    Embedding,
    /// Jaccard overlap of content words.
    Lexical,
}

impl ScoringMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMethod::Embedding => "embedding",
            ScoringMethod::Lexical => "lexical",
        }
    }
}

impl FromStr for ScoringMethod {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embedding" | "semantic" => Ok(ScoringMethod::Embedding),
            "lexical" | "jaccard" => Ok(ScoringMethod::Lexical),
            _ => Err(ScoringError::UnknownMethod {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ScoringMethod {
    type Error = ScoringError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
