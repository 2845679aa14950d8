use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::models::domain::{Camp, Category};

/// Camp paired with its aggregate score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCamp {
    pub camp: Camp,
    pub score: f64,
}

/// Ranked camps per category, serialized as `{"CAMP": [...], "GLAMP": [...], "FANCY": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MatchResults {
    pub categories: BTreeMap<Category, Vec<ScoredCamp>>,
}

impl MatchResults {
    /// Results with every category present and empty
    pub fn empty() -> Self {
        Self {
            categories: Category::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }

    pub fn get(&self, category: Category) -> &[ScoredCamp] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of camps across all categories
    pub fn total(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Stored preferences response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub ok: bool,
    pub id: uuid::Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_results_serialize_every_category() {
        let json = serde_json::to_value(MatchResults::empty()).unwrap();

        assert_eq!(json, serde_json::json!({ "CAMP": [], "GLAMP": [], "FANCY": [] }));
    }
}
