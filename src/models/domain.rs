use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Lower night bound assumed for camps that do not declare one
pub const DEFAULT_MIN_NIGHTS: u32 = 1;

/// Upper night bound assumed for camps that do not declare one
pub const DEFAULT_MAX_NIGHTS: u32 = 60;

/// Luxury tier partitioning the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Camp,
    Glamp,
    Fancy,
}

impl Category {
    /// Every category, in output order
    pub const ALL: [Category; 3] = [Category::Camp, Category::Glamp, Category::Fancy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Camp => "CAMP",
            Category::Glamp => "GLAMP",
            Category::Fancy => "FANCY",
        }
    }

    /// Parse a catalog category string, ignoring case and surrounding whitespace
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CAMP" => Some(Category::Camp),
            "GLAMP" => Some(Category::Glamp),
            "FANCY" => Some(Category::Fancy),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bookable safari offering from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camp {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Raw category string; see [`Camp::category`]
    #[serde(default)]
    pub category: String,
    #[serde(rename = "animalProb", default)]
    pub animal_prob: BTreeMap<String, f64>,
    #[serde(default)]
    pub adventures: Vec<String>,
    #[serde(rename = "monthsBest", default, skip_serializing_if = "Option::is_none")]
    pub months_best: Option<String>,
    #[serde(rename = "monthsSecond", default, skip_serializing_if = "Option::is_none")]
    pub months_second: Option<String>,
    #[serde(rename = "monthsThird", default, skip_serializing_if = "Option::is_none")]
    pub months_third: Option<String>,
    #[serde(rename = "minDuration", default, skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<u32>,
    #[serde(rename = "maxDuration", default, skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<u32>,
    /// Descriptive fields (website, costRange, images...) passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Camp {
    /// Parsed category, `None` when the catalog uses a tier outside the fixed set
    pub fn category(&self) -> Option<Category> {
        Category::parse(&self.category)
    }

    /// Shortest stay in nights, defaulting to [`DEFAULT_MIN_NIGHTS`]
    pub fn min_nights(&self) -> u32 {
        self.min_duration.unwrap_or(DEFAULT_MIN_NIGHTS)
    }

    /// Longest stay in nights, defaulting to [`DEFAULT_MAX_NIGHTS`]
    pub fn max_nights(&self) -> u32 {
        self.max_duration.unwrap_or(DEFAULT_MAX_NIGHTS)
    }

    /// Check the catalog invariants for this camp.
    /// Returns all problems at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let label = if self.id.is_empty() { &self.name } else { &self.id };

        let mut folded: HashMap<String, &str> = HashMap::with_capacity(self.animal_prob.len());
        for (animal, prob) in &self.animal_prob {
            if !prob.is_finite() || !(0.0..=1.0).contains(prob) {
                errors.push(format!(
                    "camp '{}': animalProb['{}'] = {} is outside [0, 1]",
                    label, animal, prob
                ));
            }
            // lookups ignore case, so these keys would shadow each other
            if let Some(previous) = folded.insert(animal.to_lowercase(), animal) {
                errors.push(format!(
                    "camp '{}': animalProb keys '{}' and '{}' differ only in case",
                    label, previous, animal
                ));
            }
        }

        if self.min_duration == Some(0) || self.max_duration == Some(0) {
            errors.push(format!("camp '{}': durations must be at least one night", label));
        }

        if self.min_nights() > self.max_nights() {
            errors.push(format!(
                "camp '{}': minDuration {} exceeds maxDuration {}",
                label,
                self.min_nights(),
                self.max_nights()
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Vocabulary entry (animal, adventure or month) offered to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full catalog document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub animals: Vec<CatalogItem>,
    #[serde(default)]
    pub adventures: Vec<CatalogItem>,
    #[serde(default)]
    pub months: Vec<CatalogItem>,
    #[serde(default)]
    pub camps: Vec<Camp>,
}

impl Catalog {
    pub fn from_camps(camps: Vec<Camp>) -> Self {
        Self {
            camps,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camp_json() -> Value {
        serde_json::json!({
            "_id": "serengeti-1",
            "name": "Serengeti Tented Camp",
            "category": "glamp",
            "animalProb": { "lion": 0.9, "elephant": 0.6 },
            "adventures": ["balloon"],
            "monthsBest": "June",
            "website": "SafariBookings",
            "costRange": "$3,000-$4,200"
        })
    }

    #[test]
    fn test_camp_deserialization() {
        let camp: Camp = serde_json::from_value(camp_json()).unwrap();

        assert_eq!(camp.id, "serengeti-1");
        assert_eq!(camp.category(), Some(Category::Glamp));
        assert_eq!(camp.animal_prob.get("lion"), Some(&0.9));
        assert_eq!(camp.months_best.as_deref(), Some("June"));
        assert_eq!(camp.months_second, None);
        assert_eq!(camp.extra.get("website"), Some(&Value::from("SafariBookings")));
    }

    #[test]
    fn test_duration_defaults() {
        let camp: Camp = serde_json::from_value(camp_json()).unwrap();
        assert_eq!(camp.min_nights(), 1);
        assert_eq!(camp.max_nights(), 60);
    }

    #[test]
    fn test_extra_fields_round_trip() {
        let camp: Camp = serde_json::from_value(camp_json()).unwrap();
        let value = serde_json::to_value(&camp).unwrap();

        assert_eq!(value["costRange"], "$3,000-$4,200");
        assert_eq!(value["animalProb"]["lion"], 0.9);
        assert!(value.get("minDuration").is_none());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("CAMP"), Some(Category::Camp));
        assert_eq!(Category::parse(" fancy "), Some(Category::Fancy));
        assert_eq!(Category::parse("lodge"), None);
        assert_eq!(serde_json::to_string(&Category::Glamp).unwrap(), "\"GLAMP\"");
    }

    #[test]
    fn test_validate_reports_all_problems() {
        let mut camp: Camp = serde_json::from_value(camp_json()).unwrap();
        camp.animal_prob.insert("rhino".to_string(), 1.5);
        camp.min_duration = Some(12);
        camp.max_duration = Some(4);

        let errors = camp.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("rhino"));
        assert!(errors[1].contains("exceeds"));
    }

    #[test]
    fn test_validate_rejects_case_duplicate_animals() {
        let mut camp: Camp = serde_json::from_value(camp_json()).unwrap();
        camp.animal_prob.insert("Lion".to_string(), 0.2);

        let errors = camp.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("'Lion' and 'lion'"));
    }
}
