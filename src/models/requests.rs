use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};
use crate::models::domain::{DEFAULT_MAX_NIGHTS, DEFAULT_MIN_NIGHTS};

/// Kind of a ranked preference entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Animal,
    Adventure,
}

/// One entry of the user's ranked preference list
///
/// Clients send the catalog vocabulary entry as-is, so any of `name`, `full`
/// and `label` may be present. An entry without a usable key still holds its
/// rank position and contributes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
    /// Short label, tried last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RankedItem {
    pub fn animal(name: impl Into<String>) -> Self {
        Self::named(ItemKind::Animal, name)
    }

    pub fn adventure(name: impl Into<String>) -> Self {
        Self::named(ItemKind::Adventure, name)
    }

    fn named(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            full: None,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Non-empty lookup keys in priority order: `name`, `full`, `label`
    pub fn lookup_names(&self) -> impl Iterator<Item = &str> {
        [&self.name, &self.full, &self.label]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .filter(|n| !n.is_empty())
    }
}

/// Requested trip length in nights (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_night_order"))]
pub struct NightRange {
    #[validate(range(min = 1))]
    pub min: u32,
    #[validate(range(min = 1))]
    pub max: u32,
}

impl NightRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Positive bounds in ascending order
    pub fn is_well_formed(&self) -> bool {
        self.min >= 1 && self.min <= self.max
    }
}

impl Default for NightRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_NIGHTS,
            max: DEFAULT_MAX_NIGHTS,
        }
    }
}

fn validate_night_order(range: &NightRange) -> Result<(), ValidationError> {
    if range.min > range.max {
        return Err(ValidationError::new("min_exceeds_max"));
    }
    Ok(())
}

/// Request to match camps against ranked preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[serde(rename = "rankedItems", default)]
    pub ranked_items: Vec<RankedItem>,
    /// Month ids, most preferred first
    #[serde(default)]
    pub months: Vec<String>,
    #[validate(nested)]
    #[serde(default)]
    pub range: NightRange,
}

impl MatchRequest {
    /// Ranked animals in priority order
    pub fn animals(&self) -> impl Iterator<Item = &RankedItem> {
        self.ranked_items.iter().filter(|item| item.kind == ItemKind::Animal)
    }

    /// Ranked adventures in priority order
    pub fn adventures(&self) -> impl Iterator<Item = &RankedItem> {
        self.ranked_items.iter().filter(|item| item.kind == ItemKind::Adventure)
    }
}

/// Free-form preference document recorded for analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferencesRequest {
    pub prefs: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_request_defaults() {
        let req: MatchRequest = serde_json::from_str("{}").unwrap();

        assert!(req.ranked_items.is_empty());
        assert!(req.months.is_empty());
        assert_eq!(req.range, NightRange::new(1, 60));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_ranked_item_lookup_order() {
        let item: RankedItem = serde_json::from_value(serde_json::json!({
            "type": "animal",
            "full": "Cape Buffalo",
            "label": "buffalo"
        }))
        .unwrap();

        assert_eq!(item.kind, ItemKind::Animal);
        assert_eq!(item.lookup_names().collect::<Vec<_>>(), vec!["Cape Buffalo", "buffalo"]);

        let both: RankedItem = serde_json::from_value(serde_json::json!({
            "type": "adventure",
            "name": "Night Drive",
            "full": "night drive"
        }))
        .unwrap();
        assert_eq!(both.lookup_names().next(), Some("Night Drive"));
    }

    #[test]
    fn test_ranked_item_without_usable_key() {
        let req: MatchRequest = serde_json::from_str(
            r#"{"rankedItems": [{"type": "animal", "name": ""}, {"type": "animal", "label": "lion"}]}"#,
        )
        .unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.ranked_items[0].lookup_names().count(), 0);
        assert_eq!(req.ranked_items[1].lookup_names().collect::<Vec<_>>(), vec!["lion"]);
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        let non_numeric = serde_json::from_str::<MatchRequest>(r#"{"range": {"min": "one", "max": 5}}"#);
        assert!(non_numeric.is_err());

        let fractional = serde_json::from_str::<MatchRequest>(r#"{"range": {"min": 10.0, "max": 12}}"#);
        assert!(fractional.is_err());

        let non_array = serde_json::from_str::<MatchRequest>(r#"{"months": "June"}"#);
        assert!(non_array.is_err());

        let unknown_kind = serde_json::from_str::<MatchRequest>(
            r#"{"rankedItems": [{"type": "vehicle", "name": "jeep"}]}"#,
        );
        assert!(unknown_kind.is_err());
    }

    #[test]
    fn test_range_validation() {
        let inverted = MatchRequest {
            range: NightRange::new(10, 2),
            ..MatchRequest::default()
        };
        assert!(inverted.validate().is_err());

        let zero = MatchRequest {
            range: NightRange::new(0, 2),
            ..MatchRequest::default()
        };
        assert!(zero.validate().is_err());
        assert!(!zero.range.is_well_formed());
    }

    #[test]
    fn test_split_by_kind_keeps_order() {
        let req = MatchRequest {
            ranked_items: vec![
                RankedItem::animal("lion"),
                RankedItem::adventure("balloon"),
                RankedItem::animal("leopard"),
            ],
            ..MatchRequest::default()
        };

        let animals: Vec<_> = req.animals().filter_map(|i| i.name.as_deref()).collect();
        let adventures: Vec<_> = req.adventures().filter_map(|i| i.name.as_deref()).collect();
        assert_eq!(animals, vec!["lion", "leopard"]);
        assert_eq!(adventures, vec!["balloon"]);
    }
}
