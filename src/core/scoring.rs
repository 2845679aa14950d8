use std::collections::{HashMap, HashSet};
use crate::models::{Camp, MatchRequest, RankedItem};
use crate::core::weights::{rank_weight, MonthSlot, ADVENTURE_FACTOR};

/// Lowercased lookup names for one ranked preference, tried in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceKey {
    candidates: Vec<String>,
}

impl PreferenceKey {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            candidates: names
                .into_iter()
                .map(|n| n.as_ref().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// No usable name; scores 0 everywhere
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl From<&RankedItem> for PreferenceKey {
    fn from(item: &RankedItem) -> Self {
        Self::new(item.lookup_names())
    }
}

/// Request preferences normalized once per match call
#[derive(Debug, Clone)]
pub struct PreferenceProfile<'a> {
    pub animals: Vec<PreferenceKey>,
    pub adventures: Vec<PreferenceKey>,
    pub months: &'a [String],
}

impl<'a> PreferenceProfile<'a> {
    pub fn from_request(request: &'a MatchRequest) -> Self {
        Self {
            animals: request.animals().map(PreferenceKey::from).collect(),
            adventures: request.adventures().map(PreferenceKey::from).collect(),
            months: &request.months,
        }
    }
}

/// Case-insensitive view over a camp's sightings and activities
#[derive(Debug)]
pub struct CampIndex<'a> {
    pub camp: &'a Camp,
    animal_prob: HashMap<String, f64>,
    adventures: HashSet<String>,
}

impl<'a> CampIndex<'a> {
    pub fn new(camp: &'a Camp) -> Self {
        let mut animal_prob = HashMap::with_capacity(camp.animal_prob.len());
        for (animal, prob) in &camp.animal_prob {
            animal_prob.entry(animal.to_lowercase()).or_insert(*prob);
        }

        Self {
            camp,
            animal_prob,
            adventures: camp.adventures.iter().map(|a| a.to_lowercase()).collect(),
        }
    }

    /// Sighting probability of the first candidate the camp records; 0 otherwise
    pub fn probability(&self, key: &PreferenceKey) -> f64 {
        key.candidates()
            .iter()
            .find_map(|name| self.animal_prob.get(name))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn offers(&self, key: &PreferenceKey) -> bool {
        key.candidates().iter().any(|name| self.adventures.contains(name))
    }

    fn month(&self, slot: MonthSlot) -> Option<&'a str> {
        match slot {
            MonthSlot::Best => self.camp.months_best.as_deref(),
            MonthSlot::Second => self.camp.months_second.as_deref(),
            MonthSlot::Third => self.camp.months_third.as_deref(),
        }
    }
}

/// Per-component score of a single camp
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub animals: f64,
    pub adventures: f64,
    pub months: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.animals + self.adventures + self.months
    }
}

/// Score a camp against normalized preferences
///
/// Scoring formula:
/// score = Σ rank_weight(i) * animalProb[animal_i]
///       + Σ rank_weight(j) * 0.75 * offers(adventure_j)
///       + 3 * month_rank(best) + 2 * month_rank(second) + 1 * month_rank(third)
pub fn score_camp(camp: &CampIndex<'_>, profile: &PreferenceProfile<'_>) -> ScoreBreakdown {
    ScoreBreakdown {
        animals: animal_score(camp, &profile.animals),
        adventures: adventure_score(camp, &profile.adventures),
        months: month_score(camp, profile.months),
    }
}

pub fn animal_score(camp: &CampIndex<'_>, animals: &[PreferenceKey]) -> f64 {
    animals
        .iter()
        .enumerate()
        .map(|(position, key)| rank_weight(position) * camp.probability(key))
        .sum()
}

pub fn adventure_score(camp: &CampIndex<'_>, adventures: &[PreferenceKey]) -> f64 {
    adventures
        .iter()
        .enumerate()
        .filter(|(_, key)| camp.offers(key))
        .map(|(position, _)| rank_weight(position) * ADVENTURE_FACTOR)
        .sum()
}

pub fn month_score(camp: &CampIndex<'_>, months: &[String]) -> f64 {
    MonthSlot::ALL
        .iter()
        .filter_map(|slot| camp.month(*slot).map(|id| slot.bonus() * month_rank_score(id, months)))
        .sum()
}

/// Linear decay from 1 for the caller's first month towards 1/len for the last.
/// Months the caller did not rank score 0.
#[inline]
pub fn month_rank_score(month_id: &str, months: &[String]) -> f64 {
    match months.iter().position(|m| m == month_id) {
        Some(position) => (months.len() - position) as f64 / months.len() as f64,
        None => 0.0,
    }
}
