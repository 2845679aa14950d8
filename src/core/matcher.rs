use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use crate::models::{Camp, Category, MatchRequest, MatchResults, ScoredCamp};
use crate::core::{
    filters::fits_duration,
    scoring::{score_camp, CampIndex, PreferenceProfile},
};

/// Default number of camps kept per category
pub const DEFAULT_PER_CATEGORY: usize = 3;

/// Errors that reject a match request as a whole
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("Invalid night range {min}..{max}: bounds must be positive and min <= max")]
    InvalidRange { min: u32, max: u32 },

    #[error("Camp '{camp_id}' has unknown category '{category}'")]
    UnknownCategory { camp_id: String, category: String },
}

/// What to do with eligible camps whose category is outside the fixed set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryPolicy {
    /// Leave the camp out of every category
    #[default]
    Drop,
    /// Fail the whole request
    Reject,
}

/// Matching engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingConfig {
    pub per_category: usize,
    pub unknown_category: UnknownCategoryPolicy,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            per_category: DEFAULT_PER_CATEGORY,
            unknown_category: UnknownCategoryPolicy::Drop,
        }
    }
}

/// Eligible camp awaiting the per-category cut
struct Ranked<'a> {
    position: usize,
    score: f64,
    camp: &'a Camp,
}

/// Main matching orchestrator - implements the scoring pipeline
///
/// # Pipeline Stages
/// 1. Duration filter against the requested night range
/// 2. Scoring (animals, adventures, months)
/// 3. Grouping by category
/// 4. Ranking and truncation per category
///
/// The matcher holds no state besides its configuration and never mutates the
/// catalog it is given, so a single instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchingConfig,
}

impl Matcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Rank catalog camps against a preference request
    ///
    /// # Arguments
    /// * `camps` - Catalog snapshot to rank
    /// * `request` - Ranked preferences, month choices and night range
    ///
    /// # Returns
    /// Every category mapped to at most `per_category` camps, best first.
    /// Equal scores keep catalog order.
    pub fn find_matches(
        &self,
        camps: &[Camp],
        request: &MatchRequest,
    ) -> Result<MatchResults, MatchError> {
        let range = request.range;
        if !range.is_well_formed() {
            return Err(MatchError::InvalidRange {
                min: range.min,
                max: range.max,
            });
        }

        let profile = PreferenceProfile::from_request(request);
        let mut grouped: BTreeMap<Category, Vec<Ranked<'_>>> =
            Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
        let mut eligible = 0usize;

        for (position, camp) in camps.iter().enumerate() {
            // Stage 1: Duration filter
            if !fits_duration(camp, &range) {
                continue;
            }
            eligible += 1;

            let Some(category) = self.categorize(camp)? else {
                continue;
            };

            // Stage 2: Score
            let score = score_camp(&CampIndex::new(camp), &profile).total();

            // Stage 3: Group
            grouped.entry(category).or_default().push(Ranked {
                position,
                score,
                camp,
            });
        }

        // Stage 4: Rank by score (descending), then catalog position (ascending)
        let categories = grouped
            .into_iter()
            .map(|(category, mut ranked)| {
                ranked.sort_by(|a, b| {
                    b.score
                        .total_cmp(&a.score)
                        .then_with(|| a.position.cmp(&b.position))
                });
                ranked.truncate(self.config.per_category);

                let scored = ranked
                    .into_iter()
                    .map(|r| ScoredCamp {
                        camp: r.camp.clone(),
                        score: r.score,
                    })
                    .collect();
                (category, scored)
            })
            .collect();

        let results = MatchResults { categories };

        tracing::debug!(
            "Ranked {} of {} eligible camps ({} in catalog)",
            results.total(),
            eligible,
            camps.len()
        );

        Ok(results)
    }

    fn categorize(&self, camp: &Camp) -> Result<Option<Category>, MatchError> {
        match camp.category() {
            Some(category) => Ok(Some(category)),
            None => match self.config.unknown_category {
                UnknownCategoryPolicy::Drop => {
                    tracing::debug!(
                        "Dropping camp '{}' with unknown category '{}'",
                        camp.id,
                        camp.category
                    );
                    Ok(None)
                }
                UnknownCategoryPolicy::Reject => Err(MatchError::UnknownCategory {
                    camp_id: camp.id.clone(),
                    category: camp.category.clone(),
                }),
            },
        }
    }
}
