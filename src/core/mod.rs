// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod weights;

pub use filters::fits_duration;
pub use matcher::{Matcher, MatchingConfig, MatchError, UnknownCategoryPolicy, DEFAULT_PER_CATEGORY};
pub use scoring::{score_camp, month_rank_score, CampIndex, PreferenceProfile, ScoreBreakdown};
pub use weights::{rank_weight, MonthSlot, ADVENTURE_FACTOR, RANK_WEIGHTS};
