/// Weight applied to a ranked preference by its position in the caller's list.
/// The first choice counts 50x more than the fifteenth; anything past the table weighs nothing.
pub const RANK_WEIGHTS: [f64; 15] = [
    25.0, 20.0, 16.0, 13.0, 10.0, 8.0, 6.0, 5.0, 4.0, 3.0, 2.5, 2.0, 1.5, 1.0, 0.5,
];

/// Fixed probability credited to an activity the camp offers
pub const ADVENTURE_FACTOR: f64 = 0.75;

/// Weight for a 0-indexed rank position, 0 beyond the table
#[inline]
pub fn rank_weight(position: usize) -> f64 {
    RANK_WEIGHTS.get(position).copied().unwrap_or(0.0)
}

/// Ideal-travel-month slot declared by a camp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSlot {
    Best,
    Second,
    Third,
}

impl MonthSlot {
    pub const ALL: [MonthSlot; 3] = [MonthSlot::Best, MonthSlot::Second, MonthSlot::Third];

    /// Flat bonus awarded when the slot's month is the caller's first choice
    pub fn bonus(&self) -> f64 {
        match self {
            MonthSlot::Best => 3.0,
            MonthSlot::Second => 2.0,
            MonthSlot::Third => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_weight_table() {
        assert_eq!(rank_weight(0), 25.0);
        assert_eq!(rank_weight(4), 10.0);
        assert_eq!(rank_weight(10), 2.5);
        assert_eq!(rank_weight(14), 0.5);
    }

    #[test]
    fn test_rank_weight_exhausted() {
        assert_eq!(rank_weight(15), 0.0);
        assert_eq!(rank_weight(usize::MAX), 0.0);
    }

    #[test]
    fn test_weights_descend() {
        assert!(RANK_WEIGHTS.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(RANK_WEIGHTS.iter().sum::<f64>(), 117.5);
    }

    #[test]
    fn test_month_bonus() {
        let bonuses: Vec<f64> = MonthSlot::ALL.iter().map(MonthSlot::bonus).collect();
        assert_eq!(bonuses, vec![3.0, 2.0, 1.0]);
    }
}
