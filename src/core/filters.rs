use crate::models::{Camp, NightRange};

/// Check if a camp's stay window overlaps the requested night range
///
/// This is Stage 1 of the matching pipeline: camps that fail it are
/// neither scored nor returned.
#[inline]
pub fn fits_duration(camp: &Camp, range: &NightRange) -> bool {
    camp.min_nights() <= range.max && camp.max_nights() >= range.min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_camp(min: Option<u32>, max: Option<u32>) -> Camp {
        Camp {
            id: "camp".to_string(),
            name: "Test Camp".to_string(),
            category: "CAMP".to_string(),
            animal_prob: Default::default(),
            adventures: vec![],
            months_best: None,
            months_second: None,
            months_third: None,
            min_duration: min,
            max_duration: max,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_overlapping_window() {
        let camp = create_camp(Some(3), Some(10));

        assert!(fits_duration(&camp, &NightRange::new(1, 60)));
        assert!(fits_duration(&camp, &NightRange::new(10, 14)));
        assert!(fits_duration(&camp, &NightRange::new(1, 3)));
        assert!(fits_duration(&camp, &NightRange::new(5, 6)));
    }

    #[test]
    fn test_disjoint_window() {
        let camp = create_camp(Some(3), Some(10));

        assert!(!fits_duration(&camp, &NightRange::new(20, 30)));
        assert!(!fits_duration(&camp, &NightRange::new(1, 2)));
        assert!(!fits_duration(&camp, &NightRange::new(11, 11)));
    }

    #[test]
    fn test_missing_bounds_default() {
        let open = create_camp(None, None);
        assert!(fits_duration(&open, &NightRange::new(60, 90)));
        assert!(!fits_duration(&open, &NightRange::new(61, 90)));

        let min_only = create_camp(Some(7), None);
        assert!(!fits_duration(&min_only, &NightRange::new(1, 6)));
        assert!(fits_duration(&min_only, &NightRange::new(1, 7)));
    }
}
