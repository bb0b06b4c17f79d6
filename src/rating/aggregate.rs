use serde::Serialize;

use crate::domain::BookId;

/// Derived mean rating for one book. Never stored; recomputed from the
/// live review set on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    pub book_id: BookId,
    pub average_rating: f64,
    pub review_count: usize,
}

impl AggregateRating {
    /// An empty review set pins the average to 0.0 rather than NaN.
    pub fn empty(book_id: BookId) -> Self {
        Self {
            book_id,
            average_rating: 0.0,
            review_count: 0,
        }
    }

    pub fn from_ratings(book_id: BookId, ratings: &[i64]) -> Self {
        if ratings.is_empty() {
            return Self::empty(book_id);
        }

        let sum: i64 = ratings.iter().sum();
        let mean = sum as f64 / ratings.len() as f64;

        Self {
            book_id,
            average_rating: round2(mean),
            review_count: ratings.len(),
        }
    }
}

/// Round to exactly two decimal digits, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_review_set_averages_to_zero() {
        let agg = AggregateRating::from_ratings(1, &[]);

        assert_eq!(agg.average_rating, 0.0);
        assert_eq!(agg.review_count, 0);
    }

    #[test]
    fn mean_is_rounded_to_two_decimals() {
        let agg = AggregateRating::from_ratings(1, &[5, 4, 4]);
        assert_eq!(agg.average_rating, 4.33);

        let agg = AggregateRating::from_ratings(1, &[5, 4]);
        assert_eq!(agg.average_rating, 4.5);

        let agg = AggregateRating::from_ratings(1, &[4, 5, 3]);
        assert_eq!(agg.average_rating, 4.0);
        assert_eq!(agg.review_count, 3);
    }

    #[test]
    fn mean_stays_within_rating_bounds() {
        let low = AggregateRating::from_ratings(1, &[1, 1, 1]);
        assert_eq!(low.average_rating, 1.0);

        let high = AggregateRating::from_ratings(1, &[5; 7]);
        assert_eq!(high.average_rating, 5.0);
    }

    #[test]
    fn identical_inputs_produce_identical_results() {
        let a = AggregateRating::from_ratings(9, &[2, 3, 5, 5]);
        let b = AggregateRating::from_ratings(9, &[2, 3, 5, 5]);

        assert_eq!(a, b);
    }

    #[test]
    fn round2_is_half_away_from_zero() {
        // 0.125 is exactly representable, so the half case is real.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(3.333333), 3.33);
    }
}
