pub mod aggregate;
pub mod aggregator;

pub use aggregate::{AggregateRating, round2};
pub use aggregator::{AggregateError, RatingAggregator};
