//! Tag aggregation core for weekly trending-video snapshots.
//!
//! Turns raw per-video tag strings into a deduplicated, ranked, per-country
//! tag table; reshapes weekly top-tag tables between long and wide form for
//! forecasting; and scores a forecast against the trends that followed.
//!
//! Every function is a pure, synchronous batch transform. Nothing here
//! installs a log subscriber or touches storage.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod filter;
pub mod normalize;
pub mod reshape;
pub mod similarity;
pub mod table;
pub mod types;

pub use aggregate::{count_tags_by_country, period_label, weekly_totals, TagCountParams};
pub use engine::TrendEngine;
pub use error::EngineError;
pub use evaluate::{evaluate_prediction, latest_trending};
pub use filter::filter_rows;
pub use normalize::{dedupe_tags, normalize_tag, split_tags};
pub use reshape::{long_to_wide, wide_to_long, WideMatrix};
pub use similarity::match_ratio;
pub use table::Table;
pub use types::{Evaluation, PeriodFrequency, PredictedTag, TrendRow};
