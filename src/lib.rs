#[macro_use]
extern crate log;

pub mod config;
pub mod duplicate;
pub mod error;
pub mod labels;
pub mod logging;
pub mod lottery;
pub mod model;
pub mod ranking;

pub use duplicate::{compute_suggestions, is_exact_duplicate, levenshtein, SimilarityMatch};
pub use error::{Error, Result};
pub use lottery::{draw_pick, LotteryOutcome, RandomSource};
pub use ranking::personal_ranking;
