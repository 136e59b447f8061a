pub mod candidates;
pub mod explanations;
pub mod history;
pub mod preferences;
pub mod providers;
pub mod recommendations;

pub use recommendations::{Recommender, RecommenderSettings};
