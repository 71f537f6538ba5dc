//! Core business logic for pictor.

pub mod projection;
pub mod services;
pub mod suggestion;

pub use projection::Projector;
pub use services::*;
pub use suggestion::{RecencyRanking, ShuffleRanking, SuggestionRanking};
