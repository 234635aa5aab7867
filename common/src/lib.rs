pub mod config;
pub mod games;
pub mod logger;
pub mod stats;

pub use games::SessionRng;
pub use games::tictactoe::{
    Difficulty, GameStatus, Mark, MatchSession, MatchSettings, Phase, Position, SessionEvent,
};
pub use stats::Stats;
