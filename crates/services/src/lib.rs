#![forbid(unsafe_code)]

pub mod error;
pub mod game_loop;
pub mod game_session;
pub mod progress_store;

pub use mathblast_core::Clock;

pub use error::SessionError;
pub use game_loop::{GameAnswer, GameLoopService};
pub use game_session::{AnswerOutcome, GameSession};
pub use progress_store::{ProgressStore, STORAGE_KEY};
