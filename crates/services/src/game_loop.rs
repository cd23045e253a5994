use std::sync::Arc;

use mathblast_core::Clock;
use mathblast_core::model::{GameSettings, Mode, ProgressRecord, Submission};
use storage::repository::KeyValueStore;

use crate::error::SessionError;
use crate::game_session::{AnswerOutcome, GameSession};
use crate::progress_store::ProgressStore;

/// Result of answering a question, with the refreshed progress snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAnswer {
    pub outcome: AnswerOutcome,
    pub progress: ProgressRecord,
}

/// Orchestrates game sessions against the persisted progress profile.
#[derive(Clone)]
pub struct GameLoopService {
    settings: GameSettings,
    progress: ProgressStore,
}

impl GameLoopService {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            settings: GameSettings::default_for_preschool(),
            progress: ProgressStore::new(clock, kv),
        }
    }

    /// Override the difficulty bounds.
    #[must_use]
    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Start a fresh session for the given mode.
    #[must_use]
    pub fn start_session(&self, mode: Mode) -> GameSession {
        GameSession::new(mode, self.settings.clone())
    }

    /// Evaluate a submission. Every correct answer folds the running session
    /// score into the persisted record; reward milestones additionally bump
    /// the lifetime reward counter.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestion` if the session has no question in
    /// flight.
    pub async fn answer_current(
        &self,
        session: &mut GameSession,
        submission: &Submission,
    ) -> Result<GameAnswer, SessionError> {
        let outcome = session.answer(submission)?;

        if !outcome.correct {
            let progress = self.progress.load().await;
            return Ok(GameAnswer { outcome, progress });
        }

        let mut progress = self
            .progress
            .record_result(session.mode(), outcome.score)
            .await;
        if outcome.reward.is_some() {
            progress = self.progress.record_reward().await;
        }

        Ok(GameAnswer { outcome, progress })
    }
}
