use rand::Rng;

use mathblast_core::generator;
use mathblast_core::model::{GameSettings, Mode, Question, RewardTier, Submission};

use crate::error::SessionError;

/// Outcome of evaluating one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Running session score after this answer.
    pub score: u32,
    /// Set when the new score hit a reward milestone (a positive multiple
    /// of five).
    pub reward: Option<RewardTier>,
}

/// One-shot question/answer cycle for a single mode.
///
/// At most one question is in flight. A wrong answer leaves it in place so
/// the player can retry; a correct answer clears it, and the next call to
/// [`next_question`](Self::next_question) draws a fresh one. Sessions carry
/// no cross-question memory beyond the running score.
#[derive(Debug, Clone)]
pub struct GameSession {
    mode: Mode,
    settings: GameSettings,
    score: u32,
    questions_answered: u32,
    question: Option<Question>,
}

impl GameSession {
    #[must_use]
    pub fn new(mode: Mode, settings: GameSettings) -> Self {
        Self {
            mode,
            settings,
            score: 0,
            questions_answered: 0,
            question: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of questions answered correctly so far.
    #[must_use]
    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Draws the next question, replacing any abandoned one.
    ///
    /// # Errors
    ///
    /// Propagates generator errors; unreachable when the settings came from
    /// a validated constructor.
    pub fn next_question<R: Rng>(&mut self, rng: &mut R) -> Result<&Question, SessionError> {
        let question = generator::question_for(rng, self.mode, &self.settings)?;
        Ok(self.question.insert(question))
    }

    /// Evaluates a submission against the in-flight question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestion` if no question is in flight.
    pub fn answer(&mut self, submission: &Submission) -> Result<AnswerOutcome, SessionError> {
        let Some(question) = self.question.as_ref() else {
            return Err(SessionError::NoQuestion);
        };

        if !question.is_correct(submission) {
            return Ok(AnswerOutcome {
                correct: false,
                score: self.score,
                reward: None,
            });
        }

        self.score = self.score.saturating_add(1);
        self.questions_answered = self.questions_answered.saturating_add(1);
        self.question = None;

        let tier = RewardTier::for_score(self.score);
        let reward = (tier != RewardTier::Star).then_some(tier);

        Ok(AnswerOutcome {
            correct: true,
            score: self.score,
            reward,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(mode: Mode) -> GameSession {
        GameSession::new(mode, GameSettings::default_for_preschool())
    }

    #[test]
    fn answering_without_a_question_errors() {
        let mut session = session(Mode::Addition);
        let err = session.answer(&Submission::Number(4)).unwrap_err();
        assert!(matches!(err, SessionError::NoQuestion));
    }

    #[test]
    fn wrong_answer_keeps_question_for_retry() {
        let mut session = session(Mode::Addition);
        let mut rng = StdRng::seed_from_u64(11);
        session.next_question(&mut rng).unwrap();

        // No addition within ten sums to 1000.
        let outcome = session.answer(&Submission::Number(1000)).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.score, 0);
        assert!(session.current_question().is_some());

        let correct = session.current_question().unwrap().correct_submission();
        let outcome = session.answer(&correct).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.score, 1);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn rewards_surface_on_multiples_of_five() {
        let mut session = session(Mode::Patterns);
        let mut rng = StdRng::seed_from_u64(5);

        for expected_score in 1..=10u32 {
            session.next_question(&mut rng).unwrap();
            let correct = session.current_question().unwrap().correct_submission();
            let outcome = session.answer(&correct).unwrap();

            assert_eq!(outcome.score, expected_score);
            match expected_score {
                5 => assert_eq!(outcome.reward, Some(RewardTier::Sticker)),
                10 => assert_eq!(outcome.reward, Some(RewardTier::Trophy)),
                _ => assert_eq!(outcome.reward, None),
            }
        }
        assert_eq!(session.questions_answered(), 10);
    }

    #[test]
    fn abandoning_a_question_costs_nothing() {
        let mut session = session(Mode::Shapes);
        let mut rng = StdRng::seed_from_u64(2);

        session.next_question(&mut rng).unwrap();
        session.next_question(&mut rng).unwrap();

        assert!(session.current_question().is_some());
        assert_eq!(session.score(), 0);
        assert_eq!(session.questions_answered(), 0);
    }
}
