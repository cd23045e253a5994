//! Question generators for the five mini-games.
//!
//! Every generator draws from a caller-supplied [`Rng`] so tests can seed
//! them, and returns a fully validated [`Question`]: four distinct answer
//! options containing the correct answer exactly once, in fair-shuffled
//! order.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::model::{
    AdditionQuestion, CountingQuestion, GameSettings, ItemCategory, Mode, OPTION_COUNT,
    PatternFamily, PatternQuestion, Question, QuestionError, Shape, ShapePromptStyle,
    ShapeQuestion, SubtractionQuestion,
};

/// Cap on random draws while collecting distractors. Past this, numeric
/// modes fill the remaining slots deterministically.
const MAX_DISTRACTOR_ATTEMPTS: usize = 64;

/// Historical candidate range for counting distractors.
const COUNTING_CANDIDATE_MAX: u32 = 20;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("max count must be at least 1, got {provided}")]
    InvalidMaxCount { provided: u32 },

    #[error("max sum must be at least 2, got {provided}")]
    InvalidMaxSum { provided: u32 },

    #[error("max number must be at least 1, got {provided}")]
    InvalidMaxNum { provided: u32 },

    #[error("cannot pick {needed} distinct options from {available} candidates")]
    DistractorSpaceExhausted { needed: usize, available: usize },

    #[error(transparent)]
    Question(#[from] QuestionError),
}

//
// ─── GENERATORS ────────────────────────────────────────────────────────────────
//

/// Draws a counting question: a target in `[1, max_count]` and an item
/// category, with distractors from `[1, 20]`.
///
/// # Errors
///
/// Returns `GeneratorError::InvalidMaxCount` if `max_count` is zero.
pub fn counting<R: Rng>(rng: &mut R, max_count: u32) -> Result<Question, GeneratorError> {
    if max_count < 1 {
        return Err(GeneratorError::InvalidMaxCount {
            provided: max_count,
        });
    }

    let target = rng.random_range(1..=max_count);
    let category = ItemCategory::ALL[rng.random_range(0..ItemCategory::ALL.len())];
    let options = numeric_options(rng, target, 1, |r| {
        r.random_range(1..=COUNTING_CANDIDATE_MAX)
    });

    Ok(Question::Counting(CountingQuestion::new(
        target, category, options,
    )?))
}

/// Draws an addition question with `operand_a + operand_b <= max_sum`,
/// both operands at least 1. Distractors come from a `[-5, +4]` window
/// around the sum, clamped to stay positive.
///
/// # Errors
///
/// Returns `GeneratorError::InvalidMaxSum` if `max_sum < 2`.
pub fn addition<R: Rng>(rng: &mut R, max_sum: u32) -> Result<Question, GeneratorError> {
    if max_sum < 2 {
        return Err(GeneratorError::InvalidMaxSum { provided: max_sum });
    }

    let operand_a = rng.random_range(1..=max_sum - 1);
    let operand_b = rng.random_range(1..=max_sum - operand_a);
    let sum = operand_a + operand_b;
    let options = numeric_options(rng, sum, 1, |r| {
        offset_candidate(sum, r.random_range(-5..5), 1)
    });

    Ok(Question::Addition(AdditionQuestion::new(
        operand_a, operand_b, options,
    )?))
}

/// Draws a subtraction question with `minuend` in `[2, max_num + 1]` and
/// `subtrahend` strictly below it, so the difference is at least 1.
/// Distractors come from a `[-3, +2]` window around the difference and may
/// include 0.
///
/// # Errors
///
/// Returns `GeneratorError::InvalidMaxNum` if `max_num` is zero.
pub fn subtraction<R: Rng>(rng: &mut R, max_num: u32) -> Result<Question, GeneratorError> {
    if max_num < 1 {
        return Err(GeneratorError::InvalidMaxNum { provided: max_num });
    }

    let minuend = rng.random_range(2..=max_num + 1);
    let subtrahend = rng.random_range(1..=minuend - 1);
    let difference = minuend - subtrahend;
    let options = numeric_options(rng, difference, 0, |r| {
        offset_candidate(difference, r.random_range(-3..3), 0)
    });

    Ok(Question::Subtraction(SubtractionQuestion::new(
        minuend, subtrahend, options,
    )?))
}

/// Draws a shape question: a target from the six-shape catalog, a prompt
/// style, and three distractor shapes sampled without replacement.
///
/// # Errors
///
/// Propagates option-set construction failures; the built-in catalog is
/// large enough that none occur in practice.
pub fn shapes<R: Rng>(rng: &mut R) -> Result<Question, GeneratorError> {
    let target = Shape::ALL[rng.random_range(0..Shape::ALL.len())];
    let style = if rng.random_bool(0.5) {
        ShapePromptStyle::Identify
    } else {
        ShapePromptStyle::Find
    };
    let options = label_options(rng, &Shape::ALL, target)?;

    Ok(Question::Shapes(ShapeQuestion::new(target, style, options)?))
}

/// Draws a pattern question: an alternating A-B strip over one token
/// family, with the continuation as the correct answer.
///
/// # Errors
///
/// Returns `GeneratorError::DistractorSpaceExhausted` if the chosen family
/// holds fewer than four tokens (not the case for the built-in families).
pub fn patterns<R: Rng>(rng: &mut R) -> Result<Question, GeneratorError> {
    let family = if rng.random_bool(0.5) {
        PatternFamily::Colors
    } else {
        PatternFamily::Shapes
    };
    let tokens = family.tokens();

    let first = tokens[rng.random_range(0..tokens.len())];
    let others: Vec<&'static str> = tokens.iter().copied().filter(|t| *t != first).collect();
    let second = others[rng.random_range(0..others.len())];

    let sequence = vec![first, second, first, second];
    let options = label_options(rng, tokens, first)?;

    Ok(Question::Patterns(PatternQuestion::new(
        family, sequence, first, options,
    )?))
}

/// Draws a question for the given mode using the configured bounds.
///
/// # Errors
///
/// Propagates the mode generator's errors; unreachable when `settings`
/// came from a validated constructor.
pub fn question_for<R: Rng>(
    rng: &mut R,
    mode: Mode,
    settings: &GameSettings,
) -> Result<Question, GeneratorError> {
    match mode {
        Mode::Counting => counting(rng, settings.max_count()),
        Mode::Addition => addition(rng, settings.max_sum()),
        Mode::Subtraction => subtraction(rng, settings.max_num()),
        Mode::Shapes => shapes(rng),
        Mode::Patterns => patterns(rng),
    }
}

//
// ─── OPTION CONSTRUCTION ───────────────────────────────────────────────────────
//

fn offset_candidate(correct: u32, delta: i32, floor: u32) -> u32 {
    let value = i64::from(correct) + i64::from(delta);
    let value = value.max(i64::from(floor));
    u32::try_from(value).unwrap_or(floor)
}

/// Collects four distinct numeric options containing `correct`.
///
/// Candidates are drawn through `candidate` with bounded rejection
/// sampling; once `MAX_DISTRACTOR_ATTEMPTS` draws are spent, remaining
/// slots are filled by walking outward from the correct answer, staying at
/// or above `floor`. The walk makes the function total: the non-negative
/// integers always hold enough values.
fn numeric_options<R: Rng>(
    rng: &mut R,
    correct: u32,
    floor: u32,
    mut candidate: impl FnMut(&mut R) -> u32,
) -> Vec<u32> {
    let mut options = vec![correct];

    let mut attempts = 0;
    while options.len() < OPTION_COUNT && attempts < MAX_DISTRACTOR_ATTEMPTS {
        attempts += 1;
        let value = candidate(rng);
        if value >= floor && !options.contains(&value) {
            options.push(value);
        }
    }

    let mut step = 1u32;
    while options.len() < OPTION_COUNT {
        let above = correct.saturating_add(step);
        if !options.contains(&above) {
            options.push(above);
        }
        if options.len() < OPTION_COUNT && correct >= step && correct - step >= floor {
            let below = correct - step;
            if !options.contains(&below) {
                options.push(below);
            }
        }
        step = step.saturating_add(1);
    }

    options.shuffle(rng);
    options
}

/// Collects four distinct options from a fixed catalog, containing
/// `correct`: the three distractors are a without-replacement sample of
/// the remaining entries.
fn label_options<R: Rng, T: Copy + PartialEq>(
    rng: &mut R,
    pool: &[T],
    correct: T,
) -> Result<Vec<T>, GeneratorError> {
    let needed = OPTION_COUNT - 1;
    let mut others: Vec<T> = pool.iter().copied().filter(|c| *c != correct).collect();
    if others.len() < needed {
        return Err(GeneratorError::DistractorSpaceExhausted {
            needed: OPTION_COUNT,
            available: others.len() + 1,
        });
    }

    let (chosen, _) = others.partial_shuffle(rng, needed);
    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(correct);
    options.extend_from_slice(chosen);
    options.shuffle(rng);
    Ok(options)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
