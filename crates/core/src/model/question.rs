use thiserror::Error;

use crate::model::Mode;

/// Every question shows exactly this many answer options.
pub const OPTION_COUNT: usize = 4;

/// Length of the visible part of a pattern strip.
pub const PATTERN_LENGTH: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Violations of the question invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("expected {expected} answer options, got {got}")]
    WrongOptionCount { expected: usize, got: usize },

    #[error("answer options contain duplicates")]
    DuplicateOption,

    #[error("correct answer is missing from the options")]
    MissingCorrectOption,

    #[error("target count must be at least 1")]
    ZeroTargetCount,

    #[error("operands must be at least 1")]
    OperandTooSmall,

    #[error("subtrahend {subtrahend} must be below minuend {minuend}")]
    SubtrahendTooLarge { minuend: u32, subtrahend: u32 },

    #[error("pattern strip must alternate two distinct tokens")]
    MalformedPattern,
}

/// Checks the shared option-set invariant: exactly [`OPTION_COUNT`] distinct
/// entries, including the correct answer exactly once.
fn validate_options<T: PartialEq>(options: &[T], correct: &T) -> Result<(), QuestionError> {
    if options.len() != OPTION_COUNT {
        return Err(QuestionError::WrongOptionCount {
            expected: OPTION_COUNT,
            got: options.len(),
        });
    }
    for i in 0..options.len() {
        if options[i + 1..].contains(&options[i]) {
            return Err(QuestionError::DuplicateOption);
        }
    }
    if !options.contains(correct) {
        return Err(QuestionError::MissingCorrectOption);
    }
    Ok(())
}

//
// ─── CATALOGS ──────────────────────────────────────────────────────────────────
//

/// What kind of objects a counting round shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    Animals,
    Fruits,
    Shapes,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 3] = [
        ItemCategory::Animals,
        ItemCategory::Fruits,
        ItemCategory::Shapes,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ItemCategory::Animals => "animals",
            ItemCategory::Fruits => "fruits",
            ItemCategory::Shapes => "shapes",
        }
    }
}

/// Catalog of shapes a shape round can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Star,
    Heart,
    Diamond,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Circle,
        Shape::Square,
        Shape::Triangle,
        Shape::Star,
        Shape::Heart,
        Shape::Diamond,
    ];

    /// The label the player has to match.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Star => "star",
            Shape::Heart => "heart",
            Shape::Diamond => "diamond",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Shape::Circle => "⭕",
            Shape::Square => "⬜",
            Shape::Triangle => "🔺",
            Shape::Star => "⭐",
            Shape::Heart => "❤️",
            Shape::Diamond => "💎",
        }
    }
}

/// Token family used to build a pattern strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFamily {
    Colors,
    Shapes,
}

const COLOR_TOKENS: [&str; 6] = ["🔴", "🟢", "🔵", "🟡", "🟣", "🟠"];
const SHAPE_TOKENS: [&str; 4] = ["⭕", "⬜", "🔺", "⭐"];

impl PatternFamily {
    /// Tokens a strip of this family is drawn from.
    #[must_use]
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            PatternFamily::Colors => &COLOR_TOKENS,
            PatternFamily::Shapes => &SHAPE_TOKENS,
        }
    }
}

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

/// A single tap on an answer option.
///
/// Consumed immediately by the evaluator; a submission of the wrong kind for
/// the mode is simply incorrect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Number(u32),
    Label(String),
}

//
// ─── NUMERIC QUESTIONS ─────────────────────────────────────────────────────────
//

/// "Count N things" round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountingQuestion {
    target_count: u32,
    category: ItemCategory,
    options: Vec<u32>,
}

impl CountingQuestion {
    /// Builds a counting question, enforcing the option-set invariant.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::ZeroTargetCount` for a zero target and the
    /// shared option-set errors otherwise.
    pub fn new(
        target_count: u32,
        category: ItemCategory,
        options: Vec<u32>,
    ) -> Result<Self, QuestionError> {
        if target_count == 0 {
            return Err(QuestionError::ZeroTargetCount);
        }
        validate_options(&options, &target_count)?;
        Ok(Self {
            target_count,
            category,
            options,
        })
    }

    #[must_use]
    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    #[must_use]
    pub fn category(&self) -> ItemCategory {
        self.category
    }

    #[must_use]
    pub fn options(&self) -> &[u32] {
        &self.options
    }
}

/// "a + b = ?" round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionQuestion {
    operand_a: u32,
    operand_b: u32,
    options: Vec<u32>,
}

impl AdditionQuestion {
    /// Builds an addition question, enforcing the option-set invariant.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::OperandTooSmall` if either operand is zero and
    /// the shared option-set errors otherwise.
    pub fn new(operand_a: u32, operand_b: u32, options: Vec<u32>) -> Result<Self, QuestionError> {
        if operand_a == 0 || operand_b == 0 {
            return Err(QuestionError::OperandTooSmall);
        }
        validate_options(&options, &(operand_a + operand_b))?;
        Ok(Self {
            operand_a,
            operand_b,
            options,
        })
    }

    #[must_use]
    pub fn operand_a(&self) -> u32 {
        self.operand_a
    }

    #[must_use]
    pub fn operand_b(&self) -> u32 {
        self.operand_b
    }

    #[must_use]
    pub fn sum(&self) -> u32 {
        self.operand_a + self.operand_b
    }

    #[must_use]
    pub fn options(&self) -> &[u32] {
        &self.options
    }
}

/// "m − s = ?" round. The difference is at least 1 by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtractionQuestion {
    minuend: u32,
    subtrahend: u32,
    options: Vec<u32>,
}

impl SubtractionQuestion {
    /// Builds a subtraction question, enforcing the option-set invariant.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::OperandTooSmall` for a zero subtrahend,
    /// `QuestionError::SubtrahendTooLarge` unless `subtrahend < minuend`, and
    /// the shared option-set errors otherwise.
    pub fn new(minuend: u32, subtrahend: u32, options: Vec<u32>) -> Result<Self, QuestionError> {
        if subtrahend == 0 {
            return Err(QuestionError::OperandTooSmall);
        }
        if subtrahend >= minuend {
            return Err(QuestionError::SubtrahendTooLarge {
                minuend,
                subtrahend,
            });
        }
        validate_options(&options, &(minuend - subtrahend))?;
        Ok(Self {
            minuend,
            subtrahend,
            options,
        })
    }

    #[must_use]
    pub fn minuend(&self) -> u32 {
        self.minuend
    }

    #[must_use]
    pub fn subtrahend(&self) -> u32 {
        self.subtrahend
    }

    #[must_use]
    pub fn difference(&self) -> u32 {
        self.minuend - self.subtrahend
    }

    #[must_use]
    pub fn options(&self) -> &[u32] {
        &self.options
    }
}

//
// ─── LABEL QUESTIONS ───────────────────────────────────────────────────────────
//

/// How a shape round poses its question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapePromptStyle {
    /// "What shape is this?", with the target displayed.
    Identify,
    /// "Find the <shape>:", with every shape displayed.
    Find,
}

/// Shape-identification round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeQuestion {
    target: Shape,
    style: ShapePromptStyle,
    options: Vec<Shape>,
}

impl ShapeQuestion {
    /// Builds a shape question, enforcing the option-set invariant.
    ///
    /// # Errors
    ///
    /// Returns the shared option-set errors.
    pub fn new(
        target: Shape,
        style: ShapePromptStyle,
        options: Vec<Shape>,
    ) -> Result<Self, QuestionError> {
        validate_options(&options, &target)?;
        Ok(Self {
            target,
            style,
            options,
        })
    }

    #[must_use]
    pub fn target(&self) -> Shape {
        self.target
    }

    #[must_use]
    pub fn style(&self) -> ShapePromptStyle {
        self.style
    }

    #[must_use]
    pub fn options(&self) -> &[Shape] {
        &self.options
    }
}

/// "What comes next?" round over an alternating A-B strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternQuestion {
    family: PatternFamily,
    sequence: Vec<&'static str>,
    answer: &'static str,
    options: Vec<&'static str>,
}

impl PatternQuestion {
    /// Builds a pattern question, enforcing that the strip alternates two
    /// distinct tokens, that `answer` continues it, and the option-set
    /// invariant.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::MalformedPattern` for a broken strip and the
    /// shared option-set errors otherwise.
    pub fn new(
        family: PatternFamily,
        sequence: Vec<&'static str>,
        answer: &'static str,
        options: Vec<&'static str>,
    ) -> Result<Self, QuestionError> {
        if sequence.len() != PATTERN_LENGTH {
            return Err(QuestionError::MalformedPattern);
        }
        let (a, b) = (sequence[0], sequence[1]);
        if a == b || sequence[2] != a || sequence[3] != b {
            return Err(QuestionError::MalformedPattern);
        }
        // The strip has even length, so the continuation is its first token.
        if answer != a {
            return Err(QuestionError::MalformedPattern);
        }
        validate_options(&options, &answer)?;
        Ok(Self {
            family,
            sequence,
            answer,
            options,
        })
    }

    #[must_use]
    pub fn family(&self) -> PatternFamily {
        self.family
    }

    #[must_use]
    pub fn sequence(&self) -> &[&'static str] {
        &self.sequence
    }

    #[must_use]
    pub fn answer(&self) -> &'static str {
        self.answer
    }

    #[must_use]
    pub fn options(&self) -> &[&'static str] {
        &self.options
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A generated question, one variant per mode.
///
/// Questions are transient: the presentation layer displays one, collects a
/// [`Submission`], and drops the question once it is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    Counting(CountingQuestion),
    Addition(AdditionQuestion),
    Subtraction(SubtractionQuestion),
    Shapes(ShapeQuestion),
    Patterns(PatternQuestion),
}

impl Question {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Question::Counting(_) => Mode::Counting,
            Question::Addition(_) => Mode::Addition,
            Question::Subtraction(_) => Mode::Subtraction,
            Question::Shapes(_) => Mode::Shapes,
            Question::Patterns(_) => Mode::Patterns,
        }
    }

    /// Evaluates a submission against this question.
    ///
    /// Numeric modes use exact numeric equality against the single correct
    /// answer; label modes use exact string equality. No partial credit.
    #[must_use]
    pub fn is_correct(&self, submission: &Submission) -> bool {
        match (self, submission) {
            (Question::Counting(q), Submission::Number(n)) => *n == q.target_count(),
            (Question::Addition(q), Submission::Number(n)) => *n == q.sum(),
            (Question::Subtraction(q), Submission::Number(n)) => *n == q.difference(),
            (Question::Shapes(q), Submission::Label(s)) => s == q.target().label(),
            (Question::Patterns(q), Submission::Label(s)) => s == q.answer(),
            _ => false,
        }
    }

    /// The submission that would answer this question correctly.
    #[must_use]
    pub fn correct_submission(&self) -> Submission {
        match self {
            Question::Counting(q) => Submission::Number(q.target_count()),
            Question::Addition(q) => Submission::Number(q.sum()),
            Question::Subtraction(q) => Submission::Number(q.difference()),
            Question::Shapes(q) => Submission::Label(q.target().label().to_owned()),
            Question::Patterns(q) => Submission::Label(q.answer().to_owned()),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_set_must_have_four_members() {
        let err = CountingQuestion::new(3, ItemCategory::Fruits, vec![3, 4, 5]).unwrap_err();
        assert_eq!(
            err,
            QuestionError::WrongOptionCount {
                expected: 4,
                got: 3
            }
        );
    }

    #[test]
    fn option_set_rejects_duplicates() {
        let err = CountingQuestion::new(3, ItemCategory::Fruits, vec![3, 4, 4, 5]).unwrap_err();
        assert_eq!(err, QuestionError::DuplicateOption);
    }

    #[test]
    fn option_set_must_contain_correct_answer() {
        let err = AdditionQuestion::new(2, 3, vec![1, 2, 3, 4]).unwrap_err();
        assert_eq!(err, QuestionError::MissingCorrectOption);
    }

    #[test]
    fn subtraction_requires_subtrahend_below_minuend() {
        let err = SubtractionQuestion::new(4, 4, vec![0, 1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            QuestionError::SubtrahendTooLarge {
                minuend: 4,
                subtrahend: 4
            }
        );
    }

    #[test]
    fn pattern_rejects_broken_strip() {
        let err = PatternQuestion::new(
            PatternFamily::Shapes,
            vec!["⭕", "⭕", "⭕", "⭕"],
            "⭕",
            vec!["⭕", "⬜", "🔺", "⭐"],
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::MalformedPattern);
    }

    #[test]
    fn pattern_answer_must_continue_strip() {
        let err = PatternQuestion::new(
            PatternFamily::Shapes,
            vec!["⭕", "⬜", "⭕", "⬜"],
            "⬜",
            vec!["⭕", "⬜", "🔺", "⭐"],
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::MalformedPattern);
    }

    #[test]
    fn numeric_evaluation_is_exact() {
        let q = Question::Addition(AdditionQuestion::new(2, 3, vec![5, 6, 7, 8]).unwrap());
        assert!(q.is_correct(&Submission::Number(5)));
        assert!(!q.is_correct(&Submission::Number(6)));
        assert!(!q.is_correct(&Submission::Label("5".into())));
    }

    #[test]
    fn label_evaluation_is_exact() {
        let q = Question::Shapes(
            ShapeQuestion::new(
                Shape::Heart,
                ShapePromptStyle::Identify,
                vec![Shape::Heart, Shape::Star, Shape::Circle, Shape::Square],
            )
            .unwrap(),
        );
        assert!(q.is_correct(&Submission::Label("heart".into())));
        assert!(!q.is_correct(&Submission::Label("Heart".into())));
        assert!(!q.is_correct(&Submission::Number(1)));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let q = Question::Subtraction(SubtractionQuestion::new(7, 3, vec![4, 5, 3, 2]).unwrap());
        let submission = Submission::Number(4);
        for _ in 0..10 {
            assert!(q.is_correct(&submission));
        }
    }

    #[test]
    fn correct_submission_answers_every_mode() {
        let questions = [
            Question::Counting(CountingQuestion::new(3, ItemCategory::Animals, vec![3, 1, 9, 12]).unwrap()),
            Question::Addition(AdditionQuestion::new(4, 4, vec![8, 7, 9, 2]).unwrap()),
            Question::Subtraction(SubtractionQuestion::new(9, 2, vec![7, 6, 8, 0]).unwrap()),
            Question::Shapes(
                ShapeQuestion::new(
                    Shape::Triangle,
                    ShapePromptStyle::Find,
                    vec![Shape::Triangle, Shape::Heart, Shape::Diamond, Shape::Star],
                )
                .unwrap(),
            ),
            Question::Patterns(
                PatternQuestion::new(
                    PatternFamily::Colors,
                    vec!["🔴", "🟢", "🔴", "🟢"],
                    "🔴",
                    vec!["🔴", "🟢", "🔵", "🟡"],
                )
                .unwrap(),
            ),
        ];
        for q in &questions {
            assert!(q.is_correct(&q.correct_submission()), "mode {}", q.mode());
        }
    }
}
