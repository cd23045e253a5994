mod mode;
mod progress;
mod question;
mod reward;
mod settings;

pub use mode::{Mode, ParseModeError};
pub use progress::{MAX_STARS, ProgressRecord, SCHEMA_VERSION, SCORES_PER_STAR};
pub use question::{
    AdditionQuestion, CountingQuestion, ItemCategory, OPTION_COUNT, PatternFamily, PatternQuestion,
    Question, QuestionError, Shape, ShapePromptStyle, ShapeQuestion, Submission,
    SubtractionQuestion,
};
pub use reward::{Reward, RewardTier};
pub use settings::{GameSettings, SettingsError};
