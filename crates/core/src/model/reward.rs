use chrono::{DateTime, Utc};

/// Reward category granted for a score milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardTier {
    Star,
    Sticker,
    Trophy,
}

impl RewardTier {
    /// Maps a cumulative score to the tier it earns.
    ///
    /// The trophy check runs before the sticker check, so multiples of 10
    /// never yield a sticker. A score of 0 stays a plain star.
    #[must_use]
    pub fn for_score(score: u32) -> Self {
        if score > 0 && score % 10 == 0 {
            RewardTier::Trophy
        } else if score > 0 && score % 5 == 0 {
            RewardTier::Sticker
        } else {
            RewardTier::Star
        }
    }

    /// Point value of the tier, for display alongside the reward.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            RewardTier::Star => 1,
            RewardTier::Sticker => 5,
            RewardTier::Trophy => 10,
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            RewardTier::Star => "⭐",
            RewardTier::Sticker => "🎖️",
            RewardTier::Trophy => "🏆",
        }
    }

    /// Celebration line shown when the reward is surfaced.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            RewardTier::Star => "Great job! ⭐",
            RewardTier::Sticker => "Amazing! You got a sticker! 🎖️",
            RewardTier::Trophy => "Fantastic! You earned a trophy! 🏆",
        }
    }
}

/// A reward handed to the player.
///
/// Individual rewards are not persisted; only the running counter in the
/// progress record survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    tier: RewardTier,
    created_at: DateTime<Utc>,
}

impl Reward {
    #[must_use]
    pub fn new(tier: RewardTier, created_at: DateTime<Utc>) -> Self {
        Self { tier, created_at }
    }

    #[must_use]
    pub fn tier(&self) -> RewardTier {
        self.tier
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
