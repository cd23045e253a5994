use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("max count must be at least 1")]
    InvalidMaxCount,

    #[error("max sum must be at least 2")]
    InvalidMaxSum,

    #[error("max number must be at least 1")]
    InvalidMaxNum,
}

/// Difficulty knobs for the mini-games.
///
/// Each bound feeds the generator for its numeric mode; shape and pattern
/// rounds draw from fixed catalogs and take no knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    max_count: u32,
    max_sum: u32,
    max_num: u32,
}

impl GameSettings {
    /// Default difficulty for the target audience: everything within ten.
    #[must_use]
    pub fn default_for_preschool() -> Self {
        Self {
            max_count: 10,
            max_sum: 10,
            max_num: 10,
        }
    }

    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns an error if any bound is below the smallest value its
    /// generator can work with.
    pub fn new(max_count: u32, max_sum: u32, max_num: u32) -> Result<Self, SettingsError> {
        if max_count < 1 {
            return Err(SettingsError::InvalidMaxCount);
        }
        if max_sum < 2 {
            return Err(SettingsError::InvalidMaxSum);
        }
        if max_num < 1 {
            return Err(SettingsError::InvalidMaxNum);
        }
        Ok(Self {
            max_count,
            max_sum,
            max_num,
        })
    }

    /// Upper bound for counting targets.
    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Upper bound for addition sums.
    #[must_use]
    pub fn max_sum(&self) -> u32 {
        self.max_sum
    }

    /// Upper bound for subtraction inputs.
    #[must_use]
    pub fn max_num(&self) -> u32 {
        self.max_num
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::default_for_preschool()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preschool_defaults_stay_within_ten() {
        let settings = GameSettings::default_for_preschool();
        assert_eq!(settings.max_count(), 10);
        assert_eq!(settings.max_sum(), 10);
        assert_eq!(settings.max_num(), 10);
    }

    #[test]
    fn settings_reject_degenerate_bounds() {
        assert_eq!(
            GameSettings::new(0, 10, 10).unwrap_err(),
            SettingsError::InvalidMaxCount
        );
        assert_eq!(
            GameSettings::new(10, 1, 10).unwrap_err(),
            SettingsError::InvalidMaxSum
        );
        assert_eq!(
            GameSettings::new(10, 10, 0).unwrap_err(),
            SettingsError::InvalidMaxNum
        );
    }

    #[test]
    fn smallest_valid_settings_are_accepted() {
        let settings = GameSettings::new(1, 2, 1).unwrap();
        assert_eq!(settings.max_sum(), 2);
    }
}
