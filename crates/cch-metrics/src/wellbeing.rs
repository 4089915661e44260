//! Cantril's Ladder wellbeing categories.

use std::fmt;

/// Wellbeing category derived from two ladder scores.
///
/// `Suffering < Struggling < Thriving`; `Unknown` has no rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellbeingCategory {
    Thriving,
    Struggling,
    Suffering,
    Unknown,
}

impl WellbeingCategory {
    pub const fn rank(self) -> Option<u8> {
        match self {
            Self::Suffering => Some(0),
            Self::Struggling => Some(1),
            Self::Thriving => Some(2),
            Self::Unknown => None,
        }
    }

    pub const fn is_known(self) -> bool {
        self.rank().is_some()
    }

    /// Whether `self` ranks strictly above `intake`; `None` if either is unknown.
    pub fn improved_from(self, intake: Self) -> Option<bool> {
        Some(self.rank()? > intake.rank()?)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Thriving => "Thriving",
            Self::Struggling => "Struggling",
            Self::Suffering => "Suffering",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WellbeingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a pair of ladder scores to a category.
pub fn categorize(first: Option<i64>, second: Option<i64>) -> WellbeingCategory {
    let (Some(first), Some(second)) = (first, second) else {
        return WellbeingCategory::Unknown;
    };
    if first >= 7 && second >= 8 {
        WellbeingCategory::Thriving
    } else if first <= 4 && second <= 4 {
        WellbeingCategory::Suffering
    } else {
        WellbeingCategory::Struggling
    }
}
