//! Frequency vocabularies
//!
//! Generation needs the precise, closed `Frequency` enum. Projection only
//! needs a lossy four-way `CoarseFrequencyBucket` derived from free text by
//! prefix matching. The two are kept separate because their matching rules
//! differ; `Frequency::coarse_bucket` is the single mapping between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recurrence frequency of a task definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    OneTime,
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    Yearly,
    /// Last valid date in week bucket `n` (1..=4) of each month
    EndOfWeek(u8),
    /// Last valid date in the highest week bucket of each month
    EndOfLastWeek,
}

impl Frequency {
    /// Reduce to the coarse bucket the projector works with
    ///
    /// Agrees with `CoarseFrequencyBucket::from_raw(&self.to_string())`.
    pub fn coarse_bucket(self) -> CoarseFrequencyBucket {
        match self {
            Frequency::Daily => CoarseFrequencyBucket::daily,
            Frequency::Weekly => CoarseFrequencyBucket::weekly,
            Frequency::Monthly => CoarseFrequencyBucket::monthly,
            Frequency::OneTime
            | Frequency::Fortnightly
            | Frequency::Quarterly
            | Frequency::Yearly
            | Frequency::EndOfWeek(_)
            | Frequency::EndOfLastWeek => CoarseFrequencyBucket::one_time,
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "onetime" | "once" => Ok(Frequency::OneTime),
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "fortnightly" => Ok(Frequency::Fortnightly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "yearly" => Ok(Frequency::Yearly),
            "endoflastweek" => Ok(Frequency::EndOfLastWeek),
            "endofweek1" => Ok(Frequency::EndOfWeek(1)),
            "endofweek2" => Ok(Frequency::EndOfWeek(2)),
            "endofweek3" => Ok(Frequency::EndOfWeek(3)),
            "endofweek4" => Ok(Frequency::EndOfWeek(4)),
            _ => Err(format!(
                "Invalid frequency '{}'. Valid options are: One Time, Daily, Weekly, Fortnightly, Monthly, Quarterly, Yearly, End of Week 1-4, End of Last Week",
                s
            )),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::OneTime => f.write_str("One Time"),
            Frequency::Daily => f.write_str("Daily"),
            Frequency::Weekly => f.write_str("Weekly"),
            Frequency::Fortnightly => f.write_str("Fortnightly"),
            Frequency::Monthly => f.write_str("Monthly"),
            Frequency::Quarterly => f.write_str("Quarterly"),
            Frequency::Yearly => f.write_str("Yearly"),
            Frequency::EndOfWeek(n) => write!(f, "End of Week {}", n),
            Frequency::EndOfLastWeek => f.write_str("End of Last Week"),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.to_string()
    }
}

/// Coarse frequency classification used by the occurrence projector
///
/// Uses snake_case naming to match the stored frequency vocabulary.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoarseFrequencyBucket {
    /// Steps one day at a time
    daily,
    /// Steps seven days at a time
    weekly,
    /// Steps one calendar month at a time
    monthly,
    /// A single occurrence on the start date; also the default for unknown text
    one_time,
}

impl CoarseFrequencyBucket {
    /// Classify a free-text frequency by its prefix (case-insensitive)
    ///
    /// Anything not starting with `daily`, `weekly` or `monthly` lands in
    /// `one_time`, including fortnightly and end-of-week frequencies.
    pub fn from_raw(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        if lower.starts_with("daily") {
            CoarseFrequencyBucket::daily
        } else if lower.starts_with("weekly") {
            CoarseFrequencyBucket::weekly
        } else if lower.starts_with("monthly") {
            CoarseFrequencyBucket::monthly
        } else {
            CoarseFrequencyBucket::one_time
        }
    }
}
