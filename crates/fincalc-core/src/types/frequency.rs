//! Bond compounding frequency.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

/// Compounding (and coupon) frequency of a bond.
///
/// Only three frequencies are recognised. Anything else is an input error,
/// never a silent default.
///
/// Deserialization goes through [`FromStr`], so serde inputs accept the same
/// labels as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Frequency {
    /// One period per year
    Yearly,
    /// Two periods per year
    #[serde(rename = "Half-Yearly")]
    HalfYearly,
    /// Four periods per year
    Quarterly,
}

impl Frequency {
    /// All recognised frequencies, in increasing order of periods per year.
    pub const ALL: [Frequency; 3] = [Frequency::Yearly, Frequency::HalfYearly, Frequency::Quarterly];

    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Yearly => 1,
            Frequency::HalfYearly => 2,
            Frequency::Quarterly => 4,
        }
    }

    /// Maps a periods-per-year count back to a frequency.
    pub fn from_periods(periods: u32) -> Result<Self, CalcError> {
        match periods {
            1 => Ok(Frequency::Yearly),
            2 => Ok(Frequency::HalfYearly),
            4 => Ok(Frequency::Quarterly),
            other => Err(CalcError::InvalidEnumeration {
                field: "frequency",
                value: other.to_string(),
            }),
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Yearly => "Yearly",
            Frequency::HalfYearly => "Half-Yearly",
            Frequency::Quarterly => "Quarterly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "yearly" | "annual" | "annually" | "1" => Ok(Frequency::Yearly),
            "halfyearly" | "semiannual" | "semiannually" | "2" => Ok(Frequency::HalfYearly),
            "quarterly" | "4" => Ok(Frequency::Quarterly),
            _ => Err(CalcError::InvalidEnumeration {
                field: "frequency",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Frequency {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
