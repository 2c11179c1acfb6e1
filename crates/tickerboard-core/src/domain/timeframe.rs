use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Provider series a timeframe is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// 5-minute intraday bars.
    Intraday,
    /// Daily bars, most recent 100 points.
    DailyCompact,
    /// Daily bars, full history.
    DailyFull,
}

/// Window selector for historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
}

impl Timeframe {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::OneYear => "1Y",
            Self::FiveYears => "5Y",
        }
    }

    /// Parse a query value, falling back to `1M` when it is absent or unknown.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value
            .and_then(|raw| Self::from_str(raw).ok())
            .unwrap_or_default()
    }

    pub const fn series(self) -> SeriesKind {
        match self {
            Self::OneDay => SeriesKind::Intraday,
            Self::OneWeek | Self::OneMonth => SeriesKind::DailyCompact,
            Self::ThreeMonths | Self::OneYear | Self::FiveYears => SeriesKind::DailyFull,
        }
    }

    /// Number of most recent daily points kept; intraday series are filtered
    /// to the current day instead.
    pub const fn daily_points(self) -> Option<usize> {
        match self {
            Self::OneDay => None,
            Self::OneWeek => Some(7),
            Self::OneMonth => Some(30),
            Self::ThreeMonths => Some(90),
            Self::OneYear => Some(365),
            Self::FiveYears => Some(1825),
        }
    }

    /// Steps produced by the sample random walk (hours for `1D`, days otherwise).
    pub const fn sample_steps(self) -> usize {
        match self {
            Self::OneDay => 24,
            Self::OneWeek => 7,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::OneYear => 365,
            Self::FiveYears => 1825,
        }
    }

    /// Per-step volatility of the sample random walk.
    pub const fn sample_volatility(self) -> f64 {
        match self {
            Self::OneDay => 0.005,
            Self::OneWeek => 0.01,
            Self::OneMonth => 0.02,
            Self::ThreeMonths => 0.03,
            Self::OneYear => 0.05,
            Self::FiveYears => 0.07,
        }
    }

    pub const fn is_intraday(self) -> bool {
        matches!(self, Self::OneDay)
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "1D" => Ok(Self::OneDay),
            "1W" => Ok(Self::OneWeek),
            "1M" => Ok(Self::OneMonth),
            "3M" => Ok(Self::ThreeMonths),
            "1Y" => Ok(Self::OneYear),
            "5Y" => Ok(Self::FiveYears),
            _ => Err(ValidationError::InvalidTimeframe {
                value: value.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timeframe_case_insensitively() {
        assert_eq!(Timeframe::from_str("1y").expect("must parse"), Timeframe::OneYear);
        assert_eq!(Timeframe::from_str("5Y").expect("must parse"), Timeframe::FiveYears);
    }

    #[test]
    fn rejects_invalid_timeframe() {
        let err = Timeframe::from_str("2H").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimeframe { .. }));
    }

    #[test]
    fn unknown_or_missing_timeframe_behaves_as_one_month() {
        assert_eq!(Timeframe::parse_or_default(None), Timeframe::OneMonth);
        assert_eq!(Timeframe::parse_or_default(Some("10Y")), Timeframe::OneMonth);
        assert_eq!(Timeframe::parse_or_default(Some("1D")), Timeframe::OneDay);
    }

    #[test]
    fn timeframes_map_to_fixed_series_and_lengths() {
        assert_eq!(Timeframe::OneDay.series(), SeriesKind::Intraday);
        assert_eq!(Timeframe::OneWeek.series(), SeriesKind::DailyCompact);
        assert_eq!(Timeframe::OneYear.series(), SeriesKind::DailyFull);
        assert_eq!(Timeframe::OneDay.daily_points(), None);
        assert_eq!(Timeframe::ThreeMonths.daily_points(), Some(90));
        assert_eq!(Timeframe::FiveYears.daily_points(), Some(1825));
    }
}
