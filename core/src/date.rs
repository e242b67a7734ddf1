//! Calendar dates as Tempo expects them on the wire.
//!
//! `ApiDate` accepts a `NaiveDate`, a timestamp (naive or zoned, the time of
//! day is dropped) or `YYYY-MM-DD` text, and always renders as `YYYY-MM-DD`.
//! Text is parsed strictly; anything else fails with `ApiError::InvalidDate`
//! at the point of parsing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ApiError;

const FORMAT: &str = "%Y-%m-%d";

/// A date filter or field value, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiDate(NaiveDate);

impl ApiDate {
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        NaiveDate::parse_from_str(text.trim(), FORMAT)
            .map(Self)
            .map_err(|e| ApiError::InvalidDate(format!("{text:?}: {e}")))
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ApiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for ApiDate {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ApiDate {
    type Error = ApiError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for ApiDate {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NaiveDate> for ApiDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl From<NaiveDateTime> for ApiDate {
    fn from(value: NaiveDateTime) -> Self {
        Self(value.date())
    }
}

/// Uses the calendar date in the timestamp's own zone.
impl<Tz: TimeZone> From<DateTime<Tz>> for ApiDate {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.date_naive())
    }
}

impl Serialize for ApiDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use rstest::rstest;

    #[test]
    fn date_timestamp_and_text_agree() {
        let date = NaiveDate::from_ymd_opt(2020, 9, 1).unwrap();
        let naive = date.and_hms_opt(17, 45, 3).unwrap();
        let zoned = Utc.from_utc_datetime(&naive);

        assert_eq!(ApiDate::from(date).to_string(), "2020-09-01");
        assert_eq!(ApiDate::from(naive).to_string(), "2020-09-01");
        assert_eq!(ApiDate::from(zoned).to_string(), "2020-09-01");
        assert_eq!(ApiDate::parse("2020-09-01").unwrap().to_string(), "2020-09-01");
    }

    #[test]
    fn zoned_timestamp_keeps_its_local_date() {
        let tz = FixedOffset::east_opt(10 * 3600).unwrap();
        let ts = tz.with_ymd_and_hms(2020, 9, 1, 6, 0, 0).unwrap();
        // 2020-08-31T20:00Z in UTC, but the local calendar day is what we send.
        assert_eq!(ApiDate::from(ts).to_string(), "2020-09-01");
    }

    #[rstest]
    #[case("01/09/2020")]
    #[case("2020-02-30")]
    #[case("")]
    #[case("yesterday")]
    fn rejects_malformed_text(#[case] input: &str) {
        let err = ApiDate::parse(input).unwrap_err();
        assert!(matches!(err, ApiError::InvalidDate(_)), "{input}: {err}");
    }

    #[test]
    fn serializes_as_plain_string() {
        let date: ApiDate = "2021-12-31".parse().unwrap();
        assert_eq!(serde_json::to_value(date).unwrap(), "2021-12-31");
        let back: ApiDate = serde_json::from_value(serde_json::json!("2021-12-31")).unwrap();
        assert_eq!(back, date);
    }
}
