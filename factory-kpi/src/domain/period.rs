use std::{fmt, str::FromStr};

use time::{util::days_in_year_month, Date, Duration, Month};

use crate::KpiError;

/// Resampling granularity for summary aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Period {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

/// A calendar-aligned window, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodBucket {
    pub start: Date,
    pub end: Date,
    pub label: String,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Monthly, Period::Quarterly, Period::Yearly];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
            Period::Yearly => "yearly",
        }
    }

    fn months(self) -> u8 {
        match self {
            Period::Monthly => 1,
            Period::Quarterly => 3,
            Period::Yearly => 12,
        }
    }

    fn first_month(self, month: Month) -> Month {
        match self {
            Period::Monthly => month,
            Period::Quarterly => {
                let mut m = month;
                while (m as u8 - 1) % 3 != 0 {
                    m = m.previous();
                }
                m
            }
            Period::Yearly => Month::January,
        }
    }

    /// The bucket containing `date`.
    pub fn bucket(self, date: Date) -> PeriodBucket {
        let year = date.year();
        let first = self.first_month(date.month());

        let mut offset = i64::from(date.day()) - 1;
        let mut m = first;
        while m != date.month() {
            offset += i64::from(days_in_year_month(year, m));
            m = m.next();
        }

        let mut length = 0i64;
        let mut m = first;
        for _ in 0..self.months() {
            length += i64::from(days_in_year_month(year, m));
            m = m.next();
        }

        let start = date - Duration::days(offset);
        let end = start + Duration::days(length - 1);

        let label = match self {
            Period::Monthly => format!("{year}-{:02}", first as u8),
            Period::Quarterly => format!("{year}-Q{}", (first as u8 - 1) / 3 + 1),
            Period::Yearly => format!("{year}"),
        };

        PeriodBucket { start, end, label }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = KpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(Period::Monthly),
            "quarterly" | "quarter" | "q" => Ok(Period::Quarterly),
            "yearly" | "year" | "annual" | "y" => Ok(Period::Yearly),
            _ => Err(KpiError::UnknownPeriod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn monthly_bucket_covers_leap_february() {
        let b = Period::Monthly.bucket(date!(2024 - 02 - 17));
        assert_eq!(b.start, date!(2024 - 02 - 01));
        assert_eq!(b.end, date!(2024 - 02 - 29));
        assert_eq!(b.label, "2024-02");
    }

    #[test]
    fn quarterly_bucket_is_calendar_aligned() {
        let b = Period::Quarterly.bucket(date!(2024 - 08 - 27));
        assert_eq!(b.start, date!(2024 - 07 - 01));
        assert_eq!(b.end, date!(2024 - 09 - 30));
        assert_eq!(b.label, "2024-Q3");

        let first_day = Period::Quarterly.bucket(date!(2023 - 10 - 01));
        assert_eq!(first_day.start, date!(2023 - 10 - 01));
        assert_eq!(first_day.end, date!(2023 - 12 - 31));
        assert_eq!(first_day.label, "2023-Q4");
    }

    #[test]
    fn yearly_bucket_spans_calendar_year() {
        let b = Period::Yearly.bucket(date!(2024 - 12 - 31));
        assert_eq!(b.start, date!(2024 - 01 - 01));
        assert_eq!(b.end, date!(2024 - 12 - 31));
        assert_eq!(b.label, "2024");
    }

    #[test]
    fn parses_selector_aliases() {
        assert_eq!("Monthly".parse::<Period>().unwrap(), Period::Monthly);
        assert_eq!(" q ".parse::<Period>().unwrap(), Period::Quarterly);
        assert_eq!("annual".parse::<Period>().unwrap(), Period::Yearly);
        assert!(matches!(
            "weekly".parse::<Period>(),
            Err(KpiError::UnknownPeriod(p)) if p == "weekly"
        ));
    }
}
