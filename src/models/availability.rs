use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

pub const AVAILABILITY_HORIZON_DAYS: i64 = 365;

/// Bucket of `availability_365`: how many of the next 365 days a listing can be booked.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub enum AvailabilityCategory {
    #[serde(rename = "0-30 Days")]
    UpToMonth,
    #[serde(rename = "31-90 Days")]
    UpToQuarter,
    #[serde(rename = "91-180 Days")]
    UpToHalfYear,
    #[serde(rename = "181-365 Days")]
    UpToYear
}

impl AvailabilityCategory {
    pub const ALL: [AvailabilityCategory; 4] = [
        AvailabilityCategory::UpToMonth,
        AvailabilityCategory::UpToQuarter,
        AvailabilityCategory::UpToHalfYear,
        AvailabilityCategory::UpToYear
    ];

    /// Buckets are right-open except the last, which includes the full horizon.
    /// Values outside `[0, 365]` have no bucket.
    pub fn bucket(days: i64) -> Option<Self> {
        match days {
            0..30 => Some(AvailabilityCategory::UpToMonth),
            30..90 => Some(AvailabilityCategory::UpToQuarter),
            90..180 => Some(AvailabilityCategory::UpToHalfYear),
            180..=AVAILABILITY_HORIZON_DAYS => Some(AvailabilityCategory::UpToYear),
            _ => None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AvailabilityCategory::UpToMonth => "0-30 Days",
            AvailabilityCategory::UpToQuarter => "31-90 Days",
            AvailabilityCategory::UpToHalfYear => "91-180 Days",
            AvailabilityCategory::UpToYear => "181-365 Days"
        }
    }
}

impl Display for AvailabilityCategory {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}
