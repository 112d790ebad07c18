use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Source of the raw market-watch feed body.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

/// Supplies "now" for DTE and snapshot timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock in the market's timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: DateTime<Tz>,
}

impl FixedClock {
    #[must_use]
    pub const fn new(at: DateTime<Tz>) -> Self {
        Self { at }
    }

    /// Midnight of `date` in `tz`, falling back to UTC midnight on a DST gap.
    #[must_use]
    pub fn at_date(date: NaiveDate, tz: Tz) -> Self {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
        let at = tz
            .from_local_datetime(&midnight)
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&midnight));
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.at
    }
}
