use chrono::{DateTime, FixedOffset};

schema! {
    /// Aggregated usage for one day.
    pub struct Statistics {
        /// Day the report covers.
        pub date: Option<DateTime<FixedOffset>>,
        pub services: StatisticServices,
    }
}

/// Per-service request counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticServices {
    /// Duplicate search.
    pub merging: i64,
    /// Suggestions.
    pub suggestions: i64,
    /// Standardization.
    pub clean: i64,
}
