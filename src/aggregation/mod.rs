//! Health-record aggregation: raw stored records are classified into typed
//! buckets, reduced into dashboard statistics and windowed into chart series.

pub mod activity;
pub mod classifier;
pub mod metrics;
pub mod series;

use serde::Serialize;

use crate::models::health_record::HealthRecord;
use activity::{recent_activity, RecentActivity};
use classifier::{classify_records, BucketCounts};
use metrics::{latest_vitals_stats, VitalsStats};
use series::{build_vitals_series, ChartPoint, TimeRange};

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub range: TimeRange,
    pub stats: Option<VitalsStats>,
    pub series: Vec<ChartPoint>,
    pub counts: BucketCounts,
    pub recent_activity: Vec<RecentActivity>,
}

/// Run the whole pipeline over a user's records, newest first.
pub fn build_dashboard(records: &[HealthRecord], range: TimeRange) -> Dashboard {
    let classified = classify_records(records);
    Dashboard {
        range,
        stats: latest_vitals_stats(&classified),
        series: build_vitals_series(&classified.vitals, range),
        counts: BucketCounts::from(&classified),
        recent_activity: recent_activity(records),
    }
}
