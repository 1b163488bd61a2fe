use crate::metrics::{metric_value, Metric};
use crate::models::KpiSample;

/// A windowed percent-change signal. `percent` is 0 both when the series is
/// truly flat and when there is not enough history; `sufficient_data` is the
/// only way to tell those apart, so consumers must check it before treating
/// 0 as a real reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub percent: f64,
    pub sufficient_data: bool,
}

impl Trend {
    fn insufficient() -> Self {
        Trend {
            percent: 0.0,
            sufficient_data: false,
        }
    }
}

/// Percent change of the last 7 samples against the 7 before them.
/// Precondition: `samples` sorted most-recent-first (see
/// `metrics::sort_latest_first`). Needs at least 14 samples.
pub fn week_over_week(samples: &[KpiSample], metric: Metric) -> Trend {
    if samples.len() < 14 {
        return Trend::insufficient();
    }

    let recent = window_mean(&samples[0..7], metric);
    let older = window_mean(&samples[7..14], metric);
    Trend {
        percent: percent_change(recent, older),
        sufficient_data: true,
    }
}

/// Percent change of the last 30 samples against samples 30-90. The older
/// slice is capped at whatever history exists. Precondition: sorted
/// most-recent-first. Needs at least 30 samples plus a non-empty older slice.
pub fn ninety_day(samples: &[KpiSample], metric: Metric) -> Trend {
    if samples.len() < 30 {
        return Trend::insufficient();
    }

    let older_end = samples.len().min(90);
    let older_slice = &samples[30..older_end];
    if older_slice.is_empty() {
        return Trend::insufficient();
    }

    let recent = window_mean(&samples[0..30], metric);
    let older = window_mean(older_slice, metric);
    Trend {
        percent: percent_change(recent, older),
        sufficient_data: true,
    }
}

/// Week-over-week change expressed as percent per week; the 14-day window
/// spans two weeks, hence the halving. Returned as a display string with one
/// decimal because it feeds a badge, not further arithmetic.
pub fn velocity(samples: &[KpiSample], metric: Metric) -> String {
    let trend = week_over_week(samples, metric);
    format!("{:.1}", trend.percent / 2.0)
}

/// Heuristic 0-100 risk figure from the gap to target plus a flat penalty
/// for a worsening trend. Not a statistical model; it drives dashboard
/// badge colors only. `inverse` flags lower-is-better metrics like handle
/// time, where being above target is the problem.
pub fn risk_score(current: f64, target: f64, trend: f64, inverse: bool) -> i64 {
    let gap = if inverse {
        (current - target).max(0.0)
    } else {
        (target - current).max(0.0)
    };

    let gap_component = if target == 0.0 {
        0.0
    } else {
        (gap / target * 100.0).round()
    };

    let trend_penalty = if trend < 0.0 { 20.0 } else { 0.0 };

    (gap_component + trend_penalty).min(100.0) as i64
}

/// Mean of one metric over a window; a missing value contributes 0 but the
/// sample stays in the denominator, matching how the dashboard has always
/// averaged partial days.
fn window_mean(samples: &[KpiSample], metric: Metric) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let total: f64 = samples
        .iter()
        .map(|sample| metric_value(sample, metric).unwrap_or(0.0))
        .sum();
    total / samples.len() as f64
}

fn percent_change(recent: f64, older: f64) -> f64 {
    if older == 0.0 {
        return 0.0;
    }
    (recent - older) / older * 100.0
}
