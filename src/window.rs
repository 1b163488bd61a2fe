use chrono::NaiveDate;

use crate::models::{EffectivenessResult, InterventionEvent, KpiSample};

pub const DEFAULT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDirection {
    Before,
    After,
}

/// Per-metric integer averages over a window next to an anchor date. When no
/// samples fall in the window every metric reads 0 and `has_data` is false;
/// the zeros alone cannot distinguish "no data" from a true zero average, so
/// aggregation code must check the flag (or, as the effectiveness evaluator
/// does, treat zero as uncountable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAverages {
    pub quality: i64,
    pub aht: i64,
    pub srr: i64,
    pub voc: i64,
    pub has_data: bool,
}

impl WindowAverages {
    fn empty() -> Self {
        WindowAverages {
            quality: 0,
            aht: 0,
            srr: 0,
            voc: 0,
            has_data: false,
        }
    }
}

/// Average the samples falling strictly before or strictly after an anchor
/// date, within `window_days` of it. The anchor day itself is excluded in
/// both directions. Each metric rounds to the nearest integer independently;
/// a missing value contributes 0 with the sample still in the denominator.
pub fn window_averages(
    samples: &[KpiSample],
    anchor: NaiveDate,
    window_days: i64,
    direction: WindowDirection,
) -> WindowAverages {
    let matched: Vec<&KpiSample> = samples
        .iter()
        .filter(|sample| {
            let diff = match direction {
                WindowDirection::Before => (anchor - sample.date).num_days(),
                WindowDirection::After => (sample.date - anchor).num_days(),
            };
            diff > 0 && diff <= window_days
        })
        .collect();

    if matched.is_empty() {
        return WindowAverages::empty();
    }

    let count = matched.len() as f64;
    let mean = |pick: fn(&KpiSample) -> Option<f64>| -> i64 {
        let total: f64 = matched.iter().map(|s| pick(s).unwrap_or(0.0)).sum();
        (total / count).round() as i64
    };

    WindowAverages {
        quality: mean(|s| s.quality),
        aht: mean(|s| s.aht),
        srr: mean(|s| s.srr),
        voc: mean(|s| s.voc),
        has_data: true,
    }
}

/// Aggregate before/after impact across an agent's coaching sessions.
///
/// A metric pair only counts when both window averages are non-zero, which
/// keeps the no-data sentinel out of the aggregate at the cost of also
/// dropping genuine zero readings. Quality improves upward, handle time
/// improves downward. Mean impact divides by the total event count, not the
/// counted-pair count: sessions with no usable data deliberately dilute the
/// average toward zero.
pub fn coaching_effectiveness(
    events: &[InterventionEvent],
    samples: &[KpiSample],
) -> EffectivenessResult {
    let mut favorable = 0usize;
    let mut counted = 0usize;
    let mut quality_impact = 0.0;
    let mut aht_impact = 0.0;

    for event in events {
        let before = window_averages(
            samples,
            event.scheduled_date,
            DEFAULT_WINDOW_DAYS,
            WindowDirection::Before,
        );
        let after = window_averages(
            samples,
            event.scheduled_date,
            DEFAULT_WINDOW_DAYS,
            WindowDirection::After,
        );

        if before.quality != 0 && after.quality != 0 {
            counted += 1;
            if after.quality > before.quality {
                favorable += 1;
            }
            quality_impact += (after.quality - before.quality) as f64;
        }

        if before.aht != 0 && after.aht != 0 {
            counted += 1;
            if before.aht > after.aht {
                favorable += 1;
            }
            aht_impact += (after.aht - before.aht) as f64;
        }
    }

    let success_rate = if counted == 0 {
        0.0
    } else {
        favorable as f64 / counted as f64 * 100.0
    };

    let total_events = events.len();
    let mean = |impact: f64| -> f64 {
        if total_events == 0 {
            0.0
        } else {
            impact / total_events as f64
        }
    };

    EffectivenessResult {
        success_rate,
        mean_quality_impact: mean(quality_impact),
        mean_aht_impact: mean(aht_impact),
        total_events,
        counted_pairs: counted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn sample(date: NaiveDate, quality: f64, aht: f64) -> KpiSample {
        KpiSample {
            agent_id: Uuid::new_v4(),
            agent_name: "Avery Lee".to_string(),
            date,
            quality: Some(quality),
            aht: Some(aht),
            srr: Some(80.0),
            voc: Some(80.0),
        }
    }

    fn event(date: NaiveDate) -> InterventionEvent {
        InterventionEvent {
            agent_id: Uuid::new_v4(),
            scheduled_date: date,
        }
    }

    #[test]
    fn anchor_day_is_excluded_from_both_directions() {
        let anchor = day(15);
        let samples = vec![sample(anchor, 99.0, 99.0)];

        let before = window_averages(&samples, anchor, 7, WindowDirection::Before);
        let after = window_averages(&samples, anchor, 7, WindowDirection::After);
        assert!(!before.has_data);
        assert!(!after.has_data);
    }

    #[test]
    fn window_boundary_is_inclusive_at_the_far_edge() {
        let anchor = day(15);
        let samples = vec![
            sample(anchor - Duration::days(7), 90.0, 400.0),
            sample(anchor - Duration::days(8), 10.0, 100.0),
        ];

        let before = window_averages(&samples, anchor, 7, WindowDirection::Before);
        assert!(before.has_data);
        assert_eq!(before.quality, 90);
    }

    #[test]
    fn before_and_after_pick_their_own_sides() {
        let anchor = day(15);
        let samples = vec![
            sample(anchor - Duration::days(2), 60.0, 500.0),
            sample(anchor - Duration::days(4), 70.0, 480.0),
            sample(anchor + Duration::days(3), 90.0, 380.0),
        ];

        let before = window_averages(&samples, anchor, 7, WindowDirection::Before);
        let after = window_averages(&samples, anchor, 7, WindowDirection::After);
        assert_eq!(before.quality, 65);
        assert_eq!(before.aht, 490);
        assert_eq!(after.quality, 90);
        assert_eq!(after.aht, 380);
    }

    #[test]
    fn empty_window_reads_all_zeros() {
        let anchor = day(15);
        let averages = window_averages(&[], anchor, 7, WindowDirection::Before);
        assert_eq!(averages.quality, 0);
        assert_eq!(averages.aht, 0);
        assert_eq!(averages.srr, 0);
        assert_eq!(averages.voc, 0);
        assert!(!averages.has_data);
    }

    #[test]
    fn each_metric_rounds_independently() {
        let anchor = day(15);
        let samples = vec![
            sample(anchor - Duration::days(1), 80.0, 401.0),
            sample(anchor - Duration::days(2), 81.0, 402.0),
        ];

        let before = window_averages(&samples, anchor, 7, WindowDirection::Before);
        // 80.5 rounds up, 401.5 rounds up.
        assert_eq!(before.quality, 81);
        assert_eq!(before.aht, 402);
    }

    #[test]
    fn improved_quality_and_reduced_aht_both_count_as_favorable() {
        let anchor = day(15);
        let samples = vec![
            sample(anchor - Duration::days(3), 70.0, 500.0),
            sample(anchor + Duration::days(3), 85.0, 420.0),
        ];

        let result = coaching_effectiveness(&[event(anchor)], &samples);
        assert_eq!(result.counted_pairs, 2);
        assert_eq!(result.success_rate, 100.0);
        assert_eq!(result.mean_quality_impact, 15.0);
        assert_eq!(result.mean_aht_impact, -80.0);
    }

    #[test]
    fn no_data_events_do_not_enter_the_success_denominator() {
        let anchor = day(15);
        let with_data = day(25);
        let samples = vec![
            sample(with_data - Duration::days(2), 70.0, 500.0),
            sample(with_data + Duration::days(2), 80.0, 450.0),
        ];

        let events = vec![event(anchor), event(with_data)];
        let result = coaching_effectiveness(&events, &samples);
        assert_eq!(result.counted_pairs, 2);
        assert_eq!(result.success_rate, 100.0);
        assert_eq!(result.total_events, 2);
    }

    #[test]
    fn mean_impact_divides_by_total_events_not_counted_pairs() {
        let anchor = day(15);
        let dataless = day(2);
        let samples = vec![
            sample(anchor - Duration::days(3), 70.0, 500.0),
            sample(anchor + Duration::days(3), 80.0, 440.0),
        ];

        let events = vec![event(dataless), event(anchor)];
        let result = coaching_effectiveness(&events, &samples);
        // Quality moved +10 on one event, diluted across two events.
        assert_eq!(result.mean_quality_impact, 5.0);
        assert_eq!(result.mean_aht_impact, -30.0);
    }

    #[test]
    fn no_events_yield_a_zeroed_result() {
        let result = coaching_effectiveness(&[], &[]);
        assert_eq!(result.success_rate, 0.0);
        assert_eq!(result.mean_quality_impact, 0.0);
        assert_eq!(result.mean_aht_impact, 0.0);
        assert_eq!(result.total_events, 0);
    }

    #[test]
    fn worsening_metrics_lower_the_success_rate() {
        let anchor = day(15);
        let samples = vec![
            sample(anchor - Duration::days(3), 85.0, 420.0),
            sample(anchor + Duration::days(3), 70.0, 500.0),
        ];

        let result = coaching_effectiveness(&[event(anchor)], &samples);
        assert_eq!(result.counted_pairs, 2);
        assert_eq!(result.success_rate, 0.0);
    }
}
