use std::collections::HashMap;

use clap::ValueEnum;
use uuid::Uuid;

use crate::models::KpiSample;

/// The four tracked KPIs. Handle time is the only one where lower is better;
/// the other three are already 0-100 scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    Quality,
    Aht,
    Srr,
    Voc,
}

impl Metric {
    pub fn lower_is_better(self) -> bool {
        matches!(self, Metric::Aht)
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Quality => "Quality",
            Metric::Aht => "Handle Time",
            Metric::Srr => "SRR",
            Metric::Voc => "VOC",
        }
    }
}

/// Seconds of handle time at or below which the normalized score is 100.
const AHT_BEST_SECONDS: f64 = 300.0;
/// Seconds of handle time at or above which the normalized score is 0.
const AHT_WORST_SECONDS: f64 = 600.0;

/// Score substituted when a metric value is missing. This is a deliberate
/// "assume roughly on-target" product default, not an error state; dashboards
/// depend on missing data not dragging an agent to the bottom of the board.
pub fn missing_metric_fallback() -> f64 {
    75.0
}

/// Normalize a raw metric value to a 0-100 comparable score.
pub fn normalize(metric: Metric, value: Option<f64>) -> f64 {
    let value = match value {
        Some(value) => value,
        None => return missing_metric_fallback(),
    };

    match metric {
        Metric::Aht => normalize_handle_time(value),
        Metric::Quality | Metric::Srr | Metric::Voc => value,
    }
}

/// Linear ramp: 300 seconds or less scores 100, 600 or more scores 0.
fn normalize_handle_time(seconds: f64) -> f64 {
    if seconds <= AHT_BEST_SECONDS {
        return 100.0;
    }
    if seconds >= AHT_WORST_SECONDS {
        return 0.0;
    }
    100.0 - (seconds - AHT_BEST_SECONDS) / (AHT_WORST_SECONDS - AHT_BEST_SECONDS) * 100.0
}

pub fn metric_value(sample: &KpiSample, metric: Metric) -> Option<f64> {
    match metric {
        Metric::Quality => sample.quality,
        Metric::Aht => sample.aht,
        Metric::Srr => sample.srr,
        Metric::Voc => sample.voc,
    }
}

/// Precondition adapter for the windowed functions: they require samples
/// sorted most-recent-first. Every call site routes through this once rather
/// than trusting its own ordering.
pub fn sort_latest_first(samples: &mut [KpiSample]) {
    samples.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Collapse a full sample history to one latest sample per agent, ordered by
/// agent name so downstream stable sorts break ties deterministically.
pub fn latest_per_agent(samples: &[KpiSample]) -> Vec<KpiSample> {
    let mut latest: HashMap<Uuid, KpiSample> = HashMap::new();

    for sample in samples {
        match latest.get(&sample.agent_id) {
            Some(existing) if existing.date >= sample.date => {}
            _ => {
                latest.insert(sample.agent_id, sample.clone());
            }
        }
    }

    let mut view: Vec<KpiSample> = latest.into_values().collect();
    view.sort_by(|a, b| a.agent_name.cmp(&b.agent_name));
    view
}
