use crate::metrics::{metric_value, Metric};
use crate::models::{BandCount, DistributionBand, KpiSample, PerformerEntry};

/// Bucket a population into the caller's bands for one metric. Agents with a
/// null value for the metric are excluded from the denominator. Bands are
/// evaluated independently: an agent may land in zero bands or in several,
/// and band coverage is never validated here.
pub fn metric_distribution(
    latest: &[KpiSample],
    metric: Metric,
    bands: &[DistributionBand],
) -> Vec<BandCount> {
    let values: Vec<f64> = latest
        .iter()
        .filter_map(|sample| metric_value(sample, metric))
        .collect();
    let eligible = values.len();

    bands
        .iter()
        .map(|band| {
            let count = values
                .iter()
                .filter(|value| band.min <= **value && **value < band.max)
                .count();
            let percentage = if eligible == 0 {
                0.0
            } else {
                count as f64 / eligible as f64 * 100.0
            };
            BandCount {
                label: band.label.clone(),
                color: band.color.clone(),
                min: band.min,
                max: band.max,
                count,
                percentage,
            }
        })
        .collect()
}

/// Best N agents for a metric, best-first. For handle time pass
/// `lower_is_better = true` so the shortest times surface.
pub fn top_performers(
    latest: &[KpiSample],
    metric: Metric,
    count: usize,
    lower_is_better: bool,
) -> Vec<PerformerEntry> {
    performers(latest, metric, count, lower_is_better)
}

/// Worst N agents for a metric, worst-first.
pub fn bottom_performers(
    latest: &[KpiSample],
    metric: Metric,
    count: usize,
    lower_is_better: bool,
) -> Vec<PerformerEntry> {
    performers(latest, metric, count, !lower_is_better)
}

fn performers(
    latest: &[KpiSample],
    metric: Metric,
    count: usize,
    ascending: bool,
) -> Vec<PerformerEntry> {
    let mut entries: Vec<PerformerEntry> = latest
        .iter()
        .filter_map(|sample| {
            metric_value(sample, metric).map(|value| PerformerEntry {
                agent_name: sample.agent_name.clone(),
                value,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        let ordering = a
            .value
            .partial_cmp(&b.value)
            .unwrap_or(std::cmp::Ordering::Equal);
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });

    entries.truncate(count);
    entries
}
