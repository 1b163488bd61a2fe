use std::fmt::Write;

use uuid::Uuid;

use crate::distribution::{bottom_performers, metric_distribution, top_performers};
use crate::metrics::{self, Metric};
use crate::models::{DistributionBand, InterventionEvent, KpiSample, MetricTargets};
use crate::score::rank_agents;
use crate::trend::{risk_score, velocity, week_over_week};
use crate::window::coaching_effectiveness;

const PERFORMER_COUNT: usize = 5;

/// Build the coaching-prep markdown report: scoreboard, distribution,
/// extremes, per-agent trend and risk lines, and coaching effectiveness.
pub fn build_report(
    samples: &[KpiSample],
    sessions: &[InterventionEvent],
    bands: Option<&[DistributionBand]>,
    targets: &MetricTargets,
) -> String {
    let latest = metrics::latest_per_agent(samples);
    let ranked = rank_agents(&latest);

    let mut output = String::new();

    let _ = writeln!(output, "# Agent Performance Report");
    let _ = writeln!(
        output,
        "Generated from {} samples across {} agents",
        samples.len(),
        latest.len()
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Scoreboard");

    if ranked.is_empty() {
        let _ = writeln!(output, "No agents with samples.");
    } else {
        for agent in &ranked {
            let _ = writeln!(
                output,
                "- {} {} — score {}",
                agent.rank_suffix, agent.agent_name, agent.score
            );
        }
    }

    if let Some(bands) = bands {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Quality Distribution");

        for band in metric_distribution(&latest, Metric::Quality, bands) {
            let _ = writeln!(
                output,
                "- {} ({}-{}): {} agents ({:.1}%)",
                band.label, band.min, band.max, band.count, band.percentage
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Quality Extremes");
    for entry in top_performers(&latest, Metric::Quality, PERFORMER_COUNT, false) {
        let _ = writeln!(output, "- top: {} at {:.1}", entry.agent_name, entry.value);
    }
    for entry in bottom_performers(&latest, Metric::Quality, PERFORMER_COUNT, false) {
        let _ = writeln!(output, "- bottom: {} at {:.1}", entry.agent_name, entry.value);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Handle Time Extremes");
    for entry in top_performers(&latest, Metric::Aht, PERFORMER_COUNT, true) {
        let _ = writeln!(output, "- top: {} at {:.0}s", entry.agent_name, entry.value);
    }
    for entry in bottom_performers(&latest, Metric::Aht, PERFORMER_COUNT, true) {
        let _ = writeln!(output, "- bottom: {} at {:.0}s", entry.agent_name, entry.value);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Trends & Risk");

    for agent in &latest {
        let series = agent_series(samples, agent.agent_id);
        let _ = writeln!(output, "### {}", agent.agent_name);

        for (metric, target) in [
            (Metric::Quality, targets.quality),
            (Metric::Aht, targets.aht),
            (Metric::Srr, targets.srr),
            (Metric::Voc, targets.voc),
        ] {
            let trend = week_over_week(&series, metric);
            if !trend.sufficient_data {
                let _ = writeln!(output, "- {}: insufficient history", metric.label());
                continue;
            }

            let line = match metrics::metric_value(agent, metric) {
                Some(current) => {
                    let risk = risk_score(current, target, trend.percent, metric.lower_is_better());
                    format!(
                        "- {}: {:+.1}% WoW, velocity {}/wk, risk {}",
                        metric.label(),
                        trend.percent,
                        velocity(&series, metric),
                        risk
                    )
                }
                None => format!(
                    "- {}: {:+.1}% WoW, velocity {}/wk, no current reading",
                    metric.label(),
                    trend.percent,
                    velocity(&series, metric)
                ),
            };
            let _ = writeln!(output, "{line}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Coaching Effectiveness");

    let mut any_sessions = false;
    for agent in &latest {
        let events: Vec<InterventionEvent> = sessions
            .iter()
            .filter(|event| event.agent_id == agent.agent_id)
            .cloned()
            .collect();
        if events.is_empty() {
            continue;
        }
        any_sessions = true;

        let series = agent_series(samples, agent.agent_id);
        let result = coaching_effectiveness(&events, &series);
        let _ = writeln!(
            output,
            "- {}: {:.0}% favorable across {} sessions (quality {:+.1}, handle time {:+.1})",
            agent.agent_name,
            result.success_rate,
            result.total_events,
            result.mean_quality_impact,
            result.mean_aht_impact
        );
    }
    if !any_sessions {
        let _ = writeln!(output, "No completed coaching sessions on file.");
    }

    output
}

/// One agent's full history, sorted most-recent-first as the windowed
/// functions require.
pub fn agent_series(samples: &[KpiSample], agent_id: Uuid) -> Vec<KpiSample> {
    let mut series: Vec<KpiSample> = samples
        .iter()
        .filter(|sample| sample.agent_id == agent_id)
        .cloned()
        .collect();
    metrics::sort_latest_first(&mut series);
    series
}
