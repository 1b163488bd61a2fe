use crate::metrics::{normalize, Metric};
use crate::models::{KpiSample, RankedAgent, ScoredAgent};

/// Each KPI contributes a quarter of the composite score.
const METRIC_WEIGHT: f64 = 0.25;

/// Combine the four latest metric values into one 0-100 integer score.
/// Missing values take the normalizer's on-target fallback; no clamp is
/// needed because every normalized input is already bounded to [0, 100].
pub fn composite_score(
    quality: Option<f64>,
    aht: Option<f64>,
    srr: Option<f64>,
    voc: Option<f64>,
) -> i64 {
    let total = normalize(Metric::Quality, quality) * METRIC_WEIGHT
        + normalize(Metric::Aht, aht) * METRIC_WEIGHT
        + normalize(Metric::Srr, srr) * METRIC_WEIGHT
        + normalize(Metric::Voc, voc) * METRIC_WEIGHT;
    total.round() as i64
}

/// Score one agent from their latest sample. This is a snapshot scorer; it
/// never looks at history.
pub fn score_agent(latest: &KpiSample) -> ScoredAgent {
    ScoredAgent {
        agent_id: latest.agent_id,
        agent_name: latest.agent_name.clone(),
        score: composite_score(latest.quality, latest.aht, latest.srr, latest.voc),
    }
}

/// Rank agents by composite score, highest first. The sort is stable, so
/// agents with equal scores keep their relative input order.
pub fn rank_agents(latest: &[KpiSample]) -> Vec<RankedAgent> {
    let mut scored: Vec<ScoredAgent> = latest.iter().map(score_agent).collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    scored
        .into_iter()
        .enumerate()
        .map(|(index, agent)| {
            let rank = index + 1;
            RankedAgent {
                agent_id: agent.agent_id,
                agent_name: agent.agent_name,
                score: agent.score,
                rank,
                rank_suffix: ordinal_suffix(rank),
            }
        })
        .collect()
}

/// Display suffix for a rank. Only 1, 2 and 3 get the irregular forms; every
/// other rank gets "th", so 21 renders as "21th". Not true English ordinals,
/// but the dashboard has always displayed it this way and downstream snapshot
/// tests depend on it.
pub fn ordinal_suffix(rank: usize) -> String {
    match rank {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{n}th"),
    }
}
