use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One KPI measurement for one agent on one calendar day. Metric fields are
/// nullable because upstream feeds routinely deliver partial days.
#[derive(Debug, Clone, Deserialize)]
pub struct KpiSample {
    pub agent_id: Uuid,
    pub agent_name: String,
    pub date: NaiveDate,
    pub quality: Option<f64>,
    pub aht: Option<f64>,
    pub srr: Option<f64>,
    pub voc: Option<f64>,
}

/// Composite score derived from an agent's latest sample only.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredAgent {
    pub agent_id: Uuid,
    pub agent_name: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedAgent {
    pub agent_id: Uuid,
    pub agent_name: String,
    pub score: i64,
    pub rank: usize,
    pub rank_suffix: String,
}

/// A labeled numeric interval supplied by the caller. Bands may overlap or
/// leave gaps; the engine does not own or validate the thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionBand {
    pub label: String,
    pub color: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BandCount {
    pub label: String,
    pub color: String,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformerEntry {
    pub agent_name: String,
    pub value: f64,
}

/// An anchor date for before/after comparison, e.g. a completed coaching
/// session. The caller has already filtered to completed sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct InterventionEvent {
    pub agent_id: Uuid,
    pub scheduled_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectivenessResult {
    pub success_rate: f64,
    pub mean_quality_impact: f64,
    pub mean_aht_impact: f64,
    pub total_events: usize,
    pub counted_pairs: usize,
}

/// Per-metric targets used by the risk scorer. These are product settings,
/// not engine constants; the CLI exposes them as flags.
#[derive(Debug, Clone)]
pub struct MetricTargets {
    pub quality: f64,
    pub aht: f64,
    pub srr: f64,
    pub voc: f64,
}
