use std::path::Path;

use anyhow::Context;

use crate::models::{DistributionBand, InterventionEvent, KpiSample};

/// Read a KPI sample feed. Expected header:
/// `agent_id,agent_name,date,quality,aht,srr,voc` with empty cells for
/// metrics that were not measured that day.
pub fn read_samples(path: &Path) -> anyhow::Result<Vec<KpiSample>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open sample file {}", path.display()))?;

    let mut samples = Vec::new();
    for result in reader.deserialize::<KpiSample>() {
        samples.push(result.context("malformed sample row")?);
    }
    Ok(samples)
}

/// Read completed coaching sessions. Expected header:
/// `agent_id,scheduled_date`. The caller is responsible for exporting only
/// sessions with completed status; no filtering happens here.
pub fn read_sessions(path: &Path) -> anyhow::Result<Vec<InterventionEvent>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open session file {}", path.display()))?;

    let mut events = Vec::new();
    for result in reader.deserialize::<InterventionEvent>() {
        events.push(result.context("malformed session row")?);
    }
    Ok(events)
}

/// Read a band configuration file: a JSON array of
/// `{"label", "color", "min", "max"}` objects. Band thresholds belong to the
/// caller; they are passed through to the bucketizer untouched.
pub fn read_bands(path: &Path) -> anyhow::Result<Vec<DistributionBand>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to open band file {}", path.display()))?;
    let bands: Vec<DistributionBand> =
        serde_json::from_str(&raw).context("malformed band configuration")?;
    Ok(bands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn sample_rows_parse_with_missing_metrics() {
        let data = "\
agent_id,agent_name,date,quality,aht,srr,voc
3d7f5d6f-24f7-4e8e-8b4b-3e7e44b4a7b2,Avery Lee,2026-03-10,95,420,,92
";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let samples: Vec<KpiSample> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("valid csv");

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].agent_name, "Avery Lee");
        assert_eq!(samples[0].date, NaiveDate::from_ymd_opt(2026, 3, 10).unwrap());
        assert_eq!(samples[0].quality, Some(95.0));
        assert_eq!(samples[0].srr, None);
        assert_eq!(samples[0].voc, Some(92.0));
    }

    #[test]
    fn band_configuration_parses_from_json() {
        let raw = r##"[
            {"label": "Strong", "color": "#2e7d32", "min": 85.0, "max": 101.0},
            {"label": "Developing", "color": "#f9a825", "min": 60.0, "max": 85.0}
        ]"##;
        let bands: Vec<DistributionBand> = serde_json::from_str(raw).expect("valid json");
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].label, "Strong");
        assert_eq!(bands[1].min, 60.0);
    }
}
