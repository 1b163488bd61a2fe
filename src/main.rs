use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

mod distribution;
mod input;
mod metrics;
mod models;
mod report;
mod score;
mod sparkline;
mod trend;
mod window;

use metrics::Metric;
use models::{KpiSample, MetricTargets};

#[derive(Parser)]
#[command(name = "performance-analytics")]
#[command(about = "Call center agent performance analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TargetArgs {
    #[arg(long, default_value_t = 90.0)]
    quality_target: f64,
    #[arg(long, default_value_t = 360.0)]
    aht_target: f64,
    #[arg(long, default_value_t = 85.0)]
    srr_target: f64,
    #[arg(long, default_value_t = 90.0)]
    voc_target: f64,
}

impl TargetArgs {
    fn into_targets(self) -> MetricTargets {
        MetricTargets {
            quality: self.quality_target,
            aht: self.aht_target,
            srr: self.srr_target,
            voc: self.voc_target,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank all agents by composite score from their latest samples
    Scoreboard {
        #[arg(long)]
        samples: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Bucket agents into caller-supplied bands for one metric
    Distribution {
        #[arg(long)]
        samples: PathBuf,
        #[arg(long, value_enum)]
        metric: Metric,
        #[arg(long)]
        bands: PathBuf,
    },
    /// Show top and bottom performers for one metric
    Performers {
        #[arg(long)]
        samples: PathBuf,
        #[arg(long, value_enum)]
        metric: Metric,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Trend, velocity and risk breakdown for one agent
    Trends {
        #[arg(long)]
        samples: PathBuf,
        #[arg(long)]
        name: String,
        #[command(flatten)]
        targets: TargetArgs,
    },
    /// Before/after coaching impact for one agent
    Effectiveness {
        #[arg(long)]
        samples: PathBuf,
        #[arg(long)]
        sessions: PathBuf,
        #[arg(long)]
        name: String,
    },
    /// Write the full markdown report
    Report {
        #[arg(long)]
        samples: PathBuf,
        #[arg(long)]
        sessions: PathBuf,
        #[arg(long)]
        bands: Option<PathBuf>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[command(flatten)]
        targets: TargetArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scoreboard { samples, json } => {
            let samples = input::read_samples(&samples)?;
            let latest = metrics::latest_per_agent(&samples);
            let ranked = score::rank_agents(&latest);

            if json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
                return Ok(());
            }

            if ranked.is_empty() {
                println!("No agents with samples.");
                return Ok(());
            }
            for agent in ranked {
                println!("{} {} — score {}", agent.rank_suffix, agent.agent_name, agent.score);
            }
        }
        Commands::Distribution {
            samples,
            metric,
            bands,
        } => {
            let samples = input::read_samples(&samples)?;
            let bands = input::read_bands(&bands)?;
            let latest = metrics::latest_per_agent(&samples);

            for band in distribution::metric_distribution(&latest, metric, &bands) {
                println!(
                    "{} [{}] ({}-{}): {} agents ({:.1}%)",
                    band.label, band.color, band.min, band.max, band.count, band.percentage
                );
            }
        }
        Commands::Performers {
            samples,
            metric,
            count,
        } => {
            let samples = input::read_samples(&samples)?;
            let latest = metrics::latest_per_agent(&samples);
            let lower_is_better = metric.lower_is_better();

            println!("Top {} by {}:", count, metric.label());
            for entry in distribution::top_performers(&latest, metric, count, lower_is_better) {
                println!("- {} at {:.1}", entry.agent_name, entry.value);
            }
            println!("Bottom {} by {}:", count, metric.label());
            for entry in distribution::bottom_performers(&latest, metric, count, lower_is_better) {
                println!("- {} at {:.1}", entry.agent_name, entry.value);
            }
        }
        Commands::Trends {
            samples,
            name,
            targets,
        } => {
            let samples = input::read_samples(&samples)?;
            let latest = find_agent(&samples, &name)?;
            let series = report::agent_series(&samples, latest.agent_id);
            let targets = targets.into_targets();

            println!("Trends for {}:", latest.agent_name);
            for (metric, target) in [
                (Metric::Quality, targets.quality),
                (Metric::Aht, targets.aht),
                (Metric::Srr, targets.srr),
                (Metric::Voc, targets.voc),
            ] {
                let weekly = trend::week_over_week(&series, metric);
                let quarterly = trend::ninety_day(&series, metric);

                if !weekly.sufficient_data {
                    println!("- {}: insufficient history", metric.label());
                    continue;
                }

                print!(
                    "- {}: {:+.1}% WoW, velocity {}/wk",
                    metric.label(),
                    weekly.percent,
                    trend::velocity(&series, metric)
                );
                if quarterly.sufficient_data {
                    print!(", {:+.1}% over 90d", quarterly.percent);
                }
                match metrics::metric_value(&latest, metric) {
                    Some(current) => {
                        let risk = trend::risk_score(
                            current,
                            target,
                            weekly.percent,
                            metric.lower_is_better(),
                        );
                        println!(", risk {risk}");
                    }
                    None => println!(", no current reading"),
                }
            }

            // Illustrative only: jittered points between the oldest known
            // quality reading and the current one.
            if let (Some(oldest), Some(current)) = (
                series.last().and_then(|s| s.quality),
                series.first().and_then(|s| s.quality),
            ) {
                let points =
                    sparkline::sparkline_points(&mut rand::rng(), oldest, current, 8, 2.0);
                let rendered: Vec<String> =
                    points.iter().map(|p| format!("{p:.1}")).collect();
                println!("quality sparkline: {}", rendered.join(", "));
            }
        }
        Commands::Effectiveness {
            samples,
            sessions,
            name,
        } => {
            let samples = input::read_samples(&samples)?;
            let sessions = input::read_sessions(&sessions)?;
            let latest = find_agent(&samples, &name)?;

            let events: Vec<models::InterventionEvent> = sessions
                .into_iter()
                .filter(|event| event.agent_id == latest.agent_id)
                .collect();
            let series = report::agent_series(&samples, latest.agent_id);
            let result = window::coaching_effectiveness(&events, &series);

            println!("Coaching effectiveness for {}:", latest.agent_name);
            println!(
                "- {:.0}% favorable across {} sessions ({} countable metric pairs)",
                result.success_rate, result.total_events, result.counted_pairs
            );
            println!(
                "- mean impact: quality {:+.1}, handle time {:+.1}",
                result.mean_quality_impact, result.mean_aht_impact
            );
        }
        Commands::Report {
            samples,
            sessions,
            bands,
            out,
            targets,
        } => {
            let samples = input::read_samples(&samples)?;
            let sessions = input::read_sessions(&sessions)?;
            let bands = match bands {
                Some(path) => Some(input::read_bands(&path)?),
                None => None,
            };

            let report = report::build_report(
                &samples,
                &sessions,
                bands.as_deref(),
                &targets.into_targets(),
            );
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn find_agent(samples: &[KpiSample], name: &str) -> anyhow::Result<KpiSample> {
    metrics::latest_per_agent(samples)
        .into_iter()
        .find(|sample| sample.agent_name == name)
        .with_context(|| format!("no samples found for agent {name}"))
}
