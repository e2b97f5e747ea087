use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cohort;
mod distribution;
mod filter;
mod heatmap;
mod metrics;
mod models;
mod profile;
mod report;
mod store;
#[cfg(test)]
mod testutil;

use distribution::DistributionField;
use filter::{BuyerFilter, FilterState};

#[derive(Parser)]
#[command(name = "cluster-insights")]
#[command(about = "Cluster analytics over the bike shop customer dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a small realistic sample dataset
    Seed {
        #[arg(long, default_value = "customers.json")]
        out: PathBuf,
    },
    /// Print headline metrics and the per-cluster leaderboard
    Summary {
        #[arg(long, default_value = "customers.json")]
        data: PathBuf,
        /// Cluster labels to keep, comma separated (default: all observed)
        #[arg(long, value_delimiter = ',')]
        clusters: Option<Vec<String>>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long, value_enum, default_value = "all")]
        buyers: BuyerFilter,
    },
    /// Print the per-cluster breakdown of a categorical field
    Distribution {
        #[arg(long, default_value = "customers.json")]
        data: PathBuf,
        /// Field to group by
        #[arg(long, value_enum, default_value = "education")]
        by: DistributionField,
        /// Cluster labels to keep, comma separated (default: all observed)
        #[arg(long, value_delimiter = ',')]
        clusters: Option<Vec<String>>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long, value_enum, default_value = "all")]
        buyers: BuyerFilter,
    },
    /// Generate a markdown report with every chart view
    Report {
        #[arg(long, default_value = "customers.json")]
        data: PathBuf,
        /// Cluster labels to keep, comma separated (default: all observed)
        #[arg(long, value_delimiter = ',')]
        clusters: Option<Vec<String>>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long, value_enum, default_value = "all")]
        buyers: BuyerFilter,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { out } => {
            let written = store::write_seed(&out)?;
            println!("Wrote {written} sample customers to {}.", out.display());
        }
        Commands::Summary {
            data,
            clusters,
            gender,
            country,
            buyers,
        } => {
            let customers = store::load_customers(&data)?;
            let state = build_state(&customers, clusters, gender, country, buyers);
            let filtered = filter::apply(&customers, &state);

            if filtered.is_empty() {
                println!("No customers match the current filters.");
                return Ok(());
            }

            let summary = metrics::compute_metrics(&filtered);
            println!(
                "Customers: {} ({} bike buyers, {:.2}%)",
                summary.total_customers, summary.bike_buyers, summary.conversion_rate_pct
            );
            println!(
                "Top performing cluster: {} ({:.2}% conversion)",
                summary.top_cluster, summary.top_cluster_conversion_pct
            );
            println!();
            println!("Per-cluster breakdown:");
            for stat in metrics::cluster_breakdown(&filtered) {
                println!(
                    "- Cluster {}: {} customers, {} buyers ({:.2}%)",
                    stat.cluster, stat.total, stat.buyers, stat.conversion_pct
                );
            }
        }
        Commands::Distribution {
            data,
            by,
            clusters,
            gender,
            country,
            buyers,
        } => {
            let customers = store::load_customers(&data)?;
            let state = build_state(&customers, clusters, gender, country, buyers);
            let filtered = filter::apply(&customers, &state);
            let rows = distribution::distribution_by(&filtered, by);

            if rows.is_empty() {
                println!("No customers match the current filters.");
                return Ok(());
            }

            let cluster_columns = store::observed_clusters(&filtered);
            println!("Customers by {}:", by.label());
            for row in &rows {
                let counts: Vec<String> = cluster_columns
                    .iter()
                    .map(|cluster| {
                        format!(
                            "cluster {}: {}",
                            cluster,
                            row.counts.get(cluster).copied().unwrap_or(0)
                        )
                    })
                    .collect();
                println!("- {}: {}", row.category, counts.join(", "));
            }
        }
        Commands::Report {
            data,
            clusters,
            gender,
            country,
            buyers,
            out,
        } => {
            let customers = store::load_customers(&data)?;
            let state = build_state(&customers, clusters, gender, country, buyers);
            let filtered = filter::apply(&customers, &state);
            let report = report::build_report(&state, &filtered);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn build_state(
    customers: &[models::Customer],
    clusters: Option<Vec<String>>,
    gender: Option<String>,
    country: Option<String>,
    buyers: BuyerFilter,
) -> FilterState {
    let mut state = FilterState::select_all(customers);
    if let Some(clusters) = clusters {
        state.clusters = clusters;
    }
    state.gender = gender;
    state.country = country;
    state.buyers = buyers;
    state
}
