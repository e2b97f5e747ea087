use std::fmt::Write;

use chrono::Utc;

use crate::cohort;
use crate::distribution::{self, DistributionField};
use crate::filter::{BuyerFilter, FilterState};
use crate::heatmap;
use crate::metrics;
use crate::models::{Customer, HeatmapCell, HouseholdGroup};
use crate::profile;
use crate::store;

const NO_MATCH: &str = "No customers match the current filters.";

pub fn build_report(state: &FilterState, filtered: &[Customer]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Customer Cluster Insights");
    let _ = writeln!(
        output,
        "Generated {} for {}",
        Utc::now().date_naive(),
        describe_scope(state)
    );

    let summary = metrics::compute_metrics(filtered);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Headline Metrics");
    if filtered.is_empty() {
        let _ = writeln!(output, "{NO_MATCH}");
    } else {
        let _ = writeln!(output, "- Total customers: {}", summary.total_customers);
        let _ = writeln!(
            output,
            "- Bike buyers: {} ({:.2}%)",
            summary.bike_buyers, summary.conversion_rate_pct
        );
        let _ = writeln!(
            output,
            "- Top performing cluster: {} ({:.2}% conversion)",
            summary.top_cluster, summary.top_cluster_conversion_pct
        );
    }

    let breakdown = metrics::cluster_breakdown(filtered);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Cluster Breakdown");
    if breakdown.is_empty() {
        let _ = writeln!(output, "{NO_MATCH}");
    } else {
        for stat in &breakdown {
            let _ = writeln!(
                output,
                "- Cluster {}: {} customers, {} buyers, {} non-buyers ({:.2}% conversion)",
                stat.cluster, stat.total, stat.buyers, stat.non_buyers, stat.conversion_pct
            );
        }
    }

    let cluster_columns = store::observed_clusters(filtered);
    for field in [DistributionField::Education, DistributionField::Occupation] {
        let rows = distribution::distribution_by(filtered, field);
        let _ = writeln!(output);
        let _ = writeln!(output, "## Customers by {}", field.label());
        if rows.is_empty() {
            let _ = writeln!(output, "{NO_MATCH}");
            continue;
        }
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
            let _ = writeln!(output, "- {}: {}", row.category, counts.join(", "));
        }
    }

    let cells = heatmap::household_heatmap(filtered);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Bike Buyers by Household");
    if cells.is_empty() {
        let _ = writeln!(output, "{NO_MATCH}");
    } else {
        let _ = writeln!(
            output,
            "| Children at home | Non-owner | Owner | Single | Married |"
        );
        let _ = writeln!(output, "|---|---|---|---|---|");
        for children in children_rows(&cells) {
            let columns = [
                HouseholdGroup::Ownership { home_owner: false },
                HouseholdGroup::Ownership { home_owner: true },
                HouseholdGroup::Marital {
                    status: "S".to_string(),
                },
                HouseholdGroup::Marital {
                    status: "M".to_string(),
                },
            ]
            .map(|group| cell_text(&cells, &group, children));
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                children, columns[0], columns[1], columns[2], columns[3]
            );
        }
    }

    let points = profile::cluster_profile(filtered, &state.clusters);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Cluster Profile");
    if points.is_empty() || filtered.is_empty() {
        let _ = writeln!(output, "{NO_MATCH}");
    } else {
        let header: Vec<String> = state
            .clusters
            .iter()
            .map(|c| format!("Cluster {c}"))
            .collect();
        let _ = writeln!(output, "| Metric | {} |", header.join(" | "));
        let _ = writeln!(output, "|---{}|", "|---".repeat(state.clusters.len()));
        for point in &points {
            let values: Vec<String> = state
                .clusters
                .iter()
                .map(|cluster| match point.per_cluster.get(cluster) {
                    Some(value) => format!("{:.2} ({:.2})", value.raw, value.normalized),
                    None => "-".to_string(),
                })
                .collect();
            let _ = writeln!(output, "| {} | {} |", point.metric, values.join(" | "));
        }
    }

    let bands = cohort::income_by_age(filtered);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Average Yearly Income by Age");
    if bands.is_empty() {
        let _ = writeln!(output, "{NO_MATCH}");
    } else {
        let header: Vec<String> = cluster_columns
            .iter()
            .map(|c| format!("Cluster {c}"))
            .collect();
        let _ = writeln!(output, "| Age | {} |", header.join(" | "));
        let _ = writeln!(output, "|---{}|", "|---".repeat(cluster_columns.len()));
        for band in &bands {
            let values: Vec<String> = cluster_columns
                .iter()
                .map(|cluster| match band.per_cluster.get(cluster) {
                    Some(income) => income.to_string(),
                    None => "-".to_string(),
                })
                .collect();
            let _ = writeln!(output, "| {} | {} |", band.age_label, values.join(" | "));
        }
    }

    output
}

fn describe_scope(state: &FilterState) -> String {
    let clusters = if state.clusters.is_empty() {
        "no clusters".to_string()
    } else {
        format!("clusters {}", state.clusters.join(", "))
    };
    let gender = state
        .gender
        .as_deref()
        .map(|g| format!("gender {g}"))
        .unwrap_or_else(|| "all genders".to_string());
    let country = state
        .country
        .clone()
        .unwrap_or_else(|| "all countries".to_string());
    let buyers = match state.buyers {
        BuyerFilter::All => "all customers",
        BuyerFilter::Buyers => "bike buyers only",
        BuyerFilter::NonBuyers => "non-buyers only",
    };
    format!("{clusters}; {gender}; {country}; {buyers}")
}

// The grid always shows the 0-2 children rows even when no customer has
// them, like the dashboard this report replaces.
fn children_rows(cells: &[HeatmapCell]) -> Vec<u32> {
    let mut rows: Vec<u32> = vec![0, 1, 2];
    for cell in cells {
        if !rows.contains(&cell.children_at_home) {
            rows.push(cell.children_at_home);
        }
    }
    rows.sort_unstable();
    rows
}

fn cell_text(cells: &[HeatmapCell], group: &HouseholdGroup, children: u32) -> String {
    cells
        .iter()
        .find(|cell| &cell.group == group && cell.children_at_home == children)
        .map(|cell| format!("{:.0}% of {}", cell.buyer_rate_pct, cell.total))
        .unwrap_or_else(|| "-".to_string())
}
