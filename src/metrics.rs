use std::collections::HashMap;

use crate::models::{ClusterStat, Customer, Metrics};

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-cluster totals, buyers and conversion rate, in first-observed
/// cluster order.
pub fn cluster_breakdown(filtered: &[Customer]) -> Vec<ClusterStat> {
    let mut order: Vec<String> = Vec::new();
    let mut tallies: HashMap<String, (usize, usize)> = HashMap::new();

    for customer in filtered {
        let entry = tallies.entry(customer.cluster.clone()).or_insert_with(|| {
            order.push(customer.cluster.clone());
            (0, 0)
        });
        entry.0 += 1;
        if customer.is_bike_buyer {
            entry.1 += 1;
        }
    }

    order
        .into_iter()
        .map(|cluster| {
            let (total, buyers) = tallies[&cluster];
            ClusterStat {
                conversion_pct: if total == 0 {
                    0.0
                } else {
                    round2(100.0 * buyers as f64 / total as f64)
                },
                non_buyers: total - buyers,
                cluster,
                total,
                buyers,
            }
        })
        .collect()
}

pub fn compute_metrics(filtered: &[Customer]) -> Metrics {
    if filtered.is_empty() {
        return Metrics {
            total_customers: 0,
            bike_buyers: 0,
            conversion_rate_pct: 0.0,
            top_cluster: "N/A".to_string(),
            top_cluster_conversion_pct: 0.0,
        };
    }

    let breakdown = cluster_breakdown(filtered);
    let total_customers = filtered.len();
    let bike_buyers = filtered.iter().filter(|c| c.is_bike_buyer).count();

    // Strictly-greater scan against a running best of 0: the first cluster
    // observed keeps the lead on ties.
    let mut top_cluster = breakdown[0].cluster.clone();
    let mut top_rate = 0.0;
    for stat in &breakdown {
        if stat.conversion_pct > top_rate {
            top_rate = stat.conversion_pct;
            top_cluster = stat.cluster.clone();
        }
    }

    Metrics {
        total_customers,
        bike_buyers,
        conversion_rate_pct: round2(100.0 * bike_buyers as f64 / total_customers as f64),
        top_cluster,
        top_cluster_conversion_pct: top_rate,
    }
}
