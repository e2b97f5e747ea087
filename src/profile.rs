use std::collections::HashMap;

use crate::models::{Customer, ProfilePoint, ProfileValue};

type MetricFn = fn(&Customer) -> f64;

const PROFILE_METRICS: [(&str, MetricFn); 6] = [
    ("Cars Owned", |c| c.number_cars_owned as f64),
    ("Children at Home", |c| c.number_children_at_home as f64),
    ("Total Children", |c| c.total_children as f64),
    ("Yearly Income", |c| c.yearly_income),
    ("Monthly Spend", |c| c.avg_monthly_spend),
    ("Age", |c| c.age as f64),
];

/// Six metric averages per selected cluster, normalized into [0, 1] against
/// the min/max of the cluster-level means (not the raw per-customer values).
pub fn cluster_profile(filtered: &[Customer], selected_clusters: &[String]) -> Vec<ProfilePoint> {
    if selected_clusters.is_empty() {
        return Vec::new();
    }

    let members: Vec<(&String, Vec<&Customer>)> = selected_clusters
        .iter()
        .map(|cluster| {
            let matching = filtered.iter().filter(|c| &c.cluster == cluster).collect();
            (cluster, matching)
        })
        .collect();

    PROFILE_METRICS
        .iter()
        .map(|&(name, value)| {
            let means: Vec<(&String, f64)> = members
                .iter()
                .map(|(cluster, customers)| (*cluster, mean(customers, value)))
                .collect();

            let min = means.iter().map(|&(_, m)| m).fold(f64::INFINITY, f64::min);
            let max = means.iter().map(|&(_, m)| m).fold(f64::NEG_INFINITY, f64::max);

            let per_cluster: HashMap<String, ProfileValue> = means
                .into_iter()
                .map(|(cluster, raw)| {
                    // A degenerate range collapses to mid-scale instead of NaN.
                    let normalized = if max > min { (raw - min) / (max - min) } else { 0.5 };
                    (cluster.clone(), ProfileValue { raw, normalized })
                })
                .collect();

            ProfilePoint {
                metric: name,
                per_cluster,
            }
        })
        .collect()
}

// A selected cluster with no matching customers contributes 0 as its mean.
fn mean(customers: &[&Customer], value: MetricFn) -> f64 {
    if customers.is_empty() {
        return 0.0;
    }
    customers.iter().map(|c| value(c)).sum::<f64>() / customers.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::customer;

    fn selected(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    fn with_profile(cluster: &str, age: u32, income: f64, cars: u32) -> Customer {
        let mut c = customer(cluster, false);
        c.age = age;
        c.yearly_income = income;
        c.number_cars_owned = cars;
        c
    }

    #[test]
    fn empty_selection_yields_empty_profile() {
        let customers = vec![customer("1", true)];
        assert!(cluster_profile(&customers, &[]).is_empty());
    }

    #[test]
    fn covers_all_six_metrics_for_every_selected_cluster() {
        let customers = vec![customer("1", true), customer("2", false)];
        let points = cluster_profile(&customers, &selected(&["1", "2"]));

        assert_eq!(points.len(), 6);
        for point in &points {
            assert_eq!(point.per_cluster.len(), 2);
        }
    }

    #[test]
    fn raw_values_are_cluster_means() {
        let customers = vec![
            with_profile("1", 20, 40_000.0, 1),
            with_profile("1", 40, 60_000.0, 3),
            with_profile("2", 60, 90_000.0, 2),
        ];

        let points = cluster_profile(&customers, &selected(&["1", "2"]));
        let age = points.iter().find(|p| p.metric == "Age").unwrap();
        assert!((age.per_cluster["1"].raw - 30.0).abs() < 1e-9);
        assert!((age.per_cluster["2"].raw - 60.0).abs() < 1e-9);

        let income = points.iter().find(|p| p.metric == "Yearly Income").unwrap();
        assert!((income.per_cluster["1"].raw - 50_000.0).abs() < 1e-9);
    }

    #[test]
    fn normalized_values_stay_in_unit_range_and_hit_both_ends() {
        let customers = vec![
            with_profile("1", 20, 40_000.0, 1),
            with_profile("2", 60, 90_000.0, 2),
            with_profile("3", 40, 65_000.0, 3),
        ];

        let points = cluster_profile(&customers, &selected(&["1", "2", "3"]));
        for point in &points {
            for value in point.per_cluster.values() {
                assert!((0.0..=1.0).contains(&value.normalized));
            }
        }

        let age = points.iter().find(|p| p.metric == "Age").unwrap();
        assert!((age.per_cluster["1"].normalized - 0.0).abs() < 1e-9);
        assert!((age.per_cluster["2"].normalized - 1.0).abs() < 1e-9);
        assert!((age.per_cluster["3"].normalized - 0.5).abs() < 1e-9);
    }

    #[test]
    fn single_cluster_selection_collapses_to_mid_scale() {
        let customers = vec![
            with_profile("1", 25, 45_000.0, 1),
            with_profile("1", 35, 55_000.0, 2),
        ];

        let points = cluster_profile(&customers, &selected(&["1"]));
        for point in &points {
            assert!((point.per_cluster["1"].normalized - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn unmatched_cluster_contributes_zero_mean() {
        let customers = vec![with_profile("1", 30, 50_000.0, 2)];

        let points = cluster_profile(&customers, &selected(&["1", "9"]));
        let income = points.iter().find(|p| p.metric == "Yearly Income").unwrap();
        assert!((income.per_cluster["9"].raw - 0.0).abs() < 1e-9);
        assert!((income.per_cluster["9"].normalized - 0.0).abs() < 1e-9);
        assert!((income.per_cluster["1"].normalized - 1.0).abs() < 1e-9);
    }
}
