use std::collections::HashMap;

use crate::models::{AgeBandIncome, Customer};

// Inclusive bounds; the bands partition the whole integer age domain.
const AGE_BANDS: [(u32, u32, &str); 12] = [
    (0, 25, "<25"),
    (26, 30, "26-30"),
    (31, 35, "31-35"),
    (36, 40, "36-40"),
    (41, 45, "41-45"),
    (46, 50, "46-50"),
    (51, 55, "51-55"),
    (56, 60, "56-60"),
    (61, 65, "61-65"),
    (66, 70, "66-70"),
    (71, 75, "71-75"),
    (76, u32::MAX, ">75"),
];

/// Per-cluster average yearly income per age band, rounded to the nearest
/// integer. Bands with no matching customers are omitted; band order is
/// fixed.
pub fn income_by_age(filtered: &[Customer]) -> Vec<AgeBandIncome> {
    AGE_BANDS
        .iter()
        .filter_map(|&(min, max, label)| {
            let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
            for customer in filtered.iter().filter(|c| c.age >= min && c.age <= max) {
                let entry = sums.entry(customer.cluster.clone()).or_insert((0.0, 0));
                entry.0 += customer.yearly_income;
                entry.1 += 1;
            }

            if sums.is_empty() {
                return None;
            }

            let per_cluster = sums
                .into_iter()
                .map(|(cluster, (sum, count))| (cluster, (sum / count as f64).round() as i64))
                .collect();

            Some(AgeBandIncome {
                age_label: label,
                per_cluster,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::customer;

    fn aged(cluster: &str, age: u32, income: f64) -> Customer {
        let mut c = customer(cluster, false);
        c.age = age;
        c.yearly_income = income;
        c
    }

    #[test]
    fn bands_partition_the_integer_age_domain() {
        for age in 0u32..=120 {
            let matching = AGE_BANDS
                .iter()
                .filter(|&&(min, max, _)| age >= min && age <= max)
                .count();
            assert_eq!(matching, 1, "age {age} matched {matching} bands");
        }
    }

    #[test]
    fn boundary_ages_land_in_the_expected_bands() {
        let points = income_by_age(&[aged("1", 25, 50_000.0), aged("1", 26, 60_000.0)]);
        let labels: Vec<&str> = points.iter().map(|p| p.age_label).collect();
        assert_eq!(labels, vec!["<25", "26-30"]);
    }

    #[test]
    fn empty_bands_are_omitted_and_order_is_preserved() {
        let points = income_by_age(&[
            aged("1", 72, 38_000.0),
            aged("1", 22, 31_000.0),
            aged("2", 47, 82_000.0),
        ]);

        let labels: Vec<&str> = points.iter().map(|p| p.age_label).collect();
        assert_eq!(labels, vec!["<25", "46-50", "71-75"]);
    }

    #[test]
    fn averages_are_per_cluster_and_rounded() {
        let points = income_by_age(&[
            aged("1", 33, 40_000.0),
            aged("1", 34, 40_001.0),
            aged("2", 35, 90_000.0),
        ]);

        assert_eq!(points.len(), 1);
        let band = &points[0];
        assert_eq!(band.age_label, "31-35");
        // 40000.5 rounds away from zero.
        assert_eq!(band.per_cluster["1"], 40_001);
        assert_eq!(band.per_cluster["2"], 90_000);
    }

    #[test]
    fn ages_past_the_last_bound_fall_in_the_open_band() {
        let points = income_by_age(&[aged("3", 91, 28_000.0)]);
        assert_eq!(points[0].age_label, ">75");
        assert_eq!(points[0].per_cluster["3"], 28_000);
    }

    #[test]
    fn empty_input_produces_no_bands() {
        assert!(income_by_age(&[]).is_empty());
    }
}
