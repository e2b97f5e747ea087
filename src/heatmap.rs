use std::collections::HashMap;

use crate::models::{ClusterShare, Customer, HeatmapCell, HouseholdGroup};

#[derive(Default)]
struct CellTally {
    total: usize,
    buyers: usize,
    clusters: HashMap<String, usize>,
}

impl CellTally {
    fn add(&mut self, customer: &Customer) {
        self.total += 1;
        if customer.is_bike_buyer {
            self.buyers += 1;
        }
        *self.clusters.entry(customer.cluster.clone()).or_insert(0) += 1;
    }

    // Only called for observed combinations, so total is never 0 here.
    fn into_cell(self, group: HouseholdGroup, children_at_home: u32) -> HeatmapCell {
        let total = self.total;
        let cluster_distribution = self
            .clusters
            .into_iter()
            .map(|(cluster, count)| {
                let share = ClusterShare {
                    count,
                    percentage_pct: 100.0 * count as f64 / total as f64,
                };
                (cluster, share)
            })
            .collect();

        HeatmapCell {
            group,
            children_at_home,
            total,
            buyers: self.buyers,
            buyer_rate_pct: 100.0 * self.buyers as f64 / total as f64,
            cluster_distribution,
        }
    }
}

/// Two independent cross-tabs over the same subset: home ownership and
/// marital status, each crossed with children-at-home. Every customer lands
/// in exactly one cell of each family. Cells come out ownership family
/// first, sorted by (children count, axis value).
pub fn household_heatmap(filtered: &[Customer]) -> Vec<HeatmapCell> {
    let mut ownership: HashMap<(bool, u32), CellTally> = HashMap::new();
    let mut marital: HashMap<(String, u32), CellTally> = HashMap::new();

    for customer in filtered {
        ownership
            .entry((customer.is_home_owner, customer.number_children_at_home))
            .or_default()
            .add(customer);
        marital
            .entry((customer.marital_status.clone(), customer.number_children_at_home))
            .or_default()
            .add(customer);
    }

    let mut cells = Vec::new();

    let mut ownership: Vec<_> = ownership.into_iter().collect();
    ownership.sort_by_key(|&((owner, children), _)| (children, owner));
    for ((home_owner, children), tally) in ownership {
        cells.push(tally.into_cell(HouseholdGroup::Ownership { home_owner }, children));
    }

    let mut marital: Vec<_> = marital.into_iter().collect();
    marital.sort_by(|((sa, ca), _), ((sb, cb), _)| (ca, sa).cmp(&(cb, sb)));
    for ((status, children), tally) in marital {
        cells.push(tally.into_cell(HouseholdGroup::Marital { status }, children));
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::customer;

    fn household(
        cluster: &str,
        buyer: bool,
        owner: bool,
        marital: &str,
        children: u32,
    ) -> Customer {
        let mut c = customer(cluster, buyer);
        c.is_home_owner = owner;
        c.marital_status = marital.to_string();
        c.number_children_at_home = children;
        c
    }

    #[test]
    fn every_customer_lands_in_one_cell_per_family() {
        let customers = vec![
            household("1", true, true, "M", 2),
            household("1", false, false, "S", 0),
            household("2", true, true, "S", 0),
            household("3", false, false, "M", 2),
        ];

        let cells = household_heatmap(&customers);
        let ownership_total: usize = cells
            .iter()
            .filter(|c| matches!(c.group, HouseholdGroup::Ownership { .. }))
            .map(|c| c.total)
            .sum();
        let marital_total: usize = cells
            .iter()
            .filter(|c| matches!(c.group, HouseholdGroup::Marital { .. }))
            .map(|c| c.total)
            .sum();

        assert_eq!(ownership_total, customers.len());
        assert_eq!(marital_total, customers.len());
    }

    #[test]
    fn cell_invariants_hold() {
        let customers = vec![
            household("1", true, true, "M", 1),
            household("2", false, true, "M", 1),
            household("2", true, true, "M", 1),
        ];

        let cells = household_heatmap(&customers);
        for cell in &cells {
            assert!(cell.buyers <= cell.total);
            let cluster_sum: usize = cell.cluster_distribution.values().map(|s| s.count).sum();
            assert_eq!(cluster_sum, cell.total);
            let pct_sum: f64 = cell
                .cluster_distribution
                .values()
                .map(|s| s.percentage_pct)
                .sum();
            assert!((pct_sum - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn buyer_rate_reflects_cell_membership() {
        let customers = vec![
            household("1", true, true, "M", 0),
            household("1", false, true, "M", 0),
        ];

        let cells = household_heatmap(&customers);
        let owner_cell = cells
            .iter()
            .find(|c| c.group == HouseholdGroup::Ownership { home_owner: true })
            .unwrap();
        assert_eq!(owner_cell.total, 2);
        assert_eq!(owner_cell.buyers, 1);
        assert!((owner_cell.buyer_rate_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn only_observed_combinations_produce_cells() {
        let customers = vec![household("1", true, true, "M", 3)];

        let cells = household_heatmap(&customers);
        // One ownership cell and one marital cell, nothing zero-filled.
        assert_eq!(cells.len(), 2);
        assert!(cells.iter().all(|c| c.total > 0));
        assert!(cells.iter().all(|c| c.children_at_home == 3));
    }

    #[test]
    fn cells_sort_by_children_then_axis_within_family() {
        let customers = vec![
            household("1", false, true, "S", 2),
            household("1", false, false, "M", 0),
            household("1", false, true, "M", 0),
        ];

        let cells = household_heatmap(&customers);
        let ownership: Vec<(u32, bool)> = cells
            .iter()
            .filter_map(|c| match c.group {
                HouseholdGroup::Ownership { home_owner } => {
                    Some((c.children_at_home, home_owner))
                }
                HouseholdGroup::Marital { .. } => None,
            })
            .collect();

        assert_eq!(ownership, vec![(0, false), (0, true), (2, true)]);
    }

    #[test]
    fn empty_input_produces_no_cells() {
        assert!(household_heatmap(&[]).is_empty());
    }
}
