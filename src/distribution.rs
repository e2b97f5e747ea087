use std::collections::HashMap;

use clap::ValueEnum;

use crate::models::{Customer, DistributionRow};
use crate::store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DistributionField {
    #[default]
    Education,
    Occupation,
}

impl DistributionField {
    pub fn label(self) -> &'static str {
        match self {
            DistributionField::Education => "Education",
            DistributionField::Occupation => "Occupation",
        }
    }

    fn value(self, customer: &Customer) -> &str {
        match self {
            DistributionField::Education => &customer.education,
            DistributionField::Occupation => &customer.occupation,
        }
    }
}

/// Cross-tab of the chosen categorical field by cluster. Rows come out in
/// first-observed category order; every row carries the same cluster key
/// set, zero-filled where a cluster is absent from a category.
pub fn distribution_by(filtered: &[Customer], field: DistributionField) -> Vec<DistributionRow> {
    let clusters = store::observed_clusters(filtered);

    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, HashMap<String, usize>> = HashMap::new();

    for customer in filtered {
        let raw = field.value(customer);
        let category = if raw.is_empty() { "Unknown" } else { raw };
        let counts = grouped.entry(category.to_string()).or_insert_with(|| {
            order.push(category.to_string());
            HashMap::new()
        });
        *counts.entry(customer.cluster.clone()).or_insert(0) += 1;
    }

    order
        .into_iter()
        .map(|category| {
            let mut counts = grouped.remove(&category).unwrap_or_default();
            for cluster in &clusters {
                counts.entry(cluster.clone()).or_insert(0);
            }
            DistributionRow { category, counts }
        })
        .collect()
}
