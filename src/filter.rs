use clap::ValueEnum;

use crate::models::Customer;
use crate::store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BuyerFilter {
    #[default]
    All,
    Buyers,
    NonBuyers,
}

impl BuyerFilter {
    fn matches(self, customer: &Customer) -> bool {
        match self {
            BuyerFilter::All => true,
            BuyerFilter::Buyers => customer.is_bike_buyer,
            BuyerFilter::NonBuyers => !customer.is_bike_buyer,
        }
    }
}

/// Selection the analyst has active. `None` for gender or country means the
/// "All" sentinel of the source UI.
#[derive(Debug, Clone)]
pub struct FilterState {
    pub clusters: Vec<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub buyers: BuyerFilter,
}

impl FilterState {
    /// The "select everything" default: every cluster observed in the store.
    pub fn select_all(customers: &[Customer]) -> Self {
        FilterState {
            clusters: store::observed_clusters(customers),
            gender: None,
            country: None,
            buyers: BuyerFilter::All,
        }
    }

    fn matches(&self, customer: &Customer) -> bool {
        self.clusters.iter().any(|c| c == &customer.cluster)
            && self
                .gender
                .as_ref()
                .map_or(true, |g| g == &customer.gender)
            && self
                .country
                .as_ref()
                .map_or(true, |c| c == &customer.country_region)
            && self.buyers.matches(customer)
    }
}

/// Stable filter: output preserves input order.
pub fn apply(customers: &[Customer], state: &FilterState) -> Vec<Customer> {
    customers
        .iter()
        .filter(|customer| state.matches(customer))
        .cloned()
        .collect()
}
