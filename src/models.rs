use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub country_region: String,
    pub age: u32,
    pub cluster: String,
    #[serde(with = "int_flag")]
    pub is_bike_buyer: bool,
    pub education: String,
    pub occupation: String,
    pub gender: String,
    pub avg_monthly_spend: f64,
    pub yearly_income: f64,
    #[serde(with = "int_flag")]
    pub is_home_owner: bool,
    pub number_children_at_home: u32,
    pub marital_status: String,
    pub number_cars_owned: u32,
    pub total_children: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub total_customers: usize,
    pub bike_buyers: usize,
    pub conversion_rate_pct: f64,
    pub top_cluster: String,
    pub top_cluster_conversion_pct: f64,
}

#[derive(Debug, Clone)]
pub struct ClusterStat {
    pub cluster: String,
    pub total: usize,
    pub buyers: usize,
    pub non_buyers: usize,
    pub conversion_pct: f64,
}

#[derive(Debug, Clone)]
pub struct DistributionRow {
    pub category: String,
    pub counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HouseholdGroup {
    Ownership { home_owner: bool },
    Marital { status: String },
}

#[derive(Debug, Clone)]
pub struct ClusterShare {
    pub count: usize,
    pub percentage_pct: f64,
}

#[derive(Debug, Clone)]
pub struct HeatmapCell {
    pub group: HouseholdGroup,
    pub children_at_home: u32,
    pub total: usize,
    pub buyers: usize,
    pub buyer_rate_pct: f64,
    pub cluster_distribution: HashMap<String, ClusterShare>,
}

#[derive(Debug, Clone, Copy)]
pub struct ProfileValue {
    pub raw: f64,
    pub normalized: f64,
}

#[derive(Debug, Clone)]
pub struct ProfilePoint {
    pub metric: &'static str,
    pub per_cluster: HashMap<String, ProfileValue>,
}

#[derive(Debug, Clone)]
pub struct AgeBandIncome {
    pub age_label: &'static str,
    pub per_cluster: HashMap<String, i64>,
}

// The source dataset encodes its boolean fields as 0/1; accept either
// encoding on input and write 0/1 back out.
pub(crate) mod int_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u8),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Flag::deserialize(deserializer)? {
            Flag::Bool(value) => Ok(value),
            Flag::Int(value) => Ok(value != 0),
        }
    }

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }
}
