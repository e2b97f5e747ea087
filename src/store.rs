use std::path::Path;

use anyhow::Context;

use crate::models::Customer;

pub fn load_customers(path: &Path) -> anyhow::Result<Vec<Customer>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        _ => anyhow::bail!(
            "unsupported dataset format for {} (expected .json or .csv)",
            path.display()
        ),
    }
}

fn load_json(path: &Path) -> anyhow::Result<Vec<Customer>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let customers: Vec<Customer> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse customer records from {}", path.display()))?;
    Ok(customers)
}

fn load_csv(path: &Path) -> anyhow::Result<Vec<Customer>> {
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CsvRow {
        id: u64,
        first_name: String,
        last_name: String,
        country_region: String,
        age: u32,
        cluster: String,
        is_bike_buyer: u8,
        education: String,
        occupation: String,
        gender: String,
        avg_monthly_spend: f64,
        yearly_income: f64,
        is_home_owner: u8,
        number_children_at_home: u32,
        marital_status: String,
        number_cars_owned: u32,
        total_children: u32,
    }

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut customers = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result.with_context(|| format!("malformed row in {}", path.display()))?;
        customers.push(Customer {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            country_region: row.country_region,
            age: row.age,
            cluster: row.cluster,
            is_bike_buyer: row.is_bike_buyer != 0,
            education: row.education,
            occupation: row.occupation,
            gender: row.gender,
            avg_monthly_spend: row.avg_monthly_spend,
            yearly_income: row.yearly_income,
            is_home_owner: row.is_home_owner != 0,
            number_children_at_home: row.number_children_at_home,
            marital_status: row.marital_status,
            number_cars_owned: row.number_cars_owned,
            total_children: row.total_children,
        });
    }

    Ok(customers)
}

/// Distinct cluster labels in first-observed order.
pub fn observed_clusters(customers: &[Customer]) -> Vec<String> {
    let mut clusters: Vec<String> = Vec::new();
    for customer in customers {
        if !clusters.iter().any(|c| c == &customer.cluster) {
            clusters.push(customer.cluster.clone());
        }
    }
    clusters
}

pub fn write_seed(path: &Path) -> anyhow::Result<usize> {
    let customers = sample_customers();
    let json = serde_json::to_string_pretty(&customers)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(customers.len())
}

pub fn sample_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: 11001,
            first_name: "Avery".to_string(),
            last_name: "Lee".to_string(),
            country_region: "United States".to_string(),
            age: 34,
            cluster: "1".to_string(),
            is_bike_buyer: true,
            education: "Bachelors".to_string(),
            occupation: "Professional".to_string(),
            gender: "F".to_string(),
            avg_monthly_spend: 62.5,
            yearly_income: 71_500.0,
            is_home_owner: true,
            number_children_at_home: 1,
            marital_status: "M".to_string(),
            number_cars_owned: 2,
            total_children: 2,
        },
        Customer {
            id: 11002,
            first_name: "Jules".to_string(),
            last_name: "Moreno".to_string(),
            country_region: "United Kingdom".to_string(),
            age: 28,
            cluster: "1".to_string(),
            is_bike_buyer: false,
            education: "Partial College".to_string(),
            occupation: "Clerical".to_string(),
            gender: "M".to_string(),
            avg_monthly_spend: 48.2,
            yearly_income: 43_000.0,
            is_home_owner: false,
            number_children_at_home: 0,
            marital_status: "S".to_string(),
            number_cars_owned: 1,
            total_children: 0,
        },
        Customer {
            id: 11003,
            first_name: "Kiara".to_string(),
            last_name: "Patel".to_string(),
            country_region: "Australia".to_string(),
            age: 45,
            cluster: "2".to_string(),
            is_bike_buyer: true,
            education: "Graduate Degree".to_string(),
            occupation: "Management".to_string(),
            gender: "F".to_string(),
            avg_monthly_spend: 88.0,
            yearly_income: 104_000.0,
            is_home_owner: true,
            number_children_at_home: 2,
            marital_status: "M".to_string(),
            number_cars_owned: 3,
            total_children: 3,
        },
        Customer {
            id: 11004,
            first_name: "Tomas".to_string(),
            last_name: "Berger".to_string(),
            country_region: "Germany".to_string(),
            age: 52,
            cluster: "2".to_string(),
            is_bike_buyer: true,
            education: "Bachelors".to_string(),
            occupation: "Professional".to_string(),
            gender: "M".to_string(),
            avg_monthly_spend: 74.9,
            yearly_income: 92_300.0,
            is_home_owner: true,
            number_children_at_home: 0,
            marital_status: "M".to_string(),
            number_cars_owned: 2,
            total_children: 2,
        },
        Customer {
            id: 11005,
            first_name: "Elena".to_string(),
            last_name: "Rossi".to_string(),
            country_region: "France".to_string(),
            age: 23,
            cluster: "3".to_string(),
            is_bike_buyer: false,
            education: "High School".to_string(),
            occupation: "Manual".to_string(),
            gender: "F".to_string(),
            avg_monthly_spend: 35.4,
            yearly_income: 27_800.0,
            is_home_owner: false,
            number_children_at_home: 0,
            marital_status: "S".to_string(),
            number_cars_owned: 0,
            total_children: 0,
        },
        Customer {
            id: 11006,
            first_name: "Marcus".to_string(),
            last_name: "Webb".to_string(),
            country_region: "United States".to_string(),
            age: 61,
            cluster: "3".to_string(),
            is_bike_buyer: false,
            education: "Partial College".to_string(),
            occupation: "Skilled Manual".to_string(),
            gender: "M".to_string(),
            avg_monthly_spend: 41.7,
            yearly_income: 38_600.0,
            is_home_owner: true,
            number_children_at_home: 0,
            marital_status: "S".to_string(),
            number_cars_owned: 1,
            total_children: 1,
        },
        Customer {
            id: 11007,
            first_name: "Priya".to_string(),
            last_name: "Nair".to_string(),
            country_region: "United Kingdom".to_string(),
            age: 38,
            cluster: "1".to_string(),
            is_bike_buyer: true,
            education: "Bachelors".to_string(),
            occupation: "Professional".to_string(),
            gender: "F".to_string(),
            avg_monthly_spend: 67.3,
            yearly_income: 78_900.0,
            is_home_owner: true,
            number_children_at_home: 3,
            marital_status: "M".to_string(),
            number_cars_owned: 2,
            total_children: 3,
        },
        Customer {
            id: 11008,
            first_name: "Diego".to_string(),
            last_name: "Fuentes".to_string(),
            country_region: "Australia".to_string(),
            age: 30,
            cluster: "3".to_string(),
            is_bike_buyer: true,
            education: "High School".to_string(),
            occupation: "Clerical".to_string(),
            gender: "M".to_string(),
            avg_monthly_spend: 52.1,
            yearly_income: 45_200.0,
            is_home_owner: false,
            number_children_at_home: 1,
            marital_status: "S".to_string(),
            number_cars_owned: 1,
            total_children: 1,
        },
    ]
}
