use crate::models::Customer;

pub fn customer(cluster: &str, is_bike_buyer: bool) -> Customer {
    Customer {
        id: 0,
        first_name: "Test".to_string(),
        last_name: "Customer".to_string(),
        country_region: "United States".to_string(),
        age: 35,
        cluster: cluster.to_string(),
        is_bike_buyer,
        education: "Bachelors".to_string(),
        occupation: "Professional".to_string(),
        gender: "F".to_string(),
        avg_monthly_spend: 50.0,
        yearly_income: 60_000.0,
        is_home_owner: false,
        number_children_at_home: 0,
        marital_status: "S".to_string(),
        number_cars_owned: 1,
        total_children: 0,
    }
}
