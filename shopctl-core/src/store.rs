//! The data store seam between the workflows and a database
//!
//! Insert methods assign identifiers from the current row count of the
//! target table: customer, mechanic and service request ids equal the
//! count before the insert, closed request wids equal that count plus one.
//! Implementations must make the count and the insert atomic with respect
//! to other sessions.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{
    Car, ClosedRequest, Customer, Mechanic, NewCar, NewClosedRequest, NewCustomer, NewMechanic,
    NewServiceRequest, ServiceRequest,
};
use crate::report::Report;
use crate::table::ResultTable;

/// Shop tables, used for row counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopTable {
    Customer,
    Mechanic,
    Car,
    Owns,
    ServiceRequest,
    ClosedRequest,
}

impl ShopTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Mechanic => "mechanic",
            Self::Car => "car",
            Self::Owns => "owns",
            Self::ServiceRequest => "service_request",
            Self::ClosedRequest => "closed_request",
        }
    }
}

#[async_trait]
pub trait ShopStore: Send + Sync {
    /// Number of rows currently in `table`
    async fn count(&self, table: ShopTable) -> StoreResult<i64>;

    async fn insert_customer(&self, customer: NewCustomer) -> StoreResult<Customer>;

    async fn insert_mechanic(&self, mechanic: NewMechanic) -> StoreResult<Mechanic>;

    async fn insert_car(&self, car: NewCar) -> StoreResult<Car>;

    async fn insert_service_request(&self, request: NewServiceRequest)
        -> StoreResult<ServiceRequest>;

    async fn insert_closed_request(&self, closed: NewClosedRequest) -> StoreResult<ClosedRequest>;

    async fn customers_by_last_name(&self, lname: &str) -> StoreResult<Vec<Customer>>;

    async fn customer_exists(&self, id: i32, lname: &str) -> StoreResult<bool>;

    /// Cars linked to the customer through `owns`
    async fn cars_owned_by(&self, customer_id: i32) -> StoreResult<Vec<Car>>;

    async fn car_exists(&self, vin: &str) -> StoreResult<bool>;

    async fn mechanic_exists(&self, id: i32) -> StoreResult<bool>;

    async fn service_request_exists(&self, rid: i32) -> StoreResult<bool>;

    async fn run_report(&self, report: Report) -> StoreResult<ResultTable>;
}

/// Convert a row count into the next integer key
pub fn id_from_count(entity: &'static str, count: i64) -> StoreResult<i32> {
    i32::try_from(count).map_err(|_| crate::error::StoreError::IdOverflow { entity, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[test]
    fn id_from_count_checks_range() {
        assert_eq!(id_from_count("customer", 0).unwrap(), 0);
        assert_eq!(id_from_count("customer", 41).unwrap(), 41);
        assert!(matches!(
            id_from_count("customer", i64::from(i32::MAX) + 1),
            Err(StoreError::IdOverflow { entity: "customer", .. })
        ));
    }

    #[test]
    fn table_names_match_schema() {
        assert_eq!(ShopTable::ServiceRequest.as_str(), "service_request");
        assert_eq!(ShopTable::ClosedRequest.as_str(), "closed_request");
    }
}
