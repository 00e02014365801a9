//! In-process [`ShopStore`] backed by vectors.
//!
//! Mirrors the PostgreSQL store's id assignment and report semantics so the
//! workflows can be exercised without a database.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::models::{
    Car, ClosedRequest, Customer, Mechanic, NewCar, NewClosedRequest, NewCustomer, NewMechanic,
    NewServiceRequest, ServiceRequest,
};
use crate::report::{Report, LOW_BILL_LIMIT, LOW_MILEAGE_LIMIT, OLD_CAR_MAX_YEAR};
use crate::store::{id_from_count, ShopStore, ShopTable};
use crate::table::ResultTable;

#[derive(Debug, Default)]
struct Tables {
    customers: Vec<Customer>,
    mechanics: Vec<Mechanic>,
    cars: Vec<Car>,
    owns: Vec<(i32, String)>,
    service_requests: Vec<ServiceRequest>,
    closed_requests: Vec<ClosedRequest>,
}

impl Tables {
    /// Summed bill per customer id, over closed requests joined to their service request
    fn bill_totals(&self) -> BTreeMap<i32, i64> {
        let mut totals = BTreeMap::new();
        for closed in &self.closed_requests {
            for request in self.service_requests.iter().filter(|r| r.rid == closed.rid) {
                *totals.entry(request.customer_id).or_insert(0) += i64::from(closed.bill);
            }
        }
        totals
    }

    fn customer(&self, id: i32) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    fn old_low_mileage_cars(&self) -> ResultTable {
        let mut table = ResultTable::new(Report::CarsBefore1995Under50000Miles.columns().iter().copied());
        let mut cars: Vec<&Car> = self
            .cars
            .iter()
            .filter(|car| car.year <= OLD_CAR_MAX_YEAR)
            .filter(|car| {
                self.service_requests
                    .iter()
                    .any(|r| r.car_vin == car.vin && r.odometer < LOW_MILEAGE_LIMIT)
            })
            .collect();
        cars.sort_by(|a, b| a.vin.cmp(&b.vin));
        for car in cars {
            table.push_row(vec![car.make.clone(), car.model.clone(), car.year.to_string()]);
        }
        table
    }

    fn report(&self, report: Report) -> ResultTable {
        let mut table = ResultTable::new(report.columns().iter().copied());
        match report {
            Report::CustomersWithBillUnder100 => {
                for (id, total) in self.bill_totals() {
                    if total >= LOW_BILL_LIMIT {
                        continue;
                    }
                    if let Some(customer) = self.customer(id) {
                        table.push_row(vec![id.to_string(), customer.fname.clone(), total.to_string()]);
                    }
                }
            }
            Report::CustomersWithMoreThan20Cars | Report::CarsBefore1995Under50000Miles => {
                return self.old_low_mileage_cars();
            }
            Report::CarsWithMoreServicesThan { min_services } => {
                let mut counted: Vec<(&Car, i64)> = self
                    .cars
                    .iter()
                    .map(|car| {
                        let services = self
                            .service_requests
                            .iter()
                            .filter(|r| r.car_vin == car.vin)
                            .count() as i64;
                        (car, services)
                    })
                    .filter(|&(_, services)| services > 0 && services > min_services)
                    .collect();
                counted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.vin.cmp(&b.0.vin)));
                for (car, services) in counted {
                    table.push_row(vec![car.make.clone(), car.model.clone(), services.to_string()]);
                }
            }
            Report::CustomersByTotalBillDesc => {
                let mut totals: Vec<(i32, i64)> = self.bill_totals().into_iter().collect();
                totals.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
                for (id, total) in totals {
                    if let Some(customer) = self.customer(id) {
                        table.push_row(vec![
                            customer.fname.clone(),
                            customer.lname.clone(),
                            total.to_string(),
                        ]);
                    }
                }
            }
        }
        table
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record that a customer owns a car
    pub fn add_ownership(&self, customer_id: i32, vin: &str) {
        self.tables().owns.push((customer_id, vin.to_owned()));
    }

    pub fn customers(&self) -> Vec<Customer> {
        self.tables().customers.clone()
    }

    pub fn service_requests(&self) -> Vec<ServiceRequest> {
        self.tables().service_requests.clone()
    }

    pub fn closed_requests(&self) -> Vec<ClosedRequest> {
        self.tables().closed_requests.clone()
    }
}

#[async_trait]
impl ShopStore for MemoryStore {
    async fn count(&self, table: ShopTable) -> StoreResult<i64> {
        let tables = self.tables();
        let len = match table {
            ShopTable::Customer => tables.customers.len(),
            ShopTable::Mechanic => tables.mechanics.len(),
            ShopTable::Car => tables.cars.len(),
            ShopTable::Owns => tables.owns.len(),
            ShopTable::ServiceRequest => tables.service_requests.len(),
            ShopTable::ClosedRequest => tables.closed_requests.len(),
        };
        Ok(len as i64)
    }

    async fn insert_customer(&self, customer: NewCustomer) -> StoreResult<Customer> {
        let mut tables = self.tables();
        let id = id_from_count("customer", tables.customers.len() as i64)?;
        if tables.customers.iter().any(|c| c.id == id) {
            return Err(StoreError::conflict("customer", id));
        }
        let customer = customer.with_id(id);
        tables.customers.push(customer.clone());
        Ok(customer)
    }

    async fn insert_mechanic(&self, mechanic: NewMechanic) -> StoreResult<Mechanic> {
        let mut tables = self.tables();
        let id = id_from_count("mechanic", tables.mechanics.len() as i64)?;
        if tables.mechanics.iter().any(|m| m.id == id) {
            return Err(StoreError::conflict("mechanic", id));
        }
        let mechanic = mechanic.with_id(id);
        tables.mechanics.push(mechanic.clone());
        Ok(mechanic)
    }

    async fn insert_car(&self, car: NewCar) -> StoreResult<Car> {
        let mut tables = self.tables();
        let car = Car::from(car);
        if tables.cars.iter().any(|c| c.vin == car.vin) {
            return Err(StoreError::conflict("car", &car.vin));
        }
        tables.cars.push(car.clone());
        Ok(car)
    }

    async fn insert_service_request(
        &self,
        request: NewServiceRequest,
    ) -> StoreResult<ServiceRequest> {
        let mut tables = self.tables();
        let rid = id_from_count("service request", tables.service_requests.len() as i64)?;
        if tables.service_requests.iter().any(|r| r.rid == rid) {
            return Err(StoreError::conflict("service request", rid));
        }
        let request = request.with_rid(rid);
        tables.service_requests.push(request.clone());
        Ok(request)
    }

    async fn insert_closed_request(&self, closed: NewClosedRequest) -> StoreResult<ClosedRequest> {
        let mut tables = self.tables();
        let wid = id_from_count("closed request", tables.closed_requests.len() as i64 + 1)?;
        if tables.closed_requests.iter().any(|c| c.wid == wid) {
            return Err(StoreError::conflict("closed request", wid));
        }
        let closed = closed.with_wid(wid);
        tables.closed_requests.push(closed.clone());
        Ok(closed)
    }

    async fn customers_by_last_name(&self, lname: &str) -> StoreResult<Vec<Customer>> {
        Ok(self
            .tables()
            .customers
            .iter()
            .filter(|c| c.lname == lname)
            .cloned()
            .collect())
    }

    async fn customer_exists(&self, id: i32, lname: &str) -> StoreResult<bool> {
        Ok(self
            .tables()
            .customers
            .iter()
            .any(|c| c.id == id && c.lname == lname))
    }

    async fn cars_owned_by(&self, customer_id: i32) -> StoreResult<Vec<Car>> {
        let tables = self.tables();
        Ok(tables
            .cars
            .iter()
            .filter(|car| {
                tables
                    .owns
                    .iter()
                    .any(|(owner, vin)| *owner == customer_id && *vin == car.vin)
            })
            .cloned()
            .collect())
    }

    async fn car_exists(&self, vin: &str) -> StoreResult<bool> {
        Ok(self.tables().cars.iter().any(|c| c.vin == vin))
    }

    async fn mechanic_exists(&self, id: i32) -> StoreResult<bool> {
        Ok(self.tables().mechanics.iter().any(|m| m.id == id))
    }

    async fn service_request_exists(&self, rid: i32) -> StoreResult<bool> {
        Ok(self.tables().service_requests.iter().any(|r| r.rid == rid))
    }

    async fn run_report(&self, report: Report) -> StoreResult<ResultTable> {
        Ok(self.tables().report(report))
    }
}
