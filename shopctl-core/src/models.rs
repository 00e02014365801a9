//! Persisted shop records and the values collected to create them
//!
//! Column names follow the shop schema (`customer`, `mechanic`, `car`,
//! `owns`, `service_request`, `closed_request`).

use crate::table::Tabular;
use crate::validation::{ServiceDate, Vin};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub fname: String,
    pub lname: String,
    pub phone: String,
    pub address: String,
}

impl NewCustomer {
    pub fn with_id(self, id: i32) -> Customer {
        Customer {
            id,
            fname: self.fname,
            lname: self.lname,
            phone: self.phone,
            address: self.address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mechanic {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    pub experience: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMechanic {
    pub fname: String,
    pub lname: String,
    pub experience: i32,
}

impl NewMechanic {
    pub fn with_id(self, id: i32) -> Mechanic {
        Mechanic {
            id,
            fname: self.fname,
            lname: self.lname,
            experience: self.experience,
        }
    }
}

/// A car, keyed by its VIN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub vin: Vin,
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl From<NewCar> for Car {
    fn from(car: NewCar) -> Self {
        Self {
            vin: car.vin.as_str().to_owned(),
            make: car.make,
            model: car.model,
            year: car.year,
        }
    }
}

/// An open complaint about a car
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub rid: i32,
    pub customer_id: i32,
    pub car_vin: String,
    pub date: String,
    pub odometer: i32,
    pub complain: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceRequest {
    pub customer_id: i32,
    pub car_vin: Vin,
    /// Free text, not validated
    pub date: String,
    pub odometer: i32,
    pub complain: String,
}

impl NewServiceRequest {
    pub fn with_rid(self, rid: i32) -> ServiceRequest {
        ServiceRequest {
            rid,
            customer_id: self.customer_id,
            car_vin: self.car_vin.as_str().to_owned(),
            date: self.date,
            odometer: self.odometer,
            complain: self.complain,
        }
    }
}

/// The record closing a service request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedRequest {
    pub wid: i32,
    pub rid: i32,
    pub mid: i32,
    pub date: String,
    pub comment: String,
    pub bill: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClosedRequest {
    pub rid: i32,
    pub mid: i32,
    pub date: ServiceDate,
    pub comment: String,
    pub bill: i32,
}

impl NewClosedRequest {
    pub fn with_wid(self, wid: i32) -> ClosedRequest {
        ClosedRequest {
            wid,
            rid: self.rid,
            mid: self.mid,
            date: self.date.as_str().to_owned(),
            comment: self.comment,
            bill: self.bill,
        }
    }
}

impl Tabular for Customer {
    const COLUMNS: &'static [&'static str] = &["id", "fname", "lname", "phone", "address"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.fname.clone(),
            self.lname.clone(),
            self.phone.clone(),
            self.address.clone(),
        ]
    }
}

impl Tabular for Mechanic {
    const COLUMNS: &'static [&'static str] = &["id", "fname", "lname", "experience"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.fname.clone(),
            self.lname.clone(),
            self.experience.to_string(),
        ]
    }
}

impl Tabular for Car {
    const COLUMNS: &'static [&'static str] = &["vin", "make", "model", "year"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.vin.clone(),
            self.make.clone(),
            self.model.clone(),
            self.year.to_string(),
        ]
    }
}

impl Tabular for ServiceRequest {
    const COLUMNS: &'static [&'static str] =
        &["rid", "customer_id", "car_vin", "date", "odometer", "complain"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.rid.to_string(),
            self.customer_id.to_string(),
            self.car_vin.clone(),
            self.date.clone(),
            self.odometer.to_string(),
            self.complain.clone(),
        ]
    }
}

impl Tabular for ClosedRequest {
    const COLUMNS: &'static [&'static str] = &["wid", "rid", "mid", "date", "comment", "bill"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.wid.to_string(),
            self.rid.to_string(),
            self.mid.to_string(),
            self.date.clone(),
            self.comment.clone(),
            self.bill.to_string(),
        ]
    }
}
