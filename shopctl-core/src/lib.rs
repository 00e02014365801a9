//! shopctl-core: auto-repair shop records, prompts and menu workflows
//!
//! The workflows talk to a database only through [`ShopStore`] and to the
//! user only through [`LineInput`] and a `Write` sink, so the same code runs
//! against PostgreSQL in the binary and against [`MemoryStore`] in tests.

pub mod error;
pub mod input;
pub mod memory;
pub mod menu;
pub mod models;
pub mod report;
mod requests;
pub mod shop;
pub mod store;
pub mod table;
pub mod validation;

pub use error::{Result, ShopError, StoreError, StoreResult};
pub use input::{InputError, LineInput, LineReader, DEFAULT_CANCEL_KEYWORD};
pub use memory::MemoryStore;
pub use menu::{Flow, MenuChoice};
pub use models::{
    Car, ClosedRequest, Customer, Mechanic, NewCar, NewClosedRequest, NewCustomer, NewMechanic,
    NewServiceRequest, ServiceRequest,
};
pub use report::Report;
pub use shop::Shop;
pub use store::{id_from_count, ShopStore, ShopTable};
pub use table::{ResultTable, Tabular, NULL_CELL};
pub use validation::{LastName, ReturningAnswer, ServiceDate, ValidationError, Vin};
