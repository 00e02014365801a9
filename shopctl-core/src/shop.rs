//! The shop console: prompts, field collection and the entity actions
//!
//! `Shop` owns a store, an input source and an output sink. Actions return
//! [`ShopError::Abandoned`] when the user cancels or input ends, which the
//! menu loop treats as "back to the menu". Store errors end the session.

use std::fmt::Display;
use std::io::Write;

use tracing::{debug, info, warn};

use crate::error::{Result, ShopError};
use crate::input::{InputError, LineInput};
use crate::models::{Car, Customer, Mechanic, NewCar, NewCustomer, NewMechanic};
use crate::store::ShopStore;
use crate::table::{ResultTable, Tabular};
use crate::validation::{check_experience, LastName, ValidationError, Vin};

pub(crate) const INVALID_INPUT: &str = "Invalid input";
pub(crate) const INVALID_NUMBER: &str = "Your input is invalid!";

pub struct Shop<S, I, W> {
    pub(crate) store: S,
    pub(crate) input: I,
    pub(crate) out: W,
}

impl<S, I, W> Shop<S, I, W>
where
    S: ShopStore,
    I: LineInput,
    W: Write,
{
    pub fn new(store: S, input: I, out: W) -> Self {
        Self { store, input, out }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (S, I, W) {
        (self.store, self.input, self.out)
    }

    pub(crate) fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    pub(crate) fn show(&mut self, table: &ResultTable) -> Result<usize> {
        let rows = table.write_to(&mut self.out)?;
        self.out.flush()?;
        Ok(rows)
    }

    pub(crate) fn show_records<T: Tabular>(&mut self, records: &[T]) -> Result<usize> {
        self.show(&ResultTable::from_records(records))
    }

    /// Free-text field. A failed read yields an empty value.
    pub(crate) fn text(&mut self, label: &str) -> Result<String> {
        match self.input.read_line(label) {
            Ok(line) => Ok(line),
            Err(InputError::Io(err)) => {
                warn!(field = label, error = %err, "input read failed, using empty value");
                self.say(INVALID_INPUT)?;
                Ok(String::new())
            }
            Err(InputError::Cancelled) | Err(InputError::Closed) => Err(ShopError::Abandoned),
        }
    }

    /// Integer field, asked again until the line parses
    pub(crate) fn integer(&mut self, label: &str) -> Result<i32> {
        loop {
            match self.input.read_line(label) {
                Ok(line) => match line.trim().parse::<i32>() {
                    Ok(value) => return Ok(value),
                    Err(_) => self.say(INVALID_NUMBER)?,
                },
                Err(InputError::Io(err)) => {
                    warn!(field = label, error = %err, "input read failed");
                    self.say(INVALID_NUMBER)?;
                }
                Err(InputError::Cancelled) | Err(InputError::Closed) => {
                    return Err(ShopError::Abandoned)
                }
            }
        }
    }

    /// Text field, asked again until `parse` accepts it
    pub(crate) fn validated<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> std::result::Result<T, ValidationError>,
    ) -> Result<T> {
        loop {
            let raw = self.text(label)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    debug!(field = label, %err, "rejected input");
                    self.say(err)?;
                }
            }
        }
    }

    /// Menu 1: collect customer fields and insert with the next id
    pub async fn add_customer(&mut self) -> Result<Customer> {
        self.enroll_customer(None).await
    }

    /// Add a customer, skipping the last-name prompt when it is already known.
    ///
    /// With a known last name the prompts differ from menu 1: first name,
    /// phone, then address.
    pub(crate) async fn enroll_customer(
        &mut self,
        known_lname: Option<&LastName>,
    ) -> Result<Customer> {
        let fname = self.text("Enter Customer First Name:")?;
        let lname = match known_lname {
            Some(lname) => lname.as_str().to_owned(),
            None => self.text("Enter Customer Last Name:")?,
        };
        let phone = self.text("Enter Customer Phone Number:")?;
        let address = self.text("Enter Customer Address:")?;

        let customer = self
            .store
            .insert_customer(NewCustomer {
                fname,
                lname,
                phone,
                address,
            })
            .await?;
        info!(id = customer.id, "added customer");

        self.show_records(std::slice::from_ref(&customer))?;
        Ok(customer)
    }

    /// Menu 2: collect mechanic fields; experience must not exceed 99 years
    pub async fn add_mechanic(&mut self) -> Result<Mechanic> {
        let fname = self.text("Enter Mechanic's First Name:")?;
        let lname = self.text("Enter Mechanic's Last Name:")?;

        let mut experience = self.integer("Enter the Mechanic's years of experience:")?;
        while check_experience(experience).is_err() {
            experience = self.integer(
                "Cannot have that many years of experience, please list a year less than that",
            )?;
        }

        let mechanic = self
            .store
            .insert_mechanic(NewMechanic {
                fname,
                lname,
                experience,
            })
            .await?;
        info!(id = mechanic.id, "added mechanic");

        self.say(format!("The mechanic's id is: {}", mechanic.id))?;
        self.show_records(std::slice::from_ref(&mechanic))?;
        Ok(mechanic)
    }

    /// Menu 3: collect car fields; the VIN is stored uppercased
    pub async fn add_car(&mut self) -> Result<Car> {
        let vin = self.validated("Enter the car's VIN:", Vin::parse)?;
        let make = self.text("Enter Car's Make:")?;
        let model = self.text("Enter Car's Model:")?;
        let year = self.integer("Enter Car's year")?;

        let car = self
            .store
            .insert_car(NewCar {
                vin,
                make,
                model,
                year,
            })
            .await?;
        info!(vin = %car.vin, "added car");

        self.show_records(std::slice::from_ref(&car))?;
        Ok(car)
    }
}
