//! Opening and closing service requests

use std::io::Write;

use tracing::{info, warn};

use crate::error::Result;
use crate::input::LineInput;
use crate::models::{ClosedRequest, NewClosedRequest, NewServiceRequest, ServiceRequest};
use crate::shop::Shop;
use crate::store::ShopStore;
use crate::validation::{LastName, ReturningAnswer, ServiceDate, Vin};

const NOT_ENROLLED: &str =
    "You have not been added to the system yet, please continue with adding your info and car info.";

impl<S, I, W> Shop<S, I, W>
where
    S: ShopStore,
    I: LineInput,
    W: Write,
{
    /// Menu 4: find or enroll the customer, pick a car, record the complaint
    pub async fn insert_service_request(&mut self) -> Result<ServiceRequest> {
        let lname = self.validated("Enter Customer's Last Name:", LastName::parse)?;

        let matches = self.store.customers_by_last_name(lname.as_str()).await?;
        if matches.is_empty() {
            self.enroll_with_car(&lname).await?;
        } else {
            self.say("That last name is in our file! Please check your corresponding customer id")?;
            self.show_records(&matches)?;

            let answer = self.text("Are you a returning customer (yes/no)?")?;
            match ReturningAnswer::parse(&answer) {
                ReturningAnswer::Yes => {
                    self.show_records(&matches)?;
                }
                ReturningAnswer::No => self.enroll_with_car(&lname).await?,
                ReturningAnswer::Other(answer) => {
                    // Neither yes nor no: continue without enrolling or confirming.
                    warn!(%answer, "unrecognized returning-customer answer, continuing");
                }
            }
        }

        let customer_id = loop {
            let id = self.integer("Print a valid customer id:")?;
            if self.store.customer_exists(id, lname.as_str()).await? {
                break id;
            }
        };

        let cars = self.store.cars_owned_by(customer_id).await?;
        self.show_records(&cars)?;
        self.say("Your cars are displayed above with the corresponding vin")?;

        // Any known VIN is accepted, not only the ones listed above.
        let car_vin = loop {
            let vin = self.validated(
                "Select which car you'd like to make a service request on by typing in the correct vin:",
                Vin::parse,
            )?;
            if self.store.car_exists(vin.as_str()).await? {
                break vin;
            }
        };

        let date = self.text("What is the date?")?;
        let odometer = self.integer("What is the odometer reading of the car (print only digits)?")?;
        let complain = self.text("What is the complaint you have for your car?")?;

        let request = self
            .store
            .insert_service_request(NewServiceRequest {
                customer_id,
                car_vin,
                date,
                odometer,
                complain,
            })
            .await?;
        info!(rid = request.rid, customer_id, vin = %request.car_vin, "opened service request");

        self.show_records(std::slice::from_ref(&request))?;
        Ok(request)
    }

    async fn enroll_with_car(&mut self, lname: &LastName) -> Result<()> {
        self.say(NOT_ENROLLED)?;
        self.enroll_customer(Some(lname)).await?;
        self.add_car().await?;
        self.say("You have now been added to the database!")?;

        let matches = self.store.customers_by_last_name(lname.as_str()).await?;
        self.show_records(&matches)?;
        Ok(())
    }

    /// Menu 5: close an existing request with a mechanic, date, comment and bill
    pub async fn close_service_request(&mut self) -> Result<ClosedRequest> {
        let rid = loop {
            let rid = self.integer(
                "Enter a valid Service Request RID (if we keep asking, the id is not valid):",
            )?;
            if self.store.service_request_exists(rid).await? {
                break rid;
            }
        };

        let mid = loop {
            let mid = self.integer(
                "Enter a valid Mechanic ID that worked on your car (if we keep asking, the id is not valid):",
            )?;
            if self.store.mechanic_exists(mid).await? {
                break mid;
            }
        };

        let date = self.validated(
            "What is the date (MUST BE IN FORMAT month-day-year)?",
            ServiceDate::parse,
        )?;
        let comment = self.text("Any comments?")?;
        let bill = self.integer("what is the bill (MUST BE DIGITS)?")?;

        let closed = self
            .store
            .insert_closed_request(NewClosedRequest {
                rid,
                mid,
                date,
                comment,
                bill,
            })
            .await?;
        info!(wid = closed.wid, rid, mid, "closed service request");

        self.show_records(std::slice::from_ref(&closed))?;
        Ok(closed)
    }
}
