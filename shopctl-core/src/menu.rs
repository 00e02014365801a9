//! Main menu: numbered options, dispatch and the session loop

use std::io::Write;

use tracing::{debug, info};

use crate::error::{Result, ShopError};
use crate::input::LineInput;
use crate::report::Report;
use crate::shop::Shop;
use crate::store::ShopStore;

/// A numbered main-menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCustomer,
    AddMechanic,
    AddCar,
    InsertServiceRequest,
    CloseServiceRequest,
    ListCustomersWithBillLessThan100,
    ListCustomersWithMoreThan20Cars,
    ListCarsBefore1995With50000Milles,
    ListKCarsWithTheMostServices,
    ListCustomersInDescendingOrderOfTheirTotalBill,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 11] = [
        Self::AddCustomer,
        Self::AddMechanic,
        Self::AddCar,
        Self::InsertServiceRequest,
        Self::CloseServiceRequest,
        Self::ListCustomersWithBillLessThan100,
        Self::ListCustomersWithMoreThan20Cars,
        Self::ListCarsBefore1995With50000Milles,
        Self::ListKCarsWithTheMostServices,
        Self::ListCustomersInDescendingOrderOfTheirTotalBill,
        Self::Exit,
    ];

    pub fn from_number(number: i32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|choice| *choice == self)
            .map_or(0, |index| index + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AddCustomer => "AddCustomer",
            Self::AddMechanic => "AddMechanic",
            Self::AddCar => "AddCar",
            Self::InsertServiceRequest => "InsertServiceRequest",
            Self::CloseServiceRequest => "CloseServiceRequest",
            Self::ListCustomersWithBillLessThan100 => "ListCustomersWithBillLessThan100",
            Self::ListCustomersWithMoreThan20Cars => "ListCustomersWithMoreThan20Cars",
            Self::ListCarsBefore1995With50000Milles => "ListCarsBefore1995With50000Milles",
            Self::ListKCarsWithTheMostServices => "ListKCarsWithTheMostServices",
            Self::ListCustomersInDescendingOrderOfTheirTotalBill => {
                "ListCustomersInDescendingOrderOfTheirTotalBill"
            }
            Self::Exit => "< EXIT",
        }
    }
}

/// What the loop does after one menu round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

impl<S, I, W> Shop<S, I, W>
where
    S: ShopStore,
    I: LineInput,
    W: Write,
{
    /// Show the menu and run actions until the user exits or input ends.
    ///
    /// Abandoned actions return to the menu; any other error ends the loop.
    pub async fn run_menu(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let choice = match self.integer("Please make your choice: ") {
                Ok(number) => number,
                Err(ShopError::Abandoned) => {
                    info!("input ended at the main menu");
                    return Ok(());
                }
                Err(err) => return Err(err),
            };

            let Some(choice) = MenuChoice::from_number(choice) else {
                self.say(format!("There is no option {}", choice))?;
                continue;
            };

            match self.dispatch(choice).await {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(ShopError::Abandoned) => {
                    debug!(action = choice.label(), "action abandoned");
                    self.say("Cancelled, back to the main menu.")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub fn print_menu(&mut self) -> Result<()> {
        self.say("MAIN MENU")?;
        self.say("---------")?;
        for choice in MenuChoice::ALL {
            self.say(format!("{}. {}", choice.number(), choice.label()))?;
        }
        Ok(())
    }

    /// Run a single menu action
    pub async fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        debug!(action = choice.label(), "dispatching");
        match choice {
            MenuChoice::AddCustomer => {
                self.add_customer().await?;
            }
            MenuChoice::AddMechanic => {
                self.add_mechanic().await?;
            }
            MenuChoice::AddCar => {
                self.add_car().await?;
            }
            MenuChoice::InsertServiceRequest => {
                self.insert_service_request().await?;
            }
            MenuChoice::CloseServiceRequest => {
                self.close_service_request().await?;
            }
            MenuChoice::ListCustomersWithBillLessThan100 => {
                self.report(Report::CustomersWithBillUnder100).await?;
            }
            MenuChoice::ListCustomersWithMoreThan20Cars => {
                self.report(Report::CustomersWithMoreThan20Cars).await?;
            }
            MenuChoice::ListCarsBefore1995With50000Milles => {
                self.report(Report::CarsBefore1995Under50000Miles).await?;
            }
            MenuChoice::ListKCarsWithTheMostServices => {
                self.list_cars_with_most_services().await?;
            }
            MenuChoice::ListCustomersInDescendingOrderOfTheirTotalBill => {
                self.report(Report::CustomersByTotalBillDesc).await?;
            }
            MenuChoice::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Run a report and print it; returns the number of rows
    pub async fn report(&mut self, report: Report) -> Result<usize> {
        let table = self.store.run_report(report).await?;
        let rows = self.show(&table)?;
        debug!(report = report.name(), rows, "report printed");
        Ok(rows)
    }

    /// Menu 9: cars with more than k service requests
    pub async fn list_cars_with_most_services(&mut self) -> Result<usize> {
        let min_services = self.integer("Enter minimum number of services: ")?;
        self.report(Report::CarsWithMoreServicesThan {
            min_services: i64::from(min_services),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_round_trip() {
        for (index, choice) in MenuChoice::ALL.iter().enumerate() {
            assert_eq!(choice.number(), index + 1);
            assert_eq!(MenuChoice::from_number(index as i32 + 1), Some(*choice));
        }
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        assert_eq!(MenuChoice::from_number(0), None);
        assert_eq!(MenuChoice::from_number(12), None);
        assert_eq!(MenuChoice::from_number(-1), None);
        assert_eq!(MenuChoice::from_number(11), Some(MenuChoice::Exit));
    }
}
