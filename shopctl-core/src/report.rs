//! Fixed read-only reports offered from the menu

/// Summed bill below which a customer shows up in [`Report::CustomersWithBillUnder100`]
pub const LOW_BILL_LIMIT: i64 = 100;
/// Latest model year for the old low-mileage car report
pub const OLD_CAR_MAX_YEAR: i32 = 1995;
/// Odometer reading below which a service request counts as low mileage
pub const LOW_MILEAGE_LIMIT: i32 = 50_000;

/// One of the canned aggregation queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Customers whose closed-request bills sum to less than 100
    CustomersWithBillUnder100,
    /// Menu entry 7. Runs the same query as [`Report::CarsBefore1995Under50000Miles`];
    /// kept as-is until someone decides what "more than 20 cars" should list.
    CustomersWithMoreThan20Cars,
    /// Cars from 1995 or earlier with a service request under 50000 miles
    CarsBefore1995Under50000Miles,
    /// Cars with more than `min_services` service requests
    CarsWithMoreServicesThan { min_services: i64 },
    /// Customers ordered by their total closed-request bill, highest first
    CustomersByTotalBillDesc,
}

impl Report {
    /// Output column names, in order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::CustomersWithBillUnder100 => &["id", "fname", "total_bill"],
            Self::CustomersWithMoreThan20Cars | Self::CarsBefore1995Under50000Miles => {
                &["make", "model", "year"]
            }
            Self::CarsWithMoreServicesThan { .. } => &["make", "model", "service_count"],
            Self::CustomersByTotalBillDesc => &["fname", "lname", "total_bill"],
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::CustomersWithBillUnder100 => "customers_with_bill_under_100",
            Self::CustomersWithMoreThan20Cars => "customers_with_more_than_20_cars",
            Self::CarsBefore1995Under50000Miles => "cars_before_1995_under_50000_miles",
            Self::CarsWithMoreServicesThan { .. } => "cars_with_most_services",
            Self::CustomersByTotalBillDesc => "customers_by_total_bill_desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicated_menu_entries_share_columns() {
        assert_eq!(
            Report::CustomersWithMoreThan20Cars.columns(),
            Report::CarsBefore1995Under50000Miles.columns()
        );
        assert_ne!(
            Report::CustomersWithMoreThan20Cars.name(),
            Report::CarsBefore1995Under50000Miles.name()
        );
    }
}
