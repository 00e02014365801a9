//! SQL for the fixed menu reports
//!
//! Every output column is cast to text so rows can be printed without
//! knowing their types.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

use shopctl_core::report::{LOW_BILL_LIMIT, LOW_MILEAGE_LIMIT, OLD_CAR_MAX_YEAR};
use shopctl_core::Report;

const CUSTOMERS_WITH_BILL_UNDER: &str = r#"
    SELECT C.id::text AS id, C.fname::text AS fname, SUM(CR.bill)::text AS total_bill
    FROM customer C
    JOIN service_request SR ON SR.customer_id = C.id
    JOIN closed_request CR ON CR.rid = SR.rid
    GROUP BY C.id
    HAVING SUM(CR.bill) < $1
    ORDER BY C.id
"#;

// Shared by menu entries 7 and 8.
const OLD_LOW_MILEAGE_CARS: &str = r#"
    SELECT C.make::text AS make, C.model::text AS model, C.year::text AS year
    FROM car C
    JOIN service_request SR ON SR.car_vin = C.vin
    WHERE C.year <= $1 AND SR.odometer < $2
    GROUP BY C.vin
    ORDER BY C.vin
"#;

const CARS_WITH_MORE_SERVICES_THAN: &str = r#"
    SELECT C.make::text AS make, C.model::text AS model, COUNT(SR.rid)::text AS service_count
    FROM car C
    JOIN service_request SR ON SR.car_vin = C.vin
    GROUP BY C.vin
    HAVING COUNT(SR.rid) > $1
    ORDER BY COUNT(SR.rid) DESC, C.vin
"#;

const CUSTOMERS_BY_TOTAL_BILL_DESC: &str = r#"
    SELECT C.fname::text AS fname, C.lname::text AS lname, SUM(CR.bill)::text AS total_bill
    FROM customer C
    JOIN service_request SR ON SR.customer_id = C.id
    JOIN closed_request CR ON CR.rid = SR.rid
    GROUP BY C.id
    ORDER BY SUM(CR.bill) DESC, C.id
"#;

/// The bound statement for `report`
pub fn query(report: Report) -> Query<'static, Postgres, PgArguments> {
    match report {
        Report::CustomersWithBillUnder100 => {
            sqlx::query(CUSTOMERS_WITH_BILL_UNDER).bind(LOW_BILL_LIMIT)
        }
        Report::CustomersWithMoreThan20Cars | Report::CarsBefore1995Under50000Miles => {
            sqlx::query(OLD_LOW_MILEAGE_CARS)
                .bind(OLD_CAR_MAX_YEAR)
                .bind(LOW_MILEAGE_LIMIT)
        }
        Report::CarsWithMoreServicesThan { min_services } => {
            sqlx::query(CARS_WITH_MORE_SERVICES_THAN).bind(min_services)
        }
        Report::CustomersByTotalBillDesc => sqlx::query(CUSTOMERS_BY_TOTAL_BILL_DESC),
    }
}

/// Statement text for `report`, for logging
pub fn sql(report: Report) -> &'static str {
    match report {
        Report::CustomersWithBillUnder100 => CUSTOMERS_WITH_BILL_UNDER,
        Report::CustomersWithMoreThan20Cars | Report::CarsBefore1995Under50000Miles => {
            OLD_LOW_MILEAGE_CARS
        }
        Report::CarsWithMoreServicesThan { .. } => CARS_WITH_MORE_SERVICES_THAN,
        Report::CustomersByTotalBillDesc => CUSTOMERS_BY_TOTAL_BILL_DESC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicated_entries_run_identical_sql() {
        assert_eq!(
            sql(Report::CustomersWithMoreThan20Cars),
            sql(Report::CarsBefore1995Under50000Miles)
        );
    }

    #[test]
    fn report_sql_is_parameterized() {
        assert!(sql(Report::CarsWithMoreServicesThan { min_services: 3 }).contains("> $1"));
        assert!(!sql(Report::CustomersWithBillUnder100).contains("100"));
    }
}
