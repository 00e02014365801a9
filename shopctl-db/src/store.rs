//! PostgreSQL-backed [`ShopStore`]
//!
//! All statements use bound parameters. Inserts that derive their key from
//! a row count lock the target table for the length of the transaction, so
//! two sessions never compute the same id.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, PgPool, Row};

use shopctl_core::{
    id_from_count, Car, ClosedRequest, Customer, Mechanic, NewCar, NewClosedRequest, NewCustomer,
    NewMechanic, NewServiceRequest, Report, ResultTable, ServiceRequest, ShopStore, ShopTable,
    StoreError, StoreResult, NULL_CELL,
};

use crate::error::{DbError, DbResult};
use crate::reports;

const CUSTOMER_COLUMNS: &str =
    "id, fname::text AS fname, lname::text AS lname, phone::text AS phone, address::text AS address";
const MECHANIC_COLUMNS: &str = "id, fname::text AS fname, lname::text AS lname, experience::int AS experience";
const CAR_COLUMNS: &str = "vin::text AS vin, make::text AS make, model::text AS model, year::int AS year";
const SERVICE_REQUEST_COLUMNS: &str = "rid, customer_id, car_vin::text AS car_vin, \
     to_char(date, 'MM-DD-YYYY') AS date, odometer::int AS odometer, complain::text AS complain";
const CLOSED_REQUEST_COLUMNS: &str =
    "wid, rid, mid, to_char(date, 'MM-DD-YYYY') AS date, comment::text AS comment, bill::int AS bill";

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i32,
    fname: String,
    lname: String,
    phone: String,
    address: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            fname: row.fname,
            lname: row.lname,
            phone: row.phone,
            address: row.address,
        }
    }
}

#[derive(Debug, FromRow)]
struct MechanicRow {
    id: i32,
    fname: String,
    lname: String,
    experience: i32,
}

impl From<MechanicRow> for Mechanic {
    fn from(row: MechanicRow) -> Self {
        Self {
            id: row.id,
            fname: row.fname,
            lname: row.lname,
            experience: row.experience,
        }
    }
}

#[derive(Debug, FromRow)]
struct CarRow {
    vin: String,
    make: String,
    model: String,
    year: i32,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Self {
            vin: row.vin,
            make: row.make,
            model: row.model,
            year: row.year,
        }
    }
}

#[derive(Debug, FromRow)]
struct ServiceRequestRow {
    rid: i32,
    customer_id: i32,
    car_vin: String,
    date: Option<String>,
    odometer: i32,
    complain: Option<String>,
}

impl From<ServiceRequestRow> for ServiceRequest {
    fn from(row: ServiceRequestRow) -> Self {
        Self {
            rid: row.rid,
            customer_id: row.customer_id,
            car_vin: row.car_vin,
            date: row.date.unwrap_or_default(),
            odometer: row.odometer,
            complain: row.complain.unwrap_or_default(),
        }
    }
}

#[derive(Debug, FromRow)]
struct ClosedRequestRow {
    wid: i32,
    rid: i32,
    mid: i32,
    date: Option<String>,
    comment: Option<String>,
    bill: i32,
}

impl From<ClosedRequestRow> for ClosedRequest {
    fn from(row: ClosedRequestRow) -> Self {
        Self {
            wid: row.wid,
            rid: row.rid,
            mid: row.mid,
            date: row.date.unwrap_or_default(),
            comment: row.comment.unwrap_or_default(),
            bill: row.bill,
        }
    }
}

/// Count rows after taking a lock that blocks other writers until commit
async fn locked_count(conn: &mut PgConnection, table: ShopTable) -> DbResult<i64> {
    let lock = format!("LOCK TABLE {} IN SHARE ROW EXCLUSIVE MODE", table.as_str());
    sqlx::query(&lock).execute(&mut *conn).await?;

    let count = format!("SELECT COUNT(*) FROM {}", table.as_str());
    let rows: i64 = sqlx::query_scalar(&count).fetch_one(&mut *conn).await?;
    Ok(rows)
}

fn next_id(entity: &'static str, count: i64) -> DbResult<i32> {
    id_from_count(entity, count).map_err(|_| DbError::IdOverflow { entity, count })
}

/// Stringify every column of a result row, NULL as [`NULL_CELL`]
fn text_cells(row: &PgRow) -> DbResult<Vec<String>> {
    (0..row.len())
        .map(|index| -> DbResult<String> {
            let cell: Option<String> = row.try_get(index)?;
            Ok(cell.unwrap_or_else(|| NULL_CELL.to_string()))
        })
        .collect()
}

/// The shop's PostgreSQL store
#[derive(Debug, Clone)]
pub struct PgShopStore {
    pool: PgPool,
}

impl PgShopStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the session connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn count_rows(&self, table: ShopTable) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
        Ok(sqlx::query_scalar(&sql).fetch_one(&self.pool).await?)
    }

    async fn create_customer(&self, customer: NewCustomer) -> DbResult<Customer> {
        let mut tx = self.pool.begin().await?;
        let id = next_id("customer", locked_count(&mut *tx, ShopTable::Customer).await?)?;

        let sql = format!(
            "INSERT INTO customer (id, fname, lname, phone, address) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {CUSTOMER_COLUMNS}"
        );
        let row: CustomerRow = sqlx::query_as(&sql)
            .bind(id)
            .bind(&customer.fname)
            .bind(&customer.lname)
            .bind(&customer.phone)
            .bind(&customer.address)
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::on_insert("customer", id))?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn create_mechanic(&self, mechanic: NewMechanic) -> DbResult<Mechanic> {
        let mut tx = self.pool.begin().await?;
        let id = next_id("mechanic", locked_count(&mut *tx, ShopTable::Mechanic).await?)?;

        let sql = format!(
            "INSERT INTO mechanic (id, fname, lname, experience) \
             VALUES ($1, $2, $3, $4) RETURNING {MECHANIC_COLUMNS}"
        );
        let row: MechanicRow = sqlx::query_as(&sql)
            .bind(id)
            .bind(&mechanic.fname)
            .bind(&mechanic.lname)
            .bind(mechanic.experience)
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::on_insert("mechanic", id))?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn create_car(&self, car: NewCar) -> DbResult<Car> {
        let sql = format!(
            "INSERT INTO car (vin, make, model, year) VALUES ($1, $2, $3, $4) RETURNING {CAR_COLUMNS}"
        );
        let row: CarRow = sqlx::query_as(&sql)
            .bind(car.vin.as_str())
            .bind(&car.make)
            .bind(&car.model)
            .bind(car.year)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::on_insert("car", car.vin.as_str()))?;
        Ok(row.into())
    }

    async fn create_service_request(&self, request: NewServiceRequest) -> DbResult<ServiceRequest> {
        let mut tx = self.pool.begin().await?;
        let rid = next_id(
            "service request",
            locked_count(&mut *tx, ShopTable::ServiceRequest).await?,
        )?;

        let sql = format!(
            "INSERT INTO service_request (rid, customer_id, car_vin, date, odometer, complain) \
             VALUES ($1, $2, $3, CAST($4 AS DATE), $5, $6) RETURNING {SERVICE_REQUEST_COLUMNS}"
        );
        let row: ServiceRequestRow = sqlx::query_as(&sql)
            .bind(rid)
            .bind(request.customer_id)
            .bind(request.car_vin.as_str())
            .bind(&request.date)
            .bind(request.odometer)
            .bind(&request.complain)
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::on_insert("service request", rid))?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn create_closed_request(&self, closed: NewClosedRequest) -> DbResult<ClosedRequest> {
        let mut tx = self.pool.begin().await?;
        let count = locked_count(&mut *tx, ShopTable::ClosedRequest).await?;
        let wid = next_id("closed request", count.saturating_add(1))?;

        let sql = format!(
            "INSERT INTO closed_request (wid, rid, mid, date, comment, bill) \
             VALUES ($1, $2, $3, CAST($4 AS DATE), $5, $6) RETURNING {CLOSED_REQUEST_COLUMNS}"
        );
        let row: ClosedRequestRow = sqlx::query_as(&sql)
            .bind(wid)
            .bind(closed.rid)
            .bind(closed.mid)
            .bind(closed.date.as_str())
            .bind(&closed.comment)
            .bind(closed.bill)
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::on_insert("closed request", wid))?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn find_customers_by_last_name(&self, lname: &str) -> DbResult<Vec<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customer WHERE lname = $1 ORDER BY id");
        let rows: Vec<CustomerRow> = sqlx::query_as(&sql).bind(lname).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_cars_owned_by(&self, customer_id: i32) -> DbResult<Vec<Car>> {
        let rows: Vec<CarRow> = sqlx::query_as(
            r#"
            SELECT C.vin::text AS vin, C.make::text AS make, C.model::text AS model, C.year::int AS year
            FROM car C
            JOIN owns O ON O.car_vin = C.vin
            WHERE O.customer_id = $1
            ORDER BY C.vin
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn exists(&self, sql: &str, key: i32) -> DbResult<bool> {
        Ok(sqlx::query_scalar(sql).bind(key).fetch_one(&self.pool).await?)
    }

    async fn report_table(&self, report: Report) -> DbResult<ResultTable> {
        let rows = reports::query(report).fetch_all(&self.pool).await?;

        let mut table = ResultTable::new(report.columns().iter().copied());
        for row in &rows {
            table.push_row(text_cells(row)?);
        }
        tracing::debug!(report = report.name(), rows = table.len(), "report fetched");
        Ok(table)
    }
}

#[async_trait]
impl ShopStore for PgShopStore {
    async fn count(&self, table: ShopTable) -> StoreResult<i64> {
        Ok(self.count_rows(table).await?)
    }

    async fn insert_customer(&self, customer: NewCustomer) -> StoreResult<Customer> {
        Ok(self.create_customer(customer).await?)
    }

    async fn insert_mechanic(&self, mechanic: NewMechanic) -> StoreResult<Mechanic> {
        Ok(self.create_mechanic(mechanic).await?)
    }

    async fn insert_car(&self, car: NewCar) -> StoreResult<Car> {
        Ok(self.create_car(car).await?)
    }

    async fn insert_service_request(
        &self,
        request: NewServiceRequest,
    ) -> StoreResult<ServiceRequest> {
        Ok(self.create_service_request(request).await?)
    }

    async fn insert_closed_request(&self, closed: NewClosedRequest) -> StoreResult<ClosedRequest> {
        Ok(self.create_closed_request(closed).await?)
    }

    async fn customers_by_last_name(&self, lname: &str) -> StoreResult<Vec<Customer>> {
        Ok(self.find_customers_by_last_name(lname).await?)
    }

    async fn customer_exists(&self, id: i32, lname: &str) -> StoreResult<bool> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM customer WHERE id = $1 AND lname = $2)",
        )
        .bind(id)
        .bind(lname)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from)?;
        Ok(found)
    }

    async fn cars_owned_by(&self, customer_id: i32) -> StoreResult<Vec<Car>> {
        Ok(self.find_cars_owned_by(customer_id).await?)
    }

    async fn car_exists(&self, vin: &str) -> StoreResult<bool> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM car WHERE vin = $1)")
            .bind(vin)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from)?;
        Ok(found)
    }

    async fn mechanic_exists(&self, id: i32) -> StoreResult<bool> {
        Ok(self
            .exists("SELECT EXISTS(SELECT 1 FROM mechanic WHERE id = $1)", id)
            .await?)
    }

    async fn service_request_exists(&self, rid: i32) -> StoreResult<bool> {
        Ok(self
            .exists("SELECT EXISTS(SELECT 1 FROM service_request WHERE rid = $1)", rid)
            .await?)
    }

    async fn run_report(&self, report: Report) -> StoreResult<ResultTable> {
        self.report_table(report).await.map_err(StoreError::from)
    }
}
