//! PostgreSQL store tests
//!
//! Each test builds the shop tables in its own scratch schema. Run with
//! `DATABASE_URL=postgres://... cargo test -p shopctl-db -- --ignored`.

use std::sync::atomic::{AtomicUsize, Ordering};

use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;

use shopctl_core::{
    NewCar, NewClosedRequest, NewCustomer, NewMechanic, NewServiceRequest, Report, ServiceDate,
    ShopStore, ShopTable, StoreError, Vin,
};
use shopctl_db::pool::SESSION_DATESTYLE;
use shopctl_db::{connect_with, PgShopStore};

const SCHEMA: &str = include_str!("fixtures/schema.sql");

static NEXT_SCHEMA: AtomicUsize = AtomicUsize::new(0);

struct Scratch {
    admin: PgPool,
    schema: String,
    store: PgShopStore,
}

impl Scratch {
    async fn new() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let base: PgConnectOptions = url.parse().expect("valid DATABASE_URL");
        let admin = connect_with(base.clone(), 1).await.expect("admin pool");

        let schema = format!(
            "shopctl_test_{}_{}",
            std::process::id(),
            NEXT_SCHEMA.fetch_add(1, Ordering::SeqCst)
        );
        sqlx::query(&format!("CREATE SCHEMA {schema}"))
            .execute(&admin)
            .await
            .expect("create schema");

        let options = base.options([
            ("search_path", schema.as_str()),
            ("datestyle", SESSION_DATESTYLE),
        ]);
        let pool = connect_with(options, 2).await.expect("store pool");
        sqlx::raw_sql(SCHEMA).execute(&pool).await.expect("load schema");

        Self {
            admin,
            schema,
            store: PgShopStore::new(pool),
        }
    }

    async fn drop(self) {
        self.store.close().await;
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("drop schema");
    }

    async fn customer(&self, fname: &str, lname: &str) -> i32 {
        self.store
            .insert_customer(NewCustomer {
                fname: fname.into(),
                lname: lname.into(),
                phone: "(555)555-0100".into(),
                address: "1 Main St".into(),
            })
            .await
            .expect("insert customer")
            .id
    }

    async fn car(&self, vin: &str, year: i32) {
        self.store
            .insert_car(NewCar {
                vin: Vin::parse(vin).unwrap(),
                make: "Ford".into(),
                model: format!("Model-{vin}"),
                year,
            })
            .await
            .expect("insert car");
    }

    async fn request(&self, customer_id: i32, vin: &str, odometer: i32) -> i32 {
        self.store
            .insert_service_request(NewServiceRequest {
                customer_id,
                car_vin: Vin::parse(vin).unwrap(),
                date: "01-02-1999".into(),
                odometer,
                complain: "noise".into(),
            })
            .await
            .expect("insert request")
            .rid
    }

    async fn mechanic(&self) -> i32 {
        self.store
            .insert_mechanic(NewMechanic {
                fname: "Ada".into(),
                lname: "Wrench".into(),
                experience: 12,
            })
            .await
            .expect("insert mechanic")
            .id
    }

    async fn close(&self, rid: i32, mid: i32, bill: i32) -> i32 {
        self.store
            .insert_closed_request(NewClosedRequest {
                rid,
                mid,
                date: ServiceDate::parse("02-03-1999").unwrap(),
                comment: "fixed".into(),
                bill,
            })
            .await
            .expect("close request")
            .wid
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn ids_follow_row_counts() {
    let db = Scratch::new().await;

    assert_eq!(db.customer("Ann", "Lee").await, 0);
    assert_eq!(db.customer("Bob", "Lee").await, 1);
    assert_eq!(db.mechanic().await, 0);
    db.car("VIN1", 1990).await;
    assert_eq!(db.request(0, "VIN1", 100).await, 0);
    assert_eq!(db.request(1, "VIN1", 200).await, 1);

    assert_eq!(db.close(0, 0, 40).await, 1);
    assert_eq!(db.close(1, 0, 60).await, 2);
    assert_eq!(db.store.count(ShopTable::ClosedRequest).await.unwrap(), 2);

    db.drop().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn lookups_strip_char_padding() {
    let db = Scratch::new().await;
    let id = db.customer("Ann", "Lee").await;

    let found = db.store.customers_by_last_name("Lee").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].lname, "Lee");
    assert_eq!(found[0].fname, "Ann");

    assert!(db.store.customer_exists(id, "Lee").await.unwrap());
    assert!(!db.store.customer_exists(id, "Smith").await.unwrap());
    assert!(!db.store.customer_exists(id + 1, "Lee").await.unwrap());

    db.drop().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn dates_round_trip_as_month_day_year() {
    let db = Scratch::new().await;
    let customer = db.customer("Ann", "Lee").await;
    db.car("VIN1", 1990).await;
    let rid = db.request(customer, "VIN1", 100).await;

    let closed = db
        .store
        .insert_closed_request(NewClosedRequest {
            rid,
            mid: db.mechanic().await,
            date: ServiceDate::parse("12-31-2023").unwrap(),
            comment: "done".into(),
            bill: 10,
        })
        .await
        .unwrap();
    assert_eq!(closed.date, "12-31-2023");

    db.drop().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_vin_is_a_conflict() {
    let db = Scratch::new().await;
    db.car("VIN1", 1990).await;

    let err = db
        .store
        .insert_car(NewCar {
            vin: Vin::parse("vin1").unwrap(),
            make: "Ford".into(),
            model: "T".into(),
            year: 1990,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict { entity: "car", .. }));

    db.drop().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn owned_cars_come_from_owns() {
    let db = Scratch::new().await;
    let customer = db.customer("Ann", "Lee").await;
    db.car("VIN1", 1990).await;
    db.car("VIN2", 1991).await;
    sqlx::query("INSERT INTO owns (ownership_id, customer_id, car_vin) VALUES (0, $1, 'VIN2')")
        .bind(customer)
        .execute(db.store.pool())
        .await
        .unwrap();

    let cars = db.store.cars_owned_by(customer).await.unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].vin, "VIN2");
    assert!(db.store.car_exists("VIN1").await.unwrap());
    assert!(!db.store.car_exists("VIN3").await.unwrap());

    db.drop().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn reports_match_shop_rules() {
    let db = Scratch::new().await;
    let ann = db.customer("Ann", "Lee").await;
    let bob = db.customer("Bob", "Ray").await;
    let mid = db.mechanic().await;
    db.car("OLD1", 1990).await;
    db.car("NEW1", 2010).await;

    let r0 = db.request(ann, "OLD1", 30_000).await;
    let r1 = db.request(bob, "NEW1", 10_000).await;
    let r2 = db.request(bob, "NEW1", 20_000).await;
    db.close(r0, mid, 70).await;
    db.close(r1, mid, 400).await;
    db.close(r2, mid, 100).await;

    let under = db.store.run_report(Report::CustomersWithBillUnder100).await.unwrap();
    assert_eq!(under.columns, vec!["id", "fname", "total_bill"]);
    assert_eq!(under.rows, vec![vec!["0".to_string(), "Ann".into(), "70".into()]]);

    let old = db.store.run_report(Report::CarsBefore1995Under50000Miles).await.unwrap();
    let duplicate = db.store.run_report(Report::CustomersWithMoreThan20Cars).await.unwrap();
    assert_eq!(old, duplicate);
    assert_eq!(old.rows, vec![vec!["Ford".to_string(), "Model-OLD1".into(), "1990".into()]]);

    let busy = db
        .store
        .run_report(Report::CarsWithMoreServicesThan { min_services: 1 })
        .await
        .unwrap();
    assert_eq!(busy.rows, vec![vec!["Ford".to_string(), "Model-NEW1".into(), "2".into()]]);

    let desc = db.store.run_report(Report::CustomersByTotalBillDesc).await.unwrap();
    let totals: Vec<&str> = desc.rows.iter().map(|row| row[2].as_str()).collect();
    assert_eq!(totals, vec!["500", "70"]);

    db.drop().await;
}
