//! shopctl-db: PostgreSQL storage for the shop console
//!
//! Provides [`PgShopStore`], the production [`shopctl_core::ShopStore`],
//! plus connection setup for a single interactive session.

pub mod error;
pub mod pool;
pub mod reports;
pub mod store;

pub use error::{DbError, DbResult};
pub use pool::{connect, connect_with, ConnectionSettings};
pub use store::PgShopStore;
