//! # vault-database
//!
//! PostgreSQL connection management, migrations, the store traits services
//! depend on, and two implementations of them: sqlx repositories and
//! in-memory stores.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{NotificationStore, UserStore, WarrantyCounts, WarrantyStore};
pub use stores::Stores;
