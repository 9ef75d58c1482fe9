pub mod manager;
pub mod models;
pub mod schema;
pub mod store;

pub use manager::DatabaseManager;
pub use store::PgMirrorStore;
