pub mod connection;
pub mod listings;

pub use connection::{init_db, Database};
