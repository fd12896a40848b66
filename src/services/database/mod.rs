// Database service module
// SQLite connection and schema for the roster document store

mod connection;
mod schema;

pub use connection::Database;
