pub mod schema;
pub mod temporal;
pub mod types;
