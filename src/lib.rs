pub mod batch;
pub mod config;
pub mod convert;
pub mod table;
