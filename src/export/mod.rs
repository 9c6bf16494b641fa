//! Durable export of training data

mod csv_log;

pub use csv_log::CsvLogger;
