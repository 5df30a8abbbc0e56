pub mod table;
pub mod table_runner;
