pub mod connection;
pub mod id_generator;
pub mod json_store;
