pub mod class;
pub mod config;
pub mod ds;
pub mod namespace;
