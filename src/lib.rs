pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod gate;
pub mod identity;
pub mod navigation;
pub mod portal;
pub mod routes;
pub mod shell;
