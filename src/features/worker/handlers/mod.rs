pub mod worker_handler;

pub use worker_handler::*;
