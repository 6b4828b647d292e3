pub mod citizen_handler;
pub mod report_api_handler;

pub use citizen_handler::*;
pub use report_api_handler::*;
