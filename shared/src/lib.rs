pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use config::{ClientConfig, CLIENT_CONFIG};
pub use error::{Error, ErrorCode, ErrorResponse};
pub use models::*;
pub use validation::*;
