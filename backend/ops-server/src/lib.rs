pub mod admin;
pub mod bootstrap;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;


pub use crate::bootstrap::{build_validator, hub_config};
pub use crate::error::{Result as ServerErrorResult, ServerError};
pub use crate::routes::build_router;
