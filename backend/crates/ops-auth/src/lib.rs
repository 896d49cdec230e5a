pub mod claims;
pub mod error;
pub mod jwt_validator;
pub mod open_validator;
pub mod token_validator;

pub use claims::Claims;
pub use error::{AuthError, Result};
pub use jwt_validator::JwtValidator;
pub use open_validator::OpenTokenValidator;
pub use token_validator::TokenValidator;
