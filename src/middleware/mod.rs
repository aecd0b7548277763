//! HTTP middleware

pub mod auth;
pub mod logging;
pub mod upload;
pub mod validation;

pub use auth::{auth_middleware, require_role, AuthenticatedUser, RequiredRole};
pub use logging::{logging_middleware, REQUEST_ID_HEADER};
pub use upload::{ImageStorage, UploadedImage};
pub use validation::ValidatedJson;
