//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// API base path
pub const DEFAULT_API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// UPLOAD DEFAULTS
// =============================================================================

/// Directory uploaded hookup photos are written to
pub const DEFAULT_HOOKUPS_UPLOAD_DIR: &str = "public/hookups";

/// URL path stored photos are served under
pub const DEFAULT_HOOKUPS_PUBLIC_PATH: &str = "/hookups";

/// Maximum accepted image size in bytes (5 MB)
pub const DEFAULT_MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Slack on top of the image limit for multipart framing
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Multipart field that carries the photo
pub const IMAGE_FIELD: &str = "image";

/// Prefix of every generated photo filename
pub const IMAGE_FILENAME_PREFIX: &str = "hookup--";

/// Extension of every generated photo filename
pub const IMAGE_FILENAME_EXTENSION: &str = "jpeg";

/// Upper bound of the random filename suffix (inclusive)
pub const IMAGE_FILENAME_RANDOM_MAX: u32 = 9999;

/// Rejection message for uploads with a non-image content type
pub const NOT_AN_IMAGE_MESSAGE: &str = "Not an image! Please upload only image files.";

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";
}

// =============================================================================
// HOOKUP SETTINGS
// =============================================================================

/// Gender identifiers
pub mod genders {
    pub const MALE: &str = "male";
    pub const FEMALE: &str = "female";

    /// All genders a round can be opened for
    pub const ALL: &[&str] = &[MALE, FEMALE];
}

/// Round status identifiers
pub mod statuses {
    pub const ACTIVE: &str = "active";
    pub const INACTIVE: &str = "inactive";

    /// All round statuses
    pub const ALL: &[&str] = &[ACTIVE, INACTIVE];
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
