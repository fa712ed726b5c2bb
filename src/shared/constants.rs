/// Page size for public catalog listings
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Page size for admin listings
pub const ADMIN_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Staff role - can manage the catalog through the admin endpoints
pub const ROLE_STAFF: &str = "staff";
