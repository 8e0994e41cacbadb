// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - manages the menu, categories and user accounts
pub const ROLE_ADMIN: &str = "admin";

/// Default role for newly registered users
pub const ROLE_USER: &str = "user";

// =============================================================================
// VALIDATION LIMITS
// =============================================================================

/// Maximum length of a category name (matches the VARCHAR(45) column)
pub const CATEGORY_NAME_MAX_LEN: u64 = 45;
