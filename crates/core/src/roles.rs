//! Well-known role name constants.
//!
//! These must match the values stored in `admin_users.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// Roles allowed to create, edit and delete published records.
pub const WRITE_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Whether `role` may mutate reports and recommendations.
pub fn can_write(role: &str) -> bool {
    WRITE_ROLES.contains(&role)
}
