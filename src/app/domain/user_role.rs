use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Site-wide role stored on the user record. Only `Admin` may enter the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Parse the stored role column. Unknown values never grant admin.
    pub fn from_column(value: &str) -> Self {
        value.parse().unwrap_or(UserRole::User)
    }

    pub fn is_admin(self) -> bool {
        self == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_admin_marker() {
        assert_eq!(UserRole::from_column("admin"), UserRole::Admin);
        assert!(UserRole::from_column("admin").is_admin());
    }

    #[test]
    fn unknown_role_is_plain_user() {
        assert_eq!(UserRole::from_column("ADMIN"), UserRole::User);
        assert_eq!(UserRole::from_column("superuser"), UserRole::User);
        assert_eq!(UserRole::from_column(""), UserRole::User);
    }
}
