use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative roles carried in session tokens.
///
/// The string codes are the wire/database representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    SuperAdmin = 0,
    #[default]
    Admin = 1,
    Security = 2,
    Maintenance = 3,
    Principal = 4,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            SuperAdmin => "SUPER_ADMIN",
            Admin => "ADMIN",
            Security => "SECURITY",
            Maintenance => "MAINTENANCE",
            Principal => "PRINCIPAL",
        }
    }

    #[inline]
    pub const fn is_super_admin(&self) -> bool {
        matches!(self, UserRole::SuperAdmin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        use UserRole::*;
        match id {
            0 => Some(SuperAdmin),
            1 => Some(Admin),
            2 => Some(Security),
            3 => Some(Maintenance),
            4 => Some(Principal),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "SUPER_ADMIN" => Some(SuperAdmin),
            "ADMIN" => Some(Admin),
            "SECURITY" => Some(Security),
            "MAINTENANCE" => Some(Maintenance),
            "PRINCIPAL" => Some(Principal),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(0), Some(UserRole::SuperAdmin));
        assert_eq!(UserRole::from_id(1), Some(UserRole::Admin));
        assert_eq!(UserRole::from_id(2), Some(UserRole::Security));
        assert_eq!(UserRole::from_id(3), Some(UserRole::Maintenance));
        assert_eq!(UserRole::from_id(4), Some(UserRole::Principal));
        assert_eq!(UserRole::from_id(99), None);
    }

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("SUPER_ADMIN"), Some(UserRole::SuperAdmin));
        assert_eq!(UserRole::from_code("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("SECURITY"), Some(UserRole::Security));
        assert_eq!(UserRole::from_code("MAINTENANCE"), Some(UserRole::Maintenance));
        assert_eq!(UserRole::from_code("PRINCIPAL"), Some(UserRole::Principal));
        assert_eq!(UserRole::from_code("guest"), None);
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::SuperAdmin.to_string(), "SUPER_ADMIN");
        assert_eq!(UserRole::Admin.to_string(), "ADMIN");
    }

    #[test]
    fn test_roundtrip() {
        for role in [
            UserRole::SuperAdmin,
            UserRole::Admin,
            UserRole::Security,
            UserRole::Maintenance,
            UserRole::Principal,
        ] {
            assert_eq!(UserRole::from_id(role.id()), Some(role));
            assert_eq!(UserRole::from_code(role.code()), Some(role));
        }
    }
}
