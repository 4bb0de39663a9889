use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::DomainError;

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Receptionist,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Receptionist => "receptionist",
        }
    }

    /// Hotels, room types and rooms may be edited by admins and managers
    pub fn can_manage_inventory(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "receptionist" => Ok(Self::Receptionist),
            other => Err(DomainError::Validation(format!("Unknown role '{}'", other))),
        }
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Wrong guesses after which every outstanding code of a user is void
pub const MAX_OTP_ATTEMPTS: i32 = 5;

/// One-time password reset code. Only the SHA-256 hash of the code is kept.
#[derive(Clone, Debug)]
pub struct PasswordReset {
    pub id: i32,
    pub user_id: String,
    pub otp_hash: String,
    pub expires_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub failed_attempts: i32,
    pub created_at: DateTime<Utc>,
}

impl PasswordReset {
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.consumed_at.is_none()
            && now < self.expires_at
            && self.failed_attempts < MAX_OTP_ATTEMPTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn role_parsing() {
        assert_eq!("Manager".parse::<UserRole>().unwrap(), UserRole::Manager);
        assert!("viewer".parse::<UserRole>().is_err());
        assert!(!UserRole::Receptionist.can_manage_inventory());
        assert!(UserRole::Manager.can_manage_inventory());
    }

    #[test]
    fn reset_usable_until_expiry_or_consumed() {
        let now = Utc::now();
        let mut reset = PasswordReset {
            id: 1,
            user_id: "u1".into(),
            otp_hash: "abc".into(),
            expires_at: now + Duration::minutes(15),
            consumed_at: None,
            failed_attempts: 0,
            created_at: now,
        };
        assert!(reset.is_usable(now));
        assert!(!reset.is_usable(now + Duration::minutes(16)));

        reset.failed_attempts = MAX_OTP_ATTEMPTS;
        assert!(!reset.is_usable(now));
        reset.failed_attempts = 0;

        reset.consumed_at = Some(now);
        assert!(!reset.is_usable(now));
    }
}
