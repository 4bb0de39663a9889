use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Cannot {action} a booking with status '{status}'")]
    InvalidTransition {
        action: &'static str,
        status: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }

    /// Message that is safe to show to API clients.
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound {
                entity,
                field,
                value,
            } => format!("{} with {} '{}' not found", entity, field, value),
            Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg) => msg.clone(),
            Self::InvalidTransition { .. } => self.to_string(),
            Self::Storage(_) => "An internal error occurred".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        InfraError::from(e).into()
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_are_transient_and_hidden() {
        let e: DomainError = sea_orm::DbErr::Custom("disk I/O error".into()).into();
        assert!(e.is_transient());
        assert_eq!(e.public_message(), "An internal error occurred");
        assert!(e.to_string().contains("disk I/O error"));
    }

    #[test]
    fn not_found_message_names_entity() {
        let e = DomainError::not_found("Room", "id", 7);
        assert_eq!(e.public_message(), "Room with id '7' not found");
        assert!(!e.is_transient());
    }

    #[test]
    fn invalid_transition_message() {
        let e = DomainError::InvalidTransition {
            action: "check out",
            status: "booked".into(),
        };
        assert_eq!(
            e.public_message(),
            "Cannot check out a booking with status 'booked'"
        );
    }
}
