use super::UserRole;
use crate::shared::PageRequest;

#[derive(Debug, Clone, Default)]
pub struct GetUserDto {
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub page: PageRequest,
    pub sort_by: Option<String>,
}
