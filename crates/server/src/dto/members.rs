//! # Member DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Member creation payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name:  String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name:   String,
    #[validate(length(max = 100, message = "Middle name too long"))]
    pub middle_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email:       Option<String>,
    #[validate(length(max = 32, message = "Phone number too long"))]
    pub phone:       Option<String>,
    #[validate(length(max = 100, message = "Position too long"))]
    pub position:    Option<String>,
    #[validate(length(max = 100, message = "Department too long"))]
    pub department:  Option<String>,
    /// Organization-wide unique identifier
    #[validate(length(min = 1, max = 32, message = "Employee ID is required"))]
    pub employee_id: String,
}

/// Member update payload; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "First name cannot be empty"))]
    pub first_name:  Option<String>,
    #[validate(length(min = 1, max = 100, message = "Last name cannot be empty"))]
    pub last_name:   Option<String>,
    #[validate(length(max = 100, message = "Middle name too long"))]
    pub middle_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email:       Option<String>,
    #[validate(length(max = 32, message = "Phone number too long"))]
    pub phone:       Option<String>,
    #[validate(length(max = 100, message = "Position too long"))]
    pub position:    Option<String>,
    #[validate(length(max = 100, message = "Department too long"))]
    pub department:  Option<String>,
}

/// Member details returned to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id:          uuid::Uuid,
    pub first_name:  String,
    pub last_name:   String,
    pub middle_name: Option<String>,
    pub email:       Option<String>,
    pub phone:       Option<String>,
    pub position:    Option<String>,
    pub department:  Option<String>,
    pub employee_id: String,
    pub status:      String,
    pub created_at:  chrono::DateTime<chrono::Utc>,
}

impl From<entity::members::Model> for MemberResponse {
    fn from(member: entity::members::Model) -> Self {
        Self {
            id:          member.id,
            first_name:  member.first_name,
            last_name:   member.last_name,
            middle_name: member.middle_name,
            email:       member.email,
            phone:       member.phone,
            position:    member.position,
            department:  member.department,
            employee_id: member.employee_id,
            status:      member.status.to_string(),
            created_at:  member.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_member_requires_employee_id() {
        let request = CreateMemberRequest {
            first_name:  "Luis".to_string(),
            last_name:   "Santos".to_string(),
            middle_name: None,
            email:       None,
            phone:       None,
            position:    None,
            department:  None,
            employee_id: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
