//! # Mission Authorization DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Mission authorization creation payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMissionRequest {
    /// Member traveling on this mission
    pub member_id:      uuid::Uuid,
    #[validate(length(min = 1, max = 500, message = "Purpose is required"))]
    pub purpose:        String,
    #[validate(length(min = 1, max = 200, message = "Destination is required"))]
    pub destination:    String,
    pub departure_date: NaiveDate,
    pub return_date:    NaiveDate,
}

/// Mission authorization update payload; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMissionRequest {
    pub member_id:      Option<uuid::Uuid>,
    #[validate(length(min = 1, max = 500, message = "Purpose cannot be empty"))]
    pub purpose:        Option<String>,
    #[validate(length(min = 1, max = 200, message = "Destination cannot be empty"))]
    pub destination:    Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date:    Option<NaiveDate>,
}

/// Status filter for mission listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MissionListQuery {
    pub status: Option<String>,
}

/// Mission authorization details returned to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionResponse {
    pub id:                     uuid::Uuid,
    pub member_id:              uuid::Uuid,
    pub authorization_number:   String,
    pub purpose:                String,
    pub destination:            String,
    pub departure_date:         NaiveDate,
    pub return_date:            NaiveDate,
    pub duration_days:          i32,
    pub status:                 String,
    pub authorized_by:          Option<String>,
    pub authorized_by_position: Option<String>,
    pub authorization_date:     Option<NaiveDate>,
    pub created_at:             chrono::DateTime<chrono::Utc>,
    pub updated_at:             chrono::DateTime<chrono::Utc>,
}

impl From<entity::mission_authorizations::Model> for MissionResponse {
    fn from(mission: entity::mission_authorizations::Model) -> Self {
        Self {
            id:                     mission.id,
            member_id:              mission.member_id,
            authorization_number:   mission.authorization_number,
            purpose:                mission.purpose,
            destination:            mission.destination,
            departure_date:         mission.departure_date,
            return_date:            mission.return_date,
            duration_days:          mission.duration_days,
            status:                 mission.status.to_string(),
            authorized_by:          mission.authorized_by,
            authorized_by_position: mission.authorized_by_position,
            authorization_date:     mission.authorization_date,
            created_at:             mission.created_at,
            updated_at:             mission.updated_at,
        }
    }
}

/// Printable authorization document for an approved mission
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionDocumentResponse {
    pub authorization_number:   String,
    pub member_name:            String,
    pub member_position:        Option<String>,
    pub member_department:      Option<String>,
    pub purpose:                String,
    pub destination:            String,
    pub departure_date:         NaiveDate,
    pub return_date:            NaiveDate,
    pub duration_days:          i32,
    pub authorized_by:          Option<String>,
    pub authorized_by_position: Option<String>,
    pub authorization_date:     Option<NaiveDate>,
}

/// Dashboard mission counts for the requesting account
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionStatsResponse {
    pub total:    u64,
    pub draft:    u64,
    pub pending:  u64,
    pub approved: u64,
    /// Approved missions whose departure date is today or later
    pub upcoming: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mission_rejects_empty_purpose() {
        let request = CreateMissionRequest {
            member_id:      uuid::Uuid::new_v4(),
            purpose:        String::new(),
            destination:    "Davao City".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            return_date:    NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_mission_response_serializes_camel_case() {
        let response = MissionStatsResponse::default();
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"total\":0"));
        assert!(json.contains("\"approved\":0"));
    }
}
