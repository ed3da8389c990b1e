use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A person who can be registered for events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    /// Unique across participants
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(input: CreateParticipant) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the present fields and bump `updated_at`
    pub fn apply_update(&mut self, update: UpdateParticipant) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a participant
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateParticipant {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

/// DTO for updating a participant
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateParticipant {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_participant_validation() {
        let valid = CreateParticipant {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateParticipant {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_apply_update_keeps_absent_fields() {
        let mut participant = Participant::new(CreateParticipant {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        });
        let created_at = participant.created_at;

        participant.apply_update(UpdateParticipant {
            name: Some("Ada Lovelace".to_string()),
            email: None,
        });

        assert_eq!(participant.name, "Ada Lovelace");
        assert_eq!(participant.email, "ada@example.com");
        assert_eq!(participant.created_at, created_at);
    }
}
