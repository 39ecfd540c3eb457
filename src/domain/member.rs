use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

/// Postal address embedded in members and deliveries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Address {
    pub city: Option<String>,
    pub street: Option<String>,
    pub zipcode: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub age: i32,
    pub address: Address,
    pub team_id: Option<Uuid>,
}

impl NewMember {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;
        if self.age < 0 {
            return Err(DomainError::InvalidInput(format!(
                "age must not be negative, got {}",
                self.age
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MemberView {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub address: Address,
    pub team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the `members LEFT JOIN teams` projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTeamView {
    pub member_id: Uuid,
    pub name: String,
    pub age: i32,
    pub team_id: Option<Uuid>,
    pub team_name: Option<String>,
}

/// Rejects names that are empty once trimmed.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput("name must not be blank".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_member(name: &str, age: i32) -> NewMember {
        NewMember {
            name: name.to_string(),
            age,
            address: Address::default(),
            team_id: None,
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            new_member("   ", 20).validate(),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn negative_age_is_rejected() {
        assert!(matches!(
            new_member("kim", -1).validate(),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn valid_member_passes() {
        assert!(new_member("kim", 0).validate().is_ok());
    }
}
