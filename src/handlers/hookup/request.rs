//! Hookup request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    constants::{genders, statuses, DEFAULT_PAGE_SIZE},
    error::AppResult,
    models::{Gender, HookupFilter, HookupStatus, SortOrder},
};

/// Create round request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHookupRequest {
    /// male or female
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
}

/// Set winner request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWinnerRequest {
    /// Winning user's ID
    #[validate(custom(function = "validate_user_id"))]
    pub user: Uuid,
}

/// Set status request
#[derive(Debug, Deserialize, Validate)]
pub struct SetStatusRequest {
    /// active or inactive
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

/// Gender query parameter, defaulting to male
#[derive(Debug, Default, Deserialize)]
pub struct GenderQuery {
    pub gender: Option<String>,
}

impl GenderQuery {
    pub fn gender(&self) -> AppResult<Gender> {
        match self.gender.as_deref() {
            None | Some("") => Ok(Gender::default()),
            Some(raw) => raw.parse(),
        }
    }
}

/// List rounds query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListHookupsQuery {
    pub gender: Option<Gender>,
    pub status: Option<HookupStatus>,
    pub winner: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub order: Option<SortOrder>,
}

impl From<ListHookupsQuery> for HookupFilter {
    fn from(query: ListHookupsQuery) -> Self {
        Self {
            gender: query.gender,
            status: query.status,
            winner_id: query.winner,
            page: query.page.unwrap_or(1).max(1),
            per_page: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            order: query.order.unwrap_or_default(),
        }
    }
}

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    if genders::ALL.contains(&gender) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_gender");
        err.message = Some("Gender must be male or female".into());
        Err(err)
    }
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if statuses::ALL.contains(&status) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_status");
        err.message = Some("Status must be active or inactive".into());
        Err(err)
    }
}

fn validate_user_id(user: &Uuid) -> Result<(), ValidationError> {
    if user.is_nil() {
        let mut err = ValidationError::new("invalid_user");
        err.message = Some("A winner user ID is required".into());
        Err(err)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        assert!(CreateHookupRequest { gender: "male".into() }.validate().is_ok());
        assert!(CreateHookupRequest { gender: "female".into() }.validate().is_ok());
        assert!(CreateHookupRequest { gender: "other".into() }.validate().is_err());
    }

    #[test]
    fn test_status_request_validation() {
        assert!(SetStatusRequest { status: "inactive".into() }.validate().is_ok());
        assert!(SetStatusRequest { status: "done".into() }.validate().is_err());
    }

    #[test]
    fn test_winner_request_rejects_nil() {
        assert!(UpdateWinnerRequest { user: Uuid::nil() }.validate().is_err());
        assert!(UpdateWinnerRequest { user: Uuid::new_v4() }.validate().is_ok());
    }

    #[test]
    fn test_gender_query_defaults_to_male() {
        assert_eq!(GenderQuery::default().gender().unwrap(), Gender::Male);
        assert_eq!(
            GenderQuery { gender: Some(String::new()) }.gender().unwrap(),
            Gender::Male
        );
        assert_eq!(
            GenderQuery { gender: Some("female".into()) }.gender().unwrap(),
            Gender::Female
        );
        assert!(GenderQuery { gender: Some("x".into()) }.gender().is_err());
    }

    #[test]
    fn test_list_query_into_filter() {
        let filter: HookupFilter = ListHookupsQuery {
            status: Some(HookupStatus::Inactive),
            page: Some(0),
            ..Default::default()
        }
        .into();

        assert_eq!(filter.status, Some(HookupStatus::Inactive));
        assert_eq!(filter.page, 1);
        assert_eq!(filter.per_page, DEFAULT_PAGE_SIZE);
        assert_eq!(filter.order, SortOrder::Desc);
    }
}
