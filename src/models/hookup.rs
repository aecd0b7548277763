//! Hookup round model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    constants::{genders, statuses, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    error::AppError,
};

/// Gender a round is opened for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "hookup_gender", rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => genders::MALE,
            Self::Female => genders::FEMALE,
        }
    }
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            genders::MALE => Ok(Self::Male),
            genders::FEMALE => Ok(Self::Female),
            other => Err(AppError::InvalidInput(format!(
                "Invalid gender '{}': expected one of {}",
                other,
                genders::ALL.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "hookup_status", rename_all = "lowercase")]
pub enum HookupStatus {
    Active,
    Inactive,
}

impl HookupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => statuses::ACTIVE,
            Self::Inactive => statuses::INACTIVE,
        }
    }
}

impl FromStr for HookupStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            statuses::ACTIVE => Ok(Self::Active),
            statuses::INACTIVE => Ok(Self::Inactive),
            other => Err(AppError::InvalidInput(format!(
                "Invalid status '{}': expected one of {}",
                other,
                statuses::ALL.join(", ")
            ))),
        }
    }
}

impl fmt::Display for HookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hookup round database model
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Hookup {
    pub id: Uuid,
    pub gender: Gender,
    pub status: HookupStatus,
    pub winner_id: Option<Uuid>,
    pub winner_set_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hookup {
    pub fn is_active(&self) -> bool {
        self.status == HookupStatus::Active
    }
}

/// A user's photo entry in a round
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct HookupPhoto {
    pub hookup_id: Uuid,
    pub user_id: Uuid,
    /// Generated filename under the hookups upload directory
    pub image: String,
    pub submitted_at: DateTime<Utc>,
}

/// A round together with its photo entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookupDetails {
    #[serde(flatten)]
    pub hookup: Hookup,
    pub photos: Vec<HookupPhoto>,
}

/// Winner of a finished round
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct HookupWinner {
    pub hookup_id: Uuid,
    pub gender: Gender,
    pub user_id: Uuid,
    /// The winning submission, if it still exists
    pub image: Option<String>,
    pub decided_at: DateTime<Utc>,
}

/// Sort direction by creation time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter for listing rounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookupFilter {
    pub gender: Option<Gender>,
    pub status: Option<HookupStatus>,
    pub winner_id: Option<Uuid>,
    pub page: u32,
    pub per_page: u32,
    pub order: SortOrder,
}

impl Default for HookupFilter {
    fn default() -> Self {
        Self {
            gender: None,
            status: None,
            winner_id: None,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
            order: SortOrder::default(),
        }
    }
}

impl HookupFilter {
    /// Row offset of the requested page
    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * i64::from(self.limit())
    }

    /// Page size clamped to the allowed range
    pub fn limit(&self) -> u32 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }
}
