//! Hookup service
//!
//! Round lifecycle rules live here: one active round per gender, one photo
//! per user per round, winners picked only among submitters.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        repositories::{HookupRepository, RowLock},
        test_connection,
    },
    error::{AppError, AppResult},
    models::{Gender, Hookup, HookupDetails, HookupFilter, HookupPhoto, HookupStatus, HookupWinner},
};

fn not_found() -> AppError {
    AppError::NotFound("No hookup found with that ID".to_string())
}

/// Operations the hookup routes delegate to
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HookupService: Send + Sync {
    /// Open a new active round for a gender
    async fn create(&self, gender: Gender) -> AppResult<HookupDetails>;

    /// The active round for a gender
    async fn get_active(&self, gender: Gender) -> AppResult<HookupDetails>;

    /// Rounds matching a filter
    async fn get_all(&self, filter: HookupFilter) -> AppResult<Vec<HookupDetails>>;

    /// The most recent winner of each gender
    async fn get_last_winners(&self) -> AppResult<Vec<HookupWinner>>;

    /// Every winner of a gender
    async fn get_all_winners(&self, gender: Gender) -> AppResult<Vec<HookupWinner>>;

    /// Record a user's photo submission
    async fn add(&self, hookup_id: Uuid, user_id: Uuid, image: String) -> AppResult<HookupDetails>;

    /// Pick the winner of a round
    async fn set_winner(&self, hookup_id: Uuid, user_id: Uuid) -> AppResult<HookupDetails>;

    /// Change a round's status
    async fn update_status(&self, hookup_id: Uuid, status: HookupStatus) -> AppResult<HookupDetails>;

    /// Check the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed hookup service
#[derive(Clone)]
pub struct PgHookupService {
    pool: PgPool,
}

impl PgHookupService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn details(&self, hookup: Hookup) -> AppResult<HookupDetails> {
        let photos = HookupRepository::photos(&self.pool, &hookup.id).await?;
        Ok(HookupDetails { hookup, photos })
    }
}

#[async_trait]
impl HookupService for PgHookupService {
    async fn create(&self, gender: Gender) -> AppResult<HookupDetails> {
        let mut tx = self.pool.begin().await?;

        let closed = HookupRepository::deactivate_others(&mut *tx, gender, None).await?;
        let hookup = HookupRepository::create(&mut *tx, gender).await?;

        tx.commit().await?;

        tracing::info!(
            hookup_id = %hookup.id,
            gender = %gender,
            closed_rounds = closed,
            "Hookup round created"
        );

        Ok(HookupDetails {
            hookup,
            photos: Vec::new(),
        })
    }

    async fn get_active(&self, gender: Gender) -> AppResult<HookupDetails> {
        let hookup = HookupRepository::find_active(&self.pool, gender)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No active hookup for {}", gender)))?;

        self.details(hookup).await
    }

    async fn get_all(&self, filter: HookupFilter) -> AppResult<Vec<HookupDetails>> {
        let hookups = HookupRepository::list(&self.pool, &filter).await?;
        let ids: Vec<Uuid> = hookups.iter().map(|h| h.id).collect();

        let mut by_hookup: HashMap<Uuid, Vec<HookupPhoto>> = HashMap::new();
        for photo in HookupRepository::photos_for_many(&self.pool, &ids).await? {
            by_hookup.entry(photo.hookup_id).or_default().push(photo);
        }

        Ok(hookups
            .into_iter()
            .map(|hookup| {
                let photos = by_hookup.remove(&hookup.id).unwrap_or_default();
                HookupDetails { hookup, photos }
            })
            .collect())
    }

    async fn get_last_winners(&self) -> AppResult<Vec<HookupWinner>> {
        HookupRepository::last_winners(&self.pool).await
    }

    async fn get_all_winners(&self, gender: Gender) -> AppResult<Vec<HookupWinner>> {
        HookupRepository::winners(&self.pool, gender).await
    }

    async fn add(&self, hookup_id: Uuid, user_id: Uuid, image: String) -> AppResult<HookupDetails> {
        let mut tx = self.pool.begin().await?;

        // Held until commit so the round cannot be closed under the write
        let hookup = HookupRepository::lock_by_id(&mut *tx, &hookup_id, RowLock::Share)
            .await?
            .ok_or_else(not_found)?;
        if !hookup.is_active() {
            return Err(AppError::Conflict(
                "This hookup is no longer accepting photos".to_string(),
            ));
        }

        HookupRepository::upsert_photo(&mut *tx, &hookup_id, &user_id, &image).await?;

        tx.commit().await?;

        tracing::info!(
            hookup_id = %hookup_id,
            user_id = %user_id,
            image = %image,
            "Hookup photo stored"
        );

        self.details(hookup).await
    }

    async fn set_winner(&self, hookup_id: Uuid, user_id: Uuid) -> AppResult<HookupDetails> {
        let mut tx = self.pool.begin().await?;

        HookupRepository::lock_by_id(&mut *tx, &hookup_id, RowLock::Update)
            .await?
            .ok_or_else(not_found)?;

        if HookupRepository::find_photo(&mut *tx, &hookup_id, &user_id)
            .await?
            .is_none()
        {
            return Err(AppError::InvalidInput(
                "This user has not submitted a photo to this hookup".to_string(),
            ));
        }

        let hookup = HookupRepository::set_winner(&mut *tx, &hookup_id, &user_id).await?;

        tx.commit().await?;

        tracing::info!(hookup_id = %hookup_id, winner_id = %user_id, "Hookup winner set");

        self.details(hookup).await
    }

    async fn update_status(&self, hookup_id: Uuid, status: HookupStatus) -> AppResult<HookupDetails> {
        let mut tx = self.pool.begin().await?;

        let current = HookupRepository::lock_by_id(&mut *tx, &hookup_id, RowLock::Update)
            .await?
            .ok_or_else(not_found)?;

        if status == HookupStatus::Active {
            HookupRepository::deactivate_others(&mut *tx, current.gender, Some(&hookup_id)).await?;
        }
        let hookup = HookupRepository::set_status(&mut *tx, &hookup_id, status).await?;

        tx.commit().await?;

        tracing::info!(
            hookup_id = %hookup_id,
            from = %current.status,
            to = %status,
            "Hookup status changed"
        );

        self.details(hookup).await
    }

    async fn ping(&self) -> AppResult<()> {
        test_connection(&self.pool).await?;
        Ok(())
    }
}
