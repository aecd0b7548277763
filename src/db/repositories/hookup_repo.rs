//! Hookup repository

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Gender, Hookup, HookupFilter, HookupPhoto, HookupStatus, HookupWinner, SortOrder},
};

/// Row lock taken by [`HookupRepository::lock_by_id`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLock {
    Share,
    Update,
}

/// Repository for hookup database operations
pub struct HookupRepository;

impl HookupRepository {
    /// Create a new active round
    pub async fn create<'e, E>(executor: E, gender: Gender) -> AppResult<Hookup>
    where
        E: PgExecutor<'e>,
    {
        let hookup = sqlx::query_as::<_, Hookup>(
            r#"
            INSERT INTO hookups (gender, status)
            VALUES ($1, 'active')
            RETURNING *
            "#,
        )
        .bind(gender)
        .fetch_one(executor)
        .await?;

        Ok(hookup)
    }

    /// Find round by ID
    pub async fn find_by_id<'e, E>(executor: E, id: &Uuid) -> AppResult<Option<Hookup>>
    where
        E: PgExecutor<'e>,
    {
        let hookup = sqlx::query_as::<_, Hookup>(r#"SELECT * FROM hookups WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(hookup)
    }

    /// Find a round and take a row lock until the transaction ends
    ///
    /// `FOR SHARE` keeps the status stable while a photo is written;
    /// `FOR UPDATE` is for callers that change the row themselves.
    pub async fn lock_by_id<'e, E>(executor: E, id: &Uuid, lock: RowLock) -> AppResult<Option<Hookup>>
    where
        E: PgExecutor<'e>,
    {
        let sql = match lock {
            RowLock::Share => r#"SELECT * FROM hookups WHERE id = $1 FOR SHARE"#,
            RowLock::Update => r#"SELECT * FROM hookups WHERE id = $1 FOR UPDATE"#,
        };

        let hookup = sqlx::query_as::<_, Hookup>(sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(hookup)
    }

    /// Find the active round for a gender
    pub async fn find_active(pool: &PgPool, gender: Gender) -> AppResult<Option<Hookup>> {
        let hookup = sqlx::query_as::<_, Hookup>(
            r#"SELECT * FROM hookups WHERE gender = $1 AND status = 'active'"#,
        )
        .bind(gender)
        .fetch_optional(pool)
        .await?;

        Ok(hookup)
    }

    /// Deactivate every active round of a gender except `keep`
    pub async fn deactivate_others<'e, E>(
        executor: E,
        gender: Gender,
        keep: Option<&Uuid>,
    ) -> AppResult<u64>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            r#"
            UPDATE hookups
            SET status = 'inactive', updated_at = NOW()
            WHERE gender = $1
              AND status = 'active'
              AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(gender)
        .bind(keep)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Set the status of a round
    pub async fn set_status<'e, E>(executor: E, id: &Uuid, status: HookupStatus) -> AppResult<Hookup>
    where
        E: PgExecutor<'e>,
    {
        let hookup = sqlx::query_as::<_, Hookup>(
            r#"
            UPDATE hookups
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(hookup)
    }

    /// Set the winner of a round
    pub async fn set_winner<'e, E>(executor: E, id: &Uuid, user_id: &Uuid) -> AppResult<Hookup>
    where
        E: PgExecutor<'e>,
    {
        let hookup = sqlx::query_as::<_, Hookup>(
            r#"
            UPDATE hookups
            SET winner_id = $2, winner_set_at = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(hookup)
    }

    /// List rounds matching a filter
    pub async fn list(pool: &PgPool, filter: &HookupFilter) -> AppResult<Vec<Hookup>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM hookups WHERE TRUE");

        if let Some(gender) = filter.gender {
            query.push(" AND gender = ").push_bind(gender);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(winner_id) = filter.winner_id {
            query.push(" AND winner_id = ").push_bind(winner_id);
        }

        query.push(match filter.order {
            SortOrder::Asc => " ORDER BY created_at ASC",
            SortOrder::Desc => " ORDER BY created_at DESC",
        });
        query
            .push(" LIMIT ")
            .push_bind(i64::from(filter.limit()))
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let hookups = query.build_query_as::<Hookup>().fetch_all(pool).await?;

        Ok(hookups)
    }

    /// Photos submitted to a round, oldest first
    pub async fn photos(pool: &PgPool, hookup_id: &Uuid) -> AppResult<Vec<HookupPhoto>> {
        let photos = sqlx::query_as::<_, HookupPhoto>(
            r#"
            SELECT * FROM hookup_photos
            WHERE hookup_id = $1
            ORDER BY submitted_at ASC
            "#,
        )
        .bind(hookup_id)
        .fetch_all(pool)
        .await?;

        Ok(photos)
    }

    /// Photos submitted to any of the given rounds
    pub async fn photos_for_many(pool: &PgPool, hookup_ids: &[Uuid]) -> AppResult<Vec<HookupPhoto>> {
        if hookup_ids.is_empty() {
            return Ok(Vec::new());
        }

        let photos = sqlx::query_as::<_, HookupPhoto>(
            r#"
            SELECT * FROM hookup_photos
            WHERE hookup_id = ANY($1)
            ORDER BY submitted_at ASC
            "#,
        )
        .bind(hookup_ids)
        .fetch_all(pool)
        .await?;

        Ok(photos)
    }

    /// Find a user's photo in a round
    pub async fn find_photo<'e, E>(
        executor: E,
        hookup_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<Option<HookupPhoto>>
    where
        E: PgExecutor<'e>,
    {
        let photo = sqlx::query_as::<_, HookupPhoto>(
            r#"SELECT * FROM hookup_photos WHERE hookup_id = $1 AND user_id = $2"#,
        )
        .bind(hookup_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

        Ok(photo)
    }

    /// Insert or replace a user's photo in a round
    pub async fn upsert_photo<'e, E>(
        executor: E,
        hookup_id: &Uuid,
        user_id: &Uuid,
        image: &str,
    ) -> AppResult<HookupPhoto>
    where
        E: PgExecutor<'e>,
    {
        let photo = sqlx::query_as::<_, HookupPhoto>(
            r#"
            INSERT INTO hookup_photos (hookup_id, user_id, image)
            VALUES ($1, $2, $3)
            ON CONFLICT (hookup_id, user_id)
            DO UPDATE SET image = EXCLUDED.image, submitted_at = NOW()
            RETURNING *
            "#,
        )
        .bind(hookup_id)
        .bind(user_id)
        .bind(image)
        .fetch_one(executor)
        .await?;

        Ok(photo)
    }

    /// Most recent winner of each gender
    pub async fn last_winners(pool: &PgPool) -> AppResult<Vec<HookupWinner>> {
        let winners = sqlx::query_as::<_, HookupWinner>(
            r#"
            SELECT * FROM (
                SELECT DISTINCT ON (h.gender)
                    h.id AS hookup_id,
                    h.gender,
                    h.winner_id AS user_id,
                    p.image,
                    h.winner_set_at AS decided_at
                FROM hookups h
                LEFT JOIN hookup_photos p
                    ON p.hookup_id = h.id AND p.user_id = h.winner_id
                WHERE h.winner_id IS NOT NULL AND h.winner_set_at IS NOT NULL
                ORDER BY h.gender, h.winner_set_at DESC
            ) latest
            ORDER BY decided_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(winners)
    }

    /// Every winner of a gender, newest decision first
    pub async fn winners(pool: &PgPool, gender: Gender) -> AppResult<Vec<HookupWinner>> {
        let winners = sqlx::query_as::<_, HookupWinner>(
            r#"
            SELECT
                h.id AS hookup_id,
                h.gender,
                h.winner_id AS user_id,
                p.image,
                h.winner_set_at AS decided_at
            FROM hookups h
            LEFT JOIN hookup_photos p
                ON p.hookup_id = h.id AND p.user_id = h.winner_id
            WHERE h.gender = $1 AND h.winner_id IS NOT NULL AND h.winner_set_at IS NOT NULL
            ORDER BY h.winner_set_at DESC
            "#,
        )
        .bind(gender)
        .fetch_all(pool)
        .await?;

        Ok(winners)
    }
}
