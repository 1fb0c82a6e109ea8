// region:    --- Imports
use crate::auction::model::{Actor, Bid, Job, NewActor, NewBid, NewJob};
use crate::database::DatabaseManager;
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::store::{queries, AuctionStore, ClosingOutcome};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

// region:    --- Postgres Auction Store

/// 경매 저장소 구현체 (PostgreSQL)
///
/// 같은 Job 을 겨냥한 동시 쓰기는 job.version 컬럼의 낙관적 비교로
/// 직렬화된다. 커밋 단위 안에서 상태와 version 을 같은 UPDATE 문으로
/// 재검증하므로 부분 반영은 관찰되지 않는다.
pub struct PostgresAuctionStore {
    db: Arc<DatabaseManager>,
}

impl PostgresAuctionStore {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// 캐시 필드 갱신이 0 행에 적용된 경우의 원인 판별
    /// 작업이 사라졌으면 NotFound, 이미 종료됐으면 AuctionExpired,
    /// 그 외에는 version 불일치로 Conflict
    async fn diagnose_update_miss(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: i64,
    ) -> MarketplaceError {
        let status = sqlx::query_scalar::<_, String>(queries::GET_JOB_STATUS)
            .bind(job_id)
            .fetch_optional(&mut **tx)
            .await;

        match status {
            Ok(None) => MarketplaceError::NotFound("Job"),
            Ok(Some(status)) if status == "CLOSED" => MarketplaceError::AuctionExpired,
            Ok(Some(_)) => MarketplaceError::Conflict,
            Err(e) => MarketplaceError::Store(e),
        }
    }
}

#[async_trait]
impl AuctionStore for PostgresAuctionStore {
    async fn get_job(&self, job_id: i64) -> MarketplaceResult<Job> {
        sqlx::query_as::<_, Job>(queries::GET_JOB)
            .bind(job_id)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or(MarketplaceError::NotFound("Job"))
    }

    async fn create_job(&self, new_job: NewJob) -> MarketplaceResult<Job> {
        let job = sqlx::query_as::<_, Job>(queries::INSERT_JOB)
            .bind(&new_job.description)
            .bind(&new_job.requirements)
            .bind(new_job.poster_id)
            .bind(new_job.posted_at)
            .bind(new_job.expire_at)
            .bind(new_job.lowest_bid_amount)
            .bind(new_job.bid_count)
            .bind(new_job.status.as_str())
            .fetch_one(self.db.pool())
            .await?;

        info!("{:<12} --> 작업 생성 완료 id: {}", "Store", job.id);
        Ok(job)
    }

    async fn create_bid(&self, job: &Job, new_bid: NewBid) -> MarketplaceResult<Bid> {
        let job_id = job.id;
        let expected_version = job.version;
        let lowest_bid_amount = job.lowest_bid_amount;
        let bid_count = job.bid_count;

        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    // 캐시 필드 갱신 (version / Open 상태 재검증 포함)
                    let updated = sqlx::query(queries::UPDATE_JOB_AGGREGATES)
                        .bind(lowest_bid_amount)
                        .bind(bid_count)
                        .bind(job_id)
                        .bind(expected_version)
                        .execute(&mut **tx)
                        .await?;

                    if updated.rows_affected() == 0 {
                        return Err(Self::diagnose_update_miss(tx, job_id).await);
                    }

                    // 입찰 기록
                    let bid = sqlx::query_as::<_, Bid>(queries::INSERT_BID)
                        .bind(new_bid.job_id)
                        .bind(new_bid.bidder_id)
                        .bind(new_bid.amount)
                        .bind(new_bid.bid_time)
                        .fetch_one(&mut **tx)
                        .await?;

                    Ok(bid)
                })
            })
            .await
    }

    async fn cheapest_bid(&self, job_id: i64) -> MarketplaceResult<Option<Bid>> {
        let bid = sqlx::query_as::<_, Bid>(queries::CHEAPEST_BID)
            .bind(job_id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(bid)
    }

    async fn bids_for_job(&self, job_id: i64) -> MarketplaceResult<Vec<Bid>> {
        let bids = sqlx::query_as::<_, Bid>(queries::BIDS_FOR_JOB)
            .bind(job_id)
            .fetch_all(self.db.pool())
            .await?;
        Ok(bids)
    }

    async fn jobs_expired_and_open(&self, now: DateTime<Utc>) -> MarketplaceResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(queries::JOBS_EXPIRED_AND_OPEN)
            .bind(now)
            .fetch_all(self.db.pool())
            .await?;
        Ok(jobs)
    }

    async fn close_job(&self, job_id: i64) -> MarketplaceResult<Option<ClosingOutcome>> {
        self.db
            .transaction(|tx| {
                Box::pin(async move {
                    // Open 인 경우에만 종료 전이가 적용된다
                    // 0 행이면 이미 종료됐거나 없는 작업이므로 아무 것도 하지 않는다
                    let closed = sqlx::query_as::<_, Job>(queries::CLOSE_JOB)
                        .bind(job_id)
                        .fetch_optional(&mut **tx)
                        .await?;

                    let Some(job) = closed else {
                        return Ok(None);
                    };

                    // 행 잠금을 잡은 뒤 조회하므로 이후에 커밋되는 입찰은 없다
                    let winning_bid = sqlx::query_as::<_, Bid>(queries::CHEAPEST_BID)
                        .bind(job_id)
                        .fetch_optional(&mut **tx)
                        .await?;

                    let job = match &winning_bid {
                        Some(bid) => {
                            sqlx::query_as::<_, Job>(queries::SET_JOB_WINNER)
                                .bind(bid.bidder_id)
                                .bind(job_id)
                                .fetch_one(&mut **tx)
                                .await?
                        }
                        None => job,
                    };

                    Ok(Some(ClosingOutcome { job, winning_bid }))
                })
            })
            .await
    }

    async fn get_actor(&self, actor_id: i64) -> MarketplaceResult<Actor> {
        sqlx::query_as::<_, Actor>(queries::GET_ACTOR)
            .bind(actor_id)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or(MarketplaceError::NotFound("User"))
    }

    async fn find_actor_by_username(&self, username: &str) -> MarketplaceResult<Option<Actor>> {
        let actor = sqlx::query_as::<_, Actor>(queries::FIND_ACTOR_BY_USERNAME)
            .bind(username)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(actor)
    }

    async fn find_actor_by_email(&self, email: &str) -> MarketplaceResult<Option<Actor>> {
        let actor = sqlx::query_as::<_, Actor>(queries::FIND_ACTOR_BY_EMAIL)
            .bind(email)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(actor)
    }

    async fn create_actor(&self, new_actor: NewActor) -> MarketplaceResult<Actor> {
        let actor = sqlx::query_as::<_, Actor>(queries::INSERT_ACTOR)
            .bind(&new_actor.username)
            .bind(&new_actor.password_hash)
            .bind(&new_actor.email)
            .bind(new_actor.role.as_str())
            .fetch_one(self.db.pool())
            .await?;

        info!("{:<12} --> 사용자 생성 완료 id: {}", "Store", actor.id);
        Ok(actor)
    }

    async fn recent_jobs(&self, limit: i64) -> MarketplaceResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(queries::RECENT_JOBS)
            .bind(limit)
            .fetch_all(self.db.pool())
            .await?;
        Ok(jobs)
    }

    async fn active_jobs(&self, limit: i64) -> MarketplaceResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(queries::ACTIVE_JOBS)
            .bind(limit)
            .fetch_all(self.db.pool())
            .await?;
        Ok(jobs)
    }
}

// endregion: --- Postgres Auction Store
