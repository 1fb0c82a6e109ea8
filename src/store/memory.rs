// region:    --- Imports
use crate::auction::model::{Actor, Bid, Job, JobStatus, NewActor, NewBid, NewJob};
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::store::{AuctionStore, ClosingOutcome};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
// endregion: --- Imports

// region:    --- Memory Auction Store

/// 경매 저장소 구현체 (인메모리)
///
/// Postgres 구현체와 같은 낙관적 version 규칙을 따르는 저장소.
/// 커밋 단위는 단일 잠금 아래에서 수행되어 원자적이고, 조회-커밋 사이에
/// 끼어든 다른 커밋은 version 불일치(Conflict)로 드러난다.
/// 테스트 대역 용도.
#[derive(Default)]
pub struct MemoryAuctionStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    actors: HashMap<i64, Actor>,
    jobs: HashMap<i64, Job>,
    bids: Vec<Bid>,
    next_actor_id: i64,
    next_job_id: i64,
    next_bid_id: i64,
}

impl MemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 최저 입찰 전순서 (금액, 입찰 시각, id)
fn cheapest_of(bids: &[Bid], job_id: i64) -> Option<Bid> {
    bids.iter()
        .filter(|b| b.job_id == job_id)
        .min_by(|a, b| {
            a.amount
                .total_cmp(&b.amount)
                .then_with(|| a.bid_time.cmp(&b.bid_time))
                .then_with(|| a.id.cmp(&b.id))
        })
        .cloned()
}

#[async_trait]
impl AuctionStore for MemoryAuctionStore {
    async fn get_job(&self, job_id: i64) -> MarketplaceResult<Job> {
        let inner = self.inner.lock().unwrap();
        inner
            .jobs
            .get(&job_id)
            .cloned()
            .ok_or(MarketplaceError::NotFound("Job"))
    }

    async fn create_job(&self, new_job: NewJob) -> MarketplaceResult<Job> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_job_id += 1;
        let job = Job {
            id: inner.next_job_id,
            description: new_job.description,
            requirements: new_job.requirements,
            poster_id: new_job.poster_id,
            winner_id: None,
            posted_at: new_job.posted_at,
            expire_at: new_job.expire_at,
            lowest_bid_amount: new_job.lowest_bid_amount,
            bid_count: new_job.bid_count,
            status: new_job.status,
            version: 0,
        };
        inner.jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn create_bid(&self, job: &Job, new_bid: NewBid) -> MarketplaceResult<Bid> {
        let mut inner = self.inner.lock().unwrap();

        // 상태와 version 재검증 후 캐시 필드 갱신과 입찰 기록을 함께 반영
        let stored = inner
            .jobs
            .get_mut(&job.id)
            .ok_or(MarketplaceError::NotFound("Job"))?;

        if stored.status == JobStatus::Closed {
            return Err(MarketplaceError::AuctionExpired);
        }
        if stored.version != job.version {
            return Err(MarketplaceError::Conflict);
        }

        stored.lowest_bid_amount = job.lowest_bid_amount;
        stored.bid_count = job.bid_count;
        stored.version += 1;

        inner.next_bid_id += 1;
        let bid = Bid {
            id: inner.next_bid_id,
            job_id: new_bid.job_id,
            bidder_id: new_bid.bidder_id,
            amount: new_bid.amount,
            bid_time: new_bid.bid_time,
        };
        inner.bids.push(bid.clone());
        Ok(bid)
    }

    async fn cheapest_bid(&self, job_id: i64) -> MarketplaceResult<Option<Bid>> {
        let inner = self.inner.lock().unwrap();
        Ok(cheapest_of(&inner.bids, job_id))
    }

    async fn bids_for_job(&self, job_id: i64) -> MarketplaceResult<Vec<Bid>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .bids
            .iter()
            .filter(|b| b.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn jobs_expired_and_open(&self, now: DateTime<Utc>) -> MarketplaceResult<Vec<Job>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .jobs
            .values()
            .filter(|j| j.status == JobStatus::Open && j.expire_at <= now)
            .cloned()
            .collect())
    }

    async fn close_job(&self, job_id: i64) -> MarketplaceResult<Option<ClosingOutcome>> {
        let mut inner = self.inner.lock().unwrap();

        let winning_bid = cheapest_of(&inner.bids, job_id);

        let Some(stored) = inner.jobs.get_mut(&job_id) else {
            return Ok(None);
        };
        // 이미 종료된 작업에 대한 재실행은 멱등 (no-op)
        if stored.status == JobStatus::Closed {
            return Ok(None);
        }

        stored.status = JobStatus::Closed;
        stored.winner_id = winning_bid.as_ref().map(|b| b.bidder_id);
        stored.version += 1;

        Ok(Some(ClosingOutcome {
            job: stored.clone(),
            winning_bid,
        }))
    }

    async fn get_actor(&self, actor_id: i64) -> MarketplaceResult<Actor> {
        let inner = self.inner.lock().unwrap();
        inner
            .actors
            .get(&actor_id)
            .cloned()
            .ok_or(MarketplaceError::NotFound("User"))
    }

    async fn find_actor_by_username(&self, username: &str) -> MarketplaceResult<Option<Actor>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .actors
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_actor_by_email(&self, email: &str) -> MarketplaceResult<Option<Actor>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.actors.values().find(|a| a.email == email).cloned())
    }

    async fn create_actor(&self, new_actor: NewActor) -> MarketplaceResult<Actor> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_actor_id += 1;
        let actor = Actor {
            id: inner.next_actor_id,
            username: new_actor.username,
            password_hash: new_actor.password_hash,
            email: new_actor.email,
            role: new_actor.role,
        };
        inner.actors.insert(actor.id, actor.clone());
        Ok(actor)
    }

    async fn recent_jobs(&self, limit: i64) -> MarketplaceResult<Vec<Job>> {
        let inner = self.inner.lock().unwrap();
        let mut jobs: Vec<Job> = inner.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        jobs.truncate(limit as usize);
        Ok(jobs)
    }

    async fn active_jobs(&self, limit: i64) -> MarketplaceResult<Vec<Job>> {
        let inner = self.inner.lock().unwrap();
        let mut jobs: Vec<Job> = inner
            .jobs
            .values()
            .filter(|j| j.status == JobStatus::Open)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.bid_count.cmp(&a.bid_count));
        jobs.truncate(limit as usize);
        Ok(jobs)
    }
}

// endregion: --- Memory Auction Store
