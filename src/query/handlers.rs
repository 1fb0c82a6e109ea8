// region:    --- Imports
use crate::auction::model::Job;
use crate::error::MarketplaceResult;
use crate::store::AuctionStore;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

/// 목록 조회 기본 개수
const JOB_LIST_LIMIT: i64 = 10;

// region:    --- Views

/// 작업 조회 응답 모델
#[derive(Debug, Serialize, Deserialize)]
pub struct JobView {
    pub job_id: i64,
    pub description: String,
    pub requirements: String,
    pub poster_id: i64,
    pub expire_at: DateTime<Utc>,
}

impl From<Job> for JobView {
    fn from(job: Job) -> Self {
        JobView {
            job_id: job.id,
            description: job.description,
            requirements: job.requirements,
            poster_id: job.poster_id,
            expire_at: job.expire_at,
        }
    }
}

// endregion: --- Views

// region:    --- Query Handlers

/// 최저 입찰가 조회 (입찰이 없으면 초기값 그대로)
pub async fn get_lowest_bid_amount(
    store: &impl AuctionStore,
    job_id: i64,
) -> MarketplaceResult<f64> {
    info!("{:<12} --> 최저 입찰가 조회 id: {}", "Query", job_id);
    let job = store.get_job(job_id).await?;
    Ok(job.lowest_bid_amount)
}

/// 입찰 수 조회
pub async fn get_bid_count(store: &impl AuctionStore, job_id: i64) -> MarketplaceResult<i64> {
    info!("{:<12} --> 입찰 수 조회 id: {}", "Query", job_id);
    let job = store.get_job(job_id).await?;
    Ok(job.bid_count)
}

/// 경매 마감 시각 조회
pub async fn get_auction_expiration(
    store: &impl AuctionStore,
    job_id: i64,
) -> MarketplaceResult<DateTime<Utc>> {
    info!("{:<12} --> 경매 마감 시각 조회 id: {}", "Query", job_id);
    let job = store.get_job(job_id).await?;
    Ok(job.expire_at)
}

/// 경매 남은 시간 조회
/// 마감이 지난 뒤에는 음수가 되며, 호출자가 만료로 해석한다 (오류 아님)
pub async fn get_time_remaining(
    store: &impl AuctionStore,
    job_id: i64,
) -> MarketplaceResult<Duration> {
    info!("{:<12} --> 경매 남은 시간 조회 id: {}", "Query", job_id);
    let job = store.get_job(job_id).await?;
    Ok(job.expire_at - Utc::now())
}

/// 작업 상세 조회
pub async fn get_job(store: &impl AuctionStore, job_id: i64) -> MarketplaceResult<JobView> {
    info!("{:<12} --> 작업 조회 id: {}", "Query", job_id);
    let job = store.get_job(job_id).await?;
    Ok(JobView::from(job))
}

/// 최근 등록된 작업 조회
pub async fn get_recent_jobs(store: &impl AuctionStore) -> MarketplaceResult<Vec<JobView>> {
    info!("{:<12} --> 최근 작업 조회", "Query");
    let jobs = store.recent_jobs(JOB_LIST_LIMIT).await?;
    Ok(jobs.into_iter().map(JobView::from).collect())
}

/// 입찰이 활발한 Open 작업 조회
pub async fn get_active_jobs(store: &impl AuctionStore) -> MarketplaceResult<Vec<JobView>> {
    info!("{:<12} --> 활성 작업 조회", "Query");
    let jobs = store.active_jobs(JOB_LIST_LIMIT).await?;
    Ok(jobs.into_iter().map(JobView::from).collect())
}

// endregion: --- Query Handlers
