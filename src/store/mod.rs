// region:    --- Imports
use crate::auction::model::{Actor, Bid, Job, NewActor, NewBid, NewJob};
use crate::error::MarketplaceResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
// endregion: --- Imports

pub mod memory;
pub mod postgres;
pub mod queries;

pub use memory::MemoryAuctionStore;
pub use postgres::PostgresAuctionStore;

// region:    --- Closing Outcome

/// 종료 트랜잭션 결과
/// 낙찰 입찰이 없으면 winning_bid 는 None (winner 미지정)
#[derive(Debug, Clone)]
pub struct ClosingOutcome {
    pub job: Job,
    pub winning_bid: Option<Bid>,
}

// endregion: --- Closing Outcome

// region:    --- Auction Store Trait

/// 경매 저장소 트레이트
///
/// Job 의 캐시 필드(lowest_bid_amount, bid_count)를 건드리는 모든 쓰기는
/// 하나의 원자 단위로 수행되며, 같은 Job 을 겨냥한 동시 쓰기는 version
/// 비교로 감지된다. 비즈니스 규칙 해석은 호출 측(commands, scheduler)의
/// 몫이고, 저장소는 내구성과 원자성만 보장한다.
#[async_trait]
pub trait AuctionStore: Send + Sync {
    /// 작업 조회
    async fn get_job(&self, job_id: i64) -> MarketplaceResult<Job>;

    /// 작업 생성 (id, version 부여)
    async fn create_job(&self, new_job: NewJob) -> MarketplaceResult<Job>;

    /// 입찰 기록 + 작업 캐시 필드 갱신을 하나의 원자 단위로 커밋
    ///
    /// `job` 은 갱신된 캐시 값과 조회 시점의 version 을 담는다.
    /// version 이 다르면 Conflict, 이미 종료된 작업이면 AuctionExpired.
    async fn create_bid(&self, job: &Job, new_bid: NewBid) -> MarketplaceResult<Bid>;

    /// 최저 입찰 조회 (금액 오름차순, 같으면 입찰 시각, 그래도 같으면 id)
    async fn cheapest_bid(&self, job_id: i64) -> MarketplaceResult<Option<Bid>>;

    /// 작업의 전체 입찰 조회
    async fn bids_for_job(&self, job_id: i64) -> MarketplaceResult<Vec<Bid>>;

    /// 마감이 지났고 아직 Open 상태인 작업 조회
    async fn jobs_expired_and_open(&self, now: DateTime<Utc>) -> MarketplaceResult<Vec<Job>>;

    /// 종료 트랜잭션: 상태 재확인 -> Closed 전이 -> 낙찰자 기록을
    /// 하나의 원자 단위로 수행한다. 이미 Closed 면 아무 것도 하지 않고
    /// None 을 돌려준다 (멱등).
    async fn close_job(&self, job_id: i64) -> MarketplaceResult<Option<ClosingOutcome>>;

    /// 사용자 조회
    async fn get_actor(&self, actor_id: i64) -> MarketplaceResult<Actor>;

    /// 사용자명으로 사용자 조회
    async fn find_actor_by_username(&self, username: &str) -> MarketplaceResult<Option<Actor>>;

    /// 이메일로 사용자 조회
    async fn find_actor_by_email(&self, email: &str) -> MarketplaceResult<Option<Actor>>;

    /// 사용자 생성 (id 부여)
    async fn create_actor(&self, new_actor: NewActor) -> MarketplaceResult<Actor>;

    /// 최근 등록된 작업 조회 (등록 시각 내림차순)
    async fn recent_jobs(&self, limit: i64) -> MarketplaceResult<Vec<Job>>;

    /// 입찰 수가 많은 Open 작업 조회 (입찰 수 내림차순)
    async fn active_jobs(&self, limit: i64) -> MarketplaceResult<Vec<Job>>;
}

// endregion: --- Auction Store Trait
