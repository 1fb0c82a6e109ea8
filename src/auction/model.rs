// region:    --- Imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
// endregion: --- Imports

/// 아직 입찰이 없는 작업의 최저 입찰가 초기값 (모든 유효 입찰가보다 크다)
pub const NO_BIDS_YET: f64 = f64::MAX;

/// DB 에 저장된 문자열이 알려진 enum 값이 아닌 경우
#[derive(Debug, thiserror::Error)]
#[error("unknown enum value: {0}")]
pub struct UnknownValue(pub String);

// region:    --- Actor

/// 사용자 역할 (가입 이후 변경 불가)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Poster,
    Bidder,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Poster => "POSTER",
            Role::Bidder => "BIDDER",
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "POSTER" => Ok(Role::Poster),
            "BIDDER" => Ok(Role::Bidder),
            _ => Err(UnknownValue(value)),
        }
    }
}

/// 사용자 모델
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Actor {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
}

/// 사용자 생성 입력 (id 는 저장소에서 부여)
#[derive(Debug, Clone)]
pub struct NewActor {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: Role,
}

// endregion: --- Actor

// region:    --- Job

/// 경매 상태 (Open -> Closed 단방향 전이)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Open,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "OPEN",
            JobStatus::Closed => "CLOSED",
        }
    }
}

impl TryFrom<String> for JobStatus {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "OPEN" => Ok(JobStatus::Open),
            "CLOSED" => Ok(JobStatus::Closed),
            _ => Err(UnknownValue(value)),
        }
    }
}

/// 작업(경매 단위) 모델
/// lowest_bid_amount / bid_count 는 입찰 집합에서 유도되는 캐시 필드이며
/// version 은 낙관적 동시성 제어용 카운터
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Job {
    pub id: i64,
    pub description: String,
    pub requirements: String,
    pub poster_id: i64,
    pub winner_id: Option<i64>,
    pub posted_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
    pub lowest_bid_amount: f64,
    pub bid_count: i64,
    #[sqlx(try_from = "String")]
    pub status: JobStatus,
    pub version: i64,
}

/// 작업 생성 입력 (id, winner_id, version 은 저장소에서 부여)
#[derive(Debug, Clone)]
pub struct NewJob {
    pub description: String,
    pub requirements: String,
    pub poster_id: i64,
    pub posted_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
    pub lowest_bid_amount: f64,
    pub bid_count: i64,
    pub status: JobStatus,
}

// endregion: --- Job

// region:    --- Bid

/// 입찰 모델 (생성 이후 불변)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub job_id: i64,
    pub bidder_id: i64,
    pub amount: f64,
    pub bid_time: DateTime<Utc>,
}

/// 입찰 생성 입력 (id 는 저장소에서 부여)
#[derive(Debug, Clone)]
pub struct NewBid {
    pub job_id: i64,
    pub bidder_id: i64,
    pub amount: f64,
    pub bid_time: DateTime<Utc>,
}

// endregion: --- Bid
