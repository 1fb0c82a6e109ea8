/// 입찰/작업 커맨드 처리
/// 1. 입찰 (Bid Placement)
/// 2. 작업 등록 (Post Job)
// region:    --- Imports
use crate::auction::model::{Bid, Job, JobStatus, NewBid, NewJob, Role, NO_BIDS_YET};
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::store::AuctionStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands

/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub job_id: i64,
    pub bidder_id: i64,
    pub amount: f64,
}

/// 작업 등록 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostJobCommand {
    pub description: String,
    pub requirements: String,
    pub poster_id: i64,
    pub expire_at: DateTime<Utc>,
}

/// 설명/요구사항 필드 최대 길이
const MAX_TEXT_LEN: usize = 255;

// 최대 재시도 횟수 (version 충돌 시에만 재시도)
const MAX_RETRIES: i32 = 100;

/// 1. 입찰
///
/// 조회 -> 검증 -> 커밋 순서로 진행하고, 커밋 단위 안에서 저장소가
/// version 과 Open 상태를 재검증한다. 커밋이 Conflict 로 거절되면
/// 배치 전체(조회부터)를 다시 수행한다.
pub async fn handle_place_bid(
    cmd: PlaceBidCommand,
    store: &impl AuctionStore,
) -> MarketplaceResult<Bid> {
    info!("{:<12} --> 입찰 요청 처리 시작: {:?}", "Command", cmd);

    if cmd.amount <= 0.0 {
        return Err(MarketplaceError::Validation(
            "Bid amount must be positive".to_string(),
        ));
    }

    let mut retries = 0;
    while retries < MAX_RETRIES {
        // 작업 조회 및 마감 검증
        let job = store.get_job(cmd.job_id).await?;

        let now = Utc::now();
        if now >= job.expire_at || job.status == JobStatus::Closed {
            return Err(MarketplaceError::AuctionExpired);
        }

        // 입찰자 조회 및 역할 검증
        let bidder = store.get_actor(cmd.bidder_id).await?;
        if bidder.role != Role::Bidder {
            return Err(MarketplaceError::RoleViolation(
                "User not allowed to place bids".to_string(),
            ));
        }

        // 캐시 필드 재계산 후 입찰 기록과 함께 하나의 단위로 커밋
        let mut updated = job.clone();
        updated.lowest_bid_amount = updated.lowest_bid_amount.min(cmd.amount);
        updated.bid_count += 1;

        let new_bid = NewBid {
            job_id: cmd.job_id,
            bidder_id: cmd.bidder_id,
            amount: cmd.amount,
            bid_time: now,
        };

        match store.create_bid(&updated, new_bid).await {
            Ok(bid) => {
                info!(
                    "{:<12} --> 입찰 성공 job: {}, bidder: {}, amount: {}",
                    "Command", cmd.job_id, cmd.bidder_id, cmd.amount
                );
                return Ok(bid);
            }
            Err(MarketplaceError::Conflict) => {
                warn!("{:<12} --> 낙관적 갱신 version 충돌: 재시도", "Command");
                retries += 1;
                continue;
            }
            Err(e) => return Err(e),
        }
    }

    // 재시도 한도 초과: 충돌을 호출자에게 그대로 드러낸다
    Err(MarketplaceError::Conflict)
}

/// 2. 작업 등록
pub async fn handle_post_job(
    cmd: PostJobCommand,
    store: &impl AuctionStore,
) -> MarketplaceResult<Job> {
    info!(
        "{:<12} --> 작업 등록 요청 처리 시작: poster: {}",
        "Command", cmd.poster_id
    );

    validate_text("Description", &cmd.description)?;
    validate_text("Requirements", &cmd.requirements)?;

    let now = Utc::now();
    if cmd.expire_at <= now {
        return Err(MarketplaceError::Validation(
            "Expiration must be in the future".to_string(),
        ));
    }

    // 등록자 조회 및 역할 검증
    let poster = store.get_actor(cmd.poster_id).await.map_err(|e| match e {
        MarketplaceError::NotFound(_) => MarketplaceError::NotFound("Poster"),
        other => other,
    })?;
    if poster.role != Role::Poster {
        return Err(MarketplaceError::RoleViolation(
            "User is not a poster".to_string(),
        ));
    }

    let job = store
        .create_job(NewJob {
            description: cmd.description,
            requirements: cmd.requirements,
            poster_id: cmd.poster_id,
            posted_at: now,
            expire_at: cmd.expire_at,
            lowest_bid_amount: NO_BIDS_YET,
            bid_count: 0,
            status: JobStatus::Open,
        })
        .await?;

    info!("{:<12} --> 작업 등록 성공 id: {}", "Command", job.id);
    Ok(job)
}

/// 비어 있지 않고 255자 이하인지 검증
fn validate_text(field: &str, value: &str) -> MarketplaceResult<()> {
    if value.trim().is_empty() {
        return Err(MarketplaceError::Validation(format!(
            "{} cannot be blank",
            field
        )));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(MarketplaceError::Validation(format!(
            "{} must not exceed {} characters",
            field, MAX_TEXT_LEN
        )));
    }
    Ok(())
}

// endregion: --- Commands
