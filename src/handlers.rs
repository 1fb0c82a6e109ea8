// region:    --- Imports
use crate::auction::model::Role;
use crate::auth::{self, AuthUser, LoginCommand, RegisterCommand};
use crate::bidding::commands::{handle_place_bid as place_bid, handle_post_job as post_job};
use crate::bidding::commands::{PlaceBidCommand, PostJobCommand};
use crate::error::MarketplaceResult;
use crate::query;
use crate::store::PostgresAuctionStore;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

// region:    --- Health

/// 헬스 체크
pub async fn handle_health() -> impl IntoResponse {
    "Health OK!"
}

// endregion: --- Health

// region:    --- Auth Handlers

/// 가입 요청 처리
pub async fn handle_register(
    State(store): State<Arc<PostgresAuctionStore>>,
    Json(cmd): Json<RegisterCommand>,
) -> MarketplaceResult<impl IntoResponse> {
    auth::handle_register(cmd, store.as_ref()).await?;
    Ok("User registered successfully!")
}

/// 로그인 요청 처리
pub async fn handle_login(
    State(store): State<Arc<PostgresAuctionStore>>,
    Json(cmd): Json<LoginCommand>,
) -> MarketplaceResult<impl IntoResponse> {
    let body = auth::handle_login(cmd, store.as_ref()).await?;
    Ok(Json(body))
}

/// 로그아웃 요청 처리 (무상태 토큰이므로 응답만 돌려준다)
pub async fn handle_logout() -> impl IntoResponse {
    "User logged out successfully!"
}

// endregion: --- Auth Handlers

// region:    --- Command Handlers

/// 작업 등록 요청 처리
pub async fn handle_post_job(
    State(store): State<Arc<PostgresAuctionStore>>,
    auth: AuthUser,
    Json(cmd): Json<PostJobCommand>,
) -> MarketplaceResult<impl IntoResponse> {
    info!(
        "{:<12} --> 작업 등록 요청: {} (user: {})",
        "Handler", cmd.description, auth.username
    );
    auth.require_role(Role::Poster)?;

    post_job(cmd, store.as_ref()).await?;
    Ok("Job posted successfully!")
}

/// 입찰 요청 처리
pub async fn handle_place_bid(
    State(store): State<Arc<PostgresAuctionStore>>,
    auth: AuthUser,
    Json(cmd): Json<PlaceBidCommand>,
) -> MarketplaceResult<impl IntoResponse> {
    info!(
        "{:<12} --> 입찰 요청: {:?} (user: {})",
        "Handler", cmd, auth.username
    );
    auth.require_role(Role::Bidder)?;

    place_bid(cmd, store.as_ref()).await?;
    Ok("Bid placed successfully!")
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 작업 상세 조회
pub async fn handle_get_job(
    State(store): State<Arc<PostgresAuctionStore>>,
    _auth: AuthUser,
    Path(job_id): Path<i64>,
) -> MarketplaceResult<impl IntoResponse> {
    let job = query::handlers::get_job(store.as_ref(), job_id).await?;
    Ok(Json(job))
}

/// 최근 작업 조회
pub async fn handle_get_recent_jobs(
    State(store): State<Arc<PostgresAuctionStore>>,
    _auth: AuthUser,
) -> MarketplaceResult<impl IntoResponse> {
    let jobs = query::handlers::get_recent_jobs(store.as_ref()).await?;
    Ok(Json(jobs))
}

/// 활성 작업 조회
pub async fn handle_get_active_jobs(
    State(store): State<Arc<PostgresAuctionStore>>,
    _auth: AuthUser,
) -> MarketplaceResult<impl IntoResponse> {
    let jobs = query::handlers::get_active_jobs(store.as_ref()).await?;
    Ok(Json(jobs))
}

/// 최저 입찰가 조회
pub async fn handle_get_lowest_bid(
    State(store): State<Arc<PostgresAuctionStore>>,
    _auth: AuthUser,
    Path(job_id): Path<i64>,
) -> MarketplaceResult<impl IntoResponse> {
    let amount = query::handlers::get_lowest_bid_amount(store.as_ref(), job_id).await?;
    Ok(Json(amount))
}

/// 입찰 수 조회
pub async fn handle_get_bid_count(
    State(store): State<Arc<PostgresAuctionStore>>,
    _auth: AuthUser,
    Path(job_id): Path<i64>,
) -> MarketplaceResult<impl IntoResponse> {
    let count = query::handlers::get_bid_count(store.as_ref(), job_id).await?;
    Ok(Json(count))
}

/// 경매 마감 시각 조회
pub async fn handle_get_expiration(
    State(store): State<Arc<PostgresAuctionStore>>,
    _auth: AuthUser,
    Path(job_id): Path<i64>,
) -> MarketplaceResult<impl IntoResponse> {
    let expire_at = query::handlers::get_auction_expiration(store.as_ref(), job_id).await?;
    Ok(Json(expire_at))
}

/// 경매 남은 시간 조회 (초 단위, 마감 후에는 음수)
pub async fn handle_get_time_remaining(
    State(store): State<Arc<PostgresAuctionStore>>,
    _auth: AuthUser,
    Path(job_id): Path<i64>,
) -> MarketplaceResult<impl IntoResponse> {
    let remaining = query::handlers::get_time_remaining(store.as_ref(), job_id).await?;
    Ok(Json(remaining.num_seconds()))
}

// endregion: --- Query Handlers
