// region:    --- Imports
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use marketplace_service::database::DatabaseManager;
use marketplace_service::handlers;
use marketplace_service::notification::NoopNotifier;
use marketplace_service::scheduler::AuctionScheduler;
use marketplace_service::store::PostgresAuctionStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::new().await);

    // 데이터베이스 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 경매 저장소 생성
    let store = Arc::new(PostgresAuctionStore::new(Arc::clone(&db_manager)));

    // 경매 종료 스케줄러 시작 (요청 처리와 독립된 주기 작업)
    let scheduler = AuctionScheduler::new(Arc::clone(&store), Arc::new(NoopNotifier));
    scheduler.start().await;
    info!("{:<12} --> 경매 종료 스케줄러 시작", "Main");

    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let routes_all = Router::new()
        .route("/api/health", get(handlers::handle_health))
        .route("/api/auth/register", post(handlers::handle_register))
        .route("/api/auth/login", post(handlers::handle_login))
        .route("/api/auth/logout", post(handlers::handle_logout))
        .route("/api/jobs/post", post(handlers::handle_post_job))
        .route("/api/jobs/recent", get(handlers::handle_get_recent_jobs))
        .route("/api/jobs/active", get(handlers::handle_get_active_jobs))
        .route("/api/jobs/:job_id", get(handlers::handle_get_job))
        .route("/api/bids/place", post(handlers::handle_place_bid))
        .route(
            "/api/bids/:job_id/lowest",
            get(handlers::handle_get_lowest_bid),
        )
        .route(
            "/api/bids/:job_id/count",
            get(handlers::handle_get_bid_count),
        )
        .route(
            "/api/bids/:job_id/expiration",
            get(handlers::handle_get_expiration),
        )
        .route(
            "/api/bids/:job_id/time-remaining",
            get(handlers::handle_get_time_remaining),
        )
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024 * 20))
        .with_state(store);

    // 리스너 생성(로컬 호스트의 3000번 포트를 사용)
    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
