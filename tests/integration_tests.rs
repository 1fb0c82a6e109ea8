use chrono::{DateTime, Duration, Utc};
use marketplace_service::auction::model::{
    Actor, Bid, Job, JobStatus, NewActor, NewBid, NewJob, Role, NO_BIDS_YET,
};
use marketplace_service::auth::{self, LoginCommand, RegisterCommand};
use marketplace_service::bidding::commands::{
    handle_place_bid, handle_post_job, PlaceBidCommand, PostJobCommand,
};
use marketplace_service::error::MarketplaceError;
use marketplace_service::notification::NoopNotifier;
use marketplace_service::query;
use marketplace_service::scheduler::AuctionScheduler;
use marketplace_service::store::{AuctionStore, MemoryAuctionStore};
use std::sync::Arc;

/// 테스트용 저장소 설정
fn setup() -> Arc<MemoryAuctionStore> {
    Arc::new(MemoryAuctionStore::new())
}

/// 테스트용 사용자 생성
async fn create_actor(store: &MemoryAuctionStore, username: &str, role: Role) -> Actor {
    store
        .create_actor(NewActor {
            username: username.to_string(),
            password_hash: "test-hash".to_string(),
            email: format!("{}@example.com", username),
            role,
        })
        .await
        .unwrap()
}

/// 테스트용 작업 생성 (마감 시각을 직접 지정)
async fn create_job_expiring_in(
    store: &MemoryAuctionStore,
    poster_id: i64,
    expires_in: Duration,
) -> Job {
    store
        .create_job(NewJob {
            description: "테스트 작업".to_string(),
            requirements: "테스트 요구사항".to_string(),
            poster_id,
            posted_at: Utc::now(),
            expire_at: Utc::now() + expires_in,
            lowest_bid_amount: NO_BIDS_YET,
            bid_count: 0,
            status: JobStatus::Open,
        })
        .await
        .unwrap()
}

/// 저장소 수준에서 입찰을 기록 (입찰 시각을 직접 지정)
async fn seed_bid(
    store: &MemoryAuctionStore,
    job_id: i64,
    bidder_id: i64,
    amount: f64,
    bid_time: DateTime<Utc>,
) -> Bid {
    let job = store.get_job(job_id).await.unwrap();
    let mut updated = job.clone();
    updated.lowest_bid_amount = updated.lowest_bid_amount.min(amount);
    updated.bid_count += 1;
    store
        .create_bid(
            &updated,
            NewBid {
                job_id,
                bidder_id,
                amount,
                bid_time,
            },
        )
        .await
        .unwrap()
}

/// 작업 등록 테스트: 초기 상태 확인
#[tokio::test]
async fn test_post_job_initial_state() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;

    let job = handle_post_job(
        PostJobCommand {
            description: "웹사이트 제작".to_string(),
            requirements: "Rust 경험 필수".to_string(),
            poster_id: poster.id,
            expire_at: Utc::now() + Duration::hours(2),
        },
        store.as_ref(),
    )
    .await
    .unwrap();

    assert_eq!(job.status, JobStatus::Open);
    assert_eq!(job.lowest_bid_amount, NO_BIDS_YET);
    assert_eq!(job.bid_count, 0);
    assert!(job.winner_id.is_none());
}

/// 작업 등록 검증 테스트
#[tokio::test]
async fn test_post_job_validation() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let bidder = create_actor(&store, "bidder1", Role::Bidder).await;

    // 빈 설명
    let err = handle_post_job(
        PostJobCommand {
            description: "  ".to_string(),
            requirements: "요구사항".to_string(),
            poster_id: poster.id,
            expire_at: Utc::now() + Duration::hours(1),
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));

    // 255자 초과 요구사항
    let err = handle_post_job(
        PostJobCommand {
            description: "설명".to_string(),
            requirements: "r".repeat(256),
            poster_id: poster.id,
            expire_at: Utc::now() + Duration::hours(1),
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));

    // 과거 마감 시각
    let err = handle_post_job(
        PostJobCommand {
            description: "설명".to_string(),
            requirements: "요구사항".to_string(),
            poster_id: poster.id,
            expire_at: Utc::now() - Duration::hours(1),
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));

    // 등록자가 아닌 사용자
    let err = handle_post_job(
        PostJobCommand {
            description: "설명".to_string(),
            requirements: "요구사항".to_string(),
            poster_id: bidder.id,
            expire_at: Utc::now() + Duration::hours(1),
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::RoleViolation(_)));

    // 존재하지 않는 등록자
    let err = handle_post_job(
        PostJobCommand {
            description: "설명".to_string(),
            requirements: "요구사항".to_string(),
            poster_id: 9999,
            expire_at: Utc::now() + Duration::hours(1),
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound(_)));
}

/// 입찰 테스트: 캐시 필드(최저가, 입찰 수) 갱신 확인
#[tokio::test]
async fn test_place_bid_updates_aggregates() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let b1 = create_actor(&store, "bidder1", Role::Bidder).await;
    let b2 = create_actor(&store, "bidder2", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::hours(2)).await;

    // 80, 90 두 건이 쌓인 상태에서 50을 제시하면 최저가가 내려간다
    for (bidder_id, amount) in [(b1.id, 80.0), (b2.id, 90.0)] {
        handle_place_bid(
            PlaceBidCommand {
                job_id: job.id,
                bidder_id,
                amount,
            },
            store.as_ref(),
        )
        .await
        .unwrap();
    }

    let current = store.get_job(job.id).await.unwrap();
    assert_eq!(current.lowest_bid_amount, 80.0);
    assert_eq!(current.bid_count, 2);

    handle_place_bid(
        PlaceBidCommand {
            job_id: job.id,
            bidder_id: b2.id,
            amount: 50.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap();

    let current = store.get_job(job.id).await.unwrap();
    assert_eq!(current.lowest_bid_amount, 50.0);
    assert_eq!(current.bid_count, 3);
}

/// 첫 입찰이 초기값을 대체하는지 확인
#[tokio::test]
async fn test_first_bid_replaces_initial_amount() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let bidder = create_actor(&store, "bidder1", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::hours(1)).await;

    assert_eq!(store.get_job(job.id).await.unwrap().lowest_bid_amount, NO_BIDS_YET);

    handle_place_bid(
        PlaceBidCommand {
            job_id: job.id,
            bidder_id: bidder.id,
            amount: 100.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap();

    let current = store.get_job(job.id).await.unwrap();
    assert_eq!(current.lowest_bid_amount, 100.0);
    assert_eq!(current.bid_count, 1);
}

/// 종료된 작업에 대한 입찰 거절 테스트
#[tokio::test]
async fn test_place_bid_on_closed_job_fails() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let bidder = create_actor(&store, "bidder1", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::hours(1)).await;

    store.close_job(job.id).await.unwrap();

    let err = handle_place_bid(
        PlaceBidCommand {
            job_id: job.id,
            bidder_id: bidder.id,
            amount: 10.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::AuctionExpired));
}

/// 마감이 지난 작업에 대한 입찰 거절 테스트
#[tokio::test]
async fn test_place_bid_after_expiry_fails() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let bidder = create_actor(&store, "bidder1", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::minutes(-5)).await;

    let err = handle_place_bid(
        PlaceBidCommand {
            job_id: job.id,
            bidder_id: bidder.id,
            amount: 10.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::AuctionExpired));
}

/// 역할 위반 입찰 거절 테스트
#[tokio::test]
async fn test_place_bid_role_violation() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::hours(1)).await;

    let err = handle_place_bid(
        PlaceBidCommand {
            job_id: job.id,
            bidder_id: poster.id,
            amount: 10.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::RoleViolation(_)));
}

/// 잘못된 입력과 존재하지 않는 대상에 대한 입찰 테스트
#[tokio::test]
async fn test_place_bid_validation_and_not_found() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let bidder = create_actor(&store, "bidder1", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::hours(1)).await;

    // 0 이하 금액
    let err = handle_place_bid(
        PlaceBidCommand {
            job_id: job.id,
            bidder_id: bidder.id,
            amount: 0.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));

    // 존재하지 않는 작업
    let err = handle_place_bid(
        PlaceBidCommand {
            job_id: 9999,
            bidder_id: bidder.id,
            amount: 10.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound(_)));

    // 존재하지 않는 입찰자
    let err = handle_place_bid(
        PlaceBidCommand {
            job_id: job.id,
            bidder_id: 9999,
            amount: 10.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound(_)));
}

/// 종료 스윕 테스트: 최저 입찰자가 낙찰된다
#[tokio::test]
async fn test_closing_assigns_winner() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let b1 = create_actor(&store, "bidder1", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::minutes(-10)).await;

    seed_bid(&store, job.id, b1.id, 100.0, Utc::now() - Duration::minutes(30)).await;

    AuctionScheduler::close_expired_jobs(store.as_ref(), &NoopNotifier)
        .await
        .unwrap();

    let closed = store.get_job(job.id).await.unwrap();
    assert_eq!(closed.status, JobStatus::Closed);
    assert_eq!(closed.winner_id, Some(b1.id));
}

/// 입찰 없이 마감된 작업의 종료 테스트
#[tokio::test]
async fn test_closing_without_bids() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::minutes(-10)).await;

    AuctionScheduler::close_expired_jobs(store.as_ref(), &NoopNotifier)
        .await
        .unwrap();

    let closed = store.get_job(job.id).await.unwrap();
    assert_eq!(closed.status, JobStatus::Closed);
    assert!(closed.winner_id.is_none());
    assert_eq!(closed.lowest_bid_amount, NO_BIDS_YET);
    assert_eq!(closed.bid_count, 0);
}

/// 종료 트랜잭션 멱등성 테스트
#[tokio::test]
async fn test_closing_is_idempotent() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let b1 = create_actor(&store, "bidder1", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::minutes(-10)).await;
    seed_bid(&store, job.id, b1.id, 42.0, Utc::now() - Duration::minutes(20)).await;

    let first = store.close_job(job.id).await.unwrap();
    assert!(first.is_some());
    let after_first = store.get_job(job.id).await.unwrap();

    // 두 번째 실행은 아무 것도 바꾸지 않는다
    let second = store.close_job(job.id).await.unwrap();
    assert!(second.is_none());
    let after_second = store.get_job(job.id).await.unwrap();

    assert_eq!(after_first.status, after_second.status);
    assert_eq!(after_first.winner_id, after_second.winner_id);
    assert_eq!(after_first.version, after_second.version);

    // 스윕을 다시 돌려도 마찬가지
    AuctionScheduler::close_expired_jobs(store.as_ref(), &NoopNotifier)
        .await
        .unwrap();
    let after_sweep = store.get_job(job.id).await.unwrap();
    assert_eq!(after_first.version, after_sweep.version);
}

/// 낙찰 동점 처리 테스트: 같은 금액이면 이른 입찰, 그것도 같으면 낮은 id
#[tokio::test]
async fn test_closing_tie_break() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let b1 = create_actor(&store, "bidder1", Role::Bidder).await;
    let b2 = create_actor(&store, "bidder2", Role::Bidder).await;
    let b3 = create_actor(&store, "bidder3", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::minutes(-1)).await;

    let earlier = Utc::now() - Duration::minutes(30);
    let later = Utc::now() - Duration::minutes(10);

    // b1 은 늦게, b2/b3 는 같은 시각에 같은 금액으로 입찰
    seed_bid(&store, job.id, b1.id, 100.0, later).await;
    seed_bid(&store, job.id, b2.id, 100.0, earlier).await;
    seed_bid(&store, job.id, b3.id, 100.0, earlier).await;

    // 같은 금액 중 이른 시각, 같은 시각 중 낮은 id 가 선택된다
    let cheapest = store.cheapest_bid(job.id).await.unwrap().unwrap();
    assert_eq!(cheapest.bidder_id, b2.id);

    AuctionScheduler::close_expired_jobs(store.as_ref(), &NoopNotifier)
        .await
        .unwrap();
    let closed = store.get_job(job.id).await.unwrap();
    assert_eq!(closed.winner_id, Some(b2.id));
}

/// 종료 스윕이 마감된 작업만 건드리는지 확인
#[tokio::test]
async fn test_sweep_closes_only_expired_jobs() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let expired = create_job_expiring_in(&store, poster.id, Duration::minutes(-1)).await;
    let open = create_job_expiring_in(&store, poster.id, Duration::hours(1)).await;

    AuctionScheduler::close_expired_jobs(store.as_ref(), &NoopNotifier)
        .await
        .unwrap();

    assert_eq!(
        store.get_job(expired.id).await.unwrap().status,
        JobStatus::Closed
    );
    assert_eq!(store.get_job(open.id).await.unwrap().status, JobStatus::Open);
}

/// 동시성 입찰 테스트: 동시 입찰 N건이 모두 반영된다
#[tokio::test]
async fn test_concurrent_bidding() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::hours(1)).await;

    let mut bidders = Vec::new();
    for i in 1..=20 {
        bidders.push(create_actor(&store, &format!("bidder{}", i), Role::Bidder).await);
    }

    // 20개의 동시 입찰 생성
    let mut handles = vec![];
    for (i, bidder) in bidders.iter().enumerate() {
        let store = Arc::clone(&store);
        let cmd = PlaceBidCommand {
            job_id: job.id,
            bidder_id: bidder.id,
            amount: 100.0 + (i as f64 + 1.0) * 10.0,
        };
        handles.push(tokio::spawn(async move {
            handle_place_bid(cmd, store.as_ref()).await
        }));
    }

    // 모든 입찰 처리 대기 및 결과 확인
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let current = store.get_job(job.id).await.unwrap();
    assert_eq!(current.bid_count, 20);
    assert_eq!(current.lowest_bid_amount, 110.0);

    let cheapest = store.cheapest_bid(job.id).await.unwrap().unwrap();
    assert_eq!(cheapest.amount, 110.0);
    assert_eq!(cheapest.bidder_id, bidders[0].id);
}

/// 마감 검증 이후 종료가 끼어든 입찰은 커밋 시점에 거절된다
#[tokio::test]
async fn test_late_commit_after_close_is_rejected() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let bidder = create_actor(&store, "bidder1", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::hours(1)).await;

    // 마감 검증을 통과한 시점의 스냅샷
    let snapshot = store.get_job(job.id).await.unwrap();

    // 그 사이 스케줄러가 작업을 종료
    store.close_job(job.id).await.unwrap();

    // 종료 이후의 커밋 시도는 Conflict 가 아니라 만료로 거절된다
    let mut updated = snapshot.clone();
    updated.lowest_bid_amount = updated.lowest_bid_amount.min(10.0);
    updated.bid_count += 1;
    let err = store
        .create_bid(
            &updated,
            NewBid {
                job_id: job.id,
                bidder_id: bidder.id,
                amount: 10.0,
                bid_time: Utc::now(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::AuctionExpired));
}

/// 낡은 version 스냅샷의 커밋은 Conflict 로 드러난다
#[tokio::test]
async fn test_stale_version_commit_conflicts() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let b1 = create_actor(&store, "bidder1", Role::Bidder).await;
    let b2 = create_actor(&store, "bidder2", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::hours(1)).await;

    let snapshot = store.get_job(job.id).await.unwrap();

    // 다른 입찰이 먼저 커밋되어 version 이 올라간다
    handle_place_bid(
        PlaceBidCommand {
            job_id: job.id,
            bidder_id: b1.id,
            amount: 70.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap();

    let mut updated = snapshot.clone();
    updated.lowest_bid_amount = updated.lowest_bid_amount.min(60.0);
    updated.bid_count += 1;
    let err = store
        .create_bid(
            &updated,
            NewBid {
                job_id: job.id,
                bidder_id: b2.id,
                amount: 60.0,
                bid_time: Utc::now(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Conflict));
}

/// 조회 파사드 테스트
#[tokio::test]
async fn test_facade_queries() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let bidder = create_actor(&store, "bidder1", Role::Bidder).await;
    let job = create_job_expiring_in(&store, poster.id, Duration::hours(2)).await;

    // 입찰 전에는 초기값이 그대로 보인다
    assert_eq!(
        query::handlers::get_lowest_bid_amount(store.as_ref(), job.id)
            .await
            .unwrap(),
        NO_BIDS_YET
    );
    assert_eq!(
        query::handlers::get_bid_count(store.as_ref(), job.id)
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        query::handlers::get_auction_expiration(store.as_ref(), job.id)
            .await
            .unwrap(),
        job.expire_at
    );
    assert!(
        query::handlers::get_time_remaining(store.as_ref(), job.id)
            .await
            .unwrap()
            > Duration::zero()
    );

    handle_place_bid(
        PlaceBidCommand {
            job_id: job.id,
            bidder_id: bidder.id,
            amount: 55.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap();

    assert_eq!(
        query::handlers::get_lowest_bid_amount(store.as_ref(), job.id)
            .await
            .unwrap(),
        55.0
    );
    assert_eq!(
        query::handlers::get_bid_count(store.as_ref(), job.id)
            .await
            .unwrap(),
        1
    );

    // 마감이 지난 작업의 남은 시간은 음수로 조회된다 (오류 아님)
    let expired = create_job_expiring_in(&store, poster.id, Duration::minutes(-5)).await;
    assert!(
        query::handlers::get_time_remaining(store.as_ref(), expired.id)
            .await
            .unwrap()
            < Duration::zero()
    );

    // 존재하지 않는 작업 조회
    let err = query::handlers::get_bid_count(store.as_ref(), 9999)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound(_)));
}

/// 최근/활성 작업 목록 조회 테스트
#[tokio::test]
async fn test_job_listings() {
    let store = setup();
    let poster = create_actor(&store, "poster1", Role::Poster).await;
    let bidder = create_actor(&store, "bidder1", Role::Bidder).await;

    let first = create_job_expiring_in(&store, poster.id, Duration::hours(1)).await;
    let second = create_job_expiring_in(&store, poster.id, Duration::hours(1)).await;

    // 두 번째 작업에만 입찰을 넣으면 활성 목록 맨 앞에 온다
    handle_place_bid(
        PlaceBidCommand {
            job_id: second.id,
            bidder_id: bidder.id,
            amount: 10.0,
        },
        store.as_ref(),
    )
    .await
    .unwrap();

    let active = query::handlers::get_active_jobs(store.as_ref()).await.unwrap();
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].job_id, second.id);

    let recent = query::handlers::get_recent_jobs(store.as_ref()).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent.iter().any(|j| j.job_id == first.id));
}

/// 가입/로그인 테스트
#[tokio::test]
async fn test_register_and_login() {
    let store = setup();

    auth::handle_register(
        RegisterCommand {
            username: "poster1".to_string(),
            password: "secret-password".to_string(),
            email: "poster1@example.com".to_string(),
            role: "POSTER".to_string(),
        },
        store.as_ref(),
    )
    .await
    .unwrap();

    // 중복 사용자명 거절
    let err = auth::handle_register(
        RegisterCommand {
            username: "poster1".to_string(),
            password: "other".to_string(),
            email: "other@example.com".to_string(),
            role: "BIDDER".to_string(),
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));

    // 중복 이메일 거절
    let err = auth::handle_register(
        RegisterCommand {
            username: "someone".to_string(),
            password: "other".to_string(),
            email: "poster1@example.com".to_string(),
            role: "BIDDER".to_string(),
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));

    // 알 수 없는 역할 거절
    let err = auth::handle_register(
        RegisterCommand {
            username: "another".to_string(),
            password: "other".to_string(),
            email: "another@example.com".to_string(),
            role: "ADMIN".to_string(),
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));

    // 로그인 성공 시 검증 가능한 액세스 토큰이 발급된다
    let body = auth::handle_login(
        LoginCommand {
            username: "poster1".to_string(),
            password: "secret-password".to_string(),
        },
        store.as_ref(),
    )
    .await
    .unwrap();
    let token = body["access_token"].as_str().unwrap();
    let claims = auth::verify_token(token).unwrap();
    assert_eq!(claims.sub, "poster1");
    assert_eq!(claims.roles, vec!["POSTER".to_string()]);

    // 잘못된 비밀번호
    let err = auth::handle_login(
        LoginCommand {
            username: "poster1".to_string(),
            password: "wrong".to_string(),
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));

    // 존재하지 않는 사용자명
    let err = auth::handle_login(
        LoginCommand {
            username: "nobody".to_string(),
            password: "whatever".to_string(),
        },
        store.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation(_)));
}
