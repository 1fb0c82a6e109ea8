/// 작업 조회
pub const GET_JOB: &str = "SELECT id, description, requirements, poster_id, winner_id, posted_at, expire_at, lowest_bid_amount, bid_count, status, version FROM job WHERE id = $1";

/// 작업 생성
pub const INSERT_JOB: &str = r#"
    INSERT INTO job (description, requirements, poster_id, posted_at, expire_at, lowest_bid_amount, bid_count, status, version)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0)
    RETURNING id, description, requirements, poster_id, winner_id, posted_at, expire_at, lowest_bid_amount, bid_count, status, version
"#;

/// 작업 캐시 필드 갱신 (version 과 Open 상태를 같은 문장에서 재검증)
pub const UPDATE_JOB_AGGREGATES: &str = r#"
    UPDATE job
    SET lowest_bid_amount = $1, bid_count = $2, version = version + 1
    WHERE id = $3 AND version = $4 AND status = 'OPEN'
"#;

/// 작업 상태 조회 (갱신 실패 원인 판별용)
pub const GET_JOB_STATUS: &str = "SELECT status FROM job WHERE id = $1";

/// 입찰 기록
pub const INSERT_BID: &str = r#"
    INSERT INTO bid (job_id, bidder_id, amount, bid_time)
    VALUES ($1, $2, $3, $4)
    RETURNING id, job_id, bidder_id, amount, bid_time
"#;

/// 최저 입찰 조회 (금액, 입찰 시각, id 순의 결정적 전순서)
pub const CHEAPEST_BID: &str = r#"
    SELECT id, job_id, bidder_id, amount, bid_time
    FROM bid
    WHERE job_id = $1
    ORDER BY amount ASC, bid_time ASC, id ASC
    LIMIT 1
"#;

/// 작업의 전체 입찰 조회
pub const BIDS_FOR_JOB: &str = r#"
    SELECT id, job_id, bidder_id, amount, bid_time
    FROM bid
    WHERE job_id = $1
    ORDER BY bid_time DESC
"#;

/// 마감이 지난 Open 작업 조회
pub const JOBS_EXPIRED_AND_OPEN: &str = "SELECT id, description, requirements, poster_id, winner_id, posted_at, expire_at, lowest_bid_amount, bid_count, status, version FROM job WHERE status = 'OPEN' AND expire_at <= $1";

/// 작업 종료 전이 (Open 인 경우에만 적용되어 멱등성을 보장)
pub const CLOSE_JOB: &str = r#"
    UPDATE job
    SET status = 'CLOSED', version = version + 1
    WHERE id = $1 AND status = 'OPEN'
    RETURNING id, description, requirements, poster_id, winner_id, posted_at, expire_at, lowest_bid_amount, bid_count, status, version
"#;

/// 낙찰자 기록
pub const SET_JOB_WINNER: &str = r#"
    UPDATE job
    SET winner_id = $1
    WHERE id = $2
    RETURNING id, description, requirements, poster_id, winner_id, posted_at, expire_at, lowest_bid_amount, bid_count, status, version
"#;

/// 사용자 조회
pub const GET_ACTOR: &str = "SELECT id, username, password_hash, email, role FROM actor WHERE id = $1";

/// 사용자명으로 사용자 조회
pub const FIND_ACTOR_BY_USERNAME: &str =
    "SELECT id, username, password_hash, email, role FROM actor WHERE username = $1";

/// 이메일로 사용자 조회
pub const FIND_ACTOR_BY_EMAIL: &str =
    "SELECT id, username, password_hash, email, role FROM actor WHERE email = $1";

/// 사용자 생성
pub const INSERT_ACTOR: &str = r#"
    INSERT INTO actor (username, password_hash, email, role)
    VALUES ($1, $2, $3, $4)
    RETURNING id, username, password_hash, email, role
"#;

/// 최근 등록된 작업 조회
pub const RECENT_JOBS: &str = "SELECT id, description, requirements, poster_id, winner_id, posted_at, expire_at, lowest_bid_amount, bid_count, status, version FROM job ORDER BY posted_at DESC LIMIT $1";

/// 입찰 수가 많은 Open 작업 조회
pub const ACTIVE_JOBS: &str = "SELECT id, description, requirements, poster_id, winner_id, posted_at, expire_at, lowest_bid_amount, bid_count, status, version FROM job WHERE status = 'OPEN' ORDER BY bid_count DESC LIMIT $1";
