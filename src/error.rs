// region:    --- Imports
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;
// endregion: --- Imports

// region:    --- Error

/// 마켓플레이스 오류 종류
/// 호출자에게 구분 가능한 결과로 전달된다 (일반 실패로 뭉개지 않는다)
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    /// 작업/사용자 id 가 존재하지 않음
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 해당 동작에 필요한 역할이 아님
    #[error("{0}")]
    RoleViolation(String),

    /// 마감 시각이 지났거나 이미 종료된 경매
    #[error("The auction has expired.")]
    AuctionExpired,

    /// 저장소가 감지한 동시 쓰기 충돌 (호출자는 배치 전체를 재시도)
    #[error("Concurrent update conflict, please retry.")]
    Conflict,

    /// 잘못된 입력
    #[error("{0}")]
    Validation(String),

    /// 인증 실패 (토큰 없음/만료/위조)
    #[error("{0}")]
    Unauthorized(String),

    /// 저장소 하부 오류
    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),

    /// 그 밖의 내부 오류 (해시 생성 실패 등)
    #[error("{0}")]
    Internal(String),
}

/// 편의 타입 별칭
pub type MarketplaceResult<T> = Result<T, MarketplaceError>;

/// 오류 종류별 HTTP 상태 코드 매핑
impl MarketplaceError {
    fn status_code(&self) -> StatusCode {
        match self {
            MarketplaceError::NotFound(_) => StatusCode::NOT_FOUND,
            MarketplaceError::RoleViolation(_)
            | MarketplaceError::AuctionExpired
            | MarketplaceError::Validation(_) => StatusCode::BAD_REQUEST,
            MarketplaceError::Conflict => StatusCode::CONFLICT,
            MarketplaceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            MarketplaceError::Store(_) | MarketplaceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        error!("{:<12} --> 요청 처리 오류: {:?}", "Error", self);

        // 내부 오류는 상세 내용을 숨긴다
        let end_user_message = match &self {
            MarketplaceError::Store(_) | MarketplaceError::Internal(_) => {
                "Something went wrong, please try after sometime!".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "endUserMessage": end_user_message,
            "internalMessage": self.to_string(),
        }));

        (self.status_code(), body).into_response()
    }
}

// endregion: --- Error
