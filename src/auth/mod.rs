/// 사용자 가입/로그인 및 토큰 처리
/// 전송 계층의 신원 확인을 담당하고, 핵심 규칙(역할 검증)은
/// 커맨드 계층이 별도로 한 번 더 수행한다
// region:    --- Imports
use crate::auction::model::{Actor, NewActor, Role};
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::store::AuctionStore;
use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
// endregion: --- Imports

// region:    --- Commands

/// 가입 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterCommand {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: String,
}

/// 로그인 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

// endregion: --- Commands

// region:    --- Token

/// 액세스 토큰 클레임
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: i64,
    pub roles: Vec<String>,
    pub token_type: String,
    pub exp: usize,
}

/// 서명 비밀키 (환경 변수)
fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "marketplace-dev-secret".to_string())
}

/// 액세스 토큰 만료 시간 (초)
fn jwt_expiration_secs() -> i64 {
    std::env::var("JWT_EXPIRATION_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3600)
}

/// 액세스 토큰 생성
pub fn generate_access_token(actor: &Actor) -> MarketplaceResult<String> {
    info!(
        "{:<12} --> 액세스 토큰 생성: {}",
        "Auth", actor.username
    );
    let expire_at = Utc::now() + Duration::seconds(jwt_expiration_secs());
    let claims = Claims {
        sub: actor.username.clone(),
        user_id: actor.id,
        roles: vec![actor.role.as_str().to_string()],
        token_type: "access".to_string(),
        exp: expire_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
    .map_err(|e| MarketplaceError::Internal(e.to_string()))
}

/// 액세스 토큰 검증
pub fn verify_token(token: &str) -> MarketplaceResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let message = match e.kind() {
            ErrorKind::ExpiredSignature => "JWT token has expired.",
            ErrorKind::InvalidSignature => "Invalid JWT signature.",
            ErrorKind::InvalidAlgorithm => "Signing algorithm mismatch.",
            _ => "Invalid JWT token.",
        };
        MarketplaceError::Unauthorized(message.to_string())
    })
}

// endregion: --- Token

// region:    --- Password Hashing

/// 비밀번호 해시 생성 (argon2, PHC 문자열)
fn hash_password(plain: &str) -> MarketplaceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| MarketplaceError::Internal(e.to_string()))
}

/// 비밀번호 검증
fn verify_password(plain: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

// endregion: --- Password Hashing

// region:    --- Handlers

/// 가입 처리
pub async fn handle_register(
    cmd: RegisterCommand,
    store: &impl AuctionStore,
) -> MarketplaceResult<Actor> {
    info!("{:<12} --> 가입 요청 처리 시작: {}", "Auth", cmd.username);

    if cmd.username.trim().is_empty() {
        return Err(MarketplaceError::Validation(
            "username cannot be blank".to_string(),
        ));
    }
    if cmd.password.trim().is_empty() {
        return Err(MarketplaceError::Validation(
            "password cannot be blank".to_string(),
        ));
    }
    if cmd.email.trim().is_empty() {
        return Err(MarketplaceError::Validation(
            "email cannot be blank".to_string(),
        ));
    }

    // 역할은 가입 시점에 확정되고 이후 변경되지 않는다
    let role = match cmd.role.to_uppercase().as_str() {
        "POSTER" => Role::Poster,
        "BIDDER" => Role::Bidder,
        _ => {
            return Err(MarketplaceError::Validation(
                "Invalid role specified!".to_string(),
            ))
        }
    };

    if store.find_actor_by_username(&cmd.username).await?.is_some() {
        return Err(MarketplaceError::Validation(
            "Username is already taken!".to_string(),
        ));
    }
    if store.find_actor_by_email(&cmd.email).await?.is_some() {
        return Err(MarketplaceError::Validation(
            "User already exists with given email!".to_string(),
        ));
    }

    let actor = store
        .create_actor(NewActor {
            username: cmd.username.clone(),
            password_hash: hash_password(&cmd.password)?,
            email: cmd.email,
            role,
        })
        .await?;

    info!("{:<12} --> 가입 성공: {}", "Auth", actor.username);
    Ok(actor)
}

/// 로그인 처리: 비밀번호 검증 후 액세스 토큰 발급
pub async fn handle_login(
    cmd: LoginCommand,
    store: &impl AuctionStore,
) -> MarketplaceResult<serde_json::Value> {
    info!("{:<12} --> 로그인 시도: {}", "Auth", cmd.username);

    let Some(actor) = store.find_actor_by_username(&cmd.username).await? else {
        return Err(MarketplaceError::Validation(
            "Username not found!".to_string(),
        ));
    };

    if !verify_password(&cmd.password, &actor.password_hash) {
        return Err(MarketplaceError::Validation("Invalid password!".to_string()));
    }

    let token = generate_access_token(&actor)?;
    info!("{:<12} --> 로그인 성공: {}", "Auth", actor.username);

    Ok(json!({
        "message": "User logged in successfully!",
        "access_token": token,
    }))
}

// endregion: --- Handlers

// region:    --- Auth Extractor

/// 요청에서 해석된 호출자 신원
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub roles: Vec<String>,
}

impl AuthUser {
    /// 전송 계층 역할 확인 (핵심 규칙의 역할 검증과 별개)
    pub fn require_role(&self, role: Role) -> MarketplaceResult<()> {
        if self.roles.iter().any(|r| r == role.as_str()) {
            Ok(())
        } else {
            Err(MarketplaceError::RoleViolation(format!(
                "User does not have role {}",
                role.as_str()
            )))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = MarketplaceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| {
                MarketplaceError::Unauthorized("Missing authentication credentials".to_string())
            })?
            .to_str()
            .map_err(|_| MarketplaceError::Unauthorized("Invalid header string".to_string()))?;

        let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
            MarketplaceError::Unauthorized("Missing authentication credentials".to_string())
        })?;

        let claims = verify_token(token)?;
        Ok(AuthUser {
            user_id: claims.user_id,
            username: claims.sub,
            roles: claims.roles,
        })
    }
}

// endregion: --- Auth Extractor
