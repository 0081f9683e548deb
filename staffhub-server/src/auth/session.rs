//! 会话令牌服务
//!
//! 处理会话令牌的签发、验证和解析。令牌对客户端不透明，通过 HttpOnly
//! Cookie 传输，也接受 `Authorization: Bearer` 头。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 会话 Cookie 名称
pub const SESSION_COOKIE: &str = "staffhub_session";

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 签名密钥 (应至少 32 字节)
    pub secret: String,
    /// 令牌过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let secret = match load_session_secret() {
            Ok(secret) => secret,
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("Session secret error: {}, generating temporary key", e);
                    generate_printable_secret()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("🚨 FATAL: SESSION_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 默认 24 小时
            issuer: std::env::var("SESSION_ISSUER")
                .unwrap_or_else(|_| "staffhub-server".to_string()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "staffhub-dashboard".to_string()),
        }
    }
}

/// 存储在令牌中的 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 账户 ID (Subject)
    pub sub: String,
    /// 账户邮箱
    pub email: String,
    /// 显示名称
    pub name: String,
    /// 令牌类型
    pub token_type: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// 会话错误
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 从环境变量安全地加载会话密钥
fn load_session_secret() -> Result<String, SessionError> {
    match std::env::var("SESSION_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(SessionError::ConfigError(
                    "SESSION_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => Err(SessionError::ConfigError(
            "SESSION_SECRET environment variable not set".to_string(),
        )),
    }
}

/// 生成可打印的随机密钥 (用于开发环境)
fn generate_printable_secret() -> String {
    let allowed_chars =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut key = String::new();

    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            return "StaffhubDevelopmentSessionSecret2025!".to_string();
        }
        let idx = (byte[0] as usize) % allowed_chars.len();
        key.push(allowed_chars.as_bytes()[idx] as char);
    }

    key
}

/// 会话令牌服务
#[derive(Debug, Clone)]
pub struct SessionService {
    pub config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionService {
    /// 使用默认配置创建服务
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// 使用指定配置创建服务
    pub fn with_config(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为账户签发新令牌
    pub fn issue_token(
        &self,
        account_id: &str,
        email: &str,
        name: &str,
    ) -> Result<String, SessionError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            token_type: "session".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| SessionError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::ExpiredToken,
                ErrorKind::InvalidSignature => SessionError::InvalidSignature,
                ErrorKind::InvalidToken => SessionError::InvalidToken(e.to_string()),
                _ => SessionError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// 从 Cookie 头提取令牌
    pub fn extract_from_cookie(cookie_header: &str) -> Option<&str> {
        cookie_header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
        })
    }

    /// 构造登录 Set-Cookie 值
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            token,
            self.config.expiration_minutes * 60
        )
    }

    /// 构造登出 Set-Cookie 值 (立即过期)
    pub fn clear_session_cookie() -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
    }
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}

/// 当前用户上下文 (从会话 Claims 解析)
///
/// 由认证中间件创建，注入到请求处理函数
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 账户 ID ("account:xxxx")
    pub id: String,
    /// 账户邮箱
    pub email: String,
    /// 显示名称
    pub name: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> SessionService {
        SessionService::with_config(SessionConfig {
            secret: "test-secret-test-secret-test-secret!".to_string(),
            expiration_minutes: 60,
            issuer: "staffhub-server".to_string(),
            audience: "staffhub-dashboard".to_string(),
        })
    }

    #[test]
    fn test_token_issue_and_validation() {
        let service = test_service();

        let token = service
            .issue_token("account:u1", "ada@x.com", "Ada Lovelace")
            .expect("Failed to issue test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "account:u1");
        assert_eq!(claims.email, "ada@x.com");
        assert_eq!(claims.name, "Ada Lovelace");

        let user = CurrentUser::from(claims);
        assert_eq!(user.id, "account:u1");
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = test_service();
        let other = SessionService::with_config(SessionConfig {
            secret: "another-secret-another-secret-secret".to_string(),
            ..service.config.clone()
        });

        let token = other.issue_token("account:u1", "ada@x.com", "Ada").unwrap();
        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_cookie_extraction() {
        let header = format!("theme=dark; {}=tok-123; lang=en", SESSION_COOKIE);
        assert_eq!(SessionService::extract_from_cookie(&header), Some("tok-123"));
        assert_eq!(SessionService::extract_from_cookie("theme=dark"), None);
        assert_eq!(
            SessionService::extract_from_cookie(&format!("{}=", SESSION_COOKIE)),
            None
        );
    }

    #[test]
    fn test_bearer_extraction() {
        assert_eq!(
            SessionService::extract_from_header("Bearer abc"),
            Some("abc")
        );
        assert_eq!(SessionService::extract_from_header("Basic abc"), None);
    }
}
