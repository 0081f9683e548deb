// staffhub-client/src/http.rs
// HTTP 客户端 - 网络通信

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::ApiErrorCode;
use shared::client::{DeleteAck, LoginRequest, LoginResponse, RegisterRequest};
use shared::models::{AccountInfo, Employee, EmployeeCreate, EmployeeUpdate};

use crate::config::ClientConfig;
use crate::{ClientError, ClientResult};

/// 服务端返回的错误响应格式
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    pub code: String,
    pub message: String,
}

/// 网络 HTTP 客户端
///
/// 登录后持有会话令牌，同时通过 Cookie 存储和 Bearer 头附加到后续请求。
#[derive(Debug, Clone)]
pub struct StaffhubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl StaffhubClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 当前会话令牌
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            // 尝试解析为 API 错误响应 ({code, message})
            if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
                return Err(classify(status, &api_err.code, api_err.message));
            }
            // 降级到按状态码分类
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::NOT_FOUND => ClientError::NotFound(text),
                StatusCode::CONFLICT => ClientError::Conflict(text),
                StatusCode::BAD_REQUEST => ClientError::Validation(text),
                _ => ClientError::Internal(text),
            });
        }
        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut req = self.client.get(self.url(path));
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut req = self.client.put(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut req = self.client.delete(self.url(path));
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = req.send().await?;
        self.handle_response(response).await
    }

    // ========== Auth API ==========

    /// 注册账户
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AccountInfo> {
        self.post(
            "api/auth/register",
            &RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    /// 登录并保存会话令牌
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let response: LoginResponse = self
            .post(
                "api/auth/login",
                &LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    /// 当前账户信息
    pub async fn me(&self) -> ClientResult<AccountInfo> {
        self.get("api/auth/me").await
    }

    /// 登出并清除本地令牌
    pub async fn logout(&mut self) -> ClientResult<()> {
        let result: ClientResult<()> = self.post("api/auth/logout", &serde_json::json!({})).await;
        self.token = None;
        result
    }

    // ========== Employee API ==========

    /// 当前账户名下的全部员工，按创建时间倒序
    pub async fn list_employees(&self) -> ClientResult<Vec<Employee>> {
        self.get("api/employees").await
    }

    /// 创建员工
    pub async fn create_employee(&self, data: &EmployeeCreate) -> ClientResult<Employee> {
        self.post("api/employees", data).await
    }

    /// 部分更新员工 (只发送要修改的字段)
    pub async fn update_employee(
        &self,
        id: &str,
        data: &EmployeeUpdate,
    ) -> ClientResult<Employee> {
        self.put(&format!("api/employees/{}", id), data).await
    }

    /// 删除员工
    pub async fn delete_employee(&self, id: &str) -> ClientResult<DeleteAck> {
        self.delete(&format!("api/employees/{}", id)).await
    }
}

/// Map the server's error envelope to the client taxonomy; fall back to
/// the HTTP status when the code is unknown
fn classify(status: StatusCode, code: &str, message: String) -> ClientError {
    match ApiErrorCode::from_code(code) {
        Some(ApiErrorCode::Unauthorized)
        | Some(ApiErrorCode::InvalidToken)
        | Some(ApiErrorCode::TokenExpired) => ClientError::Unauthorized,
        Some(ApiErrorCode::NotFound) => ClientError::NotFound(message),
        Some(ApiErrorCode::Conflict) => ClientError::Conflict(message),
        Some(ApiErrorCode::Validation) | Some(ApiErrorCode::Invalid) => {
            ClientError::Validation(message)
        }
        Some(ApiErrorCode::Database) | Some(ApiErrorCode::Internal) => {
            ClientError::Internal(message)
        }
        _ => match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Internal(message),
        },
    }
}
