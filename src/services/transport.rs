//! HTTP传输层
//!
//! 职责: 发出单次HTTP请求,返回状态码与原始响应体
//! 不做状态码解释,不做JSON解码 - 那是网关层的事

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use url::Url;

use crate::models::TransportError;

/// 主API调用的连接/读取超时
pub const API_TIMEOUT: Duration = Duration::from_secs(10);

/// 单次HTTP请求描述
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    /// 会话令牌,提供时附加 `Authorization: Token <值>` 头
    pub auth_token: Option<String>,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

impl ApiRequest {
    /// GET请求,默认API超时
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            auth_token: None,
            body: None,
            timeout: API_TIMEOUT,
        }
    }

    /// POST请求,携带JSON请求体
    pub fn post(url: Url, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            url,
            auth_token: None,
            body: Some(body),
            timeout: API_TIMEOUT,
        }
    }

    /// 附加会话令牌
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

/// 状态码与原始响应体
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// 传输层抽象
///
/// 网关与测试替身共用的唯一接口。
pub trait Transport: Send + Sync {
    /// 发出请求
    ///
    /// 成功时返回任意状态码的响应; 只有网络层异常
    /// (DNS、超时、IO) 才归入 [`TransportError`]。
    fn request(
        &self,
        req: ApiRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn request(
        &self,
        req: ApiRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).request(req)
    }
}

/// reqwest实现
///
/// 连接在每条退出路径上都由reqwest自动归还连接池,
/// 响应体总是被完整读出。
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// 创建传输层
    ///
    /// 固定连接超时; 读取超时按请求设置 (图片抓取用更短的超时)。
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(API_TIMEOUT)
            .build()
            .map_err(TransportError::from)?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn request(
        &self,
        req: ApiRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let client = self.client.clone();

        async move {
            let mut builder = client
                .request(req.method.clone(), req.url.clone())
                .timeout(req.timeout)
                .header(ACCEPT, "application/json");

            if let Some(token) = &req.auth_token {
                builder = builder.header(AUTHORIZATION, format!("Token {}", token));
            }

            if let Some(body) = &req.body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(TransportError::from)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(TransportError::from)?;

            tracing::debug!(
                method = %req.method,
                url = %req.url,
                status = status,
                body_len = body.len(),
                "HTTP请求完成"
            );

            Ok(HttpResponse { status, body })
        }
    }
}
