//! API网关客户端
//!
//! 应用其余部分使用的唯一门面,组合传输层 + 解码器 + 会话存储。
//! 每个操作遵循同一状态机:
//!
//! 1. 前置条件: 无令牌时立即以 `Unauthorized` 失败 (登录与公开统计除外)
//! 2. 派发: 拼接路径与查询串 (只附加非空过滤条件),调用传输层
//! 3. 状态解释: 200解码 / 401清会话 / >=500服务器错误 / 其余网络错误
//! 4. 传输失败: 统一归入网络错误
//!
//! 跨切面不变量: 任何接口返回401都会静默登出 -
//! 这不是单次调用的可选项。

use std::sync::Arc;

use chrono::NaiveDate;
use url::Url;

use crate::log_event;
use crate::models::decode;
use crate::models::{ApiError, GymMachine, LoginError, MachineEvent, MachineStats};
use crate::services::session_store::SessionStore;
use crate::services::transport::{ApiRequest, HttpResponse, Transport};

const LOGIN_ENDPOINT: &str = "/api/auth/login/";
const MACHINES_ENDPOINT: &str = "/api_root/machines/";

/// 登录失败的通用提示 (服务端未提供 `error` 字段时)
const LOGIN_FAILED_DEFAULT: &str = "登录失败";

/// 器械列表接口的响应包裹形态
///
/// 两种部署对同一端点的约定不一致 (分页包裹 vs 裸数组),
/// 按部署在构造时选择,不做自动探测。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachinesEnvelope {
    /// `{results: [...]}` 分页包裹
    Paged,
    /// 裸数组
    Bare,
}

/// 事件列表过滤条件
///
/// 只有非空条件会被附加到查询串。
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub event_type: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// API网关客户端
///
/// 单实例共享; 操作本身无内部并行,结果通过 `async fn`
/// 返回给调用方所在的上下文。本层不做重试 -
/// 失败报告一次,是否重试由UI决定。
pub struct GymApiClient<T: Transport> {
    base_url: Url,
    transport: T,
    session: Arc<SessionStore>,
    machines_envelope: MachinesEnvelope,
}

impl<T: Transport> GymApiClient<T> {
    /// 创建网关客户端
    ///
    /// 默认按分页包裹解码器械列表,可用
    /// [`with_machines_envelope`](Self::with_machines_envelope) 切换。
    pub fn new(base_url: Url, transport: T, session: Arc<SessionStore>) -> Self {
        Self {
            base_url,
            transport,
            session,
            machines_envelope: MachinesEnvelope::Paged,
        }
    }

    /// 切换器械列表的包裹形态
    pub fn with_machines_envelope(mut self, envelope: MachinesEnvelope) -> Self {
        self.machines_envelope = envelope;
        self
    }

    /// 登录
    ///
    /// 唯一没有令牌前置条件的写操作。成功时原子地保存
    /// 安全密钥与令牌并返回令牌; 非200时尝试读取响应体中的
    /// `error` 字段作为失败详情。
    pub async fn login(&self, security_key: &str) -> Result<String, LoginError> {
        let url = self
            .endpoint(LOGIN_ENDPOINT)
            .map_err(|e| LoginError::Network(e.to_string()))?;

        tracing::debug!(url = %url, "发起登录请求");

        let body = serde_json::json!({ "security_key": security_key });
        let response = self
            .transport
            .request(ApiRequest::post(url, body))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "登录请求失败");
                LoginError::from(e)
            })?;

        if response.status == 200 {
            let result = decode::login_result(&response.body).map_err(|e| {
                tracing::error!(error = %e, "登录响应解析失败");
                LoginError::Network(format!("响应解析失败: {}", e))
            })?;

            self.session.save_session(security_key, &result.token);
            let token_prefix: String = result.token.chars().take(10).collect();
            log_event!("LoginSucceeded", token_prefix = token_prefix.as_str());

            Ok(result.token)
        } else {
            let detail = decode::login_error_detail(&response.body)
                .unwrap_or_else(|| LOGIN_FAILED_DEFAULT.to_string());

            tracing::warn!(status = response.status, detail = %detail, "登录被拒绝");
            Err(LoginError::Rejected(detail))
        }
    }

    /// 登出
    ///
    /// 清除会话,幂等。
    pub fn logout(&self) {
        self.session.logout();
    }

    /// 获取器械列表
    pub async fn list_machines(&self) -> Result<Vec<GymMachine>, ApiError> {
        let url = self.endpoint(MACHINES_ENDPOINT)?;
        let body = self.get_authorized(url).await?;

        let machines = match self.machines_envelope {
            MachinesEnvelope::Paged => decode::machine_page(&body),
            MachinesEnvelope::Bare => decode::machine_array(&body),
        }
        .map_err(decode_failure)?;

        tracing::debug!(count = machines.len(), "器械列表获取成功");
        Ok(machines)
    }

    /// 获取指定器械的事件列表
    ///
    /// 过滤条件全部可选,只有非空条件进入查询串。
    pub async fn list_events(
        &self,
        machine_id: i64,
        filter: &EventFilter,
    ) -> Result<Vec<MachineEvent>, ApiError> {
        let url = self.events_url(machine_id, filter)?;
        let body = self.get_authorized(url).await?;
        let events = decode::event_page(&body).map_err(decode_failure)?;

        tracing::debug!(machine_id, count = events.len(), "事件列表获取成功");
        Ok(events)
    }

    /// 获取单条事件详情
    pub async fn event_detail(&self, event_id: i64) -> Result<MachineEvent, ApiError> {
        let url = self.endpoint(&format!("/api_root/events/{}/", event_id))?;
        let body = self.get_authorized(url).await?;
        decode::event(&body).map_err(decode_failure)
    }

    /// 获取器械使用统计 (需要令牌)
    pub async fn machine_stats(
        &self,
        machine_id: i64,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<MachineStats, ApiError> {
        let url = self.stats_url(machine_id, date_from, date_to)?;
        let body = self.get_authorized(url).await?;
        decode::stats(&body).map_err(decode_failure)
    }

    /// 获取器械使用统计 (公开部署变体)
    ///
    /// 与 [`machine_stats`](Self::machine_stats) 唯一的差别是
    /// 没有令牌前置条件,请求不携带认证头。
    /// 状态解释不变 - 401仍会清除会话。
    pub async fn machine_stats_public(
        &self,
        machine_id: i64,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<MachineStats, ApiError> {
        let url = self.stats_url(machine_id, date_from, date_to)?;
        let response = self.send_get(url, None).await?;
        let body = self.interpret(response)?;
        decode::stats(&body).map_err(decode_failure)
    }

    /// 带令牌前置条件的GET: 无令牌立即失败,不触网
    async fn get_authorized(&self, url: Url) -> Result<String, ApiError> {
        let token = self
            .session
            .token()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                tracing::warn!(url = %url, "无可用令牌, 请求未发出");
                ApiError::Unauthorized
            })?;

        let response = self.send_get(url, Some(token)).await?;
        self.interpret(response)
    }

    async fn send_get(&self, url: Url, token: Option<String>) -> Result<HttpResponse, ApiError> {
        let mut request = ApiRequest::get(url.clone());
        if let Some(token) = token {
            request = request.with_token(token);
        }

        self.transport.request(request).await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "网络请求失败");
            ApiError::from(e)
        })
    }

    /// 统一状态解释
    ///
    /// 200放行响应体; 401清会话并报未授权;
    /// >=500服务器错误; 其余一律网络错误。
    fn interpret(&self, response: HttpResponse) -> Result<String, ApiError> {
        match response.status {
            200 => Ok(response.body),
            401 => {
                tracing::warn!("令牌无效或已过期, 清除会话");
                self.session.logout();
                Err(ApiError::Unauthorized)
            }
            status if status >= 500 => {
                tracing::error!(status, "服务器错误");
                Err(ApiError::Server(format!("HTTP {}", status)))
            }
            status => {
                tracing::error!(status, "非预期状态码");
                Err(ApiError::Network(format!("HTTP {}", status)))
            }
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Network(format!("URL拼接失败: {}", e)))
    }

    fn events_url(&self, machine_id: i64, filter: &EventFilter) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&format!("/api/machines/{}/events/", machine_id))?;

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(event_type) = filter.event_type.as_deref().filter(|v| !v.is_empty()) {
            params.push(("event_type", event_type.to_string()));
        }
        if let Some(date) = filter.date_from {
            params.push(("date_from", format_date(date)));
        }
        if let Some(date) = filter.date_to {
            params.push(("date_to", format_date(date)));
        }

        append_query(&mut url, &params);
        Ok(url)
    }

    fn stats_url(
        &self,
        machine_id: i64,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&format!("/api_root/machines/{}/stats/", machine_id))?;

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(date) = date_from {
            params.push(("date_from", format_date(date)));
        }
        if let Some(date) = date_to {
            params.push(("date_to", format_date(date)));
        }

        append_query(&mut url, &params);
        Ok(url)
    }
}

/// 200响应体解码失败按服务器错误上报
fn decode_failure(err: serde_json::Error) -> ApiError {
    tracing::error!(error = %err, "响应解析失败");
    ApiError::Server(format!("响应解析失败: {}", err))
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 追加查询串
///
/// 无参数时不触碰URL,避免产生孤立的 `?`。
fn append_query(url: &mut Url, params: &[(&str, String)]) {
    if params.is_empty() {
        return;
    }

    let mut pairs = url.query_pairs_mut();
    for (key, value) in params {
        pairs.append_pair(key, value);
    }
}
