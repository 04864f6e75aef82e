//! 响应解码
//!
//! 纯函数,无IO。把原始JSON响应体转换为类型化记录。
//!
//! 两种列表包裹形态 (分页 `{results: [...]}` 与裸数组) 由调用端点
//! 显式选择入口函数,不做自动探测 - 两种部署对同一端点的形态
//! 约定不一致,不假设哪一方是权威。

use serde::Deserialize;

use crate::models::{GymMachine, MachineEvent, MachineStats};

/// 分页响应包裹
#[derive(Debug, Deserialize)]
struct PageEnvelope<T> {
    results: Vec<T>,
}

/// 登录成功响应
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResult {
    /// 会话令牌
    pub token: String,
}

/// 登录失败响应体 (可选的 `error` 字段)
#[derive(Debug, Deserialize)]
struct LoginErrorBody {
    error: Option<String>,
}

/// 解码单台器械
pub fn machine(body: &str) -> Result<GymMachine, serde_json::Error> {
    serde_json::from_str(body)
}

/// 解码分页包裹的器械列表 (`{results: [...]}`)
pub fn machine_page(body: &str) -> Result<Vec<GymMachine>, serde_json::Error> {
    let page: PageEnvelope<GymMachine> = serde_json::from_str(body)?;
    Ok(page.results)
}

/// 解码裸数组形态的器械列表
pub fn machine_array(body: &str) -> Result<Vec<GymMachine>, serde_json::Error> {
    serde_json::from_str(body)
}

/// 解码单条事件 (事件详情接口)
pub fn event(body: &str) -> Result<MachineEvent, serde_json::Error> {
    serde_json::from_str(body)
}

/// 解码分页包裹的事件列表
pub fn event_page(body: &str) -> Result<Vec<MachineEvent>, serde_json::Error> {
    let page: PageEnvelope<MachineEvent> = serde_json::from_str(body)?;
    Ok(page.results)
}

/// 解码器械统计
pub fn stats(body: &str) -> Result<MachineStats, serde_json::Error> {
    serde_json::from_str(body)
}

/// 解码登录成功响应
///
/// `token` 为必填字段,缺失时返回解码错误。
pub fn login_result(body: &str) -> Result<LoginResult, serde_json::Error> {
    serde_json::from_str(body)
}

/// 从登录失败响应体中提取服务端给出的错误详情
///
/// 响应体不是JSON或没有 `error` 字段时返回None,
/// 由调用方回退到通用提示。
pub fn login_error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<LoginErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
}
