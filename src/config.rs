//! 应用配置
//!
//! 从 .env 文件与环境变量加载API基地址。
//! 原生Android版本通过构建类型切换基地址 (调试走本机模拟器
//! 地址,发布走线上域名),这里用环境变量承担同一职责。

use std::env;

use thiserror::Error;
use url::Url;

/// 默认API基地址 (本地开发部署)
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// API_BASE_URL 不是合法URL
    #[error("API基地址无效: {0}")]
    InvalidBaseUrl(String),
}

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API基地址,所有接口路径与相对图片URL都基于它拼接
    pub api_base_url: Url,
}

impl AppConfig {
    /// 从环境加载配置
    ///
    /// 读取顺序:
    /// 1. 加载 .env 文件 (不存在时静默跳过)
    /// 2. 读取 API_BASE_URL,缺失时用本地默认值
    ///
    /// # 错误处理
    /// 基地址无法解析为URL时拒绝启动 - 带着坏地址运行
    /// 只会把失败推迟到第一次请求。
    pub fn from_env() -> Result<Self, ConfigError> {
        // .env 不存在不算错误
        dotenvy::dotenv().ok();

        let raw = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        // 去掉尾部斜杠,保证路径拼接结果一致
        let trimmed = raw.trim_end_matches('/');

        let api_base_url = Url::parse(trimmed)
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", trimmed, e)))?;

        tracing::info!(api_base_url = %api_base_url, "配置已加载");

        Ok(Self { api_base_url })
    }
}
