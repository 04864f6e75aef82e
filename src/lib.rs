//! 健身房器械使用数据客户端 - 认证API访问层
//!
//! 移动端/桌面端UI背后的数据层: 安全密钥登录换取会话令牌,
//! 之后的器械列表、使用事件与聚合统计都经由令牌认证的HTTP
//! 接口获取; 远端图片按URL并发抓取并安全投递到可复用的
//! 展示槽位。
//!
//! # 模块划分
//!
//! - [`models`]: 数据模型与封闭错误集合
//! - [`services`]: 会话存储、传输层、API网关、图片缓存
//! - [`config`]: .env 配置加载
//! - [`state`]: Arc组合的应用状态 (依赖注入的组合根)
//! - [`utils`]: 日志初始化
//!
//! # 使用示例
//!
//! ```no_run
//! use std::sync::Arc;
//! use gym_viewer::config::AppConfig;
//! use gym_viewer::services::{EventFilter, InMemoryTokenStorage};
//! use gym_viewer::state::AppState;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let state = AppState::new(&config, Arc::new(InMemoryTokenStorage::new()))?;
//!
//! // 登录后才能访问受保护接口
//! state.api.login("my-security-key").await?;
//!
//! let machines = state.api.list_machines().await?;
//! for machine in &machines {
//!     let events = state
//!         .api
//!         .list_events(machine.id, &EventFilter::default())
//!         .await?;
//!     println!("{}: {} 条事件", machine.name, events.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
