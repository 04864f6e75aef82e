//! 数据模型模块
//!
//! 包含所有核心数据结构:
//! - errors: 错误类型定义 (传输层、API分类、登录错误)
//! - machine: 健身器械 (器械列表)
//! - event: 器械使用事件 (事件列表/详情)
//! - stats: 器械使用统计 (聚合数据与最繁忙日查询)
//! - decode: 响应解码入口 (分页包裹与裸数组两种形态)
//!
//! # 设计原则
//!
//! 1. **存在即合理**: 每个字段都有明确目的,无冗余
//! 2. **容错解码**: 除必填ID外所有字段缺失时取类型默认值
//! 3. **日志安全**: 令牌与安全密钥不完整记录到日志

pub mod decode;
pub mod errors;
pub mod event;
pub mod machine;
pub mod stats;

// 重导出常用类型,简化外部引用
pub use decode::LoginResult;
pub use errors::{ApiError, LoginError, TransportError};
pub use event::MachineEvent;
pub use machine::{GymMachine, LastEvent};
pub use stats::{DailyUsage, MachineStats};
