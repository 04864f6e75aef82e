//! 服务层模块
//!
//! 包含所有业务逻辑服务:
//! - `session_store`: 会话存储,令牌生命周期编排
//! - `transport`: HTTP传输层,单次请求与异常三分类
//! - `gym_api`: API网关客户端,统一状态解释与强制登出
//! - `image_cache`: 图片抓取缓存,受限并发与过期结果丢弃
//!
//! # 服务架构
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │            UI (范围之外)              │
//! └───────┬──────────────────┬───────────┘
//!         │                  │
//!         ▼                  ▼
//! ┌──────────────┐   ┌──────────────┐
//! │ GymApiClient │   │  ImageCache  │
//! └──┬────────┬──┘   └──┬────────┬──┘
//!    │        │         │        │
//!    ▼        ▼         ▼        ▼
//! ┌────────┐ ┌─────────────┐ ┌────────────┐
//! │Transport│ │SessionStore │ │UiDispatcher│
//! └────────┘ └─────────────┘ └────────────┘
//! ```
//!
//! # 设计原则
//!
//! 1. **存在即合理**: 每个服务都有单一职责,互不重叠
//! 2. **错误处理**: 所有外部调用都在边界内折叠为封闭错误集合
//! 3. **日志安全**: 记录关键操作,不记录完整令牌或密钥

pub mod gym_api;
pub mod image_cache;
pub mod session_store;
pub mod transport;

// 重导出常用类型,简化外部引用
pub use gym_api::{EventFilter, GymApiClient, MachinesEnvelope};
pub use image_cache::{
    DisplaySlot, HttpImageFetcher, ImageCache, ImageFetcher, ImageKind, SlotImage, UiDispatcher,
};
pub use session_store::{InMemoryTokenStorage, SessionStore, TokenStorage};
pub use transport::{ApiRequest, HttpResponse, HttpTransport, Transport};
