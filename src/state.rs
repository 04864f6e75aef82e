use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::TransportError;
use crate::services::{
    GymApiClient, HttpImageFetcher, HttpTransport, ImageCache, SessionStore, TokenStorage,
    UiDispatcher,
};

/// 应用全局状态
///
/// 显式构造、依赖注入的组合根 - 没有环境单例查找,
/// 所有共享服务以Arc传递,生命周期与应用一致。
pub struct AppState {
    /// 会话存储: 唯一的跨切面可变共享状态
    pub session: Arc<SessionStore>,

    /// API网关客户端: 唯一的后端通信门面
    pub api: Arc<GymApiClient<HttpTransport>>,

    /// 缩略图缓存: 器械/事件列表用,独立的3并发上限
    pub thumbnails: Arc<ImageCache<HttpImageFetcher>>,

    /// 原图缓存: 事件详情大图用,与缩略图缓存互不共享上限
    pub photos: Arc<ImageCache<HttpImageFetcher>>,

    /// UI投递器: 所有图片应用在此串行执行
    pub dispatcher: Arc<UiDispatcher>,
}

impl AppState {
    /// 初始化应用状态
    ///
    /// # 参数
    /// - `config`: API基地址等配置
    /// - `storage`: 平台安全凭证存储能力
    ///
    /// # 错误处理
    /// HTTP客户端构建失败时整个应用无法启动 -
    /// 不完整的状态等同于无用。
    pub fn new(config: &AppConfig, storage: Arc<dyn TokenStorage>) -> Result<Self, TransportError> {
        let session = Arc::new(SessionStore::new(storage));
        let api = Arc::new(GymApiClient::new(
            config.api_base_url.clone(),
            HttpTransport::new()?,
            Arc::clone(&session),
        ));

        let (dispatcher, _dispatch_task) = UiDispatcher::start();

        let thumbnails = Arc::new(ImageCache::new(
            config.api_base_url.clone(),
            HttpImageFetcher::new()?,
            Arc::clone(&session),
            Arc::clone(&dispatcher),
        ));
        let photos = Arc::new(ImageCache::new(
            config.api_base_url.clone(),
            HttpImageFetcher::new()?,
            Arc::clone(&session),
            Arc::clone(&dispatcher),
        ));

        tracing::info!(
            api_base_url = %config.api_base_url,
            "应用状态初始化完成"
        );

        Ok(Self {
            session,
            api,
            thumbnails,
            photos,
            dispatcher,
        })
    }
}
