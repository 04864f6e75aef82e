//! 图片抓取缓存
//!
//! 职责: 按URL并发抓取远端图片,解码后投递到展示槽位
//! 核心正确性约束: 乱序完成的旧结果绝不能覆盖已经换上
//! 新数据的槽位 - 归属标签比对就是取消语义,在途抓取
//! 本身没有中断机制。
//!
//! 失败 (非200、解码失败、任何异常) 只记录日志并保留占位图,
//! 永远不作为用户可见错误上报。

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::DynamicImage;
use reqwest::header::AUTHORIZATION;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, Semaphore};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::models::TransportError;
use crate::services::session_store::SessionStore;

/// 同一缓存实例的最大在途抓取数
///
/// 不同缓存实例互不共享此上限。
pub const MAX_CONCURRENT_FETCHES: usize = 3;

/// 图片规格
///
/// 决定传输超时: 缩略图5秒,原图10秒。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// 列表缩略图
    Thumbnail,
    /// 全分辨率原图
    Full,
}

impl ImageKind {
    pub fn timeout(self) -> Duration {
        match self {
            ImageKind::Thumbnail => Duration::from_secs(5),
            ImageKind::Full => Duration::from_secs(10),
        }
    }
}

/// 图片抓取错误
///
/// 仅在缓存内部消化,不跨出组件边界。
#[derive(Debug, Error)]
pub enum FetchError {
    /// 非200状态码
    #[error("HTTP状态码 {0}")]
    Status(u16),

    /// 传输层失败
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// 槽位当前展示的内容
#[derive(Debug, Clone)]
pub enum SlotImage {
    /// 尚未分配过任何URL
    Empty,
    /// 占位图 (抓取中或抓取失败)
    Placeholder,
    /// 解码完成的图片
    Ready(Arc<DynamicImage>),
}

impl SlotImage {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, SlotImage::Placeholder)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SlotImage::Ready(_))
    }
}

/// 展示槽位
///
/// UI侧可复用视图的替身: 持有"归属标签" (当前关联的URL)
/// 与展示内容。标签比对由缓存拥有,不依赖任何视图对象,
/// 因此过期丢弃性质可以脱离UI测试。
pub struct DisplaySlot {
    inner: Mutex<SlotState>,
}

struct SlotState {
    owner: Option<String>,
    image: SlotImage,
}

impl DisplaySlot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(SlotState {
                owner: None,
                image: SlotImage::Empty,
            }),
        })
    }

    /// 重新分配槽位: 立即换上占位图并打归属标签
    ///
    /// 这一步就是取消机制 - 之后到达的旧URL结果会因
    /// 标签不匹配而被丢弃。
    fn assign(&self, owner: Option<String>) {
        if let Ok(mut state) = self.inner.lock() {
            state.owner = owner;
            state.image = SlotImage::Placeholder;
        }
    }

    /// 当前归属标签
    pub fn owner(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|state| state.owner.clone())
    }

    /// 当前展示内容
    pub fn image(&self) -> SlotImage {
        self.inner
            .lock()
            .map(|state| state.image.clone())
            .unwrap_or(SlotImage::Empty)
    }

    /// 仅当归属标签仍等于 `url` 时应用图片
    ///
    /// 返回是否实际应用。
    fn apply_if_current(&self, url: &str, image: Arc<DynamicImage>) -> bool {
        match self.inner.lock() {
            Ok(mut state) => {
                if state.owner.as_deref() == Some(url) {
                    state.image = SlotImage::Ready(image);
                    true
                } else {
                    false
                }
            }
            Err(_) => false,
        }
    }
}

/// 图片字节抓取能力
///
/// 缓存与测试替身共用的接口,返回原始字节,不做解码。
pub trait ImageFetcher: Send + Sync + 'static {
    fn fetch_bytes(
        &self,
        url: Url,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

impl<F: ImageFetcher> ImageFetcher for Arc<F> {
    fn fetch_bytes(
        &self,
        url: Url,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        (**self).fetch_bytes(url, auth_token, timeout)
    }
}

/// reqwest实现
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(ImageKind::Full.timeout())
            .build()
            .map_err(TransportError::from)?;

        Ok(Self { client })
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch_bytes(
        &self,
        url: Url,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        let client = self.client.clone();

        async move {
            let mut builder = client.get(url).timeout(timeout);
            if let Some(token) = &auth_token {
                builder = builder.header(AUTHORIZATION, format!("Token {}", token));
            }

            let response = builder.send().await.map_err(TransportError::from)?;
            let status = response.status().as_u16();
            if status != 200 {
                return Err(FetchError::Status(status));
            }

            let bytes = response.bytes().await.map_err(TransportError::from)?;
            Ok(bytes.to_vec())
        }
    }
}

/// 投递消息
enum UiMessage {
    Apply {
        slot: Arc<DisplaySlot>,
        url: String,
        image: Arc<DynamicImage>,
    },
    Flush(oneshot::Sender<()>),
}

/// UI投递器
///
/// 单消费者任务,主线程Handler的替身: 所有图片应用
/// 在同一个任务上串行执行,标签比对发生在应用时刻。
pub struct UiDispatcher {
    tx: mpsc::UnboundedSender<UiMessage>,
    cancel: CancellationToken,
}

impl UiDispatcher {
    /// 启动投递任务
    pub fn start() -> (Arc<Self>, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    message = rx.recv() => match message {
                        Some(UiMessage::Apply { slot, url, image }) => {
                            if slot.apply_if_current(&url, image) {
                                tracing::debug!(url = %url, "图片已投递");
                            } else {
                                tracing::debug!(url = %url, "槽位已易主, 丢弃过期结果");
                            }
                        }
                        Some(UiMessage::Flush(ack)) => {
                            let _ = ack.send(());
                        }
                        None => break,
                    },
                }
            }
        });

        (Arc::new(Self { tx, cancel }), handle)
    }

    fn deliver(&self, slot: Arc<DisplaySlot>, url: String, image: Arc<DynamicImage>) {
        let _ = self.tx.send(UiMessage::Apply { slot, url, image });
    }

    /// 等待此前排入的所有投递处理完毕 (测试与停机前同步用)
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(UiMessage::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// 停止投递任务
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

/// 图片抓取缓存
///
/// 组合抓取能力 + 并发上限 + 投递器。相对URL会被解析到
/// 配置的基地址,绝对URL原样放行。
pub struct ImageCache<F: ImageFetcher> {
    base_url: Url,
    fetcher: Arc<F>,
    session: Arc<SessionStore>,
    dispatcher: Arc<UiDispatcher>,
    permits: Arc<Semaphore>,
}

impl<F: ImageFetcher> ImageCache<F> {
    pub fn new(
        base_url: Url,
        fetcher: F,
        session: Arc<SessionStore>,
        dispatcher: Arc<UiDispatcher>,
    ) -> Self {
        Self {
            base_url,
            fetcher: Arc::new(fetcher),
            session,
            dispatcher,
            permits: Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES)),
        }
    }

    /// 抓取图片并在完成后投递到槽位
    ///
    /// 立即给槽位换上占位图并打上 `url` 归属标签,然后把
    /// 抓取提交到受限工作池。完成顺序不保证与提交顺序一致,
    /// 唯一的顺序保证是投递时的标签比对。
    ///
    /// 空URL只重置槽位,不提交抓取。
    /// 返回的句柄仅表示抓取任务本身结束 (投递经由投递器异步完成)。
    pub fn fetch(
        &self,
        url: &str,
        slot: &Arc<DisplaySlot>,
        kind: ImageKind,
        auth_required: bool,
    ) -> Option<JoinHandle<()>> {
        if url.is_empty() {
            slot.assign(None);
            return None;
        }

        slot.assign(Some(url.to_string()));

        let resolved = match self.resolve(url) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "图片URL无效");
                return None;
            }
        };

        let auth_token = if auth_required {
            self.session.token().filter(|token| !token.is_empty())
        } else {
            None
        };

        let fetcher = Arc::clone(&self.fetcher);
        let dispatcher = Arc::clone(&self.dispatcher);
        let permits = Arc::clone(&self.permits);
        let slot = Arc::clone(slot);
        let owner_url = url.to_string();
        let timeout = kind.timeout();

        Some(tokio::spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };

            let bytes = match fetcher.fetch_bytes(resolved.clone(), auth_token, timeout).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(url = %resolved, error = %e, "图片抓取失败");
                    return;
                }
            };

            let image = match image::load_from_memory(&bytes) {
                Ok(image) => Arc::new(image),
                Err(e) => {
                    tracing::warn!(url = %resolved, error = %e, "图片解码失败");
                    return;
                }
            };

            dispatcher.deliver(slot, owner_url, image);
        }))
    }

    /// 相对URL解析到基地址,绝对URL原样放行
    fn resolve(&self, url: &str) -> Result<Url, url::ParseError> {
        if url.starts_with("http") {
            Url::parse(url)
        } else {
            self.base_url.join(url)
        }
    }
}
