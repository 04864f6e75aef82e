//! 测试公共模块
//!
//! 提供脚本化的传输层/抓取器替身,避免真实网络依赖。
//! 每个替身都会记录收到的请求,供断言副作用使用。

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::oneshot;
use url::Url;

use gym_viewer::models::TransportError;
use gym_viewer::services::image_cache::FetchError;
use gym_viewer::services::{ApiRequest, HttpResponse, ImageFetcher, Transport};

/// 脚本化传输层
///
/// 按入队顺序返回预设响应,并记录每个发出的请求。
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 预设一个HTTP响应
    pub fn push_response(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
    }

    /// 预设一个传输层失败
    pub fn push_error(&self, err: TransportError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    /// 已发出的请求 (按顺序)
    pub fn recorded(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn request(
        &self,
        req: ApiRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        self.requests.lock().unwrap().push(req);
        let scripted = self.responses.lock().unwrap().pop_front();

        async move {
            match scripted {
                Some(result) => result,
                None => Err(TransportError::OtherIo("未编排的请求".into())),
            }
        }
    }
}

/// 单条抓取脚本
struct FetchScript {
    result: Result<Vec<u8>, u16>,
    /// 可选的闸门: 收到信号前抓取不完成,用于制造乱序完成
    gate: Option<oneshot::Receiver<()>>,
}

/// 脚本化图片抓取器
///
/// 按解析后的绝对URL编排结果,并记录每次抓取携带的令牌。
pub struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, FetchScript>>,
    started: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            started: Mutex::new(Vec::new()),
        }
    }

    /// 编排一次成功抓取
    pub fn ok(&self, url: &str, bytes: Vec<u8>) {
        self.scripts.lock().unwrap().insert(
            url.to_string(),
            FetchScript {
                result: Ok(bytes),
                gate: None,
            },
        );
    }

    /// 编排一次带闸门的成功抓取,返回放行端
    pub fn ok_gated(&self, url: &str, bytes: Vec<u8>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.scripts.lock().unwrap().insert(
            url.to_string(),
            FetchScript {
                result: Ok(bytes),
                gate: Some(rx),
            },
        );
        tx
    }

    /// 编排一次非200失败
    pub fn fail_status(&self, url: &str, status: u16) {
        self.scripts.lock().unwrap().insert(
            url.to_string(),
            FetchScript {
                result: Err(status),
                gate: None,
            },
        );
    }

    /// 已开始的抓取 (URL与携带的令牌)
    pub fn started(&self) -> Vec<(String, Option<String>)> {
        self.started.lock().unwrap().clone()
    }
}

impl ImageFetcher for ScriptedFetcher {
    fn fetch_bytes(
        &self,
        url: Url,
        auth_token: Option<String>,
        _timeout: Duration,
    ) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        self.started
            .lock()
            .unwrap()
            .push((url.to_string(), auth_token));
        let script = self.scripts.lock().unwrap().remove(url.as_str());

        async move {
            match script {
                Some(FetchScript { result, gate }) => {
                    if let Some(gate) = gate {
                        let _ = gate.await;
                    }
                    result.map_err(FetchError::Status)
                }
                None => Err(FetchError::Transport(TransportError::OtherIo(
                    "未编排的URL".into(),
                ))),
            }
        }
    }
}

/// 生成可解码的纯色PNG字节,尺寸用于区分不同图片
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([64, 64, 64]));
    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .expect("PNG编码失败");
    buffer.into_inner()
}
