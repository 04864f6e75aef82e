use thiserror::Error;

/// 传输层错误
///
/// 对reqwest抛出的异常做三分类。三种错误在网关层统一
/// 折叠为 `ApiError::Network` - 调用方无法区分DNS失败和连接中断,
/// 这是有意的设计。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// 域名解析失败或无法建立连接
    #[error("无法连接到服务器: {0}")]
    UnknownHost(String),

    /// 连接或读取超时
    #[error("请求超时: {0}")]
    Timeout(String),

    /// 其他网络IO错误
    #[error("网络IO错误: {0}")]
    OtherIo(String),
}

/// API错误分类
///
/// 封闭集合,每个失败的网关操作都携带其中之一。
/// UI层的处理规则:
/// - `Unauthorized`: 清除会话后静默跳转登录页
/// - `Network`: 通用网络错误提示
/// - `Server`: 通用服务器错误提示
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 令牌缺失、过期或无效
    ///
    /// 任何接口返回401都会触发强制登出
    #[error("未授权: 令牌缺失或已失效")]
    Unauthorized,

    /// 网络错误
    ///
    /// DNS失败、超时、IO异常、以及非5xx/非401的意外状态码
    #[error("网络错误: {0}")]
    Network(String),

    /// 服务器错误
    ///
    /// 5xx状态码,或200响应体解析失败
    #[error("服务器错误: {0}")]
    Server(String),
}

/// 登录错误
///
/// 登录接口与其他接口不同: 非200时尝试读取响应体中
/// 服务端提供的 `error` 字段作为失败详情。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// 服务端拒绝登录,携带失败详情 (无 `error` 字段时为通用提示)
    #[error("{0}")]
    Rejected(String),

    /// 网络层失败
    #[error("网络错误: {0}")]
    Network(String),
}

/// 实现从reqwest::Error到TransportError的转换
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::UnknownHost(err.to_string())
        } else {
            TransportError::OtherIo(err.to_string())
        }
    }
}

/// 三类传输错误统一折叠为网络错误
impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<TransportError> for LoginError {
    fn from(err: TransportError) -> Self {
        LoginError::Network(err.to_string())
    }
}
