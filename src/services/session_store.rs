//! 会话存储
//!
//! 职责: 持有当前会话令牌与换取它的安全密钥
//! 策略: 凭证落地委托给平台安全存储能力,本层只做生命周期编排

use std::sync::{Arc, RwLock};

/// 安全凭证存储能力
///
/// 平台侧的安全存储 (Keystore等) 实现此trait后注入。
/// 契约仅有读/写/清除,没有网络或解析逻辑。
/// 所有写入都是后写覆盖,无读-改-写模式,因此无需额外加锁。
pub trait TokenStorage: Send + Sync {
    /// 读取令牌
    fn token(&self) -> Option<String>;

    /// 读取安全密钥
    fn security_key(&self) -> Option<String>;

    /// 保存令牌
    fn save_token(&self, token: &str);

    /// 保存安全密钥
    fn save_security_key(&self, key: &str);

    /// 清除全部凭证
    fn clear_all(&self);
}

/// 内存实现
///
/// 参考实现,也是测试中的标准替身。
#[derive(Default)]
pub struct InMemoryTokenStorage {
    inner: RwLock<StoredCredentials>,
}

#[derive(Default)]
struct StoredCredentials {
    token: Option<String>,
    security_key: Option<String>,
}

impl InMemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for InMemoryTokenStorage {
    fn token(&self) -> Option<String> {
        self.inner.read().ok().and_then(|creds| creds.token.clone())
    }

    fn security_key(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|creds| creds.security_key.clone())
    }

    fn save_token(&self, token: &str) {
        if let Ok(mut creds) = self.inner.write() {
            creds.token = Some(token.to_string());
        }
    }

    fn save_security_key(&self, key: &str) {
        if let Ok(mut creds) = self.inner.write() {
            creds.security_key = Some(key.to_string());
        }
    }

    fn clear_all(&self) {
        if let Ok(mut creds) = self.inner.write() {
            *creds = StoredCredentials::default();
        }
    }
}

/// 会话存储
///
/// 不变量: 令牌非空 等价于 已登录。
/// 生命周期: 首次启动为空; 登录成功时整体写入;
/// 登出或任一接口返回401时整体清除。
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    /// 用平台安全存储能力创建会话存储
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// 内存版会话存储 (测试与诊断工具用)
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTokenStorage::new()))
    }

    /// 当前是否持有非空令牌
    pub fn has_token(&self) -> bool {
        self.storage
            .token()
            .map(|token| !token.is_empty())
            .unwrap_or(false)
    }

    /// 读取令牌
    pub fn token(&self) -> Option<String> {
        self.storage.token()
    }

    /// 读取安全密钥
    pub fn security_key(&self) -> Option<String> {
        self.storage.security_key()
    }

    /// 保存会话
    ///
    /// 登录成功时原子地写入安全密钥与令牌。
    pub fn save_session(&self, security_key: &str, token: &str) {
        self.storage.save_security_key(security_key);
        self.storage.save_token(token);
        tracing::info!(
            token_prefix = %prefix(token, 10),
            "会话已保存"
        );
    }

    /// 登出
    ///
    /// 整体清除凭证,幂等操作。
    pub fn logout(&self) {
        self.storage.clear_all();
        tracing::info!("会话已清除");
    }
}

/// 日志用凭证前缀 (不记录完整值)
fn prefix(value: &str, len: usize) -> String {
    value.chars().take(len).collect()
}
