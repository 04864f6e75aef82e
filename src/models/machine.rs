use serde::Deserialize;

/// 健身器械
///
/// 器械列表接口返回的单台设备。解码后不可变,
/// 每次刷新列表时整体替换。
///
/// 必填字段仅有 `id`,其余字段缺失时取类型默认值
/// (`is_active` 默认为 true)。
#[derive(Debug, Clone, Deserialize)]
pub struct GymMachine {
    /// 器械唯一ID (必填)
    pub id: i64,

    /// 器械名称
    #[serde(default)]
    pub name: String,

    /// 器械类型
    #[serde(default)]
    pub machine_type: String,

    /// 所在位置
    #[serde(default)]
    pub location: String,

    /// 描述
    #[serde(default)]
    pub description: String,

    /// 缩略图URL (可能是相对路径)
    #[serde(default, rename = "thumbnail")]
    pub thumbnail_url: String,

    /// 是否启用 (缺失时默认启用)
    #[serde(default = "default_is_active")]
    pub is_active: bool,

    /// 累计使用事件数
    #[serde(default)]
    pub event_count: i64,

    /// 最近一次使用事件 (可选)
    #[serde(default)]
    pub last_event: Option<LastEvent>,
}

/// 器械最近一次使用事件的摘要
#[derive(Debug, Clone, Deserialize)]
pub struct LastEvent {
    /// 事件类型
    #[serde(default)]
    pub event_type: String,

    /// 抓拍时间
    #[serde(default)]
    pub captured_at: String,
}

fn default_is_active() -> bool {
    true
}
