use serde::Deserialize;

/// 器械使用事件
///
/// 事件列表与事件详情接口共用的记录。字段公开可写 -
/// 调用方可以调整刚解码的实例 (例如补全机器名称),
/// 但不存在来自服务端的局部更新语义。
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawEvent")]
pub struct MachineEvent {
    /// 事件唯一ID (必填)
    pub id: i64,

    /// 所属器械ID
    ///
    /// 历史原因存在两种字段拼写,解析规则见 [`RawEvent`]
    pub machine_id: i64,

    /// 器械名称
    pub machine_name: String,

    /// 事件类型 (如 start / end)
    pub event_type: String,

    /// 事件类型的展示文本
    pub event_type_display: String,

    /// 抓拍图片URL (可能是相对路径)
    pub image_url: String,

    /// 抓拍时间
    pub captured_at: String,

    /// 画面中的人数
    pub person_count: i64,
}

/// 事件接口的原始响应结构
///
/// 器械ID存在两种历史拼写: 数值型 `machine` 字段非零时优先,
/// 否则回退到 `machine_id`,两者都缺失时为0。
#[derive(Debug, Deserialize)]
struct RawEvent {
    id: i64,
    #[serde(default)]
    machine: Option<i64>,
    #[serde(default)]
    machine_id: Option<i64>,
    #[serde(default)]
    machine_name: String,
    #[serde(default)]
    event_type: String,
    #[serde(default)]
    event_type_display: String,
    #[serde(default, rename = "image")]
    image_url: String,
    #[serde(default)]
    captured_at: String,
    #[serde(default)]
    person_count: i64,
}

impl From<RawEvent> for MachineEvent {
    fn from(raw: RawEvent) -> Self {
        let machine_id = match raw.machine {
            Some(machine) if machine != 0 => machine,
            _ => raw.machine_id.unwrap_or(0),
        };

        Self {
            id: raw.id,
            machine_id,
            machine_name: raw.machine_name,
            event_type: raw.event_type,
            event_type_display: raw.event_type_display,
            image_url: raw.image_url,
            captured_at: raw.captured_at,
            person_count: raw.person_count,
        }
    }
}
