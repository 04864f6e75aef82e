use serde::Deserialize;

/// 器械使用统计
///
/// 指定日期范围内单台器械的聚合数据。
/// `daily_usage` 的顺序由服务端给出并原样保留。
#[derive(Debug, Clone, Deserialize)]
pub struct MachineStats {
    /// 器械ID (必填)
    pub machine_id: i64,

    /// 器械名称
    #[serde(default)]
    pub machine_name: String,

    /// 使用开始事件总数
    #[serde(default)]
    pub total_starts: i64,

    /// 使用结束事件总数
    #[serde(default)]
    pub total_ends: i64,

    /// 按天统计的使用次数
    #[serde(default)]
    pub daily_usage: Vec<DailyUsage>,
}

/// 单日使用次数
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyUsage {
    /// 日期, "YYYY-MM-DD" 格式
    #[serde(default)]
    pub date: String,

    /// 当日使用次数
    #[serde(default)]
    pub count: i64,
}

impl MachineStats {
    /// 是否为空统计
    ///
    /// 当且仅当两个总数均为0且无按天数据时为真,
    /// UI据此展示空状态而非图表。
    pub fn is_empty(&self) -> bool {
        self.total_starts == 0 && self.total_ends == 0 && self.daily_usage.is_empty()
    }

    /// 使用最频繁的一天
    ///
    /// 按次数取最大值,并列时取首次出现的那天。
    /// 只读查询,不是存储属性。
    pub fn busiest_day(&self) -> Option<&DailyUsage> {
        self.daily_usage.iter().fold(None, |best, day| match best {
            None => Some(day),
            Some(current) if day.count > current.count => Some(day),
            _ => best,
        })
    }
}
