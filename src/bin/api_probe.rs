//! API端到端诊断工具
//!
//! 对一个真实部署跑通 登录 → 器械列表 → 事件列表 → 统计 全链路。
//! 环境变量:
//! - API_BASE_URL: 后端基地址 (默认 http://127.0.0.1:8000)
//! - GYM_SECURITY_KEY: 登录用安全密钥

use std::env;
use std::sync::Arc;

use gym_viewer::config::AppConfig;
use gym_viewer::services::{EventFilter, InMemoryTokenStorage};
use gym_viewer::state::AppState;
use gym_viewer::utils::logger;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;

    let config = AppConfig::from_env()?;
    let security_key = env::var("GYM_SECURITY_KEY")
        .map_err(|_| "请设置 GYM_SECURITY_KEY 环境变量")?;

    println!("API基地址: {}", config.api_base_url);

    let state = AppState::new(&config, Arc::new(InMemoryTokenStorage::new()))?;

    // 登录
    let token = state.api.login(&security_key).await?;
    println!(
        "✓ 登录成功, 令牌前缀: {}...",
        token.chars().take(10).collect::<String>()
    );

    // 器械列表
    let machines = state.api.list_machines().await?;
    println!("✓ 器械列表: {} 台", machines.len());

    for machine in machines.iter().take(3) {
        // 事件列表 (不带过滤条件)
        let events = state
            .api
            .list_events(machine.id, &EventFilter::default())
            .await?;
        println!("  - {} ({}): {} 条事件", machine.name, machine.location, events.len());

        // 统计
        let stats = state.api.machine_stats(machine.id, None, None).await?;
        if stats.is_empty() {
            println!("    统计为空");
        } else if let Some(day) = stats.busiest_day() {
            println!(
                "    开始 {} 次 / 结束 {} 次, 最繁忙: {} ({} 次)",
                stats.total_starts, stats.total_ends, day.date, day.count
            );
        }
    }

    state.api.logout();
    state.dispatcher.shutdown();
    println!("✓ 诊断完成");

    Ok(())
}
