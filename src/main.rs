// ==========================================
// 披萨销售数据看板 - 服务主入口
// ==========================================
// 技术栈: Axum + Rust + SQLite
// 启动顺序: 日志 → 配置 → 状态 → 种子导入 → HTTP 服务
// ==========================================

use anyhow::Context;

use pizza_dashboard::app;
use pizza_dashboard::config::ServerConfig;
use pizza_dashboard::logging;
use pizza_dashboard::{AppState, SeedImporter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", pizza_dashboard::APP_NAME);
    tracing::info!("系统版本: {}", pizza_dashboard::VERSION);
    tracing::info!("==================================================");

    // 加载配置
    let config = ServerConfig::load();
    tracing::info!("使用数据库: {}", config.db_path);

    // 创建AppState
    let state = AppState::new(&config.db_path)?;

    // 种子数据导入（导入完成前不绑定监听，任何导入错误中止启动）
    let importer = SeedImporter::new(state.conn.clone(), &config.data_dir);
    importer
        .import_if_empty()
        .context("种子数据导入失败，拒绝以不完整数据集启动")?;

    // 启动 HTTP 服务
    app::serve(state, &config.bind_addr).await
}
