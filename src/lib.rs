// ==========================================
// 披萨销售数据看板 - 核心库
// ==========================================
// 技术栈: Axum + Rust + SQLite
// 系统定位: 只读数据看板后端 (一次性导入 + 查询/导出)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - CSV 种子数据
pub mod importer;

// 配置层 - 运行时配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{Order, OrderDetail, Pizza, PizzaType};

// 导入器
pub use importer::{ImportSummary, SeedImporter};

// API
pub use api::{CatalogApi, ExportApi, OrderApi};

// 应用状态
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "披萨销售数据看板";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
