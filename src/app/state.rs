// ==========================================
// 披萨销售数据看板 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use anyhow::Context;
use rusqlite::Connection;

use crate::api::{CatalogApi, ExportApi, OrderApi};
use crate::db::open_sqlite_connection;
use crate::repository::{
    OrderDetailRepository, OrderRepository, PizzaRepository, PizzaTypeRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享数据库连接，
/// 作为 axum Router 的全局状态注入处理器
#[derive(Clone)]
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 共享数据库连接（导入层与仓储层共用）
    pub conn: Arc<Mutex<Connection>>,

    /// 商品目录API
    pub catalog_api: Arc<CatalogApi>,

    /// 订单API
    pub order_api: Arc<OrderApi>,

    /// 导出API
    pub export_api: Arc<ExportApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（`:memory:` 用于测试）
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享数据库连接（表不存在时自动建表）
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(db_path: &str) -> anyhow::Result<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = open_sqlite_connection(db_path)
            .with_context(|| format!("无法打开数据库: {}", db_path))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let pizza_type_repo = Arc::new(
            PizzaTypeRepository::from_connection(conn.clone())
                .context("无法创建PizzaTypeRepository")?,
        );
        let pizza_repo = Arc::new(
            PizzaRepository::from_connection(conn.clone()).context("无法创建PizzaRepository")?,
        );
        let order_repo = Arc::new(
            OrderRepository::from_connection(conn.clone()).context("无法创建OrderRepository")?,
        );
        let order_detail_repo = Arc::new(
            OrderDetailRepository::from_connection(conn.clone())
                .context("无法创建OrderDetailRepository")?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================
        let catalog_api = Arc::new(CatalogApi::new(pizza_repo.clone(), pizza_type_repo));
        let order_api = Arc::new(OrderApi::new(order_repo.clone(), order_detail_repo));
        let export_api = Arc::new(ExportApi::new(pizza_repo, order_repo));

        Ok(Self {
            db_path: db_path.to_string(),
            conn,
            catalog_api,
            order_api,
            export_api,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_in_memory() {
        let state = AppState::new(":memory:").expect("Failed to create AppState");
        assert_eq!(state.db_path, ":memory:");

        // 建表后各实体集为空
        let pizzas = state
            .catalog_api
            .list_pizzas(None, None)
            .expect("Failed to list pizzas");
        assert!(pizzas.is_empty());
    }
}
