// ==========================================
// 披萨销售数据看板 - 导出 API
// ==========================================
// 职责: 全量披萨 CSV 导出、全量订单 JSON 导出
// 约定: CSV 表头与源数据列名一致
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::repository::{OrderRepository, PizzaRepository};

/// 披萨 CSV 导出的下载文件名
pub const PIZZAS_CSV_FILENAME: &str = "pizzas.csv";

/// 导出API
///
/// 职责：
/// 1. 全量披萨导出为 CSV 字节流（供浏览器下载）
/// 2. 全量订单导出为 JSON 数组字节流
pub struct ExportApi {
    pizza_repo: Arc<PizzaRepository>,
    order_repo: Arc<OrderRepository>,
}

impl ExportApi {
    pub fn new(pizza_repo: Arc<PizzaRepository>, order_repo: Arc<OrderRepository>) -> Self {
        Self {
            pizza_repo,
            order_repo,
        }
    }

    /// 导出全量披萨为 CSV（表头: pizza_id,pizza_type_id,size,price）
    pub fn export_pizzas_csv(&self) -> ApiResult<Vec<u8>> {
        let pizzas = self.pizza_repo.list(None, None)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["pizza_id", "pizza_type_id", "size", "price"])
            .map_err(|e| ApiError::ExportError(e.to_string()))?;

        for pizza in &pizzas {
            let price = pizza.price.to_string();
            writer
                .write_record([
                    pizza.pizza_id.as_str(),
                    pizza.pizza_type_id.as_str(),
                    pizza.size.as_str(),
                    price.as_str(),
                ])
                .map_err(|e| ApiError::ExportError(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| ApiError::ExportError(e.to_string()))
    }

    /// 导出全量订单为 JSON 数组
    pub fn export_orders_json(&self) -> ApiResult<Vec<u8>> {
        let orders = self.order_repo.list(None, None)?;
        serde_json::to_vec(&orders).map_err(|e| ApiError::ExportError(e.to_string()))
    }
}
