// ==========================================
// 披萨销售数据看板 - 种子数据导入器
// ==========================================
// 职责: 整合导入流程，从四个 CSV 源文件到数据库
// 流程: 幂等守卫 → 解析 → 映射 → 单事务落库
// 约束: 任一文件缺失或任一行解析失败即整体失败，不留部分数据
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::CsvParser;
use crate::repository::{
    OrderDetailRepository, OrderRepository, PizzaRepository, PizzaTypeRepository,
};
use rusqlite::Connection;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

// ===== 固定的源文件名 =====
pub const PIZZA_TYPES_FILE: &str = "pizza_types.csv";
pub const PIZZAS_FILE: &str = "pizzas.csv";
pub const ORDERS_FILE: &str = "orders.csv";
pub const ORDER_DETAILS_FILE: &str = "order_details.csv";

/// 导入结果统计
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub pizza_types: usize,
    pub pizzas: usize,
    pub orders: usize,
    pub order_details: usize,
    /// true 表示数据集已存在，本次为空操作
    pub skipped: bool,
}

// ==========================================
// SeedImporter - 种子数据导入器
// ==========================================
pub struct SeedImporter {
    // 共享数据库连接
    conn: Arc<Mutex<Connection>>,

    // CSV 源数据目录
    data_dir: PathBuf,
}

impl SeedImporter {
    /// 创建新的 SeedImporter 实例
    ///
    /// # 参数
    /// - conn: 共享数据库连接
    /// - data_dir: 四个 CSV 源文件所在目录
    pub fn new(conn: Arc<Mutex<Connection>>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            conn,
            data_dir: data_dir.into(),
        }
    }

    /// 数据集为空时执行一次性导入，否则空操作
    ///
    /// # 幂等性
    /// 以 pizza 表非空作为「已导入」判据，重复调用不会产生重复数据
    ///
    /// # 错误
    /// 源文件缺失、行解析失败、时间戳拼接失败均为致命错误，
    /// 事务不提交，调用方应中止启动
    pub fn import_if_empty(&self) -> ImportResult<ImportSummary> {
        // 建表（幂等），并拿到幂等守卫所需的仓储
        let pizza_repo = PizzaRepository::from_connection(self.conn.clone())?;
        let _ = PizzaTypeRepository::from_connection(self.conn.clone())?;
        let _ = OrderRepository::from_connection(self.conn.clone())?;
        let _ = OrderDetailRepository::from_connection(self.conn.clone())?;

        // === 幂等守卫 ===
        let existing = pizza_repo.count()?;
        if existing > 0 {
            info!(existing = existing, "数据集已存在，跳过导入");
            return Ok(ImportSummary {
                skipped: true,
                ..ImportSummary::default()
            });
        }

        info!(data_dir = %self.data_dir.display(), "开始导入种子数据");

        // === 步骤 1: 解析四个源文件 ===
        debug!("步骤 1: 解析源文件");
        let type_rows = CsvParser::parse_to_raw_records(&self.data_dir.join(PIZZA_TYPES_FILE))?;
        let pizza_rows = CsvParser::parse_to_raw_records(&self.data_dir.join(PIZZAS_FILE))?;
        let order_rows = CsvParser::parse_to_raw_records(&self.data_dir.join(ORDERS_FILE))?;
        let detail_rows = CsvParser::parse_to_raw_records(&self.data_dir.join(ORDER_DETAILS_FILE))?;

        // === 步骤 2: 字段映射 ===
        debug!("步骤 2: 字段映射");
        let mut pizza_types = Vec::with_capacity(type_rows.len());
        for (idx, row) in type_rows.iter().enumerate() {
            pizza_types.push(FieldMapper::map_pizza_type(row, idx + 1)?);
        }

        let mut pizzas = Vec::with_capacity(pizza_rows.len());
        for (idx, row) in pizza_rows.iter().enumerate() {
            pizzas.push(FieldMapper::map_pizza(row, idx + 1)?);
        }

        // 订单行先映射为中间结构，再拼接 date + time
        let mut orders = Vec::with_capacity(order_rows.len());
        for (idx, row) in order_rows.iter().enumerate() {
            let raw = FieldMapper::map_raw_order(row, idx + 1)?;
            orders.push(FieldMapper::combine_order(&raw, idx + 1)?);
        }

        let mut order_details = Vec::with_capacity(detail_rows.len());
        for (idx, row) in detail_rows.iter().enumerate() {
            order_details.push(FieldMapper::map_order_detail(row, idx + 1)?);
        }

        // === 步骤 3: 单事务落库 ===
        debug!("步骤 3: 落库");
        let summary = {
            let mut conn = self
                .conn
                .lock()
                .map_err(|e| ImportError::InternalError(format!("数据库锁获取失败: {}", e)))?;
            let tx = conn
                .transaction()
                .map_err(|e| ImportError::DatabaseTransactionError(e.to_string()))?;

            let summary = ImportSummary {
                pizza_types: PizzaTypeRepository::insert_batch_tx(&tx, &pizza_types)?,
                pizzas: PizzaRepository::insert_batch_tx(&tx, &pizzas)?,
                orders: OrderRepository::insert_batch_tx(&tx, &orders)?,
                order_details: OrderDetailRepository::insert_batch_tx(&tx, &order_details)?,
                skipped: false,
            };

            tx.commit()
                .map_err(|e| ImportError::DatabaseTransactionError(e.to_string()))?;
            summary
        };

        info!(
            pizza_types = summary.pizza_types,
            pizzas = summary.pizzas,
            orders = summary.orders,
            order_details = summary.order_details,
            "种子数据导入完成"
        );

        Ok(summary)
    }
}
