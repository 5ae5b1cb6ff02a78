// ==========================================
// 披萨销售数据看板 - 订单领域模型
// ==========================================
// 对齐: orders.csv / order_details.csv 列名
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// Order - 订单
// ==========================================
// 说明: date 在导入时由源数据的 date 与 time 两列拼接派生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    // ===== 主键 =====
    pub order_id: i64, // 订单号

    // ===== 时间信息 =====
    pub date: NaiveDateTime, // 下单时间（date + time 合并）
}

// ==========================================
// OrderDetail - 订单行项目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    // ===== 主键 =====
    pub order_details_id: i64, // 行项目唯一标识

    // ===== 关联 =====
    pub order_id: i64,    // 关联订单（FK，完整性由源数据保证）
    pub pizza_id: String, // 关联披萨（FK，完整性由源数据保证）

    // ===== 销售维度 =====
    pub quantity: i64, // 数量
}

// ==========================================
// RawOrderRecord - 订单导入中间结构体
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 字段映射 → 此结构）
// 生命周期: 仅在导入流程内，date/time 尚未合并
#[derive(Debug, Clone)]
pub struct RawOrderRecord {
    pub order_id: i64,
    pub date: String, // 源字段（YYYY-MM-DD）
    pub time: String, // 源字段（HH:MM:SS）
}
