// ==========================================
// 披萨销售数据看板 - 披萨领域模型
// ==========================================
// 对齐: pizza_types.csv / pizzas.csv 列名
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// PizzaType - 披萨品类主数据
// ==========================================
// 用途: 导入层写入,API 层只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PizzaType {
    // ===== 主键 =====
    pub pizza_type_id: String, // 品类唯一标识（如 bbq_ckn）

    // ===== 基础信息 =====
    pub name: String,        // 品类名称
    pub category: String,    // 分类（Chicken/Classic/Supreme/Veggie）
    pub ingredients: String, // 配料清单（逗号分隔）
}

// ==========================================
// Pizza - 可售披萨（品类 × 尺寸）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    // ===== 主键 =====
    pub pizza_id: String, // 披萨唯一标识（如 bbq_ckn_s）

    // ===== 关联 =====
    pub pizza_type_id: String, // 关联品类（FK，完整性由源数据保证）

    // ===== 销售维度 =====
    pub size: String, // 尺寸（S/M/L/XL/XXL，源数据为开放集合）
    pub price: f64,   // 单价
}
