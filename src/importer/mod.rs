// ==========================================
// 披萨销售数据看板 - 导入层
// ==========================================
// 职责: 进程启动时从 CSV 平面文件一次性填充存储层
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod seed_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::CsvParser;
pub use seed_importer::{
    ImportSummary, SeedImporter, ORDERS_FILE, ORDER_DETAILS_FILE, PIZZAS_FILE, PIZZA_TYPES_FILE,
};
