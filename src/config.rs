// ==========================================
// 披萨销售数据看板 - 运行时配置
// ==========================================
// 职责: 从环境变量装配服务配置,缺省值可直接本地运行
// ==========================================

use std::path::PathBuf;
use tracing::info;

/// 默认监听地址
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// 默认 CSV 源数据目录（四个种子文件所在位置）
pub const DEFAULT_DATA_DIR: &str = "./pizzas";

/// 服务配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite 数据库文件路径
    pub db_path: String,
    /// CSV 源数据目录
    pub data_dir: PathBuf,
    /// HTTP 监听地址
    pub bind_addr: String,
}

impl ServerConfig {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    /// - PIZZA_DB_PATH: 数据库文件路径（默认: 用户数据目录下 pizza.db）
    /// - PIZZA_DATA_DIR: CSV 源数据目录（默认: ./pizzas）
    /// - PIZZA_BIND_ADDR: 监听地址（默认: 0.0.0.0:8080）
    pub fn load() -> Self {
        let db_path = env_or("PIZZA_DB_PATH", &get_default_db_path());
        let data_dir = PathBuf::from(env_or("PIZZA_DATA_DIR", DEFAULT_DATA_DIR));
        let bind_addr = env_or("PIZZA_BIND_ADDR", DEFAULT_BIND_ADDR);

        Self {
            db_path,
            data_dir,
            bind_addr,
        }
    }
}

/// 读取环境变量，空值视为未设置
fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => {
            info!("{} 未设置，使用默认值: {}", key, default);
            default.to_string()
        }
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 用户数据目录/pizza-dashboard/pizza.db（目录不存在时自动创建）
/// - 无法获取用户数据目录时回退到 ./pizza.db
pub fn get_default_db_path() -> String {
    let mut path = PathBuf::from("./pizza.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("pizza-dashboard");
        // best-effort: 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("pizza.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_load_defaults() {
        let config = ServerConfig::load();
        assert!(!config.db_path.is_empty());
        assert!(!config.bind_addr.is_empty());
    }
}
