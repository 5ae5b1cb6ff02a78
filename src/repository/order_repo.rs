// ==========================================
// 披萨销售数据看板 - 订单仓储
// ==========================================
// 职责: 管理 orders 表,支持下单时间闭区间过滤
// 说明: order_date 以 `YYYY-MM-DD HH:MM:SS` 文本存储,
//       定宽格式下字典序与时间序一致,范围过滤直接比较文本
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::Order;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result as SqliteResult, Row, Transaction};
use std::sync::{Arc, Mutex};

/// order_date 列的存储格式
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 确保表存在（如果不存在则创建）
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS orders (
              order_id   INTEGER PRIMARY KEY,
              order_date TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_orders_date ON orders(order_date);
            "#,
        )?;
        Ok(())
    }

    fn map_row(row: &Row) -> SqliteResult<Order> {
        let order_id: i64 = row.get(0)?;
        let raw: String = row.get(1)?;
        let date = NaiveDateTime::parse_from_str(&raw, ORDER_DATE_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
        Ok(Order { order_id, date })
    }

    /// 在事务中批量插入订单（仅供导入层调用）
    pub fn insert_batch_tx(tx: &Transaction, rows: &[Order]) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO orders (order_id, order_date)
            VALUES (?1, ?2)
            "#,
        )?;

        let mut count = 0;
        for row in rows {
            stmt.execute(params![
                row.order_id,
                row.date.format(ORDER_DATE_FORMAT).to_string(),
            ])?;
            count += 1;
        }

        Ok(count)
    }

    /// 订单总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
        Ok(n)
    }

    /// 按下单时间闭区间过滤（None = 该侧无界）
    pub fn list(
        &self,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
    ) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;

        const BASE: &str = "SELECT order_id, order_date FROM orders";

        let fmt = |dt: NaiveDateTime| dt.format(ORDER_DATE_FORMAT).to_string();

        let rows = match (from, to) {
            (Some(f), Some(t)) => {
                let mut stmt = conn.prepare(&format!(
                    "{} WHERE order_date >= ?1 AND order_date <= ?2",
                    BASE
                ))?;
                let rows = stmt.query_map(params![fmt(f), fmt(t)], Self::map_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                rows
            }
            (Some(f), None) => {
                let mut stmt = conn.prepare(&format!("{} WHERE order_date >= ?1", BASE))?;
                let rows = stmt.query_map(params![fmt(f)], Self::map_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                rows
            }
            (None, Some(t)) => {
                let mut stmt = conn.prepare(&format!("{} WHERE order_date <= ?1", BASE))?;
                let rows = stmt.query_map(params![fmt(t)], Self::map_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                rows
            }
            (None, None) => {
                let mut stmt = conn.prepare(BASE)?;
                let rows = stmt.query_map([], Self::map_row)?
                    .collect::<SqliteResult<Vec<_>>>()?;
                rows
            }
        };

        Ok(rows)
    }
}
