// ==========================================
// 披萨销售数据看板 - 披萨品类仓储
// ==========================================
// 职责: 管理 pizza_type 表
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::PizzaType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Transaction};
use std::sync::{Arc, Mutex};

pub struct PizzaTypeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PizzaTypeRepository {
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
            CREATE TABLE IF NOT EXISTS pizza_type (
              pizza_type_id TEXT PRIMARY KEY,
              name          TEXT NOT NULL,
              category      TEXT NOT NULL,
              ingredients   TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// 在事务中批量插入品类（仅供导入层调用）
    pub fn insert_batch_tx(tx: &Transaction, rows: &[PizzaType]) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO pizza_type (pizza_type_id, name, category, ingredients)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )?;

        let mut count = 0;
        for row in rows {
            stmt.execute(params![
                row.pizza_type_id,
                row.name,
                row.category,
                row.ingredients,
            ])?;
            count += 1;
        }

        Ok(count)
    }

    /// 品类总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM pizza_type", [], |row| row.get(0))?;
        Ok(n)
    }

    /// 列出全部品类（存储迭代顺序，即插入顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<PizzaType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT pizza_type_id, name, category, ingredients FROM pizza_type",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(PizzaType {
                    pizza_type_id: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                    ingredients: row.get(3)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(rows)
    }
}
