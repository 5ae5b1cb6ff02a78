// ==========================================
// 披萨销售数据看板 - CSV 文件解析器
// ==========================================
// 职责: 按表头读取 CSV 为行映射,供字段映射层消费
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 文件为「表头 → 单元格」映射的行集合
    ///
    /// - 表头与单元格均做 trim
    /// - 完全空白的行被跳过
    pub fn parse_to_raw_records(file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        // 打开 CSV 文件
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "pizza_id,size,price").unwrap();
        writeln!(temp_file, "bbq_ckn_s,S,12.75").unwrap();
        writeln!(temp_file, "bbq_ckn_m, M ,16.75").unwrap();

        let records = CsvParser::parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("pizza_id"), Some(&"bbq_ckn_s".to_string()));
        // 单元格应被 trim
        assert_eq!(records[1].get("size"), Some(&"M".to_string()));
    }

    #[test]
    fn test_parse_file_not_found() {
        let result = CsvParser::parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_parse_skip_empty_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "pizza_id,price").unwrap();
        writeln!(temp_file, "bbq_ckn_s,12.75").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "bbq_ckn_m,16.75").unwrap();

        let records = CsvParser::parse_to_raw_records(temp_file.path()).unwrap();

        // 应跳过空行
        assert_eq!(records.len(), 2);
    }
}
