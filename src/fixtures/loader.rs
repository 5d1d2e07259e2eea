// ==========================================
// 制造分析演示引擎 - 夹具解析与校验
// ==========================================
// 支持: JSON (全部夹具) / CSV (供应商)
// 红线: BOM 树加载后只读,校验失败直接拒绝加载
// ==========================================

use crate::domain::{BomItem, ProductionRecord, QualityRecord, Supplier};
use crate::fixtures::error::{FixtureError, FixtureResult};
use crate::fixtures::supplier_csv;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

// ==========================================
// JSON 解析
// ==========================================

fn parse_json<T: DeserializeOwned>(json: &str, source_name: &str) -> FixtureResult<T> {
    serde_json::from_str(json).map_err(|e| FixtureError::JsonParseError {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// 解析并校验 BOM 树
pub fn parse_bom_json(json: &str, source_name: &str) -> FixtureResult<BomItem> {
    let root: BomItem = parse_json(json, source_name)?;
    validate_bom(&root)?;
    debug!(
        source = source_name,
        nodes = root.node_count(),
        depth = root.max_depth(),
        "BOM 夹具解析完成"
    );
    Ok(root)
}

pub fn parse_production_json(json: &str, source_name: &str) -> FixtureResult<Vec<ProductionRecord>> {
    parse_json(json, source_name)
}

pub fn parse_quality_json(json: &str, source_name: &str) -> FixtureResult<Vec<QualityRecord>> {
    parse_json(json, source_name)
}

pub fn parse_suppliers_json(json: &str, source_name: &str) -> FixtureResult<Vec<Supplier>> {
    parse_json(json, source_name)
}

// ==========================================
// BOM 结构校验
// ==========================================

/// 校验 BOM 树
///
/// 规则:
/// 1) 物料号非空且树内唯一
/// 2) qtyPer 为有限非负数
/// 3) level 与实际深度一致（根 = 根自身 level,子件逐层 +1）
pub fn validate_bom(root: &BomItem) -> FixtureResult<()> {
    let mut seen = HashSet::new();
    validate_node(root, root.level, "<root>", &mut seen)
}

fn validate_node<'a>(
    item: &'a BomItem,
    expected_level: u32,
    parent: &str,
    seen: &mut HashSet<&'a str>,
) -> FixtureResult<()> {
    if item.item_number.trim().is_empty() {
        return Err(FixtureError::EmptyItemNumber {
            parent: parent.to_string(),
        });
    }

    if !seen.insert(item.item_number.as_str()) {
        return Err(FixtureError::DuplicateItemNumber(item.item_number.clone()));
    }

    if !item.qty_per.is_finite() || item.qty_per < 0.0 {
        return Err(FixtureError::InvalidQuantity {
            item_number: item.item_number.clone(),
            value: item.qty_per,
        });
    }

    if item.level != expected_level {
        return Err(FixtureError::LevelMismatch {
            item_number: item.item_number.clone(),
            expected: expected_level,
            actual: item.level,
        });
    }

    for child in &item.components {
        // level 已到 u32 上限时子件层级无法表示
        let Some(child_level) = expected_level.checked_add(1) else {
            return Err(FixtureError::LevelMismatch {
                item_number: child.item_number.clone(),
                expected: u32::MAX,
                actual: child.level,
            });
        };
        validate_node(child, child_level, &item.item_number, seen)?;
    }

    Ok(())
}

// ==========================================
// 文件加载
// ==========================================

fn read_fixture_file(path: &Path) -> FixtureResult<String> {
    if !path.exists() {
        return Err(FixtureError::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn require_json(path: &Path) -> FixtureResult<()> {
    match extension_of(path).as_str() {
        "json" => Ok(()),
        other => Err(FixtureError::UnsupportedFormat(other.to_string())),
    }
}

#[instrument]
pub fn load_bom_file(path: &Path) -> FixtureResult<BomItem> {
    require_json(path)?;
    let json = read_fixture_file(path)?;
    parse_bom_json(&json, &path.display().to_string())
}

#[instrument]
pub fn load_production_file(path: &Path) -> FixtureResult<Vec<ProductionRecord>> {
    require_json(path)?;
    let json = read_fixture_file(path)?;
    parse_production_json(&json, &path.display().to_string())
}

#[instrument]
pub fn load_quality_file(path: &Path) -> FixtureResult<Vec<QualityRecord>> {
    require_json(path)?;
    let json = read_fixture_file(path)?;
    parse_quality_json(&json, &path.display().to_string())
}

/// 加载供应商清单（.json 或 .csv）
#[instrument]
pub fn load_suppliers_file(path: &Path) -> FixtureResult<Vec<Supplier>> {
    match extension_of(path).as_str() {
        "json" => {
            let json = read_fixture_file(path)?;
            parse_suppliers_json(&json, &path.display().to_string())
        }
        "csv" => {
            if !path.exists() {
                return Err(FixtureError::FileNotFound(path.display().to_string()));
            }
            supplier_csv::parse_suppliers_csv(path)
        }
        other => Err(FixtureError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_item_number_rejected() {
        let json = r#"{"itemNumber":"A","description":"","qtyPer":1,"uom":"EA","leadTimeDays":1,
            "standardCost":1,"level":0,"components":[
              {"itemNumber":"B","description":"","qtyPer":1,"uom":"EA","leadTimeDays":1,"standardCost":1,"level":1},
              {"itemNumber":"B","description":"","qtyPer":1,"uom":"EA","leadTimeDays":1,"standardCost":1,"level":1}
            ]}"#;
        let err = parse_bom_json(json, "test").unwrap_err();
        assert!(matches!(err, FixtureError::DuplicateItemNumber(ref id) if id == "B"));
    }

    #[test]
    fn test_negative_qty_rejected() {
        let json = r#"{"itemNumber":"A","description":"","qtyPer":-1,"uom":"EA","leadTimeDays":1,
            "standardCost":1,"level":0}"#;
        let err = parse_bom_json(json, "test").unwrap_err();
        assert!(matches!(err, FixtureError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_level_mismatch_rejected() {
        let json = r#"{"itemNumber":"A","description":"","qtyPer":1,"uom":"EA","leadTimeDays":1,
            "standardCost":1,"level":0,"components":[
              {"itemNumber":"B","description":"","qtyPer":1,"uom":"EA","leadTimeDays":1,"standardCost":1,"level":2}
            ]}"#;
        let err = parse_bom_json(json, "test").unwrap_err();
        assert!(matches!(
            err,
            FixtureError::LevelMismatch { expected: 1, actual: 2, .. }
        ));
    }

    #[test]
    fn test_root_level_at_u32_max_with_children_rejected() {
        let json = r#"{"itemNumber":"A","description":"","qtyPer":1,"uom":"EA","leadTimeDays":1,
            "standardCost":1,"level":4294967295,"components":[
              {"itemNumber":"B","description":"","qtyPer":1,"uom":"EA","leadTimeDays":1,"standardCost":1,"level":0}
            ]}"#;
        let err = parse_bom_json(json, "test").unwrap_err();
        assert!(matches!(
            err,
            FixtureError::LevelMismatch { ref item_number, actual: 0, .. } if item_number == "B"
        ));
    }

    #[test]
    fn test_root_level_at_u32_max_without_children_accepted() {
        let json = r#"{"itemNumber":"A","description":"","qtyPer":1,"uom":"EA","leadTimeDays":1,
            "standardCost":1,"level":4294967295}"#;
        assert!(parse_bom_json(json, "test").is_ok());
    }

    #[test]
    fn test_malformed_json_reports_source() {
        let err = parse_bom_json("{", "broken.json").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_bom_file(Path::new("bom.xlsx")).unwrap_err();
        assert!(matches!(err, FixtureError::UnsupportedFormat(ref ext) if ext == "xlsx"));
    }
}
