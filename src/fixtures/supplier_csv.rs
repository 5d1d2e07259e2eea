// ==========================================
// 制造分析演示引擎 - 供应商 CSV 导入
// ==========================================
// 表头: supplierId,name,country,category,onTimeDelivery,qualityPPM,
//       responsiveness,overallScore,incidents,annualSpend
// 说明: CSV 不携带认证信息,导入后 certifications 为空
// ==========================================

use crate::domain::{Supplier, SupplierMetric};
use crate::fixtures::error::{FixtureError, FixtureResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// 从 CSV 文件解析供应商
pub fn parse_suppliers_csv(path: &Path) -> FixtureResult<Vec<Supplier>> {
    let file = std::fs::File::open(path)?;
    parse_suppliers_reader(file)
}

/// 从任意 Reader 解析供应商（便于测试）
pub fn parse_suppliers_reader<R: Read>(reader: R) -> FixtureResult<Vec<Supplier>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut suppliers = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // 表头占第 1 行
        let row = idx + 2;
        let record = result?;

        let mut row_map = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.as_str(), value.trim());
            }
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }

        suppliers.push(map_row(&row_map, row)?);
    }

    tracing::debug!(count = suppliers.len(), "供应商 CSV 解析完成");
    Ok(suppliers)
}

fn map_row(row_map: &HashMap<&str, &str>, row: usize) -> FixtureResult<Supplier> {
    Ok(Supplier {
        supplier_id: required(row_map, row, "supplierId")?.to_string(),
        name: required(row_map, row, "name")?.to_string(),
        country: optional(row_map, "country").to_string(),
        category: optional(row_map, "category").to_string(),
        metrics: SupplierMetric {
            overall_score: number_or(row_map, row, "overallScore", 0.0)?,
            on_time_delivery: number(row_map, row, "onTimeDelivery")?,
            quality_ppm: number(row_map, row, "qualityPPM")?,
            responsiveness: number_or(row_map, row, "responsiveness", 0.0)?,
        },
        certifications: Vec::new(),
        incidents: number_or(row_map, row, "incidents", 0.0)?.max(0.0) as u32,
        annual_spend: number_or(row_map, row, "annualSpend", 0.0)?,
    })
}

fn required<'a>(row_map: &HashMap<&str, &'a str>, row: usize, field: &str) -> FixtureResult<&'a str> {
    match row_map.get(field) {
        Some(v) if !v.is_empty() => Ok(*v),
        _ => Err(FixtureError::FieldMissing {
            row,
            field: field.to_string(),
        }),
    }
}

fn optional<'a>(row_map: &HashMap<&str, &'a str>, field: &str) -> &'a str {
    row_map.get(field).copied().unwrap_or("")
}

fn parse_number(value: &str, row: usize, field: &str) -> FixtureResult<f64> {
    let parsed = value
        .parse::<f64>()
        .map_err(|e| FixtureError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("{} ({})", e, value),
        })?;

    // f64 解析接受 NaN/inf,评分要求有限数值
    if !parsed.is_finite() {
        return Err(FixtureError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("非有限数值 ({})", value),
        });
    }
    Ok(parsed)
}

fn number(row_map: &HashMap<&str, &str>, row: usize, field: &str) -> FixtureResult<f64> {
    let value = required(row_map, row, field)?;
    parse_number(value, row, field)
}

fn number_or(
    row_map: &HashMap<&str, &str>,
    row: usize,
    field: &str,
    default: f64,
) -> FixtureResult<f64> {
    match row_map.get(field) {
        Some(v) if !v.is_empty() => parse_number(v, row, field),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_csv() {
        let csv = "supplierId,name,onTimeDelivery,qualityPPM,incidents\n\
                   S1,Acme,96.5,40,1\n\
                   ,,,,\n\
                   S2,Globex,80,300,\n";
        let suppliers = parse_suppliers_reader(csv.as_bytes()).unwrap();
        assert_eq!(suppliers.len(), 2, "空白行应被跳过");
        assert_eq!(suppliers[0].supplier_id, "S1");
        assert_eq!(suppliers[0].metrics.on_time_delivery, 96.5);
        assert_eq!(suppliers[0].incidents, 1);
        assert_eq!(suppliers[1].incidents, 0, "缺省事故数为 0");
        assert!(suppliers[1].certifications.is_empty());
    }

    #[test]
    fn test_bad_number_reports_row_and_field() {
        let csv = "supplierId,name,onTimeDelivery,qualityPPM\nS1,Acme,abc,40\n";
        let err = parse_suppliers_reader(csv.as_bytes()).unwrap_err();
        match err {
            FixtureError::TypeConversionError { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "onTimeDelivery");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        for (bad, field) in [("NaN", "onTimeDelivery"), ("inf", "qualityPPM"), ("-infinity", "qualityPPM")] {
            let (delivery, ppm) = if field == "onTimeDelivery" { (bad, "40") } else { ("95", bad) };
            let csv = format!(
                "supplierId,name,onTimeDelivery,qualityPPM\nS1,Acme,90,10\nS2,Beta,{},{}\n",
                delivery, ppm
            );
            let err = parse_suppliers_reader(csv.as_bytes()).unwrap_err();
            match err {
                FixtureError::TypeConversionError { row, field: f, .. } => {
                    assert_eq!(row, 3, "{} 应定位到第 3 行", bad);
                    assert_eq!(f, field);
                }
                other => panic!("unexpected error for {bad}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_required_field() {
        let csv = "supplierId,name,onTimeDelivery\nS1,Acme,90\n";
        let err = parse_suppliers_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FixtureError::FieldMissing { ref field, .. } if field == "qualityPPM"));
    }
}
