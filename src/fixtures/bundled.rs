// ==========================================
// 制造分析演示引擎 - 内置夹具
// ==========================================
// 红线: 编译期嵌入,首次访问时解析一次,进程生命周期内只读
// ==========================================

use crate::domain::{BomItem, ProductionRecord, QualityRecord, Supplier};
use crate::fixtures::error::{FixtureError, FixtureResult};
use crate::fixtures::loader;
use std::sync::OnceLock;

pub const SAMPLE_BOM_JSON: &str = include_str!("../../data/sample-bom.json");
pub const SAMPLE_PRODUCTION_JSON: &str = include_str!("../../data/sample-production.json");
pub const SAMPLE_QUALITY_JSON: &str = include_str!("../../data/sample-quality.json");
pub const SAMPLE_SUPPLIERS_JSON: &str = include_str!("../../data/sample-suppliers.json");

type Cached<T> = OnceLock<Result<T, String>>;

fn cached<T>(
    cell: &'static Cached<T>,
    init: impl FnOnce() -> FixtureResult<T>,
) -> FixtureResult<&'static T> {
    cell.get_or_init(|| init().map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|msg| FixtureError::BundledFixtureInvalid(msg.clone()))
}

/// 内置 BOM 树（前制动总成）
pub fn bundled_bom() -> FixtureResult<&'static BomItem> {
    static CELL: Cached<BomItem> = OnceLock::new();
    cached(&CELL, || loader::parse_bom_json(SAMPLE_BOM_JSON, "sample-bom.json"))
}

pub fn bundled_production() -> FixtureResult<&'static Vec<ProductionRecord>> {
    static CELL: Cached<Vec<ProductionRecord>> = OnceLock::new();
    cached(&CELL, || {
        loader::parse_production_json(SAMPLE_PRODUCTION_JSON, "sample-production.json")
    })
}

pub fn bundled_quality() -> FixtureResult<&'static Vec<QualityRecord>> {
    static CELL: Cached<Vec<QualityRecord>> = OnceLock::new();
    cached(&CELL, || {
        loader::parse_quality_json(SAMPLE_QUALITY_JSON, "sample-quality.json")
    })
}

pub fn bundled_suppliers() -> FixtureResult<&'static Vec<Supplier>> {
    static CELL: Cached<Vec<Supplier>> = OnceLock::new();
    cached(&CELL, || {
        loader::parse_suppliers_json(SAMPLE_SUPPLIERS_JSON, "sample-suppliers.json")
    })
}
