// ==========================================
// 制造分析演示引擎 - 夹具层
// ==========================================
// 职责: 加载 BOM / 生产 / 质量 / 供应商夹具
// 来源: 内置 JSON（默认）或配置指定的外部文件
// ==========================================

pub mod bundled;
pub mod error;
pub mod loader;
pub mod supplier_csv;

pub use error::{FixtureError, FixtureResult};

use crate::config::FixturePaths;
use crate::domain::{BomItem, ProductionRecord, QualityRecord, Supplier};
use std::sync::Arc;

// ==========================================
// FixtureSet - 一次加载的全部夹具
// ==========================================
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub bom: Arc<BomItem>,
    pub production: Arc<Vec<ProductionRecord>>,
    pub quality: Arc<Vec<QualityRecord>>,
    pub suppliers: Arc<Vec<Supplier>>,
}

impl FixtureSet {
    /// 全部使用内置夹具
    pub fn bundled() -> FixtureResult<Self> {
        Self::load(&FixturePaths::default())
    }

    /// 按路径覆写加载,未指定的使用内置夹具
    pub fn load(paths: &FixturePaths) -> FixtureResult<Self> {
        let bom = match &paths.bom {
            Some(p) => loader::load_bom_file(p)?,
            None => bundled::bundled_bom()?.clone(),
        };
        let production = match &paths.production {
            Some(p) => loader::load_production_file(p)?,
            None => bundled::bundled_production()?.clone(),
        };
        let quality = match &paths.quality {
            Some(p) => loader::load_quality_file(p)?,
            None => bundled::bundled_quality()?.clone(),
        };
        let suppliers = match &paths.suppliers {
            Some(p) => loader::load_suppliers_file(p)?,
            None => bundled::bundled_suppliers()?.clone(),
        };

        tracing::info!(
            bom_nodes = bom.node_count(),
            production = production.len(),
            quality = quality.len(),
            suppliers = suppliers.len(),
            "夹具加载完成"
        );

        Ok(Self {
            bom: Arc::new(bom),
            production: Arc::new(production),
            quality: Arc::new(quality),
            suppliers: Arc::new(suppliers),
        })
    }
}
