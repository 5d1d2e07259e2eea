// ==========================================
// 制造分析演示引擎 - API 上下文
// ==========================================
// 职责: 按配置一次性加载夹具并构造各演示 API
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::mrp_api::MrpApi;
use crate::api::oee_api::OeeApi;
use crate::api::quality_api::QualityApi;
use crate::api::supplier_api::SupplierApi;
use crate::config::ConfigManager;
use crate::fixtures::FixtureSet;

/// 所有演示 API
///
/// 各 API 共享同一份只读夹具（Arc）
pub struct DemoApis {
    pub config: Arc<ConfigManager>,
    pub mrp: MrpApi,
    pub oee: OeeApi,
    pub quality: QualityApi,
    pub supplier: SupplierApi,
}

impl DemoApis {
    pub fn new(config: ConfigManager, fixtures: FixtureSet) -> Self {
        let mrp = MrpApi::from_config(Arc::clone(&fixtures.bom), &config);
        let oee = OeeApi::new(Arc::clone(&fixtures.production));
        let quality = QualityApi::new(Arc::clone(&fixtures.quality));
        let supplier = SupplierApi::new(
            Arc::clone(&fixtures.suppliers),
            config.config().default_supplier_weights,
        );

        Self {
            config: Arc::new(config),
            mrp,
            oee,
            quality,
            supplier,
        }
    }

    /// 按配置加载夹具（未配置路径的使用内置夹具）
    pub fn from_config(config: ConfigManager) -> ApiResult<Self> {
        let fixtures = FixtureSet::load(&config.config().fixtures)?;
        Ok(Self::new(config, fixtures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_bundled_fixtures() {
        let apis = DemoApis::from_config(ConfigManager::new()).unwrap();
        assert_eq!(apis.mrp.bom().item_number, "BRK-ASSY-FR");
        assert!(apis.oee.sample_factors().is_ok());
    }
}
