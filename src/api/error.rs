// ==========================================
// 制造分析演示引擎 - API层错误类型
// ==========================================
// 职责: 汇总夹具 / 配置层错误,并定义用户输入类错误
// 说明: 计算本身是全函数,错误只来自外部输入（文件 / 配置 / 命令行参数）
// ==========================================

use crate::config::ConfigError;
use crate::fixtures::FixtureError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 外部数据错误
    // ==========================================
    #[error("夹具加载失败: {0}")]
    FixtureError(#[from] FixtureError),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;
