// ==========================================
// 制造分析演示引擎 - 夹具加载错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 仅加载层会失败,计算层是全函数
// ==========================================

use thiserror::Error;

/// 夹具加载错误类型
#[derive(Error, Debug)]
pub enum FixtureError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .json/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("JSON 解析失败 ({source_name}): {message}")]
    JsonParseError {
        source_name: String,
        message: String,
    },

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("字段缺失 (行 {row}): {field}")]
    FieldMissing { row: usize, field: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    // ===== BOM 结构错误 =====
    #[error("物料号重复: {0}")]
    DuplicateItemNumber(String),

    #[error("用量非法 (item={item_number}): qtyPer={value}")]
    InvalidQuantity { item_number: String, value: f64 },

    #[error("层级不一致 (item={item_number}): 期望 {expected}，实际 {actual}")]
    LevelMismatch {
        item_number: String,
        expected: u32,
        actual: u32,
    },

    #[error("物料号为空 (父项: {parent})")]
    EmptyItemNumber { parent: String },

    // ===== 内置夹具 =====
    #[error("内置夹具无效: {0}")]
    BundledFixtureInvalid(String),
}

impl From<csv::Error> for FixtureError {
    fn from(err: csv::Error) -> Self {
        FixtureError::CsvParseError(err.to_string())
    }
}

/// 夹具层 Result 别名
pub type FixtureResult<T> = Result<T, FixtureError>;
