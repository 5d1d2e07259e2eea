// ==========================================
// 制造分析演示引擎 - BOM 领域模型
// ==========================================
// 红线: BOM 树是只读静态结构,加载后不可变更
// 用途: 夹具层加载,引擎层只读
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// BomItem - BOM 节点
// ==========================================
// 对齐: data/sample-bom.json (camelCase 字段)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomItem {
    pub item_number: String,    // 物料号（树内唯一）
    pub description: String,    // 描述（仅展示）
    pub qty_per: f64,           // 单位父项用量（>= 0）
    pub uom: String,            // 计量单位（仅展示）
    pub lead_time_days: i64,    // 本节点提前期（天）
    pub standard_cost: f64,     // 标准单价
    pub level: u32,             // 层级（0 = 顶层总成）

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>, // 供应商（可选）

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<BomItem>, // 子件（叶子为空）
}

impl BomItem {
    /// 是否为叶子件（无子件）
    pub fn is_leaf(&self) -> bool {
        self.components.is_empty()
    }

    /// 深度优先（先序）遍历整棵树
    pub fn iter(&self) -> BomIter<'_> {
        BomIter { stack: vec![self] }
    }

    /// 按物料号查找节点
    pub fn find(&self, item_number: &str) -> Option<&BomItem> {
        self.iter().find(|item| item.item_number == item_number)
    }

    /// 节点总数
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// 所有叶子件物料号（先序）
    pub fn leaf_item_numbers(&self) -> Vec<&str> {
        self.iter()
            .filter(|item| item.is_leaf())
            .map(|item| item.item_number.as_str())
            .collect()
    }

    /// 树的最大深度（根 = 0）
    pub fn max_depth(&self) -> usize {
        self.components
            .iter()
            .map(|child| child.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// BOM 先序遍历迭代器
pub struct BomIter<'a> {
    stack: Vec<&'a BomItem>,
}

impl<'a> Iterator for BomIter<'a> {
    type Item = &'a BomItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.stack.pop()?;
        // 逆序入栈,保持子件原始顺序
        self.stack.extend(item.components.iter().rev());
        Some(item)
    }
}
