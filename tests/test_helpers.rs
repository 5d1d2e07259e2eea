// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 构造测试用 BOM 树、供应商、临时配置文件
// ==========================================
#![allow(dead_code)]

use nkj_demo_engine::domain::supplier::{Certification, Supplier, SupplierMetric};
use nkj_demo_engine::domain::BomItem;
use std::io::Write;
use tempfile::NamedTempFile;

/// BOM 节点构造器
pub struct BomBuilder {
    item: BomItem,
}

impl BomBuilder {
    pub fn new(item_number: &str) -> Self {
        Self {
            item: BomItem {
                item_number: item_number.to_string(),
                description: format!("{} description", item_number),
                qty_per: 1.0,
                uom: "EA".to_string(),
                lead_time_days: 1,
                standard_cost: 1.0,
                level: 0,
                supplier_id: None,
                components: vec![],
            },
        }
    }

    pub fn qty_per(mut self, qty: f64) -> Self {
        self.item.qty_per = qty;
        self
    }

    pub fn lead_time(mut self, days: i64) -> Self {
        self.item.lead_time_days = days;
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.item.standard_cost = cost;
        self
    }

    /// 追加子节点（层级自动设为父级 + 1）
    pub fn child(mut self, child: BomBuilder) -> Self {
        let mut c = child.item;
        relevel(&mut c, self.item.level + 1);
        self.item.components.push(c);
        self
    }

    pub fn build(self) -> BomItem {
        self.item
    }
}

fn relevel(item: &mut BomItem, level: u32) {
    item.level = level;
    for c in &mut item.components {
        relevel(c, level + 1);
    }
}

/// 根 qtyPer=1、子 qtyPer=2 的两层 BOM
pub fn root_with_child() -> BomItem {
    BomBuilder::new("ROOT")
        .lead_time(2)
        .child(BomBuilder::new("CHILD").qty_per(2.0).lead_time(3))
        .build()
}

/// 三层 BOM: 组件下挂两个叶子,另有一个直接叶子
pub fn three_level() -> BomItem {
    BomBuilder::new("ASSY")
        .lead_time(3)
        .cost(100.0)
        .child(
            BomBuilder::new("SUB")
                .qty_per(2.0)
                .lead_time(10)
                .child(BomBuilder::new("RAW-1").qty_per(1.0).lead_time(21))
                .child(BomBuilder::new("RAW-2").qty_per(3.5).lead_time(7)),
        )
        .child(BomBuilder::new("PART").qty_per(4.0).lead_time(6))
        .build()
}

/// 构造供应商
pub fn make_supplier(id: &str, on_time: f64, ppm: f64, incidents: u32) -> Supplier {
    Supplier {
        supplier_id: id.to_string(),
        name: format!("{} Industries", id),
        country: "USA".to_string(),
        category: "Castings".to_string(),
        metrics: SupplierMetric {
            overall_score: 0.0,
            on_time_delivery: on_time,
            quality_ppm: ppm,
            responsiveness: 90.0,
        },
        certifications: vec![Certification {
            name: "IATF 16949".to_string(),
            valid_until: chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        }],
        incidents,
        annual_spend: 100_000.0,
    }
}

/// 把内容写入带指定后缀的临时文件
pub fn temp_file_with(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("创建临时文件失败");
    file.write_all(content.as_bytes()).expect("写入临时文件失败");
    file.flush().expect("刷新临时文件失败");
    file
}
