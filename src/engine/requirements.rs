// ==========================================
// 制造分析演示引擎 - 需求计算器
// ==========================================
// 职责: 单节点毛需求/在库/净需求/成本/累计提前期
// 输入: BOM 节点 + 父项需求量 + 父项累计延误 + 模拟延误
// 输出: Requirements
// 红线: 全函数,任何输入都有输出,不返回错误
// ==========================================

use crate::domain::bom::BomItem;
use crate::domain::types::LotSizing;
use serde::{Deserialize, Serialize};

// ==========================================
// MrpPolicy - 批量策略参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MrpPolicy {
    /// 固定批量倍数（fixed 策略向上取整到该倍数）
    pub fixed_lot_multiple: f64,
    /// 最小订货量（min/EOQ 策略下限）
    pub min_order_qty: f64,
    /// 在库伪值取模基数
    pub on_hand_modulus: u32,
}

impl Default for MrpPolicy {
    fn default() -> Self {
        Self {
            fixed_lot_multiple: 50.0,
            min_order_qty: 100.0,
            on_hand_modulus: 50,
        }
    }
}

// ==========================================
// Requirements - 单节点计算结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    /// 批量调整前毛需求（qtyPer × 父项需求）
    pub unadjusted_gross_req: f64,
    /// 批量调整后毛需求
    pub gross_req: f64,
    /// 在库（占位伪值,不代表真实库存）
    pub on_hand: f64,
    /// 净需求 = max(0, 毛需求 - 在库)
    pub net_req: f64,
    /// 成本 = 毛需求 × 标准单价
    pub cost: f64,
    /// 累计提前期 = 本节点提前期 + 父项累计 + 模拟延误
    pub total_lead_time: i64,
    /// 是否存在模拟缺料
    pub has_shortage: bool,
}

// ==========================================
// 需求量输入处理
// ==========================================

/// 需求量下限
pub const MIN_DEMAND_QTY: u32 = 1;

/// 需求量裁剪: 负数视为 0,再取下限 1
pub fn clamp_demand(raw: i64) -> u32 {
    raw.clamp(MIN_DEMAND_QTY as i64, u32::MAX as i64) as u32
}

/// 解析界面输入的需求量
///
/// 规则: 跳过前导空白,可选正负号,读取连续数字直到第一个非数字字符;
/// 没有数字视为 0;最终按 `clamp_demand` 裁剪。
/// 例: "250" → 250, "12abc" → 12, "-5" → 1, "abc" → 1, "" → 1
pub fn parse_demand_input(input: &str) -> u32 {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }

    clamp_demand(if negative { -value } else { value })
}

// ==========================================
// 批量策略与在库伪值
// ==========================================

/// 按批量策略调整毛需求
pub fn apply_lot_sizing(gross: f64, lot_sizing: LotSizing, policy: &MrpPolicy) -> f64 {
    match lot_sizing {
        LotSizing::LotForLot => gross,
        LotSizing::Fixed => {
            let multiple = policy.fixed_lot_multiple;
            (gross / multiple).ceil() * multiple
        }
        LotSizing::MinEoq => gross.max(policy.min_order_qty),
    }
}

/// 物料号的稳定哈希（h = h × 31 + byte,32 位回绕）
///
/// 不使用 std 的 Hasher: 其输出不保证跨版本稳定
pub fn item_hash(item_number: &str) -> u32 {
    item_number
        .bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)))
}

/// 在库伪值 = 哈希 mod 基数
///
/// 只与物料号有关,同一物料在任何需求下取值相同,界面不会闪烁
pub fn on_hand_for(item_number: &str, modulus: u32) -> f64 {
    f64::from(item_hash(item_number) % modulus.max(1))
}

// ==========================================
// RequirementsCalculator - 需求计算器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementsCalculator {
    policy: MrpPolicy,
}

impl RequirementsCalculator {
    pub fn new(policy: MrpPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MrpPolicy {
        &self.policy
    }

    /// 计算单节点需求
    ///
    /// # 参数
    /// - item: BOM 节点
    /// - parent_qty: 父项需求量（根节点为顶层需求）
    /// - parent_delay: 父项累计提前期（根节点为 0）
    /// - extra_delay: 该物料的模拟延误天数
    /// - lot_sizing: 批量策略
    pub fn calculate(
        &self,
        item: &BomItem,
        parent_qty: f64,
        parent_delay: i64,
        extra_delay: i64,
        lot_sizing: LotSizing,
    ) -> Requirements {
        let unadjusted_gross_req = item.qty_per * parent_qty;
        let gross_req = apply_lot_sizing(unadjusted_gross_req, lot_sizing, &self.policy);
        let on_hand = on_hand_for(&item.item_number, self.policy.on_hand_modulus);
        let net_req = (gross_req - on_hand).max(0.0);

        Requirements {
            unadjusted_gross_req,
            gross_req,
            on_hand,
            net_req,
            cost: gross_req * item.standard_cost,
            total_lead_time: item.lead_time_days + parent_delay + extra_delay,
            has_shortage: extra_delay > 0,
        }
    }
}
