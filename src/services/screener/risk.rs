//! 风险等级分类
//!
//! 按固定优先级判断：
//! 1. low：负债权益比 < 0.5 且 流动比率 > 2（两项都必须有数据）
//! 2. high：负债权益比 > 1.5 或 流动比率 < 1（任一项有数据即可触发）
//! 3. 其余为 medium

use crate::models::{RiskTier, StockRecord};

use super::metrics::{current_period_value, CURRENT_RATIO, DEBT_EQUITY};

const LOW_DEBT_EQUITY_BELOW: f64 = 0.5;
const LOW_CURRENT_RATIO_ABOVE: f64 = 2.0;
const HIGH_DEBT_EQUITY_ABOVE: f64 = 1.5;
const HIGH_CURRENT_RATIO_BELOW: f64 = 1.0;

/// 按负债权益比和流动比率分类
pub fn classify_values(debt_equity: Option<f64>, current_ratio: Option<f64>) -> RiskTier {
    if let (Some(de), Some(cr)) = (debt_equity, current_ratio) {
        if de < LOW_DEBT_EQUITY_BELOW && cr > LOW_CURRENT_RATIO_ABOVE {
            return RiskTier::Low;
        }
    }

    let high_leverage = debt_equity.is_some_and(|de| de > HIGH_DEBT_EQUITY_ABOVE);
    let poor_liquidity = current_ratio.is_some_and(|cr| cr < HIGH_CURRENT_RATIO_BELOW);
    if high_leverage || poor_liquidity {
        return RiskTier::High;
    }

    RiskTier::Medium
}

/// 计算股票的风险等级
pub fn classify(stock: &StockRecord) -> RiskTier {
    classify_values(
        current_period_value(stock, DEBT_EQUITY),
        current_period_value(stock, CURRENT_RATIO),
    )
}
