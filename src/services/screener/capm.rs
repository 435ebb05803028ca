//! CAPM 预期收益率
//!
//! expected = rf + beta * (rm - rf)，输入输出均为百分比数值

use crate::models::{CapmInput, CapmResult};

use super::format::format_capm_result;
use super::metrics::DEFAULT_BETA;

/// 默认无风险利率：6 个月国库券利率
pub const DEFAULT_RISK_FREE_RATE: f64 = 12.5;
/// 默认市场收益率：KSE-100 指数预期收益
pub const DEFAULT_MARKET_RETURN: f64 = 15.2;

impl Default for CapmInput {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            market_return: DEFAULT_MARKET_RETURN,
            beta: DEFAULT_BETA,
        }
    }
}

/// 计算预期收益率，不做输入范围校验（负利率同样合法）
pub fn calculate_capm(input: &CapmInput) -> f64 {
    input.risk_free_rate + input.beta * (input.market_return - input.risk_free_rate)
}

/// 计算并附带展示字符串
pub fn evaluate(input: &CapmInput) -> CapmResult {
    let expected_return = calculate_capm(input);
    CapmResult {
        expected_return,
        formatted: format_capm_result(expected_return),
    }
}
