//! 风险预设
//!
//! 预设阈值与风险分类阈值并不完全一致（如 low 预设额外要求速动比率 >= 1.5），
//! 两者保持各自原样

use crate::error::AppError;
use crate::models::{FilterCriteria, RiskTier};

/// 风险等级对应的筛选条件
pub fn preset_for(level: RiskTier) -> FilterCriteria {
    match level {
        RiskTier::Low => FilterCriteria {
            debt_equity_max: Some(0.5),
            current_ratio_min: Some(2.0),
            quick_ratio_min: Some(1.5),
            risk_level: Some(RiskTier::Low),
            ..Default::default()
        },
        RiskTier::Medium => FilterCriteria {
            debt_equity_max: Some(1.5),
            current_ratio_min: Some(1.0),
            risk_level: Some(RiskTier::Medium),
            ..Default::default()
        },
        RiskTier::High => FilterCriteria {
            risk_level: Some(RiskTier::High),
            ..Default::default()
        },
    }
}

/// 按名称解析预设，只接受 low / medium / high
pub fn resolve_preset(name: &str) -> Result<FilterCriteria, AppError> {
    let level = match name {
        "low" => RiskTier::Low,
        "medium" => RiskTier::Medium,
        "high" => RiskTier::High,
        _ => return Err(AppError::Validation(format!("Invalid risk level: {}", name))),
    };
    Ok(preset_for(level))
}
