//! 选股筛选相关模型
//!
//! 筛选条件、风险等级、CAPM 输入输出以及派生指标

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 风险等级（由负债权益比和流动比率派生，不落库）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 筛选条件
///
/// 每个指标一对可选上下界，缺省即不限制。
/// 只接受下列字段，多余字段或显式 null 视为非法请求。
///
/// `beta_min` / `beta_max` 可以传入，但数据集中没有 Beta 数据，不参与筛选。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilterCriteria {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub market_cap_min: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub market_cap_max: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub pe_ratio_min: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub pe_ratio_max: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub pb_ratio_min: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub pb_ratio_max: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub roe_min: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub roe_max: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub roa_min: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub roa_max: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub dividend_yield_min: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub dividend_yield_max: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub beta_min: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub beta_max: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub debt_equity_min: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub debt_equity_max: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub current_ratio_min: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub current_ratio_max: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub quick_ratio_min: Option<f64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub quick_ratio_max: Option<f64>,
    /// 风险等级，必须与分类结果完全一致
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskTier>,
}

// 字段可以省略，但显式传 null 视为非法
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// CAPM 计算输入（百分比数值，如 12.5 表示 12.5%）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapmInput {
    pub risk_free_rate: f64,
    pub market_return: f64,
    pub beta: f64,
}

/// CAPM 计算结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapmResult {
    /// 预期收益率（完整精度）
    pub expected_return: f64,
    /// 展示用字符串，保留一位小数，如 "15.2%"
    pub formatted: String,
}

/// 派生指标
///
/// 市值单位为百万 PKR；其余比率取 "Current" 统计期，缺失时为 None
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockMetrics {
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub eps: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub dividend_yield: Option<f64>,
    /// 数据集没有 Beta，固定为 1
    pub beta: f64,
    pub debt_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub ev_ebitda: Option<f64>,
    pub asset_turnover: Option<f64>,
    pub inventory_turnover: Option<f64>,
    pub fcf_yield: Option<f64>,
}

/// 个股指标视图：派生指标 + 风险等级
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAnalysis {
    pub symbol: String,
    pub name: String,
    /// 格式化后的价格，如 "PKR 1,234.50"
    pub price_display: String,
    /// 格式化后的涨跌幅，如 "+1.23%"
    pub change_percent_display: Option<String>,
    /// 格式化后的市值，如 "PKR 1.50T"
    pub market_cap_display: Option<String>,
    pub metrics: StockMetrics,
    pub risk_level: RiskTier,
}
