//! 股票数据模型
//!
//! 定义 PSX 股票快照及其财务比率表的数据结构

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// 财务比率表：比率名称 -> (统计期 -> 原始值)
///
/// 例如 `ratios["Return on Equity (ROE)"]["Current"] = "18.5%"`
pub type RatioTable = BTreeMap<String, BTreeMap<String, RatioValue>>;

/// 比率表中的原始值
///
/// 抓取数据中既有数字，也有带百分号、千分位的字符串，
/// 其余类型（null、布尔等）一律视为不可用
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RatioValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// 单只股票快照
///
/// 字段名与抓取的 JSON 数据集保持一致（camelCase）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    /// 股票代码（数据集内唯一）
    pub symbol: String,
    /// 公司名称
    pub name: String,
    /// 当前价格
    pub price: f64,
    /// 涨跌额（无昨收时为空）
    #[serde(default)]
    pub change: Option<f64>,
    /// 涨跌幅（百分比）
    #[serde(default)]
    pub change_percent: Option<f64>,
    /// 成交量
    #[serde(default, deserialize_with = "deserialize_volume")]
    pub volume: Option<u64>,
    /// 市值字符串，带量级后缀，如 "PKR 1.5T"
    #[serde(default)]
    pub market_cap: Option<String>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub pb_ratio: Option<f64>,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    #[serde(default)]
    pub week52_high: Option<f64>,
    #[serde(default)]
    pub week52_low: Option<f64>,
    #[serde(default)]
    pub week52_performance: Option<f64>,
    /// 财务比率表
    #[serde(default)]
    pub ratios: RatioTable,
}

// 抓取脚本把成交量写成浮点数（如 1234567.0），这里统一转为整数
fn deserialize_volume<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u64))
}
