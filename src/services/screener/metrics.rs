//! 派生指标提取
//!
//! 比率表的值类型不统一（数字或格式化字符串），所有按比率名读取的
//! 指标都经过 `ratio_value`，解析失败一律返回 None，不会 panic

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{RatioValue, StockMetrics, StockRecord};

/// 默认统计期
pub const CURRENT_PERIOD: &str = "Current";

/// 数据集中没有 Beta，统一使用 1
pub const DEFAULT_BETA: f64 = 1.0;

// ==================== 比率名称 ====================

pub const PB_RATIO: &str = "PB Ratio";
pub const EPS: &str = "EPS";
pub const ROE: &str = "Return on Equity (ROE)";
pub const ROA: &str = "Return on Assets (ROA)";
pub const DIVIDEND_YIELD: &str = "Dividend Yield";
pub const DEBT_EQUITY: &str = "Debt / Equity Ratio";
pub const CURRENT_RATIO: &str = "Current Ratio";
pub const QUICK_RATIO: &str = "Quick Ratio";
pub const EV_EBITDA: &str = "EV/EBITDA Ratio";
pub const ASSET_TURNOVER: &str = "Asset Turnover";
pub const INVENTORY_TURNOVER: &str = "Inventory Turnover";
pub const FCF_YIELD: &str = "FCF Yield";

// ==================== 数值解析 ====================

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("static pattern"));
static NON_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("static pattern"));
// 只取开头的合法数字部分，如 "1.2.3" -> 1.2
static NUMERIC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)").expect("static pattern"));

fn parse_prefix(cleaned: &str) -> Option<f64> {
    let m = NUMERIC_PREFIX.find(cleaned)?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 解析格式化数字字符串，如 "18.5%"、"1,234.56"、"-0.8x"
///
/// 去掉数字、小数点、负号以外的字符后取开头的数字部分
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC.replace_all(raw, "");
    parse_prefix(&cleaned)
}

/// 解析市值字符串，统一换算为百万
///
/// - 含 "T"（万亿）乘以 1,000,000
/// - 含 "B"（十亿）乘以 1,000
/// - 其他不缩放
///
/// 空字符串或缺失返回 0；非空但无法解析返回 None
pub fn parse_market_cap(raw: Option<&str>) -> Option<f64> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return Some(0.0),
    };

    let cleaned = NON_DECIMAL.replace_all(raw, "");
    let value = parse_prefix(&cleaned)?;

    if raw.contains('T') {
        Some(value * 1_000_000.0)
    } else if raw.contains('B') {
        Some(value * 1_000.0)
    } else {
        Some(value)
    }
}

// ==================== 比率读取 ====================

impl RatioValue {
    /// 转为数值，字符串按 `parse_numeric` 解析
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RatioValue::Number(n) => Some(*n).filter(|v| v.is_finite()),
            RatioValue::Text(s) => parse_numeric(s),
            RatioValue::Other(_) => None,
        }
    }
}

/// 读取指定比率、指定统计期的数值
pub fn ratio_value(stock: &StockRecord, name: &str, period: &str) -> Option<f64> {
    stock.ratios.get(name)?.get(period)?.as_f64()
}

/// 读取指定比率 "Current" 统计期的数值
pub fn current_period_value(stock: &StockRecord, name: &str) -> Option<f64> {
    ratio_value(stock, name, CURRENT_PERIOD)
}

/// 计算全部派生指标
pub fn derive_metrics(stock: &StockRecord) -> StockMetrics {
    StockMetrics {
        market_cap: parse_market_cap(stock.market_cap.as_deref()),
        pe_ratio: stock.pe_ratio,
        pb_ratio: current_period_value(stock, PB_RATIO),
        eps: current_period_value(stock, EPS),
        roe: current_period_value(stock, ROE),
        roa: current_period_value(stock, ROA),
        dividend_yield: current_period_value(stock, DIVIDEND_YIELD),
        beta: DEFAULT_BETA,
        debt_equity: current_period_value(stock, DEBT_EQUITY),
        current_ratio: current_period_value(stock, CURRENT_RATIO),
        quick_ratio: current_period_value(stock, QUICK_RATIO),
        ev_ebitda: current_period_value(stock, EV_EBITDA),
        asset_turnover: current_period_value(stock, ASSET_TURNOVER),
        inventory_turnover: current_period_value(stock, INVENTORY_TURNOVER),
        fcf_yield: current_period_value(stock, FCF_YIELD),
    }
}
