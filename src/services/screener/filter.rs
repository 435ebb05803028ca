//! 筛选引擎
//!
//! 对数据集做稳定过滤，保持原有顺序。
//! 指标缺失时，凡是设置了上下界的检查都视为不通过。

use crate::models::{FilterCriteria, StockRecord};

use super::metrics::derive_metrics;
use super::risk::classify_values;

/// 判断指标是否满足上下界
///
/// 未设置任何边界时直接通过；设置了边界但指标缺失时不通过
fn within_bounds(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(v) = value else {
        return false;
    };
    min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m)
}

/// 判断单只股票是否满足全部筛选条件
///
/// Beta 上下界不参与判断
pub fn matches(stock: &StockRecord, criteria: &FilterCriteria) -> bool {
    let m = derive_metrics(stock);

    let bounds = [
        (m.market_cap, criteria.market_cap_min, criteria.market_cap_max),
        (m.pe_ratio, criteria.pe_ratio_min, criteria.pe_ratio_max),
        (m.pb_ratio, criteria.pb_ratio_min, criteria.pb_ratio_max),
        (m.roe, criteria.roe_min, criteria.roe_max),
        (m.roa, criteria.roa_min, criteria.roa_max),
        (m.dividend_yield, criteria.dividend_yield_min, criteria.dividend_yield_max),
        (m.debt_equity, criteria.debt_equity_min, criteria.debt_equity_max),
        (m.current_ratio, criteria.current_ratio_min, criteria.current_ratio_max),
        (m.quick_ratio, criteria.quick_ratio_min, criteria.quick_ratio_max),
    ];

    if !bounds
        .iter()
        .all(|&(value, min, max)| within_bounds(value, min, max))
    {
        return false;
    }

    match criteria.risk_level {
        Some(level) => classify_values(m.debt_equity, m.current_ratio) == level,
        None => true,
    }
}

/// 过滤股票列表
pub fn filter_stocks<'a>(stocks: &'a [StockRecord], criteria: &FilterCriteria) -> Vec<&'a StockRecord> {
    stocks.iter().filter(|s| matches(s, criteria)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskTier;
    use serde_json::json;

    fn sample_stocks() -> Vec<StockRecord> {
        serde_json::from_value(json!([
            {
                "symbol": "SYS", "name": "Systems Limited", "price": 420.0,
                "marketCap": "PKR 120B", "peRatio": 18.2,
                "ratios": {
                    "Debt / Equity Ratio": { "Current": "0.12" },
                    "Current Ratio": { "Current": "3.05" },
                    "Quick Ratio": { "Current": "2.80" },
                    "Return on Equity (ROE)": { "Current": "24.1%" }
                }
            },
            {
                "symbol": "PIBTL", "name": "Pakistan International Bulk Terminal", "price": 7.2,
                "marketCap": "PKR 12.9B", "peRatio": null,
                "ratios": {
                    "Debt / Equity Ratio": { "Current": "2.40" },
                    "Current Ratio": { "Current": "0.62" }
                }
            },
            {
                "symbol": "LUCK", "name": "Lucky Cement", "price": 850.0,
                "marketCap": "PKR 265.3B", "peRatio": 7.4,
                "ratios": {
                    "Debt / Equity Ratio": { "Current": "0.85" },
                    "Current Ratio": { "Current": "1.40" },
                    "Quick Ratio": { "Current": "0.90" },
                    "Return on Equity (ROE)": { "Current": "16.0%" }
                }
            },
            {
                "symbol": "OGDC", "name": "Oil & Gas Development Company", "price": 212.5,
                "marketCap": "PKR 1.1T", "peRatio": 4.1,
                "ratios": {
                    "Debt / Equity Ratio": { "Current": "0.01" },
                    "Current Ratio": { "Current": "4.20" },
                    "Quick Ratio": { "Current": "1.20" }
                }
            },
            {
                "symbol": "NODATA", "name": "No Ratios", "price": 5.0,
                "marketCap": "N/A"
            }
        ]))
        .unwrap()
    }

    fn symbols(stocks: &[&StockRecord]) -> Vec<String> {
        stocks.iter().map(|s| s.symbol.clone()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything_in_order() {
        let stocks = sample_stocks();
        let result = filter_stocks(&stocks, &FilterCriteria::default());
        assert_eq!(symbols(&result), vec!["SYS", "PIBTL", "LUCK", "OGDC", "NODATA"]);
    }

    #[test]
    fn test_missing_metric_fails_bound() {
        let stocks = sample_stocks();
        let criteria = FilterCriteria {
            pe_ratio_max: Some(100.0),
            ..Default::default()
        };
        let result = filter_stocks(&stocks, &criteria);
        assert_eq!(symbols(&result), vec!["SYS", "LUCK", "OGDC"]);
    }

    #[test]
    fn test_market_cap_bounds_use_millions() {
        let stocks = sample_stocks();
        let criteria = FilterCriteria {
            market_cap_min: Some(100_000.0),
            market_cap_max: Some(500_000.0),
            ..Default::default()
        };
        let result = filter_stocks(&stocks, &criteria);
        assert_eq!(symbols(&result), vec!["SYS", "LUCK"]);
    }

    #[test]
    fn test_zero_bound_is_applied() {
        let stocks = sample_stocks();
        let criteria = FilterCriteria {
            roe_min: Some(0.0),
            ..Default::default()
        };
        let result = filter_stocks(&stocks, &criteria);
        assert_eq!(symbols(&result), vec!["SYS", "LUCK"]);
    }

    #[test]
    fn test_risk_level_must_match() {
        let stocks = sample_stocks();
        let high = FilterCriteria {
            risk_level: Some(RiskTier::High),
            ..Default::default()
        };
        assert_eq!(symbols(&filter_stocks(&stocks, &high)), vec!["PIBTL"]);

        let medium = FilterCriteria {
            risk_level: Some(RiskTier::Medium),
            ..Default::default()
        };
        assert_eq!(symbols(&filter_stocks(&stocks, &medium)), vec!["LUCK", "NODATA"]);
    }

    #[test]
    fn test_beta_bounds_are_ignored() {
        let stocks = sample_stocks();
        let criteria = FilterCriteria {
            beta_min: Some(5.0),
            beta_max: Some(-5.0),
            ..Default::default()
        };
        assert_eq!(filter_stocks(&stocks, &criteria).len(), stocks.len());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let stocks = sample_stocks();
        let criteria = FilterCriteria {
            current_ratio_min: Some(1.0),
            debt_equity_max: Some(1.0),
            ..Default::default()
        };
        let once: Vec<StockRecord> = filter_stocks(&stocks, &criteria).into_iter().cloned().collect();
        let twice = filter_stocks(&once, &criteria);
        assert_eq!(symbols(&twice), vec!["SYS", "LUCK", "OGDC"]);
        assert_eq!(twice.len(), once.len());
    }

    #[test]
    fn test_tightening_never_grows_result() {
        println!("\n========== 测试收紧条件结果单调 ==========");
        let stocks = sample_stocks();
        let mut previous = usize::MAX;
        for min in [0.0, 1.0, 1.5, 3.0, 4.0, 10.0] {
            let criteria = FilterCriteria {
                current_ratio_min: Some(min),
                ..Default::default()
            };
            let count = filter_stocks(&stocks, &criteria).len();
            println!("  currentRatioMin={} -> {} 只", min, count);
            assert!(count <= previous, "currentRatioMin={} 结果变多", min);
            previous = count;
        }
    }

    #[test]
    fn test_within_bounds() {
        assert!(within_bounds(None, None, None));
        assert!(!within_bounds(None, Some(1.0), None));
        assert!(!within_bounds(None, None, Some(1.0)));
        assert!(within_bounds(Some(1.0), Some(1.0), Some(1.0)));
        assert!(!within_bounds(Some(0.99), Some(1.0), None));
        assert!(!within_bounds(Some(1.01), None, Some(1.0)));
    }
}
