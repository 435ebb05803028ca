//! 股票数据存储
//!
//! 启动时从 JSON 文件一次性加载，之后只读。
//! 加载失败时记录错误并返回空数据集，不影响服务启动。

use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::models::{FilterCriteria, StockAnalysis, StockRecord};
use crate::services::screener::{
    classify, derive_metrics, filter_stocks, format_currency, format_market_cap, format_percent,
};

/// 涨幅榜、成交活跃榜默认条数
pub const TOP_LIST_LIMIT: usize = 10;

/// 只读股票数据集
#[derive(Debug, Default)]
pub struct StockStore {
    stocks: Vec<StockRecord>,
}

impl StockStore {
    /// 由内存数据构建，股票代码重复时保留第一条
    pub fn new(stocks: Vec<StockRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(stocks.len());

        for stock in stocks {
            if seen.insert(stock.symbol.clone()) {
                unique.push(stock);
            } else {
                log::warn!("数据集中股票代码重复，忽略: {}", stock.symbol);
            }
        }

        Self { stocks: unique }
    }

    /// 从 JSON 文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取数据文件 {} 失败", path.display()))?;
        let raw: Vec<serde_json::Value> = serde_json::from_str(&content)
            .with_context(|| format!("解析数据文件 {} 失败", path.display()))?;
        Ok(Self::from_values(raw))
    }

    /// 逐条转换原始记录，无法解析的记录记录告警后跳过
    pub fn from_values(raw: Vec<serde_json::Value>) -> Self {
        let mut stocks = Vec::with_capacity(raw.len());

        for (index, value) in raw.into_iter().enumerate() {
            let symbol = value
                .get("symbol")
                .and_then(|s| s.as_str())
                .unwrap_or("<unknown>")
                .to_string();
            match serde_json::from_value::<StockRecord>(value) {
                Ok(stock) => stocks.push(stock),
                Err(e) => log::warn!("跳过无法解析的记录 #{} ({}): {}", index, symbol, e),
            }
        }

        Self::new(stocks)
    }

    /// 加载数据集，失败时返回空数据集
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(store) => {
                log::info!("从 {} 加载 {} 只股票", path.display(), store.len());
                store
            }
            Err(e) => {
                log::error!("加载股票数据失败: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// 全部股票（保持数据集原有顺序）
    pub fn all(&self) -> &[StockRecord] {
        &self.stocks
    }

    /// 按代码精确查找
    pub fn find(&self, symbol: &str) -> Option<&StockRecord> {
        self.stocks.iter().find(|s| s.symbol == symbol)
    }

    /// 按条件筛选
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&StockRecord> {
        filter_stocks(&self.stocks, criteria)
    }

    /// 涨幅榜：涨跌幅为正，降序
    pub fn top_gainers(&self, limit: usize) -> Vec<&StockRecord> {
        let mut gainers: Vec<&StockRecord> = self
            .stocks
            .iter()
            .filter(|s| s.change_percent.is_some_and(|p| p > 0.0))
            .collect();
        gainers.sort_by(|a, b| {
            let a = a.change_percent.unwrap_or(0.0);
            let b = b.change_percent.unwrap_or(0.0);
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        });
        gainers.truncate(limit);
        gainers
    }

    /// 成交活跃榜：有成交量数据，按成交量降序
    pub fn most_active(&self, limit: usize) -> Vec<&StockRecord> {
        let mut active: Vec<&StockRecord> =
            self.stocks.iter().filter(|s| s.volume.is_some()).collect();
        active.sort_by_key(|s| std::cmp::Reverse(s.volume.unwrap_or(0)));
        active.truncate(limit);
        active
    }

    /// 个股指标视图
    pub fn analyze(&self, symbol: &str) -> Option<StockAnalysis> {
        let stock = self.find(symbol)?;
        let metrics = derive_metrics(stock);

        Some(StockAnalysis {
            symbol: stock.symbol.clone(),
            name: stock.name.clone(),
            price_display: format_currency(stock.price),
            change_percent_display: stock.change_percent.map(format_percent),
            market_cap_display: metrics.market_cap.map(format_market_cap),
            risk_level: classify(stock),
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskTier;
    use serde_json::json;
    use std::io::Write;

    fn sample_store() -> StockStore {
        let stocks: Vec<StockRecord> = serde_json::from_value(json!([
            { "symbol": "AAA", "name": "A", "price": 10.0, "changePercent": 2.5, "volume": 500.0, "marketCap": "PKR 10B" },
            { "symbol": "BBB", "name": "B", "price": 20.0, "changePercent": -1.0, "volume": 9000.0, "marketCap": "PKR 20B" },
            { "symbol": "CCC", "name": "C", "price": 30.0, "changePercent": 7.1, "volume": null, "marketCap": "PKR 1.2T",
              "ratios": {
                  "Debt / Equity Ratio": { "Current": "2.1" },
                  "Current Ratio": { "Current": "1.3" }
              } },
            { "symbol": "DDD", "name": "D", "price": 40.0, "changePercent": null, "volume": 0.0, "marketCap": "PKR 900M" },
            { "symbol": "EEE", "name": "E", "price": 50.0, "changePercent": 2.5, "volume": 9000.0, "marketCap": "PKR 50B" }
        ]))
        .unwrap();
        StockStore::new(stocks)
    }

    fn symbols(stocks: &[&StockRecord]) -> Vec<String> {
        stocks.iter().map(|s| s.symbol.clone()).collect()
    }

    #[test]
    fn test_find_by_symbol() {
        let store = sample_store();
        assert_eq!(store.find("BBB").map(|s| s.price), Some(20.0));
        assert!(store.find("ZZZ").is_none());
        assert!(store.find("bbb").is_none());
    }

    #[test]
    fn test_duplicate_symbols_keep_first() {
        let stocks: Vec<StockRecord> = serde_json::from_value(json!([
            { "symbol": "DUP", "name": "first", "price": 1.0, "marketCap": "" },
            { "symbol": "DUP", "name": "second", "price": 2.0, "marketCap": "" }
        ]))
        .unwrap();
        let store = StockStore::new(stocks);
        assert_eq!(store.len(), 1);
        assert_eq!(store.find("DUP").unwrap().name, "first");
    }

    #[test]
    fn test_top_gainers_descending_stable() {
        let store = sample_store();
        assert_eq!(symbols(&store.top_gainers(TOP_LIST_LIMIT)), vec!["CCC", "AAA", "EEE"]);
        assert_eq!(symbols(&store.top_gainers(1)), vec!["CCC"]);
    }

    #[test]
    fn test_most_active_requires_volume() {
        let store = sample_store();
        assert_eq!(
            symbols(&store.most_active(TOP_LIST_LIMIT)),
            vec!["BBB", "EEE", "AAA", "DDD"]
        );
    }

    #[test]
    fn test_analyze() {
        let store = sample_store();
        let analysis = store.analyze("CCC").unwrap();
        assert_eq!(analysis.risk_level, RiskTier::High);
        assert_eq!(analysis.metrics.market_cap, Some(1_200_000.0));
        assert_eq!(analysis.market_cap_display.as_deref(), Some("PKR 1.20T"));
        assert_eq!(analysis.price_display, "PKR 30.00");
        assert_eq!(analysis.change_percent_display.as_deref(), Some("+7.10%"));
        assert!(store.analyze("ZZZ").is_none());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let store = StockStore::load("/nonexistent/psx_stocks.json");
        assert!(store.is_empty());
        assert!(store.filter(&FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("psx_store_test_{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[{{"symbol":"HBL","name":"Habib Bank","price":120.0,"marketCap":"PKR 176B"}}]"#
        )
        .unwrap();

        let store = StockStore::load(&path);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].symbol, "HBL");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_skips_bad_records() {
        let path = std::env::temp_dir().join(format!("psx_store_partial_{}.json", std::process::id()));
        fs::write(
            &path,
            r#"[
                {"symbol":"HBL","name":"Habib Bank","price":120.0,"marketCap":"PKR 176B"},
                {"symbol":"XYZ","name":"No Price","price":null,"marketCap":"PKR 1B"},
                {"symbol":"LUCK","name":"Lucky Cement","price":850.0,"marketCap":"PKR 270B"},
                "not a record"
            ]"#,
        )
        .unwrap();

        let store = StockStore::load(&path);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.all().iter().map(|s| s.symbol.as_str()).collect::<Vec<_>>(),
            vec!["HBL", "LUCK"]
        );
        assert!(store.find("XYZ").is_none());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let path = std::env::temp_dir().join(format!("psx_store_bad_{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();

        let store = StockStore::load(&path);
        assert!(store.is_empty());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_bundled_dataset() {
        println!("\n========== 测试加载内置数据集 ==========");
        let store = StockStore::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/psx_stocks.json"));
        println!("  共 {} 只股票", store.len());
        assert_eq!(store.len(), 8);

        let low = crate::services::screener::resolve_preset("low").unwrap();
        assert_eq!(symbols(&store.filter(&low)), vec!["OGDC", "SYS", "MARI"]);

        let high = crate::services::screener::resolve_preset("high").unwrap();
        assert_eq!(symbols(&store.filter(&high)), vec!["PIBTL"]);

        assert_eq!(store.top_gainers(TOP_LIST_LIMIT)[0].symbol, "PIBTL");
        assert_eq!(store.most_active(TOP_LIST_LIMIT)[0].symbol, "PIBTL");
    }
}
