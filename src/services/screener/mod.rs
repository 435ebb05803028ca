//! 选股筛选引擎
//!
//! 派生指标提取、风险分类、条件筛选、CAPM 与风险预设。
//! 全部为纯函数，直接作用于只读数据集。

mod capm;
mod filter;
mod format;
mod metrics;
mod presets;
mod risk;

pub use capm::evaluate as evaluate_capm;
pub use filter::filter_stocks;
pub use format::{format_currency, format_market_cap, format_percent};
pub use metrics::derive_metrics;
pub use presets::resolve_preset;
pub use risk::classify;
