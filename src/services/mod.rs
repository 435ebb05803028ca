//! 业务逻辑服务模块
//!
//! 封装数据加载、筛选计算和课程文档处理逻辑

pub mod courses;      // 课程文档代理与转换
pub mod screener;     // 选股筛选引擎
pub mod stock_store;  // 只读股票数据集
