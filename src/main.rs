//! PSX 选股后端服务
//!
//! 基于预抓取的巴基斯坦证券交易所（PSX）数据集提供 RESTful API：
//! 股票查询、条件筛选、风险预设、CAPM 计算以及课程文档代理

mod config;     // 配置加载
mod error;      // 错误类型
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::services::courses::CourseDocService;
use crate::services::stock_store::StockStore;

/// 应用程序入口
///
/// 加载配置和数据集后启动 HTTP 服务器，默认监听 0.0.0.0:5000
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先，其次为配置文件中的级别
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    match &config.source {
        Some(path) => log::info!("从 {} 加载配置成功", path.display()),
        None => log::info!("使用默认配置"),
    }

    // 数据集只在启动时加载一次，失败时以空数据集继续运行
    let store = web::Data::new(StockStore::load(&config.data.stocks_path));
    if store.is_empty() {
        log::warn!("股票数据集为空，所有查询将返回空结果");
    }
    let courses = web::Data::new(CourseDocService::new(&config.courses)?);

    let bind_addr = config.bind_addr();
    log::info!("启动 PSX 选股服务，监听 {}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(store.clone())
            .app_data(courses.clone())
            .configure(handlers::config)  // 配置路由
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_addr)?.run().await?;
    Ok(())
}
