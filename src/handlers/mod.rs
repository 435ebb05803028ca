pub mod courses;
pub mod health;
pub mod screener;
pub mod stock;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::config)
            .configure(stock::config)
            .configure(screener::config)
            .configure(courses::api_config)
    )
    .service(web::scope("/courses").configure(courses::config));
}
