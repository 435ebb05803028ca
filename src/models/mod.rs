pub mod stock;
pub mod screener;
pub mod response;

pub use stock::*;
pub use screener::*;
pub use response::*;
