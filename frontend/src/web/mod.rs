//! 浏览器 API 封装模块
//!
//! 核心库的 `HttpClient` / `KeyValueStore` 在浏览器中的实现，
//! 以及 History 路由与定时器。

mod http;
pub mod router;
mod storage;
mod timer;

pub use http::BrowserHttpClient;
pub use storage::BrowserStore;
pub use timer::{Interval, delay};
