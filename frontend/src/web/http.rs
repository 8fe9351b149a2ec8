//! 浏览器 HTTP 客户端
//!
//! 基于 `gloo-net` 实现核心库的 `HttpClient` 特性。
//! 只有 fetch 本身失败时返回错误，非 2xx 状态码原样交给上层。

use gloo_net::http::{Request, RequestBuilder};
use gorev_takip::{ApiError, HttpClient, HttpMethod, HttpRequest, HttpResponse, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHttpClient;

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let mut builder = builder(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(format!("请求构建失败: {}", e)))?;

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        // 读取失败时按空响应体处理，状态码仍然有效
        let body = resp.text().await.unwrap_or_default();
        Ok(HttpResponse { status, body })
    }
}
