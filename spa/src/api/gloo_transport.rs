use async_trait::async_trait;
use client::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use gloo_net::http::Request;
use url::Url;

pub struct GlooTransport {
    base_url: Url,
}

impl GlooTransport {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.url(&self.base_url);
        let mut builder = match request.method {
            Method::Get => Request::get(url.as_str()),
            Method::Post => Request::post(url.as_str()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match &request.body {
            Some(body) => builder
                .header("Content-Type", body.content_type())
                .body(body.as_str().to_owned()),
            None => builder.build(),
        }
        .map_err(|error| TransportError::InvalidRequest(error.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|error| TransportError::Unreachable(error.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError::Unreachable(error.to_string()))?;
        log::info!(
            "Api {method} {path}, status={status}",
            method = request.method.as_str(),
            path = request.path
        );
        Ok(ApiResponse::new(status, body))
    }
}
