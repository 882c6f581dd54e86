use async_trait::async_trait;
use client::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use tracing::debug;
use url::Url;

pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.url(&self.base_url);
        let mut builder = match request.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", body.content_type())
                .body(body.as_str().to_owned());
        }

        let response = builder.send().await.map_err(|error| {
            if error.is_builder() {
                TransportError::InvalidRequest(error.to_string())
            } else {
                TransportError::Unreachable(error.to_string())
            }
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError::Unreachable(error.to_string()))?;
        debug!(
            method = request.method.as_str(),
            path = %request.path,
            status,
            "Api call completed"
        );
        Ok(ApiResponse::new(status, body))
    }
}
