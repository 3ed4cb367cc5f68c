#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod error;
pub mod route;
pub mod source;

use async_trait::async_trait;
use hyper::{
    body::{self, Buf},
    client::HttpConnector,
    header::{HeaderValue, ACCEPT, AUTHORIZATION},
    Body, Client as HyperClient, Method, Request,
};
use hyper_rustls::HttpsConnector;
use rigdash_models::{Asset, AssetId, AssetTypeCode};
use serde::de::DeserializeOwned;
use std::{result::Result as StdResult, sync::Arc};

pub use error::Error;
pub use hyper::StatusCode;
pub use route::Route;
pub use source::AssetSource;

pub type Result<T> = StdResult<T, Error>;

/// HTTP client for the remote asset API
#[derive(Clone)]
pub struct Client {
    client: HyperClient<HttpsConnector<HttpConnector>>,
    base_url: Arc<str>,
    api_key: Arc<str>,
}

impl Client {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();
        let client = HyperClient::builder().build(connector);
        Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            api_key: Arc::from(api_key),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET for `route` and parses the JSON response
    pub async fn request<T: DeserializeOwned>(&self, route: Route<'_>) -> Result<T> {
        let url = route.url(&self.base_url);
        tracing::debug!(url = %url, "Sending asset API request");

        let req = Request::builder()
            .uri(url.as_str())
            .method(Method::GET)
            .header(AUTHORIZATION, format!("API {}", self.api_key))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .body(Body::empty())?;

        let res = self.client.request(req).await?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = %status, "Asset API returned an error status");
            return Err(Error::APIError(status));
        }

        let mut buf = body::aggregate(res.into_body()).await?;
        let mut bytes = vec![0; buf.remaining()];
        buf.copy_to_slice(&mut bytes);

        let result = serde_json::from_slice(&bytes)?;
        Ok(result)
    }
}

#[async_trait]
impl AssetSource for Client {
    async fn fetch_asset_by_id(&self, asset_id: AssetId) -> Result<Asset> {
        let route = Route::AssetById {
            asset_id: asset_id.get(),
        };
        match self.request::<Asset>(route).await {
            Err(Error::APIError(StatusCode::NOT_FOUND)) => Err(Error::NotFound(asset_id)),
            res => res,
        }
    }

    async fn fetch_active_child(&self, parent_id: AssetId) -> Result<Option<Asset>> {
        let route = Route::ActiveChild {
            asset_id: parent_id.get(),
        };
        match self.request::<Option<Asset>>(route).await {
            Ok(child) => Ok(child),
            Err(Error::APIError(StatusCode::NOT_FOUND)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn fetch_assets_by_types(&self, types: &[AssetTypeCode]) -> Result<Vec<Asset>> {
        let route = Route::AssetsByTypes { types };
        self.request::<Vec<Asset>>(route).await
    }
}
