//! Client for the USGS EarthExplorer inventory stream
use crate::error::{CatalogError, DecodeError};
use crate::query::Query;
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use url::Url;

const INVENTORY_API: &str = "http://earthexplorer.usgs.gov/EE/InventoryStream/";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// WRS-2 extent, used for whichever of path or row was left open in a
/// path/row search.
const WRS_PATHS: (u32, u32) = (1, 233);
const WRS_ROWS: (u32, u32) = (1, 248);

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Default)]
pub struct SearchResponse {
    pub status: Option<String>,
    pub scenes: Vec<Scene>,
}

#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new() -> Self {
        let base_url = Url::parse(INVENTORY_API).expect("Inventory API url should always parse");
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_base_url(base_url: Url) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, mut base_url: Url) -> Self {
        // Endpoint names are appended directly to the base path
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Compose the GET url for `query`.
    ///
    /// Queries with a path or row range go to `pathrow`, everything else to
    /// `latlong`. Sensor and dates are always present, `cc` only when a cloud
    /// cover ceiling was set.
    pub fn request_url(&self, query: &Query) -> Url {
        let mut url = self.base_url.clone();
        let endpoint = if query.is_path_row() { "pathrow" } else { "latlong" };
        url.set_path(&format!("{}{}", self.base_url.path(), endpoint));

        {
            let mut params = url.query_pairs_mut();
            if query.is_path_row() {
                let (start_path, end_path) = query.path_range.unwrap_or(WRS_PATHS);
                let (start_row, end_row) = query.row_range.unwrap_or(WRS_ROWS);
                params
                    .append_pair("start_path", &start_path.to_string())
                    .append_pair("end_path", &end_path.to_string())
                    .append_pair("start_row", &start_row.to_string())
                    .append_pair("end_row", &end_row.to_string());
            } else {
                let bbox = &query.bbox;
                params
                    .append_pair("north", &bbox.north.to_string())
                    .append_pair("south", &bbox.south.to_string())
                    .append_pair("east", &bbox.east.to_string())
                    .append_pair("west", &bbox.west.to_string());
            }

            params
                .append_pair("sensor", query.sensor.code())
                .append_pair("start_date", &query.start_date.format(DATE_FORMAT).to_string())
                .append_pair("end_date", &query.end_date.format(DATE_FORMAT).to_string());

            if let Some(cc) = query.max_cloud_cover {
                params.append_pair("cc", &cc.to_string());
            }
        }
        url
    }

    /// Send one GET for `query` and return the raw body.
    ///
    /// The body is returned whatever the HTTP status; a body the catalog
    /// produced on error will fail in [`CatalogClient::parse`] instead.
    pub async fn request(&self, query: &Query) -> Result<Vec<u8>, CatalogError> {
        let url = self.request_url(query);
        tracing::debug!("Requesting {url}");

        let response = match self.http.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Request to {url} failed: {e}");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Catalog answered {status} for {url}");
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!("Reading response from {url} failed: {e}");
            e
        })?;
        tracing::debug!("Received {} bytes ({status})", body.len());

        Ok(body.to_vec())
    }

    /// Decode a `searchResponse` document. Any error discards the whole
    /// document.
    pub fn parse(body: &[u8]) -> Result<SearchResponse, CatalogError> {
        let content = std::str::from_utf8(body).map_err(DecodeError::from)?;
        let doc = roxmltree::Document::parse(content).map_err(DecodeError::from)?;

        let root = doc.root_element();
        if !root.has_tag_name("searchResponse") {
            let name = root.tag_name().name().to_string();
            return Err(DecodeError::UnexpectedRoot(name).into());
        }

        let status = root
            .children()
            .find(|n| n.has_tag_name("returnStatus"))
            .and_then(|n| n.attribute("value"))
            .map(str::to_string);

        let scenes = root
            .children()
            .filter(|n| n.has_tag_name("metaData"))
            .map(Scene::from_node)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchResponse { status, scenes })
    }

    pub async fn search(&self, query: &Query) -> Result<SearchResponse, CatalogError> {
        let body = self.request(query).await?;
        let response = Self::parse(&body)?;
        tracing::debug!(
            "Decoded {} scenes (status: {:?})",
            response.scenes.len(),
            response.status
        );
        Ok(response)
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}
