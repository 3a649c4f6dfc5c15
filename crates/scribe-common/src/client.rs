//! Clients for the admin backend and the proofreading service.
//!
//! `AdminApi` and `SpellCheck` are the seams the editor core is written
//! against; `HttpAdminApi` and `LanguageToolClient` are the reqwest-backed
//! implementations used in the browser and natively.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{Result, ScribeError};
use crate::spellcheck::CheckResponse;
use crate::types::{
    CreatePostResponse, EditorConfig, FileListing, FileReference, NewPostForm,
    ProcessMediaRequest, ProcessMediaResponse, TaxonomyEntry, UploadMediaResponse,
};

pub const CONFIG_ENDPOINT: &str = "/api/config";
pub const LIST_ENDPOINT: &str = "/api/list";
pub const LOAD_ENDPOINT: &str = "/api/load";
pub const SAVE_ENDPOINT: &str = "/api/save";
pub const MEDIA_LIST_ENDPOINT: &str = "/api/media-list";
pub const PROCESS_MEDIA_ENDPOINT: &str = "/api/process-media";
pub const UPLOAD_MEDIA_ENDPOINT: &str = "/api/upload-media";
pub const DELETE_MEDIA_ENDPOINT: &str = "/api/delete-media";
pub const TAGS_ENDPOINT: &str = "/api/tags";
pub const CATEGORIES_ENDPOINT: &str = "/api/categories";
pub const CREATE_POST_ENDPOINT: &str = "/api/create-post";

/// The admin backend's REST surface.
#[cfg_attr(
    not(all(target_family = "wasm", target_os = "unknown")),
    trait_variant::make(Send)
)]
#[allow(async_fn_in_trait)]
pub trait AdminApi {
    /// Toolbar definitions from `/api/config`.
    async fn config(&self) -> Result<EditorConfig>;

    /// Files available for `language`.
    async fn list_files(&self, language: &str) -> Result<FileListing>;

    /// Raw content of a file.
    async fn load_file(&self, file: &FileReference) -> Result<String>;

    /// Persist `content` for `file`. The response body is ignored.
    async fn save_file(&self, file: &FileReference, content: String) -> Result<()>;

    async fn media_list(&self) -> Result<Vec<String>>;

    /// Rename/process a media file, returning the name to link to.
    async fn process_media(&self, request: &ProcessMediaRequest) -> Result<ProcessMediaResponse>;

    async fn upload_media(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadMediaResponse>;

    async fn delete_media(&self, file_name: &str) -> Result<()>;

    async fn tags(&self) -> Result<Vec<TaxonomyEntry>>;

    async fn categories(&self) -> Result<Vec<TaxonomyEntry>>;

    async fn create_post(&self, form: &NewPostForm) -> Result<CreatePostResponse>;
}

/// External spelling and grammar checker.
#[cfg_attr(
    not(all(target_family = "wasm", target_os = "unknown")),
    trait_variant::make(Send)
)]
#[allow(async_fn_in_trait)]
pub trait SpellCheck {
    async fn check(&self, text: &str, language: &str) -> Result<CheckResponse>;
}

/// reqwest client for the admin backend.
#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpAdminApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base.join(endpoint)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let request = self.client.get(self.url(endpoint)?).query(query);
        let body = send(endpoint, request).await?.text().await.map_err(|source| {
            ScribeError::Http {
                endpoint: endpoint.to_owned(),
                source,
            }
        })?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        payload: &B,
    ) -> Result<T> {
        let request = self.client.post(self.url(endpoint)?).json(payload);
        let body = send(endpoint, request).await?.text().await.map_err(|source| {
            ScribeError::Http {
                endpoint: endpoint.to_owned(),
                source,
            }
        })?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Send a request, turning non-success statuses into `ScribeError::Status`.
async fn send(endpoint: &str, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
    tracing::debug!(endpoint, "sending request");
    let response = request.send().await.map_err(|source| ScribeError::Http {
        endpoint: endpoint.to_owned(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(endpoint, status = status.as_u16(), "request rejected");
        return Err(ScribeError::Status {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

impl AdminApi for HttpAdminApi {
    async fn config(&self) -> Result<EditorConfig> {
        self.get_json(CONFIG_ENDPOINT, &[]).await
    }

    async fn list_files(&self, language: &str) -> Result<FileListing> {
        // An empty content folder is reported as `null`.
        let listing: Option<FileListing> =
            self.get_json(LIST_ENDPOINT, &[("lang", language)]).await?;
        Ok(listing.unwrap_or_default())
    }

    async fn load_file(&self, file: &FileReference) -> Result<String> {
        let path = file.path();
        let request = self
            .client
            .get(self.url(LOAD_ENDPOINT)?)
            .query(&[("file", path.as_str())]);
        send(LOAD_ENDPOINT, request)
            .await?
            .text()
            .await
            .map_err(|source| ScribeError::Http {
                endpoint: LOAD_ENDPOINT.to_owned(),
                source,
            })
    }

    async fn save_file(&self, file: &FileReference, content: String) -> Result<()> {
        let path = file.path();
        let request = self
            .client
            .post(self.url(SAVE_ENDPOINT)?)
            .query(&[("file", path.as_str())])
            .body(content);
        send(SAVE_ENDPOINT, request).await?;
        Ok(())
    }

    async fn media_list(&self) -> Result<Vec<String>> {
        let files: Option<Vec<String>> = self.get_json(MEDIA_LIST_ENDPOINT, &[]).await?;
        Ok(files.unwrap_or_default())
    }

    async fn process_media(&self, request: &ProcessMediaRequest) -> Result<ProcessMediaResponse> {
        self.post_json(PROCESS_MEDIA_ENDPOINT, request).await
    }

    async fn upload_media(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadMediaResponse> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = reqwest::multipart::Form::new().part("file", part);
        let request = self
            .client
            .post(self.url(UPLOAD_MEDIA_ENDPOINT)?)
            .multipart(form);
        let body = send(UPLOAD_MEDIA_ENDPOINT, request)
            .await?
            .text()
            .await
            .map_err(|source| ScribeError::Http {
                endpoint: UPLOAD_MEDIA_ENDPOINT.to_owned(),
                source,
            })?;
        if body.trim().is_empty() {
            return Ok(UploadMediaResponse::default());
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn delete_media(&self, file_name: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.url(DELETE_MEDIA_ENDPOINT)?)
            .query(&[("file", file_name)]);
        send(DELETE_MEDIA_ENDPOINT, request).await?;
        Ok(())
    }

    async fn tags(&self) -> Result<Vec<TaxonomyEntry>> {
        let tags: Option<Vec<TaxonomyEntry>> = self.get_json(TAGS_ENDPOINT, &[]).await?;
        Ok(tags.unwrap_or_default())
    }

    async fn categories(&self) -> Result<Vec<TaxonomyEntry>> {
        let categories: Option<Vec<TaxonomyEntry>> =
            self.get_json(CATEGORIES_ENDPOINT, &[]).await?;
        Ok(categories.unwrap_or_default())
    }

    async fn create_post(&self, form: &NewPostForm) -> Result<CreatePostResponse> {
        self.post_json(CREATE_POST_ENDPOINT, form).await
    }
}

/// reqwest client for a LanguageTool `/v2/check` endpoint.
#[derive(Debug, Clone)]
pub struct LanguageToolClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl LanguageToolClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: Url::parse(endpoint)?,
        })
    }
}

impl SpellCheck for LanguageToolClient {
    async fn check(&self, text: &str, language: &str) -> Result<CheckResponse> {
        let endpoint = self.endpoint.as_str();
        let request = self.client.post(self.endpoint.clone()).form(&[
            ("text", text),
            ("language", language),
            ("enabledOnly", "false"),
        ]);
        let body = send(endpoint, request)
            .await?
            .text()
            .await
            .map_err(|source| ScribeError::Http {
                endpoint: endpoint.to_owned(),
                source,
            })?;
        Ok(serde_json::from_str(&body)?)
    }
}
