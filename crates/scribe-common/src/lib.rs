//! scribe-common: types and clients shared by the scribe editor crates.
//!
//! - `types`: JSON shapes of the admin backend's `/api/*` endpoints
//! - `spellcheck`: LanguageTool response shapes
//! - `client`: `AdminApi`/`SpellCheck` traits and their reqwest implementations
//! - `config`: client-side configuration
//! - `error`: `ScribeError`

pub mod client;
pub mod config;
pub mod error;
pub mod spellcheck;
#[cfg(feature = "telemetry")]
pub mod telemetry;
pub mod types;

pub use crate::client::{AdminApi, HttpAdminApi, LanguageToolClient, SpellCheck};
pub use crate::config::{ClientConfig, LanguageOption};
pub use crate::error::{Result, ScribeError, SerDeError};
pub use crate::spellcheck::{CheckResponse, IssueKind, SpellMatch};
pub use crate::types::{
    CreatePostResponse, EditorConfig, FileListing, FileReference, NewPostForm,
    ProcessMediaRequest, ProcessMediaResponse, ShortcodeDefinition, TaxonomyEntry, Thumbnail,
    UploadMediaResponse,
};
