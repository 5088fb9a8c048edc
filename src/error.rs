//! Library error type

use std::fmt;
use std::path::PathBuf;

/// The kind of record a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Post,
    Pillar,
    Cluster,
    AffiliateLink,
    Page,
}

impl RecordKind {
    /// Title used on the not-found page for this kind
    pub fn not_found_title(&self) -> &'static str {
        match self {
            RecordKind::Post => "Post Not Found",
            RecordKind::Pillar => "Topic Not Found",
            RecordKind::Cluster => "Category Not Found",
            RecordKind::AffiliateLink | RecordKind::Page => "Page Not Found",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Post => "post",
            RecordKind::Pillar => "pillar",
            RecordKind::Cluster => "cluster",
            RecordKind::AffiliateLink => "affiliate link",
            RecordKind::Page => "page",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: RecordKind, key: String },

    #[error("collection `{name}` is configured but {path:?} does not exist")]
    MissingCollection { name: &'static str, path: PathBuf },

    #[error("invalid collection {path:?}: {source}")]
    InvalidCollection {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read content file {path:?}: {source}")]
    ContentFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SiteError {
    pub fn not_found(kind: RecordKind, key: impl Into<String>) -> Self {
        SiteError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SiteError::NotFound { .. })
    }
}

pub type SiteResult<T> = std::result::Result<T, SiteError>;
