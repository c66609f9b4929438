use formats::KmlError;

/// Why a KML load failed.
///
/// The transport stage and the parse stage are distinct by contract: a
/// malformed body behind a 200 response is `Parse`, never `Fetch`. `Clone`
/// because a deduplicated in-flight load hands its outcome to every waiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The transport failed outright or reported a non-success status.
    Fetch { detail: String },
    /// The response body was not well-formed XML.
    Parse(KmlError),
}

impl LoadError {
    pub fn status(status: u16, url: &str) -> Self {
        LoadError::Fetch {
            detail: format!("status {status} for {url}"),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch { detail } => write!(f, "KML fetch failed: {detail}"),
            LoadError::Parse(e) => write!(f, "KML parse failed: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Fetch { .. } => None,
            LoadError::Parse(e) => Some(e),
        }
    }
}

impl From<KmlError> for LoadError {
    fn from(e: KmlError) -> Self {
        LoadError::Parse(e)
    }
}
