use thiserror::Error;

/// Failure reported by an [`HttpClient`](crate::http::HttpClient) while executing a request.
///
/// The fetcher never inspects it and returns it to the caller as the
/// transport produced it.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl TransportError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self(err.into())
    }

    /// Borrow the underlying transport error, e.g. to downcast it.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err)
    }
}

/// Everything that can go wrong while fetching a station's current METAR.
#[derive(Debug, Error)]
pub enum MetarError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to decode METAR response: {0}")]
    Decode(#[from] quick_xml::DeError),

    #[error("Got inconsistent number of results (declared {declared}, decoded {actual})")]
    InconsistentCount { declared: usize, actual: usize },

    #[error("Did not find any data for station '{station}'")]
    NoData { station: String },
}

pub type Result<T> = std::result::Result<T, MetarError>;
