//! Service configuration

use crate::Args;
use std::{net::SocketAddr, num::NonZeroU32, path::PathBuf, sync::Arc};

/// Final process configuration
///
/// This is the result of digesting validated [`Args`]. Please refer to
/// [`Args`] to know more about individual fields.
#[allow(missing_docs)]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    /// Where the dataset is loaded from
    pub source: DataSource,

    /// Subset of the configuration that affects which rows are kept
    pub input: InputConfig,

    // Other fields have the same meaning as in Args
    pub bind: SocketAddr,
    pub per_page: NonZeroU32,
}
//
impl Config {
    /// Determine process configuration from CLI arguments
    pub(crate) fn new(args: Args) -> Arc<Self> {
        let Args {
            data,
            bind,
            language,
            per_page,
        } = args;
        Arc::new(Self {
            source: DataSource::from(&*data),
            input: InputConfig { language },
            bind,
            per_page,
        })
    }
}

/// Subset of the configuration that affects which rows are loaded
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct InputConfig {
    /// Language that dataset rows must be tagged with to be kept
    pub language: Box<str>,
}
//
impl Default for InputConfig {
    fn default() -> Self {
        Self {
            language: "Latin".into(),
        }
    }
}

/// Location of the CSV dataset
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DataSource {
    /// File on the local filesystem
    Path(PathBuf),

    /// Remote file to be fetched over HTTP(S)
    Url(Box<str>),
}
//
impl DataSource {
    /// Truth that the data is gzip-compressed, as told by its extension
    pub fn is_gzipped(&self) -> bool {
        match self {
            Self::Path(path) => path.extension().is_some_and(|ext| ext == "gz"),
            Self::Url(url) => url
                .split(['?', '#'])
                .next()
                .is_some_and(|path| path.ends_with(".gz")),
        }
    }
}
//
impl From<&str> for DataSource {
    fn from(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.into())
        } else {
            Self::Path(location.into())
        }
    }
}
//
impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_source_kind() {
        assert_eq!(
            DataSource::from("data/LG_preverbs.csv"),
            DataSource::Path("data/LG_preverbs.csv".into())
        );
        assert_eq!(
            DataSource::from("https://example.org/LG_preverbs.csv"),
            DataSource::Url("https://example.org/LG_preverbs.csv".into())
        );
    }

    #[test]
    fn gzip_detection() {
        assert!(DataSource::from("data/LG_preverbs.csv.gz").is_gzipped());
        assert!(DataSource::from("http://example.org/data.csv.gz?raw=1").is_gzipped());
        assert!(!DataSource::from("data/LG_preverbs.csv").is_gzipped());
        assert!(!DataSource::from("https://example.org/gz/data.csv").is_gzipped());
    }
}
