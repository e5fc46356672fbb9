//! Optional brand logo.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Relative location of the logo under the base directory.
pub const LOGO_FILE: &str = "static/logo.png";

/// URL the logo is served under by the static file route.
pub const LOGO_URL: &str = "/static/logo.png";

#[derive(Clone, Debug)]
pub struct LogoAsset {
    path: PathBuf,
    url: String,
}

/// Outcome of a single existence check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogoState {
    Present { url: String },
    Absent,
}

impl LogoAsset {
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }

    /// The logo at its standard location under `base_dir`.
    pub fn under(base_dir: &Path) -> Self {
        Self::new(base_dir.join(LOGO_FILE), LOGO_URL)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check the file once. Anything that is not a readable regular file
    /// counts as absent.
    pub fn resolve(&self) -> LogoState {
        match std::fs::metadata(&self.path) {
            Ok(meta) if meta.is_file() => LogoState::Present {
                url: self.url.clone(),
            },
            Ok(_) => {
                debug!("Logo path {} is not a file", self.path.display());
                LogoState::Absent
            }
            Err(e) => {
                debug!("No logo at {}: {}", self.path.display(), e);
                LogoState::Absent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_until_written() {
        let dir = tempfile::tempdir().unwrap();
        let logo = LogoAsset::under(dir.path());
        assert_eq!(logo.resolve(), LogoState::Absent);

        std::fs::create_dir_all(dir.path().join("static")).unwrap();
        std::fs::write(logo.path(), b"\x89PNG\r\n\x1a\n").unwrap();
        assert_eq!(
            logo.resolve(),
            LogoState::Present {
                url: LOGO_URL.to_string()
            }
        );
    }

    #[test]
    fn directory_is_not_a_logo() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(LOGO_FILE)).unwrap();
        assert_eq!(LogoAsset::under(dir.path()).resolve(), LogoState::Absent);
    }
}
