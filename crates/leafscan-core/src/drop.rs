//! The drag-and-drop contract.
//!
//! A file source (the desktop drop zone, a hidden file input, a path on the
//! command line) hands its candidate files to [`DropConfig::offer`]. The
//! config filters them by MIME type and notifies `on_accept` with at most one
//! file. Widgets only ever see files that passed the filter.

use std::fmt;
use std::str::FromStr;

use crate::error::LeafscanError;
use crate::types::SelectedFile;

/// Accept pattern used by the upload widget.
pub const IMAGE_ACCEPT: &str = "image/*";

/// A parsed `accept` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeFilter {
    /// `*/*`
    Any,
    /// `image/*`
    TopLevel(String),
    /// `image/png`
    Exact(String),
}

impl MimeFilter {
    /// Whether `mime` satisfies this filter. Parameters such as
    /// `; charset=...` are ignored and comparison is case-insensitive.
    pub fn matches(&self, mime: &str) -> bool {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let Some((top, sub)) = essence.split_once('/') else {
            return false;
        };
        if top.is_empty() || sub.is_empty() {
            return false;
        }
        match self {
            MimeFilter::Any => true,
            MimeFilter::TopLevel(t) => top == t,
            MimeFilter::Exact(e) => essence == *e,
        }
    }
}

impl Default for MimeFilter {
    fn default() -> Self {
        MimeFilter::TopLevel("image".to_string())
    }
}

impl FromStr for MimeFilter {
    type Err = LeafscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.split_once('/') {
            Some(("*", "*")) => Ok(MimeFilter::Any),
            Some((top, "*")) if !top.is_empty() && top != "*" => {
                Ok(MimeFilter::TopLevel(top.to_string()))
            }
            Some((top, sub)) if !top.is_empty() && !sub.is_empty() && top != "*" && sub != "*" => {
                Ok(MimeFilter::Exact(s.clone()))
            }
            _ => Err(LeafscanError::Config(format!("invalid accept pattern: {s}"))),
        }
    }
}

impl fmt::Display for MimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MimeFilter::Any => write!(f, "*/*"),
            MimeFilter::TopLevel(t) => write!(f, "{}/*", t),
            MimeFilter::Exact(e) => write!(f, "{}", e),
        }
    }
}

/// Why an offer did not reach `on_accept`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing was offered
    Empty,
    /// More than one file in a single drop. The whole drop is refused rather
    /// than taking the first matching file.
    TooMany(usize),
    /// File type did not match `accept`
    WrongType { name: String, mime: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Empty => write!(f, "no file offered"),
            Rejection::TooMany(n) => write!(f, "{} files offered, expected one", n),
            Rejection::WrongType { name, mime } => write!(f, "{} is {}, not an image", name, mime),
        }
    }
}

impl From<Rejection> for LeafscanError {
    fn from(r: Rejection) -> Self {
        LeafscanError::Rejected(r.to_string())
    }
}

/// Configuration a file source is driven with: `{accept, on_accept}`.
pub struct DropConfig<F>
where
    F: FnMut(SelectedFile),
{
    pub accept: MimeFilter,
    pub on_accept: F,
}

impl<F> DropConfig<F>
where
    F: FnMut(SelectedFile),
{
    pub fn new(accept: MimeFilter, on_accept: F) -> Self {
        Self { accept, on_accept }
    }

    /// Offer the files from one drop or picker interaction.
    ///
    /// `on_accept` runs exactly once when a single matching file is offered,
    /// and never otherwise.
    pub fn offer(&mut self, mut files: Vec<SelectedFile>) -> Result<(), Rejection> {
        let file = match files.len() {
            0 => {
                tracing::debug!("Empty drop ignored");
                return Err(Rejection::Empty);
            }
            1 => files.remove(0),
            n => {
                tracing::warn!(count = n, "Multiple files dropped, ignoring");
                return Err(Rejection::TooMany(n));
            }
        };

        if !self.accept.matches(file.mime()) {
            tracing::warn!(
                name = file.name(),
                mime = file.mime(),
                accept = %self.accept,
                "Dropped file rejected"
            );
            return Err(Rejection::WrongType {
                name: file.name().to_string(),
                mime: file.mime().to_string(),
            });
        }

        tracing::debug!(name = file.name(), mime = file.mime(), "File accepted");
        (self.on_accept)(file);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", vec![1, 2, 3])
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("image/*".parse::<MimeFilter>().unwrap(), MimeFilter::default());
        assert_eq!("*/*".parse::<MimeFilter>().unwrap(), MimeFilter::Any);
        assert_eq!(
            "Image/PNG".parse::<MimeFilter>().unwrap(),
            MimeFilter::Exact("image/png".into())
        );
        assert!("image".parse::<MimeFilter>().is_err());
        assert!("*/png".parse::<MimeFilter>().is_err());
        assert!("".parse::<MimeFilter>().is_err());
    }

    #[test]
    fn test_filter_display_roundtrip() {
        for pattern in ["*/*", "image/*", "image/jpeg"] {
            assert_eq!(pattern.parse::<MimeFilter>().unwrap().to_string(), pattern);
        }
    }

    #[test]
    fn test_image_filter_matches() {
        let filter = MimeFilter::default();
        assert!(filter.matches("image/png"));
        assert!(filter.matches("IMAGE/JPEG"));
        assert!(filter.matches("image/svg+xml; charset=utf-8"));
        assert!(!filter.matches("application/pdf"));
        assert!(!filter.matches("text/plain"));
        assert!(!filter.matches("image"));
        assert!(!filter.matches("image/"));
        assert!(!filter.matches(""));
    }

    #[test]
    fn test_exact_filter_matches() {
        let filter = MimeFilter::Exact("image/png".into());
        assert!(filter.matches("image/png"));
        assert!(!filter.matches("image/jpeg"));
    }

    #[test]
    fn test_offer_single_image_notifies_once() {
        let mut accepted = Vec::new();
        let mut config = DropConfig::new(MimeFilter::default(), |f| accepted.push(f));

        config.offer(vec![png("leaf.png")]).unwrap();
        drop(config);

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name(), "leaf.png");
    }

    #[test]
    fn test_offer_non_image_never_notifies() {
        let mut calls = 0;
        let mut config = DropConfig::new(MimeFilter::default(), |_| calls += 1);

        let pdf = SelectedFile::new("report.pdf", "application/pdf", vec![0x25]);
        let err = config.offer(vec![pdf]).unwrap_err();
        drop(config);

        assert!(matches!(err, Rejection::WrongType { .. }));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_offer_empty_and_multiple_rejected() {
        let mut calls = 0;
        let mut config = DropConfig::new(MimeFilter::default(), |_| calls += 1);

        assert_eq!(config.offer(vec![]), Err(Rejection::Empty));
        assert_eq!(
            config.offer(vec![png("a.png"), png("b.png")]),
            Err(Rejection::TooMany(2))
        );
        drop(config);

        assert_eq!(calls, 0);
    }

    #[test]
    fn test_rejection_converts_to_error() {
        let err: LeafscanError = Rejection::TooMany(3).into();
        assert_eq!(err.to_string(), "File rejected: 3 files offered, expected one");
    }
}
