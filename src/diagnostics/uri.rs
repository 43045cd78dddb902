// SPDX-License-Identifier: MPL-2.0
//! Image URI lookup for report headers.
//!
//! Only enough parsing to recognize the scheme of a request URI. Packaged
//! drawable references (`drawable://<id>`) are replaced by their resource
//! name so reports stay readable; anything else is printed as given.

use std::borrow::Cow;
use std::sync::Arc;

use crate::application::port::{NoResourceNames, ResourceNames};

/// Recognized image URI schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriScheme {
    Http,
    Https,
    /// `file://` or a bare absolute path.
    File,
    Content,
    Asset,
    Drawable,
}

impl UriScheme {
    const ALL: [UriScheme; 6] = [
        UriScheme::Http,
        UriScheme::Https,
        UriScheme::File,
        UriScheme::Content,
        UriScheme::Asset,
        UriScheme::Drawable,
    ];

    /// Scheme of `uri`, compared case-insensitively.
    #[must_use]
    pub fn of(uri: &str) -> Option<Self> {
        if uri.starts_with('/') {
            return Some(UriScheme::File);
        }
        Self::ALL.into_iter().find(|scheme| {
            let prefix = scheme.prefix();
            uri.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
    }

    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            UriScheme::Http => "http://",
            UriScheme::Https => "https://",
            UriScheme::File => "file://",
            UriScheme::Content => "content://",
            UriScheme::Asset => "asset://",
            UriScheme::Drawable => "drawable://",
        }
    }

    /// `uri` with this scheme's prefix removed.
    #[must_use]
    pub fn crop(self, uri: &str) -> &str {
        if self == UriScheme::File && uri.starts_with('/') {
            return uri;
        }
        uri.get(self.prefix().len()..).unwrap_or(uri)
    }
}

/// Turns request URIs into the subject printed in report headers.
#[derive(Clone)]
pub struct UriResolver {
    names: Arc<dyn ResourceNames>,
}

impl UriResolver {
    #[must_use]
    pub fn new(names: Arc<dyn ResourceNames>) -> Self {
        Self { names }
    }

    /// Resource name for drawable references, otherwise `uri` itself.
    ///
    /// Never fails: an unparsable id or an unknown resource falls back to
    /// the raw URI.
    #[must_use]
    pub fn resolve<'a>(&self, uri: &'a str) -> Cow<'a, str> {
        if UriScheme::of(uri) != Some(UriScheme::Drawable) {
            return Cow::Borrowed(uri);
        }
        let raw_id = UriScheme::Drawable.crop(uri);
        match raw_id.parse::<u32>().ok().and_then(|id| self.names.resource_name(id)) {
            Some(name) => Cow::Owned(name),
            None => {
                tracing::debug!(
                    target: "sketch_monitor::uri",
                    uri,
                    "drawable resource not resolvable, using raw uri"
                );
                Cow::Borrowed(uri)
            }
        }
    }
}

impl Default for UriResolver {
    fn default() -> Self {
        Self::new(Arc::new(NoResourceNames))
    }
}

impl std::fmt::Debug for UriResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UriResolver").finish_non_exhaustive()
    }
}
