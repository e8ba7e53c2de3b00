use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ResourceError, ResourceResult};
use crate::traits::{Resource, ResourceHandler};

/// A read-only resource addressed by an absolute URI.
///
/// Only `file:` URIs are readable; remote schemes are reported as
/// [`ResourceError::UnsupportedScheme`] when read.
#[derive(Clone, Debug)]
pub struct UriResource {
    uri: String,
}

impl UriResource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    fn file_path(&self) -> ResourceResult<PathBuf> {
        let (scheme, rest) = split_scheme(&self.uri)?;
        if !scheme.eq_ignore_ascii_case("file") {
            return Err(ResourceError::UnsupportedScheme(scheme.to_string()));
        }
        // file:///abs, file://localhost/abs and file:/abs all name /abs.
        let path = match rest.strip_prefix("//") {
            Some(authority_and_path) => {
                let slash = authority_and_path.find('/').unwrap_or(authority_and_path.len());
                let (host, path) = authority_and_path.split_at(slash);
                if !host.is_empty() && !host.eq_ignore_ascii_case("localhost") {
                    return Err(ResourceError::UnsupportedScheme(format!("file://{host}")));
                }
                path
            }
            None => rest,
        };
        Ok(PathBuf::from(percent_decode(path)?))
    }
}

impl Resource for UriResource {
    fn read(&self) -> ResourceResult<Option<Box<dyn Read + Send>>> {
        let path = self.file_path()?;
        debug!(uri = %self.uri, path = %path.display(), "opening URI resource");
        match File::open(&path) {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// The base of a URI hierarchy; names resolve relative to the base URI.
#[derive(Clone, Debug)]
pub struct UriResourceHandler {
    base: String,
}

impl UriResourceHandler {
    /// Create a handler rooted at `base`, which must be an absolute URI.
    pub fn new(base: impl Into<String>) -> ResourceResult<Self> {
        let base = base.into();
        split_scheme(&base)?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolve `name` against the base URI.
    ///
    /// A name that is itself an absolute URI is returned unchanged. Otherwise
    /// it replaces the last path segment of the base, so bases meant as
    /// directories need a trailing `/`.
    pub fn resolve(&self, name: &str) -> ResourceResult<String> {
        if name.is_empty() {
            return Err(ResourceError::InvalidName(name.to_string()));
        }
        if split_scheme(name).is_ok() {
            return Ok(name.to_string());
        }
        let base = self
            .base
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or(&self.base);
        let (scheme, rest) = split_scheme(base)?;
        if let Some(absolute) = name.strip_prefix('/') {
            let authority = rest
                .strip_prefix("//")
                .map(|a| &a[..a.find('/').unwrap_or(a.len())]);
            return Ok(match authority {
                Some(authority) => format!("{scheme}://{authority}/{absolute}"),
                None => format!("{scheme}:/{absolute}"),
            });
        }
        let directory = match base.rfind('/') {
            Some(idx) if idx > scheme.len() + 2 || !rest.starts_with("//") => &base[..=idx],
            _ => return Ok(format!("{base}/{name}")),
        };
        Ok(format!("{directory}{name}"))
    }
}

impl ResourceHandler for UriResourceHandler {
    fn locate(&self, name: &str) -> ResourceResult<Box<dyn Resource>> {
        Ok(Box::new(UriResource::new(self.resolve(name)?)))
    }
}

/// Split `scheme:rest`; the scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn split_scheme(uri: &str) -> ResourceResult<(&str, &str)> {
    let invalid = || ResourceError::InvalidUri(uri.to_string());
    let (scheme, rest) = uri.split_once(':').ok_or_else(invalid)?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid {
        return Err(invalid());
    }
    Ok((scheme, rest))
}

fn percent_decode(input: &str) -> ResourceResult<String> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input
                .get(i + 1..i + 3)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| ResourceError::InvalidUri(input.to_string()))?;
            decoded.push(hex);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).map_err(|_| ResourceError::InvalidUri(input.to_string()))
}
