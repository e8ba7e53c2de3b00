use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ResourceError, ResourceResult};
use crate::traits::{Resource, ResourceHandler, WritableResource, WritableResourceHandler};

/// A resource backed by a single filesystem path.
#[derive(Clone, Debug)]
pub struct PathResource {
    path: PathBuf,
}

impl PathResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for PathResource {
    fn read(&self) -> ResourceResult<Option<Box<dyn Read + Send>>> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl WritableResource for PathResource {
    fn write(&self) -> ResourceResult<Box<dyn Write + Send>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %self.path.display(), "opening resource for write");
        Ok(Box::new(File::create(&self.path)?))
    }
}

/// The base of a directory hierarchy; names resolve to paths below it.
#[derive(Clone, Debug)]
pub struct PathResourceHandler {
    base: PathBuf,
}

impl PathResourceHandler {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve `name` below the base directory.
    ///
    /// Absolute names and `..` components are rejected so a handler never
    /// reaches outside its base.
    pub fn resolve(&self, name: &str) -> ResourceResult<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || escapes {
            warn!(name, "rejecting resource name outside base");
            return Err(ResourceError::InvalidName(name.to_string()));
        }
        Ok(self.base.join(relative))
    }
}

impl ResourceHandler for PathResourceHandler {
    fn locate(&self, name: &str) -> ResourceResult<Box<dyn Resource>> {
        Ok(Box::new(PathResource::new(self.resolve(name)?)))
    }
}

impl WritableResourceHandler for PathResourceHandler {
    fn locate_writable(&self, name: &str) -> ResourceResult<Box<dyn WritableResource>> {
        Ok(Box::new(PathResource::new(self.resolve(name)?)))
    }
}
