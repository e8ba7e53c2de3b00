use std::io::{Read, Write};

use crate::error::ResourceResult;

/// A named piece of data that can be read.
///
/// Streams are scoped: they release the underlying handle when dropped.
pub trait Resource: Send + Sync {
    /// Open the resource for reading.
    ///
    /// Returns `Ok(None)` if the resource does not exist.
    /// Returns `Err` on any other I/O failure.
    fn read(&self) -> ResourceResult<Option<Box<dyn Read + Send>>>;

    /// Read the whole resource into memory.
    fn read_bytes(&self) -> ResourceResult<Option<Vec<u8>>> {
        let Some(mut reader) = self.read()? else {
            return Ok(None);
        };
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Some(data))
    }
}

/// A resource that can also be (over)written.
pub trait WritableResource: Resource {
    /// Open the resource for writing, replacing any previous content.
    fn write(&self) -> ResourceResult<Box<dyn Write + Send>>;

    /// Replace the resource content with `data`.
    fn write_bytes(&self, data: &[u8]) -> ResourceResult<()> {
        let mut writer = self.write()?;
        writer.write_all(data)?;
        writer.flush()?;
        Ok(())
    }
}

/// Locates resources by name relative to some base.
pub trait ResourceHandler: Send + Sync {
    fn locate(&self, name: &str) -> ResourceResult<Box<dyn Resource>>;
}

/// A [`ResourceHandler`] whose resources are writable.
pub trait WritableResourceHandler: ResourceHandler {
    fn locate_writable(&self, name: &str) -> ResourceResult<Box<dyn WritableResource>>;
}
