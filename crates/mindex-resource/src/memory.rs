use std::collections::HashMap;
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, RwLock};

use crate::error::ResourceResult;
use crate::traits::{Resource, ResourceHandler, WritableResource, WritableResourceHandler};

type Buffers = Arc<RwLock<HashMap<String, Vec<u8>>>>;

/// In-memory, HashMap-based resource handler.
///
/// Intended for tests and embedding. Written content becomes visible when
/// the writer is flushed or dropped.
#[derive(Clone, Default)]
pub struct InMemoryResourceHandler {
    buffers: Buffers,
}

impl InMemoryResourceHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `name`, replacing any previous content.
    pub fn insert(&self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.buffers
            .write()
            .expect("lock poisoned")
            .insert(name.into(), data.into());
    }

    /// Content stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.buffers.read().expect("lock poisoned").get(name).cloned()
    }

    /// Sorted list of all stored names.
    pub fn names(&self) -> Vec<String> {
        let map = self.buffers.read().expect("lock poisoned");
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.buffers.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.read().expect("lock poisoned").is_empty()
    }

    fn resource(&self, name: &str) -> MemoryResource {
        MemoryResource {
            name: name.to_string(),
            buffers: Arc::clone(&self.buffers),
        }
    }
}

impl ResourceHandler for InMemoryResourceHandler {
    fn locate(&self, name: &str) -> ResourceResult<Box<dyn Resource>> {
        Ok(Box::new(self.resource(name)))
    }
}

impl WritableResourceHandler for InMemoryResourceHandler {
    fn locate_writable(&self, name: &str) -> ResourceResult<Box<dyn WritableResource>> {
        Ok(Box::new(self.resource(name)))
    }
}

struct MemoryResource {
    name: String,
    buffers: Buffers,
}

impl Resource for MemoryResource {
    fn read(&self) -> ResourceResult<Option<Box<dyn Read + Send>>> {
        let map = self.buffers.read().expect("lock poisoned");
        Ok(map
            .get(&self.name)
            .map(|data| Box::new(Cursor::new(data.clone())) as Box<dyn Read + Send>))
    }
}

impl WritableResource for MemoryResource {
    fn write(&self) -> ResourceResult<Box<dyn Write + Send>> {
        Ok(Box::new(MemoryWriter {
            name: self.name.clone(),
            buffer: Vec::new(),
            buffers: Arc::clone(&self.buffers),
        }))
    }
}

struct MemoryWriter {
    name: String,
    buffer: Vec<u8>,
    buffers: Buffers,
}

impl MemoryWriter {
    fn commit(&self) {
        self.buffers
            .write()
            .expect("lock poisoned")
            .insert(self.name.clone(), self.buffer.clone());
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.commit();
        Ok(())
    }
}

impl Drop for MemoryWriter {
    fn drop(&mut self) {
        self.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reads_as_none() {
        let handler = InMemoryResourceHandler::new();
        assert!(handler.locate("x").unwrap().read().unwrap().is_none());
        assert!(handler.is_empty());
    }

    #[test]
    fn insert_then_read() {
        let handler = InMemoryResourceHandler::new();
        handler.insert("a", b"alpha".to_vec());
        let data = handler.locate("a").unwrap().read_bytes().unwrap();
        assert_eq!(data.as_deref(), Some(&b"alpha"[..]));
    }

    #[test]
    fn writer_commits_on_drop() {
        let handler = InMemoryResourceHandler::new();
        {
            let resource = handler.locate_writable("out").unwrap();
            let mut writer = resource.write().unwrap();
            writer.write_all(b"partial").unwrap();
            assert!(handler.get("out").is_none());
        }
        assert_eq!(handler.get("out").unwrap(), b"partial");
    }

    #[test]
    fn write_bytes_replaces_content() {
        let handler = InMemoryResourceHandler::new();
        let resource = handler.locate_writable("props").unwrap();
        resource.write_bytes(b"first").unwrap();
        resource.write_bytes(b"2nd").unwrap();
        assert_eq!(handler.get("props").unwrap(), b"2nd");
        assert_eq!(handler.len(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let handler = InMemoryResourceHandler::new();
        handler.insert("b", vec![]);
        handler.insert("a", vec![]);
        assert_eq!(handler.names(), vec!["a", "b"]);
    }

    #[test]
    fn clones_share_storage() {
        let handler = InMemoryResourceHandler::new();
        let other = handler.clone();
        other.insert("shared", b"x".to_vec());
        assert!(handler.get("shared").is_some());
    }
}
