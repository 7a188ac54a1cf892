use std::collections::HashMap;

pub type StreamId = usize;

/// Name of the stream that exists before any source is read.
pub const DEFAULT_STREAM: &str = "out";

/// ## Output stream registry
///
/// Ids are handed out in order of first use, starting with `out` as 0.

#[derive(Debug, Clone)]
pub struct Streams {
    names: Vec<String>,
    ids: HashMap<String, StreamId>,
}

impl Default for Streams {
    fn default() -> Streams {
        let mut streams = Streams {
            names: vec![],
            ids: HashMap::new(),
        };
        streams.register(DEFAULT_STREAM);
        streams
    }
}

impl Streams {
    pub fn new() -> Streams {
        Streams::default()
    }

    /// Id of `name`, registering it on first use.
    pub fn register(&mut self, name: &str) -> StreamId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    pub fn id(&self, name: &str) -> Option<StreamId> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: StreamId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
