use super::{Address, Opcode, Role, StreamId, Tape, Val, STREAM_BASE};
use std::collections::BTreeMap;

/// ## Rendered stream contents between two scans
///
/// Every stream write on the tape contributes its current value, in tape
/// order, to the list of its stream. A value whose cell starts a string
/// renders as text; anything else renders as a number.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    scans: usize,
    streams: BTreeMap<StreamId, Vec<Val>>,
}

/// Receives snapshots while a program runs.
pub trait StreamSink {
    fn snapshot(&mut self, snapshot: &Snapshot);
}

impl StreamSink for Vec<Snapshot> {
    fn snapshot(&mut self, snapshot: &Snapshot) {
        self.push(snapshot.clone());
    }
}

impl Snapshot {
    /// Walk the instructions at `ops` and render every stream write.
    pub fn capture(tape: &Tape, ops: &[Address], scans: usize) -> Snapshot {
        let mut streams: BTreeMap<StreamId, Vec<Val>> = BTreeMap::new();
        for &pc in ops {
            if tape.word(pc).and_then(Opcode::from_word) != Some(Opcode::StreamWrite) {
                continue;
            }
            let value = tape.word(pc + 1).map(|word| word as Address);
            let id = tape
                .word(pc + 2)
                .and_then(|word| word.checked_sub(STREAM_BASE))
                .map(|id| id as StreamId);
            if let (Some(value), Some(id)) = (value, id) {
                if let Some(val) = Snapshot::render(tape, value) {
                    streams.entry(id).or_default().push(val);
                }
            }
        }
        Snapshot { scans, streams }
    }

    fn render(tape: &Tape, addr: Address) -> Option<Val> {
        match tape.role(addr)? {
            Role::StringStart => Some(Val::Text(
                String::from_utf8_lossy(&tape.string_at(addr)).into_owned(),
            )),
            Role::Data | Role::Op => tape.number(addr).map(Val::Number),
        }
    }

    /// Number of complete scans behind this snapshot.
    pub fn scans(&self) -> usize {
        self.scans
    }

    pub fn streams(&self) -> &BTreeMap<StreamId, Vec<Val>> {
        &self.streams
    }

    pub fn stream(&self, id: StreamId) -> &[Val] {
        self.streams.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// The values of one stream, one per line.
    pub fn text(&self, id: StreamId) -> String {
        self.stream(id)
            .iter()
            .map(|val| val.to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }
}
