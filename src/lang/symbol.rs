use super::Error;
use crate::error;
use crate::mach::Address;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

/// A named tape location, tagged with the number of scopes that were
/// open when it was declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    pub location: Address,
    pub depth: usize,
}

impl Label {
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

/// ## Label history
///
/// Labels are appended in declaration order and never removed. Closing a
/// scope only lowers the current depth, which hides deeper labels from
/// plain lookups while leaving them in place for dotted member paths.
/// A block is a namespace because its members follow its own label in
/// the history at a greater depth.

#[derive(Debug, Default)]
pub struct Symbols {
    labels: Vec<Label>,
    latest: HashMap<String, usize>,
    depth: usize,
}

impl Symbols {
    pub fn new() -> Symbols {
        Symbols::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Name the cell at `cursor`, the next cell the tape will hand out.
    pub fn declare(&mut self, name: &str, cursor: Address) {
        self.push(name, cursor)
    }

    /// Give an existing location another name. No cell is consumed.
    pub fn declare_alias(&mut self, name: &str, location: Address) {
        self.push(name, location)
    }

    /// Record a materialized literal. Anonymous labels never resolve.
    pub fn declare_anonymous(&mut self, location: Address) {
        self.push("", location)
    }

    fn push(&mut self, name: &str, location: Address) {
        if !name.is_empty() {
            self.latest.insert(name.to_string(), self.labels.len());
        }
        self.labels.push(Label {
            name: name.to_string(),
            location,
            depth: self.depth,
        });
    }

    pub fn open_scope(&mut self) {
        self.depth += 1;
    }

    pub fn close_scope(&mut self) -> Result<()> {
        match self.depth.checked_sub(1) {
            Some(depth) => {
                self.depth = depth;
                Ok(())
            }
            None => Err(error!(ImbalancedScope; "'}' WITHOUT '{'")),
        }
    }

    /// End of input; every scope must be closed.
    pub fn finish(&self) -> Result<()> {
        if self.depth != 0 {
            return Err(error!(UnclosedScope; format!("{} OPEN", self.depth)));
        }
        Ok(())
    }

    pub fn resolve(&self, token: &str) -> Result<Address> {
        let mut parts = token.split('.');
        let base = parts.next().unwrap_or_default();
        let mut anchor = self.lookup(base)?;
        for (offset, part) in parts.enumerate() {
            anchor = self.member(anchor, part, offset + 1).ok_or_else(|| {
                let owner = &self.labels[anchor].name;
                error!(UnknownMember; format!("{} HAS NO {}", owner, part))
            })?;
        }
        Ok(self.labels[anchor].location)
    }

    /// Index of the most recent label called `name` that is visible at
    /// the current depth.
    fn lookup(&self, name: &str) -> Result<usize> {
        let latest = match self.latest.get(name) {
            Some(&index) => index,
            None => return Err(error!(UnresolvedSymbol; name.to_string())),
        };
        if self.labels[latest].depth <= self.depth {
            return Ok(latest);
        }
        self.labels[..latest]
            .iter()
            .rposition(|label| label.name == name && label.depth <= self.depth)
            .ok_or_else(|| error!(OutOfScope; name.to_string()))
    }

    /// Scan forward from `anchor` for the first label called `part`, the
    /// `offset`th part of a dotted path. The scan gives up once a label is
    /// shallower than `depth + offset - 1`, the history having left the
    /// block that would hold the member.
    fn member(&self, anchor: usize, part: &str, offset: usize) -> Option<usize> {
        let floor = self.depth + offset - 1;
        for (index, label) in self.labels.iter().enumerate().skip(anchor + 1) {
            if label.depth < floor {
                return None;
            }
            if !label.is_anonymous() && label.name == part {
                return Some(index);
            }
        }
        None
    }
}
