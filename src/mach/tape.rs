use super::{Address, Cell, Opcode, Role};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Fixed capacity cell array
///
/// Code and data share one address space. Cell 0 is a null cell that is
/// never handed out, so the write cursor starts at 1. Every cell past the
/// cursor stays a zero data cell.

#[derive(Debug)]
pub struct Tape {
    cells: Vec<Cell>,
    cursor: Address,
}

impl Tape {
    pub fn new(capacity: usize) -> Tape {
        let mut cells = Vec::with_capacity(capacity);
        cells.resize_with(capacity, Cell::default);
        Tape {
            cells,
            cursor: capacity.min(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Address of the next cell to be written.
    pub fn cursor(&self) -> Address {
        self.cursor
    }

    pub fn cell(&self, addr: Address) -> Option<&Cell> {
        self.cells.get(addr)
    }

    pub fn role(&self, addr: Address) -> Option<Role> {
        self.cell(addr).map(Cell::role)
    }

    pub fn word(&self, addr: Address) -> Option<u64> {
        self.cell(addr).map(Cell::word)
    }

    pub fn number(&self, addr: Address) -> Option<f64> {
        self.cell(addr).map(Cell::number)
    }

    pub fn push(&mut self, word: u64, role: Role) -> Result<Address> {
        let addr = self.cursor;
        match self.cells.get_mut(addr) {
            Some(cell) => {
                cell.set_word(word);
                cell.set_role(role);
            }
            None => {
                return Err(error!(TapeOverflow; format!("CAPACITY {}", self.capacity())));
            }
        }
        self.cursor += 1;
        Ok(addr)
    }

    pub fn push_number(&mut self, n: f64) -> Result<Address> {
        self.push(n.to_bits(), Role::Data)
    }

    pub fn push_address(&mut self, addr: Address) -> Result<Address> {
        self.push(addr as u64, Role::Data)
    }

    pub fn push_opcode(&mut self, opcode: Opcode) -> Result<Address> {
        self.push(opcode as u64, Role::Op)
    }

    /// One cell per byte, then a zero sentinel. The first cell is tagged
    /// as the string start; for `""` that is the sentinel itself.
    pub fn push_string(&mut self, bytes: &[u8]) -> Result<Address> {
        let start = self.cursor;
        for byte in bytes {
            self.push(u64::from(*byte), Role::Data)?;
        }
        self.push(0, Role::Data)?;
        self.cells[start].set_role(Role::StringStart);
        Ok(start)
    }

    /// Overwrite a cell written earlier during assembly.
    pub fn patch(&mut self, addr: Address, word: u64) {
        debug_assert!(addr < self.cursor);
        if let Some(cell) = self.cells.get_mut(addr) {
            cell.set_word(word);
        }
    }

    /// Store a number outside of execution, for example to change an
    /// input before running the program again.
    pub fn store_number(&mut self, addr: Address, n: f64) {
        if let Some(cell) = self.cells.get_mut(addr) {
            cell.set_word(n.to_bits());
        }
    }

    /// Bytes of the string starting at `addr`, up to the zero sentinel.
    /// Each word is truncated to its low byte, so a string cell that was
    /// overwritten with a number reads back as whatever that byte is.
    pub fn string_at(&self, addr: Address) -> Vec<u8> {
        self.cells
            .get(addr..)
            .unwrap_or_default()
            .iter()
            .map(Cell::word)
            .take_while(|word| *word != 0)
            .map(|word| word as u8)
            .collect()
    }

    /// Addresses of every opcode cell below the cursor, in tape order.
    pub fn instructions(&self) -> Vec<Address> {
        self.cells[..self.cursor]
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.role() == Role::Op)
            .map(|(addr, _)| addr)
            .collect()
    }
}
