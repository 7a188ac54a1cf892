use std::sync::atomic::{AtomicU64, Ordering};

/// What a cell's word means to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Data,
    Op,
    StringStart,
}

/// ## One tape slot
///
/// The word is an integer (opcode, address, stream operand), a string byte,
/// or the bit pattern of an `f64`. Words are atomics so a scan may evaluate
/// cells from several threads at once; every access is relaxed and nothing
/// orders one cell against another.

#[derive(Debug)]
pub struct Cell {
    word: AtomicU64,
    role: Role,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell::new(0, Role::Data)
    }
}

impl Cell {
    pub fn new(word: u64, role: Role) -> Cell {
        Cell {
            word: AtomicU64::new(word),
            role,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn word(&self) -> u64 {
        self.word.load(Ordering::Relaxed)
    }

    pub fn number(&self) -> f64 {
        f64::from_bits(self.word())
    }

    /// Store `word`, reporting whether the cell held something else.
    pub fn swap(&self, word: u64) -> bool {
        self.word.swap(word, Ordering::Relaxed) != word
    }

    pub fn set_word(&mut self, word: u64) {
        *self.word.get_mut() = word;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_is_bit_pattern() {
        let c = Cell::new(2.5f64.to_bits(), Role::Data);
        assert_eq!(c.number(), 2.5);
        assert_eq!(c.word(), 2.5f64.to_bits());
    }

    #[test]
    fn test_swap_reports_change() {
        let c = Cell::default();
        assert!(!c.swap(0));
        assert!(c.swap(7));
        assert!(!c.swap(7));
        assert!(c.swap((-0.0f64).to_bits()));
    }
}
