/// ## Tape instruction set
///
/// Every instruction is laid out as `[result][opcode][operands...]`. The
/// result cell is a zero placeholder immediately before the opcode cell and
/// is the only cell a formula writes. Operand cells hold tape addresses.
///
/// For example: `z: *(x, 2)` assembles to
/// `[0 <- z][MULTIPLY][&x][&lit][2.0 <- lit]`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum Opcode {
    /// `>dest(args...)`, operands `[dest, args...]`. Reserved; inert.
    Destination = 0x01,
    /// `*(a, b)`
    Multiply = 0x02,
    /// `+(a, b)`
    Add = 0x03,
    /// `value | stream`, operands `[value, 16 + stream id]`. Read only by
    /// snapshots.
    StreamWrite = 0x04,
    /// `lhs = rhs`, operands `[lhs, rhs]`. Copies the rhs word into lhs.
    Assign = 0x05,
    /// `&(a)`. Reserved; inert.
    Unary = 0x06,
    /// `^(a, b)`
    Power = 0x07,
    /// `<(a, b)` is `1.0` when a < b, else `-1.0`.
    LessThan = 0x08,
}

/// Stream operands are stored offset by this base.
pub const STREAM_BASE: u64 = 16;

impl Opcode {
    pub fn from_word(word: u64) -> Option<Opcode> {
        use Opcode::*;
        match word {
            0x01 => Some(Destination),
            0x02 => Some(Multiply),
            0x03 => Some(Add),
            0x04 => Some(StreamWrite),
            0x05 => Some(Assign),
            0x06 => Some(Unary),
            0x07 => Some(Power),
            0x08 => Some(LessThan),
            _ => None,
        }
    }

    /// Operand count, or `None` for the variadic destination marker.
    pub fn arity(self) -> Option<usize> {
        use Opcode::*;
        match self {
            Destination => None,
            Unary => Some(1),
            Multiply | Add | StreamWrite | Assign | Power | LessThan => Some(2),
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Destination => write!(f, "DESTINATION"),
            Multiply => write!(f, "MULTIPLY"),
            Add => write!(f, "ADD"),
            StreamWrite => write!(f, "STREAMWRITE"),
            Assign => write!(f, "ASSIGN"),
            Unary => write!(f, "UNARY"),
            Power => write!(f, "POWER"),
            LessThan => write!(f, "LESSTHAN"),
        }
    }
}
