use super::{Address, Opcode, Tape};

/// ## Formula semantics
///
/// Each `step` evaluates one instruction in place and reports whether it
/// changed a cell. Operands are read through one level of indirection.
/// An operand that points past the tape leaves the instruction inert.

pub struct Operation {}

impl Operation {
    pub fn multiply(lhs: f64, rhs: f64) -> f64 {
        lhs * rhs
    }

    pub fn sum(lhs: f64, rhs: f64) -> f64 {
        lhs + rhs
    }

    pub fn power(lhs: f64, rhs: f64) -> f64 {
        lhs.powf(rhs)
    }

    pub fn less_than(lhs: f64, rhs: f64) -> f64 {
        if lhs < rhs {
            1.0
        } else {
            -1.0
        }
    }

    /// Evaluate the instruction whose opcode sits at `pc`.
    pub fn step(tape: &Tape, pc: Address) -> bool {
        let opcode = match tape.word(pc).and_then(Opcode::from_word) {
            Some(opcode) => opcode,
            None => return false,
        };
        use Opcode::*;
        let binary: fn(f64, f64) -> f64 = match opcode {
            Multiply => Operation::multiply,
            Add => Operation::sum,
            Power => Operation::power,
            LessThan => Operation::less_than,
            Assign => return Operation::assign(tape, pc),
            Destination | StreamWrite | Unary => return false,
        };
        let result = pc.wrapping_sub(1);
        let lhs = Operation::deref(tape, pc + 1).and_then(|a| tape.number(a));
        let rhs = Operation::deref(tape, pc + 2).and_then(|a| tape.number(a));
        match (lhs, rhs, tape.cell(result)) {
            (Some(l), Some(r), Some(cell)) => cell.swap(binary(l, r).to_bits()),
            _ => false,
        }
    }

    fn assign(tape: &Tape, pc: Address) -> bool {
        let word = Operation::deref(tape, pc + 2).and_then(|a| tape.word(a));
        let target = Operation::deref(tape, pc + 1).and_then(|a| tape.cell(a));
        match (word, target) {
            (Some(word), Some(cell)) => cell.swap(word),
            _ => false,
        }
    }

    fn deref(tape: &Tape, operand: Address) -> Option<Address> {
        tape.word(operand).map(|word| word as Address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::Role;

    fn binary(opcode: Opcode, a: f64, b: f64) -> f64 {
        let mut t = Tape::new(16);
        let x = t.push_number(a).unwrap();
        let y = t.push_number(b).unwrap();
        let result = t.push_number(0.0).unwrap();
        let pc = t.push_opcode(opcode).unwrap();
        t.push_address(x).unwrap();
        t.push_address(y).unwrap();
        Operation::step(&t, pc);
        t.number(result).unwrap()
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(binary(Opcode::Multiply, 2.0, 3.0), 6.0);
        assert_eq!(binary(Opcode::Add, 2.0, 3.0), 5.0);
        assert_eq!(binary(Opcode::Power, 2.0, 10.0), 1024.0);
        assert_eq!(binary(Opcode::LessThan, 3.0, 5.0), 1.0);
        assert_eq!(binary(Opcode::LessThan, 5.0, 3.0), -1.0);
        assert_eq!(binary(Opcode::LessThan, 4.0, 4.0), -1.0);
    }

    #[test]
    fn test_assign_copies_word() {
        let mut t = Tape::new(16);
        let dst = t.push_number(1.0).unwrap();
        let src = t.push_number(9.0).unwrap();
        t.push_number(0.0).unwrap();
        let pc = t.push_opcode(Opcode::Assign).unwrap();
        t.push_address(dst).unwrap();
        t.push_address(src).unwrap();
        assert!(Operation::step(&t, pc));
        assert_eq!(t.number(dst), Some(9.0));
        assert!(!Operation::step(&t, pc));
    }

    #[test]
    fn test_reserved_opcodes_are_inert() {
        let mut t = Tape::new(16);
        let x = t.push_number(3.0).unwrap();
        let result = t.push_number(0.0).unwrap();
        let pc = t.push_opcode(Opcode::Unary).unwrap();
        t.push_address(x).unwrap();
        assert!(!Operation::step(&t, pc));
        assert_eq!(t.word(result), Some(0));
        assert_eq!(t.role(pc), Some(Role::Op));
    }

    #[test]
    fn test_wild_operand_is_inert() {
        let mut t = Tape::new(8);
        t.push_number(0.0).unwrap();
        let pc = t.push_opcode(Opcode::Add).unwrap();
        t.push_address(1000).unwrap();
        t.push_address(1).unwrap();
        assert!(!Operation::step(&t, pc));
    }
}
