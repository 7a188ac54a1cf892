use super::{Address, Opcode, Program, Role, Streams, Tape, STREAM_BASE};
use crate::config::Config;
use crate::error;
use crate::lang::{lex, Column, Error, Lexeme, Literal, Operator, Symbols, Token};

type Result<T> = std::result::Result<T, Error>;

/// Assemble `source` onto a fresh tape in one left-to-right pass.
pub fn assemble(source: &str, config: &Config) -> Result<Program> {
    let lexemes = lex(source)?;
    Assembler::assemble(&lexemes, config)
}

/// An instruction operand before it is written to the tape.
#[derive(Debug, Clone)]
enum Operand {
    Location(Address),
    Number(f64),
    String(Vec<u8>),
    Raw(u64),
}

struct Assembler<'a> {
    lexemes: &'a [Lexeme],
    pos: usize,
    line: usize,
    col: Column,
    tape: Tape,
    symbols: Symbols,
    streams: Streams,
}

impl<'a> Assembler<'a> {
    fn assemble(lexemes: &'a [Lexeme], config: &Config) -> Result<Program> {
        let mut this = Assembler {
            lexemes,
            pos: 0,
            line: 1,
            col: 0..0,
            tape: Tape::new(config.capacity),
            symbols: Symbols::new(),
            streams: Streams::new(),
        };
        while this.peek().is_some() {
            if let Err(e) = this.statement() {
                return Err(e.in_line_number(Some(this.line)).in_column(&this.col));
            }
        }
        if let Err(e) = this.symbols.finish() {
            return Err(e.in_line_number(Some(this.line)));
        }
        log::info!(
            "assembled {} of {} cells, {} labels, {} streams",
            this.tape.cursor(),
            this.tape.capacity(),
            this.symbols.len(),
            this.streams.len()
        );
        Ok(Program::new(this.tape, this.symbols, this.streams))
    }

    fn peek(&self) -> Option<&'a Token> {
        self.lexemes.get(self.pos).map(|l| &l.token)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let lexeme = self.lexemes.get(self.pos)?;
        self.pos += 1;
        self.line = lexeme.line;
        self.col = lexeme.column.clone();
        Some(&lexeme.token)
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        match self.next() {
            Some(t) if *t == token => Ok(()),
            Some(t) => Err(error!(UnexpectedToken; format!("EXPECTED '{}', FOUND '{}'", token, t))),
            None => Err(error!(UnexpectedToken; format!("EXPECTED '{}' AT END", token))),
        }
    }

    fn unexpected(token: &Token, expected: &str) -> Error {
        error!(UnexpectedToken; format!("EXPECTED {}, FOUND '{}'", expected, token))
    }

    fn statement(&mut self) -> Result<()> {
        let token = match self.next() {
            Some(t) => t,
            None => return Ok(()),
        };
        match token {
            Token::Ident(name) => self.identifier(name, token.is_dotted()),
            Token::LBrace => {
                self.symbols.open_scope();
                Ok(())
            }
            Token::RBrace => self.symbols.close_scope(),
            Token::Operator(op) => self.operator(*op),
            Token::Backtick => {
                let value = self.value()?;
                self.emit(Opcode::StreamWrite, vec![value, Operand::Raw(STREAM_BASE)])
            }
            Token::Literal(lit) => {
                let operand = Assembler::literal(lit);
                if self.peek() == Some(&Token::Pipe) {
                    self.next();
                    self.stream_write(operand)
                } else {
                    self.materialize(operand).map(|_| ())
                }
            }
            _ => Err(Assembler::unexpected(token, "STATEMENT")),
        }
    }

    fn identifier(&mut self, name: &str, dotted: bool) -> Result<()> {
        let at = (self.line, self.col.clone());
        match self.peek() {
            Some(Token::LBrace) | Some(Token::Colon) if dotted => {
                Err(error!(UnexpectedToken; format!("DOTTED LABEL {}", name)))
            }
            Some(Token::LBrace) => {
                self.next();
                self.declare(name);
                self.symbols.open_scope();
                Ok(())
            }
            Some(Token::Colon) => {
                self.next();
                self.declare(name);
                Ok(())
            }
            Some(Token::ColonEquals) => {
                self.next();
                if dotted {
                    return Err(error!(InvalidRenameTarget; name.to_string()));
                }
                let location = match self.value()? {
                    Operand::Location(addr) => addr,
                    literal => self.materialize(literal)?,
                };
                log::debug!("alias {} -> {}", name, location);
                self.symbols.declare_alias(name, location);
                Ok(())
            }
            Some(Token::Equals) => {
                self.next();
                let lhs = self.resolve(name, &at)?;
                let rhs = self.value()?;
                self.emit(Opcode::Assign, vec![Operand::Location(lhs), rhs])
            }
            Some(Token::Pipe) => {
                self.next();
                let value = self.resolve(name, &at)?;
                self.stream_write(Operand::Location(value))
            }
            Some(token) => Err(Assembler::unexpected(token, "':', ':=', '=', '|' OR '{'")),
            None => Err(error!(UnexpectedToken; format!("DANGLING {}", name))),
        }
    }

    fn operator(&mut self, op: Operator) -> Result<()> {
        let opcode = match op {
            Operator::Multiply => Opcode::Multiply,
            Operator::Plus => Opcode::Add,
            Operator::Caret => Opcode::Power,
            Operator::Less => Opcode::LessThan,
            Operator::Ampersand => Opcode::Unary,
            Operator::Greater => return self.destination(),
        };
        let args = self.args()?;
        if let Some(arity) = opcode.arity() {
            if args.len() != arity {
                return Err(error!(ArityError;
                    format!("'{}' TAKES {}, FOUND {}", op, arity, args.len())));
            }
        }
        self.emit(opcode, args)
    }

    /// `>dest(args...)`
    fn destination(&mut self) -> Result<()> {
        let dest = match self.next() {
            Some(Token::Ident(name)) => {
                let at = (self.line, self.col.clone());
                self.resolve(name, &at)?
            }
            Some(token) => return Err(Assembler::unexpected(token, "DESTINATION")),
            None => return Err(error!(UnexpectedToken; "EXPECTED DESTINATION AT END")),
        };
        let mut operands = vec![Operand::Location(dest)];
        operands.append(&mut self.args()?);
        self.emit(Opcode::Destination, operands)
    }

    fn args(&mut self) -> Result<Vec<Operand>> {
        self.expect(Token::LParen)?;
        let mut v: Vec<Operand> = vec![];
        if self.peek() == Some(&Token::RParen) {
            self.next();
            return Ok(v);
        }
        loop {
            v.push(self.value()?);
            match self.next() {
                Some(Token::RParen) => return Ok(v),
                Some(Token::Comma) => continue,
                Some(token) => return Err(Assembler::unexpected(token, "',' OR ')'")),
                None => return Err(error!(UnexpectedToken; "UNCLOSED ARGUMENT LIST")),
            }
        }
    }

    /// An identifier, number or string in value position.
    fn value(&mut self) -> Result<Operand> {
        match self.next() {
            Some(Token::Ident(name)) => {
                let at = (self.line, self.col.clone());
                Ok(Operand::Location(self.resolve(name, &at)?))
            }
            Some(Token::Literal(lit)) => Ok(Assembler::literal(lit)),
            Some(token) => Err(Assembler::unexpected(token, "VALUE")),
            None => Err(error!(UnexpectedToken; "EXPECTED VALUE AT END")),
        }
    }

    fn literal(lit: &Literal) -> Operand {
        match lit {
            Literal::Number(n) => Operand::Number(*n),
            Literal::String(s) => Operand::String(s.clone()),
        }
    }

    fn stream_write(&mut self, value: Operand) -> Result<()> {
        let id = match self.next() {
            Some(token) if token.is_dotted() => {
                return Err(Assembler::unexpected(token, "STREAM NAME"))
            }
            Some(Token::Ident(name)) => self.streams.register(name),
            Some(token) => return Err(Assembler::unexpected(token, "STREAM NAME")),
            None => return Err(error!(UnexpectedToken; "EXPECTED STREAM NAME AT END")),
        };
        self.emit(
            Opcode::StreamWrite,
            vec![value, Operand::Raw(STREAM_BASE + id as u64)],
        )
    }

    fn resolve(&self, name: &str, at: &(usize, Column)) -> Result<Address> {
        self.symbols
            .resolve(name)
            .map_err(|e| e.in_line_number(Some(at.0)).in_column(&at.1))
    }

    fn declare(&mut self, name: &str) {
        let cursor = self.tape.cursor();
        log::debug!("label {} at {} depth {}", name, cursor, self.symbols.depth());
        self.symbols.declare(name, cursor);
    }

    /// Write a literal at the cursor under an anonymous label.
    fn materialize(&mut self, operand: Operand) -> Result<Address> {
        let addr = match operand {
            Operand::Number(n) => self.tape.push_number(n)?,
            Operand::String(s) => self.tape.push_string(&s)?,
            Operand::Location(addr) => return Ok(addr),
            Operand::Raw(word) => self.tape.push(word, Role::Data)?,
        };
        self.symbols.declare_anonymous(addr);
        Ok(addr)
    }

    /// Lay out `[result][opcode][operands...]`. Literal operands land after
    /// the instruction so the result cell stays the first cell written,
    /// which is the cell a preceding label names.
    fn emit(&mut self, opcode: Opcode, operands: Vec<Operand>) -> Result<()> {
        self.tape.push_number(0.0)?;
        let pc = self.tape.push_opcode(opcode)?;
        let mut pending: Vec<(Address, Operand)> = vec![];
        for operand in operands {
            match operand {
                Operand::Location(addr) => {
                    self.tape.push_address(addr)?;
                }
                Operand::Raw(word) => {
                    self.tape.push(word, Role::Data)?;
                }
                literal => {
                    let slot = self.tape.push_address(0)?;
                    pending.push((slot, literal));
                }
            }
        }
        for (slot, literal) in pending {
            let addr = self.materialize(literal)?;
            self.tape.patch(slot, addr as u64);
        }
        log::trace!("{} at {}", opcode, pc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn program(s: &str) -> Program {
        match assemble(s, &Config::default()) {
            Ok(p) => p,
            Err(e) => panic!("{}", e),
        }
    }

    fn error(s: &str) -> Error {
        assemble(s, &Config::default()).unwrap_err()
    }

    #[test]
    fn test_label_names_result_slot() {
        let p = program("x: 2 y: 3 z: *(x, y)");
        let z = p.resolve("z").unwrap();
        assert_eq!(p.tape().role(z), Some(Role::Data));
        assert_eq!(p.tape().role(z + 1), Some(Role::Op));
        assert_eq!(p.tape().word(z + 1), Some(Opcode::Multiply as u64));
        assert_eq!(p.tape().word(z + 2), Some(p.resolve("x").unwrap() as u64));
        assert_eq!(p.tape().word(z + 3), Some(p.resolve("y").unwrap() as u64));
    }

    #[test]
    fn test_literal_operands_follow_instruction() {
        let p = program("z: +(1, 2)");
        let t = p.tape();
        let z = p.resolve("z").unwrap();
        assert_eq!(z, 1);
        assert_eq!(t.word(3), Some(5));
        assert_eq!(t.word(4), Some(6));
        assert_eq!(t.number(5), Some(1.0));
        assert_eq!(t.number(6), Some(2.0));
        assert_eq!(t.cursor(), 7);
    }

    #[test]
    fn test_assign_layout() {
        let p = program("a: 1 b: 2 a = b");
        let t = p.tape();
        let ops = t.instructions();
        assert_eq!(ops.len(), 1);
        let pc = ops[0];
        assert_eq!(t.word(pc), Some(Opcode::Assign as u64));
        assert_eq!(t.word(pc - 1), Some(0));
        assert_eq!(t.word(pc + 1), Some(p.resolve("a").unwrap() as u64));
        assert_eq!(t.word(pc + 2), Some(p.resolve("b").unwrap() as u64));
    }

    #[test]
    fn test_stream_write_layout() {
        let p = program("\"hi\" | err x: 1 x | out `x");
        let t = p.tape();
        let ops = t.instructions();
        assert_eq!(ops.len(), 3);
        assert_eq!(t.word(ops[0] + 2), Some(STREAM_BASE + 1));
        assert_eq!(t.word(ops[1] + 2), Some(STREAM_BASE));
        assert_eq!(t.word(ops[2] + 2), Some(STREAM_BASE));
        assert_eq!(p.streams().id("err"), Some(1));
        let s = t.word(ops[0] + 1).unwrap() as Address;
        assert_eq!(t.role(s), Some(Role::StringStart));
    }

    #[test]
    fn test_rename_consumes_no_cell() {
        let p = program("a: 1 b := a");
        assert_eq!(p.resolve("b").unwrap(), p.resolve("a").unwrap());
        assert_eq!(p.tape().cursor(), 2);
        let p = program("c := 5");
        let c = p.resolve("c").unwrap();
        assert_eq!(p.tape().number(c), Some(5.0));
        assert!(p.symbols().labels()[0].is_anonymous());
    }

    #[test]
    fn test_raw_string_and_number() {
        let p = program("s: \"ab\" n: 7");
        let t = p.tape();
        let s = p.resolve("s").unwrap();
        assert_eq!(t.role(s), Some(Role::StringStart));
        assert_eq!(t.string_at(s), b"ab".to_vec());
        assert_eq!(t.number(p.resolve("n").unwrap()), Some(7.0));
    }

    #[test]
    fn test_reserved_forms_encode() {
        let p = program("v: 1 &(v) >v(1, 2)");
        let t = p.tape();
        let ops = t.instructions();
        assert_eq!(t.word(ops[0]), Some(Opcode::Unary as u64));
        assert_eq!(t.word(ops[1]), Some(Opcode::Destination as u64));
        assert_eq!(t.word(ops[1] + 1), Some(p.resolve("v").unwrap() as u64));
    }

    #[test]
    fn test_errors() {
        use ErrorCode::*;
        assert_eq!(error("y = 1").code(), UnresolvedSymbol);
        assert_eq!(error("b { q: 1 } q | out").code(), OutOfScope);
        assert_eq!(error("b { q: 1 } b.r | out").code(), UnknownMember);
        assert_eq!(error("b { q: 1 } b.q := 2").code(), InvalidRenameTarget);
        assert_eq!(error("*(1, 2, 3)").code(), ArityError);
        assert_eq!(error("&(1, 2)").code(), ArityError);
        assert_eq!(error("\"abc").code(), UnterminatedLiteral);
        assert_eq!(error("\"\\x\"").code(), UnknownEscape);
        assert_eq!(error("}").code(), ImbalancedScope);
        assert_eq!(error("b { q: 1").code(), UnclosedScope);
        assert_eq!(error("x: 1 x ;").code(), UnexpectedToken);
        assert_eq!(error("% 1").code(), UnexpectedToken);
        assert_eq!(error("1 | a.b").code(), UnexpectedToken);
    }

    #[test]
    fn test_error_location() {
        let e = error("x: 1\ny = x");
        assert_eq!(e.line_number(), Some(2));
        assert_eq!(e.column(), 0..1);
        assert_eq!(e.to_string(), "UNRESOLVED SYMBOL IN 2 (0..1); y");
    }

    #[test]
    fn test_tape_overflow() {
        let config = Config::default().with_capacity(4);
        let e = assemble("1 2 3 4", &config).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TapeOverflow);
    }
}
