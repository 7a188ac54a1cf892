use super::{assemble, Address, Streams, Tape, Vm};
use crate::config::Config;
use crate::lang::{Error, Symbols};

/// ## An assembled program
///
/// Owns the tape together with the label history and stream registry that
/// produced it. The tape outlives any number of evaluator runs, so a host
/// can change an input cell and run again from the values left behind.

#[derive(Debug)]
pub struct Program {
    tape: Tape,
    symbols: Symbols,
    streams: Streams,
}

impl Program {
    pub fn new(tape: Tape, symbols: Symbols, streams: Streams) -> Program {
        Program {
            tape,
            symbols,
            streams,
        }
    }

    pub fn assemble(source: &str, config: &Config) -> Result<Program, Error> {
        assemble(source, config)
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    pub fn symbols(&self) -> &Symbols {
        &self.symbols
    }

    pub fn streams(&self) -> &Streams {
        &self.streams
    }

    /// Resolve a name or dotted path as it would be at the end of the source.
    pub fn resolve(&self, name: &str) -> Result<Address, Error> {
        self.symbols.resolve(name)
    }

    /// Current number stored under `name`.
    pub fn number(&self, name: &str) -> Option<f64> {
        let addr = self.resolve(name).ok()?;
        self.tape.number(addr)
    }

    pub fn vm(&mut self, config: &Config) -> Vm<'_> {
        Vm::new(&mut self.tape, &self.streams, config)
    }
}
