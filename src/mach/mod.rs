/*!
## Rust Machine Module

This Rust module assembles source onto a tape and evaluates the tape
to a fixpoint.

*/

pub type Address = usize;

mod assemble;
mod cell;
mod opcode;
mod operation;
mod program;
mod snapshot;
mod stream;
mod tape;
mod val;
mod vm;

pub use assemble::assemble;
pub use cell::Cell;
pub use cell::Role;
pub use opcode::Opcode;
pub use opcode::STREAM_BASE;
pub use operation::Operation;
pub use program::Program;
pub use snapshot::Snapshot;
pub use snapshot::StreamSink;
pub use stream::StreamId;
pub use stream::Streams;
pub use stream::DEFAULT_STREAM;
pub use tape::Tape;
pub use val::Val;
pub use vm::Event;
pub use vm::State;
pub use vm::Vm;
