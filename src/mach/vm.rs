use super::{Address, Operation, Snapshot, StreamSink, Streams, Tape};
use crate::config::Config;
use rayon::prelude::*;

/// Where a run stands after its latest scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Converged,
    BudgetExceeded,
    Interrupted,
}

impl State {
    pub fn is_finished(self) -> bool {
        self != State::Running
    }
}

/// What `Vm::execute` stopped for. Every event carries a snapshot taken
/// after the last complete scan.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Running(Snapshot),
    Converged(Snapshot),
    BudgetExceeded(Snapshot),
    Interrupted(Snapshot),
}

impl Event {
    pub fn state(&self) -> State {
        match self {
            Event::Running(_) => State::Running,
            Event::Converged(_) => State::Converged,
            Event::BudgetExceeded(_) => State::BudgetExceeded,
            Event::Interrupted(_) => State::Interrupted,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        match self {
            Event::Running(s)
            | Event::Converged(s)
            | Event::BudgetExceeded(s)
            | Event::Interrupted(s) => s,
        }
    }
}

/// ## Fixpoint evaluator
///
/// A scan evaluates every instruction on the tape once. Scans repeat until
/// one changes nothing or the budget runs out.
///
/// With `parallel` set, a scan fans out over the rayon pool with no locking.
/// One formula may read a cell that another is rewriting in the same scan,
/// so intermediate values depend on scheduling. Only the fixpoint is
/// defined, and acyclic programs reach the same one either way.

pub struct Vm<'a> {
    tape: &'a mut Tape,
    streams: &'a Streams,
    ops: Vec<Address>,
    budget: usize,
    cadence: usize,
    parallel: bool,
    scans: usize,
    state: State,
    interrupted: bool,
}

impl<'a> Vm<'a> {
    pub fn new(tape: &'a mut Tape, streams: &'a Streams, config: &Config) -> Vm<'a> {
        let ops = tape.instructions();
        let parallel = config.parallel && ops.len() >= config.parallel_threshold;
        log::debug!(
            "vm: {} instructions, budget {}, {}",
            ops.len(),
            config.budget,
            if parallel { "parallel" } else { "serial" }
        );
        Vm {
            tape,
            streams,
            ops,
            budget: config.budget,
            cadence: config.cadence.max(1),
            parallel,
            scans: 0,
            state: State::Running,
            interrupted: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Complete scans so far.
    pub fn scans(&self) -> usize {
        self.scans
    }

    pub fn tape(&self) -> &Tape {
        &*self.tape
    }

    pub fn streams(&self) -> &Streams {
        self.streams
    }

    /// Stop before the next scan.
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&*self.tape, &self.ops, self.scans)
    }

    /// One pass over every instruction. Returns whether any cell changed.
    pub fn scan(&mut self) -> bool {
        let tape: &Tape = &*self.tape;
        let dirty = if self.parallel {
            self.ops
                .par_iter()
                .map(|&pc| Operation::step(tape, pc))
                .reduce(|| false, |a, b| a || b)
        } else {
            self.ops
                .iter()
                .fold(false, |dirty, &pc| Operation::step(tape, pc) || dirty)
        };
        self.scans += 1;
        log::trace!("scan {}: {}", self.scans, if dirty { "dirty" } else { "clean" });
        dirty
    }

    /// Scan until the next snapshot is due or the run finishes.
    pub fn execute(&mut self) -> Event {
        if self.state.is_finished() {
            return self.event();
        }
        if self.interrupted {
            return self.finish(State::Interrupted);
        }
        loop {
            if self.scans >= self.budget {
                return self.finish(State::BudgetExceeded);
            }
            if !self.scan() {
                return self.finish(State::Converged);
            }
            if self.scans >= self.budget {
                return self.finish(State::BudgetExceeded);
            }
            if self.scans % self.cadence == 0 {
                log::debug!("scan {}: still changing", self.scans);
                return self.event();
            }
        }
    }

    /// Execute to the end, handing every snapshot to `sink`.
    pub fn run(&mut self, sink: &mut dyn StreamSink) -> State {
        loop {
            let event = self.execute();
            sink.snapshot(event.snapshot());
            if event.state().is_finished() {
                return event.state();
            }
        }
    }

    fn finish(&mut self, state: State) -> Event {
        self.state = state;
        match state {
            State::Converged => log::info!("converged after {} scans", self.scans),
            State::BudgetExceeded => log::warn!("no fixpoint within {} scans", self.scans),
            State::Interrupted => log::info!("interrupted after {} scans", self.scans),
            State::Running => {}
        }
        self.event()
    }

    fn event(&self) -> Event {
        let snapshot = self.snapshot();
        match self.state {
            State::Running => Event::Running(snapshot),
            State::Converged => Event::Converged(snapshot),
            State::BudgetExceeded => Event::BudgetExceeded(snapshot),
            State::Interrupted => Event::Interrupted(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::Opcode;

    /// `[0][ADD][&a][&b]` writing into `a + 2`.
    fn sum_tape() -> Tape {
        let mut t = Tape::new(16);
        let a = t.push_number(1.0).unwrap();
        let b = t.push_number(2.0).unwrap();
        t.push_number(0.0).unwrap();
        t.push_opcode(Opcode::Add).unwrap();
        t.push_address(a).unwrap();
        t.push_address(b).unwrap();
        t
    }

    #[test]
    fn test_scan_reports_changes() {
        let mut t = sum_tape();
        let streams = Streams::new();
        let config = Config::default().with_parallel(false);
        let mut vm = Vm::new(&mut t, &streams, &config);
        assert!(vm.scan());
        assert!(!vm.scan());
        assert_eq!(vm.scans(), 2);
        assert_eq!(vm.tape().number(3), Some(3.0));
    }

    #[test]
    fn test_parallel_scan() {
        let mut t = sum_tape();
        let streams = Streams::new();
        let config = Config::default().with_parallel_threshold(0);
        let mut vm = Vm::new(&mut t, &streams, &config);
        assert!(vm.scan());
        assert!(!vm.scan());
        assert_eq!(vm.tape().number(3), Some(3.0));
    }

    #[test]
    fn test_state_is_finished() {
        assert!(!State::Running.is_finished());
        assert!(State::Converged.is_finished());
        assert!(State::BudgetExceeded.is_finished());
        assert!(State::Interrupted.is_finished());
    }
}
