#![allow(dead_code)]
use gotope::config::Config;
use gotope::mach::{Program, Snapshot, State};

pub fn serial() -> Config {
    Config::default().with_parallel(false)
}

pub fn assemble(source: &str) -> Program {
    assemble_with(source, &serial())
}

pub fn assemble_with(source: &str, config: &Config) -> Program {
    match Program::assemble(source, config) {
        Ok(program) => program,
        Err(error) => panic!("{}", error),
    }
}

/// Run to the end and return the final state and every snapshot taken.
pub fn run(program: &mut Program, config: &Config) -> (State, Vec<Snapshot>) {
    let mut snapshots: Vec<Snapshot> = vec![];
    let state = program.vm(config).run(&mut snapshots);
    (state, snapshots)
}

/// Run `source` serially and return the text of one stream.
pub fn exec(source: &str, stream: &str) -> String {
    let config = serial();
    let mut program = assemble_with(source, &config);
    let (_, snapshots) = run(&mut program, &config);
    let last = snapshots.last().cloned().unwrap_or_default();
    match program.streams().id(stream) {
        Some(id) => last.text(id),
        None => String::new(),
    }
}
