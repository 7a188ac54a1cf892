use ansi_term::Style;
use gotope::config::Config;
use gotope::mach::{Event, Program, Snapshot, State, Streams};
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const CLEAR: &str = "\x1b[2J";
const HOME: &str = "\x1b[H";
const CLEAR_BELOW: &str = "\x1b[J";

/// Assemble and run one program, redrawing the routed streams at every
/// snapshot. Returns the process exit code.
pub fn main(path: Option<&str>) -> i32 {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        log::warn!("no Ctrl-C handler: {}", error);
    }
    let source = match read_source(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            return 1;
        }
    };
    let config = Config::from_env();
    let mut program = match Program::assemble(&source, &config) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            return 1;
        }
    };
    match main_loop(&mut program, &config, interrupted) {
        Ok(_) => 0,
        Err(error) => {
            eprintln!("{}", error);
            1
        }
    }
}

fn read_source(path: Option<&str>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn main_loop(
    program: &mut Program,
    config: &Config,
    interrupted: Arc<AtomicBool>,
) -> std::io::Result<State> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", CLEAR)?;
    let mut vm = program.vm(config);
    loop {
        if interrupted.load(Ordering::SeqCst) {
            vm.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        }
        let event = vm.execute();
        draw(&mut out, &event, vm.streams(), &config.routes)?;
        if let Event::Running(_) = event {
            continue;
        }
        return Ok(event.state());
    }
}

fn draw(
    out: &mut dyn Write,
    event: &Event,
    streams: &Streams,
    routes: &[String],
) -> std::io::Result<()> {
    let snapshot = event.snapshot();
    let line = format!(
        "{:<16}{}  {} scans",
        status(event.state()),
        chrono::Local::now().format("%H:%M:%S"),
        snapshot.scans()
    );
    writeln!(out, "{}{}", HOME, Style::new().bold().paint(line))?;
    for route in routes {
        match streams.id(route) {
            Some(id) => write!(out, "{}", render(snapshot, id))?,
            None => log::debug!("stream {} never written", route),
        }
    }
    write!(out, "{}", CLEAR_BELOW)?;
    out.flush()
}

fn render(snapshot: &Snapshot, id: usize) -> String {
    snapshot
        .stream(id)
        .iter()
        .map(|val| format!("{}\n", val))
        .collect()
}

fn status(state: State) -> &'static str {
    match state {
        State::Running => "RUNNING",
        State::Converged => "CONVERGED",
        State::BudgetExceeded => "BUDGET EXCEEDED",
        State::Interrupted => "INTERRUPTED",
    }
}
