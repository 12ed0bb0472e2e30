use anyhow::{Context, Result};
use clap::Args;
use hanoi::{config::Config, host};
use hanoi_core::{Command, Control, Simulation, Tick, input, motion::MotionEvent};
use rustyline::{DefaultEditor, error::ReadlineError};
use std::{
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
    thread,
    time::{Duration, Instant},
};

const IDLE_SLEEP: Duration = Duration::from_millis(1);

#[derive(Args)]
pub struct PlayArgs {
    /// Path to a configuration file (TOML or JSON).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the number of discs.
    #[arg(long, short = 'n')]
    pub discs: Option<usize>,
}

enum Input {
    Command(Command),
    Failed(ReadlineError),
    Closed,
}

impl PlayArgs {
    pub fn run(&self) -> Result<()> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(discs) = self.discs {
            config.simulation.discs = discs;
        }
        config.validate()?;

        let mut sim =
            Simulation::new(config.simulation_config()).context("failed to set up board")?;

        let (tx, rx) = mpsc::channel();
        let reader = thread::Builder::new()
            .name("hanoi-input".into())
            .spawn(move || read_commands(tx))
            .context("failed to spawn input thread")?;

        println!("{}", input::help_text());
        println!("{}", sim.board_summary());
        let result = drive(&mut sim, &rx);

        // The reader stops on its own after a quit key, an error or end of input.
        if reader.join().is_err() {
            tracing::warn!("input thread panicked");
        }
        result
    }
}

fn drive(sim: &mut Simulation, rx: &Receiver<Input>) -> Result<()> {
    let epoch = Instant::now();
    loop {
        loop {
            match rx.try_recv() {
                Ok(Input::Command(command)) => match sim.handle(command) {
                    Control::Continue => {}
                    Control::ShowHelp => println!("{}", input::help_text()),
                    Control::Quit => return Ok(()),
                },
                Ok(Input::Failed(err)) => return Err(err).context("failed to read input"),
                Ok(Input::Closed) | Err(TryRecvError::Disconnected) => return Ok(()),
                Err(TryRecvError::Empty) => break,
            }
        }

        let was_solving = sim.is_solving();
        match sim.poll(epoch.elapsed()) {
            Tick::Advanced(event) => {
                if let Some(MotionEvent::Started { mv, .. }) = event {
                    println!("{mv}");
                }
                host::log_event(event);
                if was_solving && !sim.is_solving() {
                    println!("{}", sim.board_summary());
                }
            }
            Tick::Throttled | Tick::Dormant => thread::sleep(IDLE_SLEEP),
        }
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("hanoi").join("history.txt"))
}

/// Read key lines from the terminal and forward each recognised key.
fn read_commands(tx: Sender<Input>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            let _ = tx.send(Input::Failed(err));
            return;
        }
    };
    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                let mut quit = false;
                for key in line.chars().filter(|c| !c.is_whitespace()) {
                    match Command::from_key(key) {
                        Some(command) => {
                            quit |= command == Command::Quit;
                            if tx.send(Input::Command(command)).is_err() {
                                return;
                            }
                        }
                        None => println!("unknown key {key:?}, press h for help"),
                    }
                }
                if quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                let _ = tx.send(Input::Failed(err));
                return;
            }
        }
    }

    if let Some(path) = &history {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Err(err) = editor.save_history(path) {
            tracing::debug!(%err, "failed to save history");
        }
    }
    let _ = tx.send(Input::Closed);
}
