//! Key bindings.

const ESCAPE: char = '\u{1b}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Solve from the initial state.
    Solve,
    SpeedUp,
    SlowDown,
    Help,
    /// Restore the initial board.
    Reset,
    Quit,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Solve,
        Command::SpeedUp,
        Command::SlowDown,
        Command::Reset,
        Command::Help,
        Command::Quit,
    ];

    pub fn from_key(key: char) -> Option<Self> {
        match key {
            's' | 'S' => Some(Command::Solve),
            '+' => Some(Command::SpeedUp),
            '-' => Some(Command::SlowDown),
            'h' | 'H' => Some(Command::Help),
            'r' | 'R' => Some(Command::Reset),
            'q' | 'Q' | ESCAPE => Some(Command::Quit),
            _ => None,
        }
    }

    /// Key label shown in help output.
    pub fn key(self) -> &'static str {
        match self {
            Command::Solve => "S",
            Command::SpeedUp => "+",
            Command::SlowDown => "-",
            Command::Help => "H",
            Command::Reset => "R",
            Command::Quit => "ESC/Q",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Solve => "Solve from initial state",
            Command::SpeedUp => "Speed up the animation",
            Command::SlowDown => "Slow down the animation",
            Command::Help => "Show this help",
            Command::Reset => "Reset the board",
            Command::Quit => "Quit",
        }
    }
}

/// Multi-line key reference, one binding per line.
pub fn help_text() -> String {
    Command::ALL
        .iter()
        .map(|cmd| format!("{}: {}", cmd.key(), cmd.description()))
        .collect::<Vec<_>>()
        .join("\n")
}
