use anyhow::{Context, Result};
use clap::Args;
use hanoi_core::{Rod, generate_moves_with};

#[derive(Args)]
pub struct SolveArgs {
    /// Number of discs to move.
    #[arg(long, short = 'n', default_value_t = 3)]
    pub discs: usize,

    /// Rod the stack starts on (0, 1 or 2).
    #[arg(long, default_value_t = 0)]
    pub from: usize,

    /// Rod the stack should end on (0, 1 or 2).
    #[arg(long, default_value_t = 2)]
    pub to: usize,

    /// Print the moves as a JSON array instead of text.
    #[arg(long)]
    pub json: bool,
}

impl SolveArgs {
    pub fn run(&self) -> Result<()> {
        let from = Rod::new(self.from).context("invalid --from")?;
        let to = Rod::new(self.to).context("invalid --to")?;

        let mut moves = Vec::new();
        generate_moves_with(self.discs, from, to, |m| {
            if !self.json {
                println!("{m}");
            }
            moves.push(m);
        })?;

        if self.json {
            let out = serde_json::to_string_pretty(&moves).context("failed to encode moves")?;
            println!("{out}");
        } else {
            println!("Total moves: {}", moves.len());
        }

        Ok(())
    }
}
