use anyhow::Result;
use clap::Args;
use xshell::{Shell, cmd};

#[derive(Args)]
pub struct Demo {
    /// Number of discs to animate
    #[arg(long, short = 'n', default_value_t = 5)]
    discs: usize,

    /// Tick at the animation frame rate instead of as fast as possible
    #[arg(long)]
    realtime: bool,
}

impl Demo {
    pub fn run(&self, sh: &Shell) -> Result<()> {
        let discs = self.discs.to_string();
        let unpaced = (!self.realtime).then_some("--unpaced");
        let _log = sh.push_env("RUST_LOG", "hanoi=info,hanoi_core=info");
        cmd!(sh, "cargo run -p hanoi -- run --discs {discs} {unpaced...}").run()?;
        Ok(())
    }
}
