/// Full animated solves driven through the headless host loop
use anyhow::Result;
use hanoi::{
    config::Config,
    host::{self, Pacing, RecordingSink},
};
use hanoi_core::{Rod, Simulation, SimulationConfig};

fn simulation(discs: usize) -> Result<Simulation> {
    let mut config = Config::default();
    config.simulation.discs = discs;
    config.validate()?;
    Ok(Simulation::new(config.simulation_config())?)
}

#[test]
fn test_unpaced_run_moves_the_whole_stack() -> Result<()> {
    let mut sim = simulation(4)?;
    assert!(sim.solve());

    let mut sink = RecordingSink::default();
    let summary = host::run_to_completion(&mut sim, Pacing::Unpaced, &mut sink)?;

    assert_eq!(summary.moves, 15);
    assert_eq!(sink.frames.len() as u64, summary.ticks);
    assert_eq!(sim.board().stack(Rod::RIGHT), &[3, 2, 1, 0]);
    assert!(sim.board().stack(Rod::LEFT).is_empty());
    assert!(sim.board().stack(Rod::MIDDLE).is_empty());
    assert!(sim.is_idle());
    assert!(!sim.is_solving());

    let last = sink.frames.last().expect("at least one frame");
    assert!(last.flight.is_none());
    assert_eq!(last.moves_completed, 15);
    assert!(!last.solving);
    Ok(())
}

#[test]
fn test_frames_count_up_monotonically() -> Result<()> {
    let mut sim = simulation(3)?;
    sim.solve();

    let mut sink = RecordingSink::default();
    host::run_to_completion(&mut sim, Pacing::Unpaced, &mut sink)?;

    let completed: Vec<_> = sink.frames.iter().map(|f| f.moves_completed).collect();
    assert!(completed.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(completed.last(), Some(&7));
    assert!(sink.frames.iter().all(|f| f.moves_planned == 7));
    Ok(())
}

#[test]
fn test_realtime_run_at_top_speed() -> Result<()> {
    let mut sim = Simulation::new(SimulationConfig {
        discs: 1,
        speed: 50.0,
        ..SimulationConfig::default()
    })?;
    sim.solve();

    let mut sink = RecordingSink::default();
    let summary = host::run_to_completion(&mut sim, Pacing::Realtime, &mut sink)?;

    assert_eq!(summary.moves, 1);
    assert_eq!(sim.board().stack(Rod::RIGHT), &[0]);
    Ok(())
}

#[test]
fn test_reset_after_run_allows_another_solve() -> Result<()> {
    let mut sim = simulation(2)?;
    sim.solve();
    host::run_to_completion(&mut sim, Pacing::Unpaced, &mut RecordingSink::default())?;
    assert!(!sim.solve());

    sim.reset();
    assert!(sim.solve());
    let summary =
        host::run_to_completion(&mut sim, Pacing::Unpaced, &mut RecordingSink::default())?;
    assert_eq!(summary.moves, 3);
    assert_eq!(sim.board_summary(), "0: []\n1: []\n2: [1, 0]");
    Ok(())
}
