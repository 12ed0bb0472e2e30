use anyhow::{Context, Result};
use hanoi_core::{BoardLayout, MotionParams, SimulationConfig, Speed};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Largest stack the hosts will animate.
pub const MAX_DISCS: usize = 10;

/// Main configuration for the Hanoi hosts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Puzzle size and animation speed
    #[serde(default)]
    pub simulation: SimulationSection,

    /// Board and rod geometry
    #[serde(default)]
    pub board: BoardLayout,

    /// Flight step sizes and frame rate
    #[serde(default)]
    pub motion: MotionParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Number of discs stacked on the left rod at start
    #[serde(default = "default_discs")]
    pub discs: usize,

    /// Initial speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            discs: default_discs(),
            speed: default_speed(),
        }
    }
}

fn default_discs() -> usize {
    3
}

fn default_speed() -> f64 {
    Speed::DEFAULT
}

impl Config {
    /// Load `path` if given, otherwise fall back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file, auto-detecting TOML or JSON format
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content).or_else(|_| Self::from_json(&content)),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config as TOML")
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse config as JSON")
    }

    pub fn validate(&self) -> Result<()> {
        let discs = self.simulation.discs;
        if discs == 0 || discs > MAX_DISCS {
            anyhow::bail!("simulation.discs must be between 1 and {MAX_DISCS}, got {discs}");
        }

        let speed = self.simulation.speed;
        if !(Speed::MIN..=Speed::MAX).contains(&speed) {
            anyhow::bail!(
                "simulation.speed must be between {} and {}, got {speed}",
                Speed::MIN,
                Speed::MAX
            );
        }

        let board = &self.board;
        for (name, value) in [
            ("board.rod_base_radius", board.rod_base_radius),
            ("board.width", board.width),
            ("board.depth", board.depth),
            ("board.rod_height", board.rod_height),
            ("board.disc_spacing", board.disc_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("{name} must be positive, got {value}");
            }
        }
        let stack_height = discs as f64 * board.disc_spacing;
        if stack_height >= board.rod_height {
            anyhow::bail!(
                "{discs} discs at spacing {} do not fit under rod_height {}",
                board.disc_spacing,
                board.rod_height
            );
        }

        self.motion.validate().context("invalid [motion] section")?;
        if self.motion.base_fps == 0 {
            anyhow::bail!("motion.base_fps cannot be zero");
        }

        Ok(())
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            discs: self.simulation.discs,
            layout: self.board,
            motion: self.motion,
            speed: self.simulation.speed,
        }
    }
}
