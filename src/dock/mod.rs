//! Orchestration of an external AutoDock Vina binary.
//!
//! The docking search itself runs out of process; this module only builds
//! the command line, supervises the child process, and extracts the docked
//! poses from the output file. Receptor and ligand are supplied as already
//! prepared PDBQT files.

mod error;
mod output;

pub use error::Error;
pub use output::Pose;

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Checks whether a Vina binary at `path` can be executed.
pub fn is_available(path: &Path) -> bool {
    Command::new(path)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// A docking invocation: input files, search box, and sampling knobs.
///
/// Optional fields left `None` fall back to the binary's own defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct VinaConfig {
    /// Path to the Vina executable.
    pub vina_path: PathBuf,
    /// Prepared receptor PDBQT file.
    pub receptor: PathBuf,
    /// Prepared ligand PDBQT file.
    pub ligand: PathBuf,
    /// Where the docked poses are written.
    pub out: PathBuf,
    /// Center of the search box, in angstroms.
    pub center: [f64; 3],
    /// Edge lengths of the search box, in angstroms.
    pub size: [f64; 3],
    /// Random seed for reproducible runs.
    pub seed: Option<i64>,
    /// Maximum number of poses to generate.
    pub num_modes: Option<u32>,
    /// Maximum energy difference (kcal/mol) between the best pose and the
    /// worst one reported.
    pub energy_range: Option<f64>,
    /// Search thoroughness; Vina defaults to 8.
    pub exhaustiveness: Option<u32>,
}

impl VinaConfig {
    pub fn new(
        vina_path: impl Into<PathBuf>,
        receptor: impl Into<PathBuf>,
        ligand: impl Into<PathBuf>,
        out: impl Into<PathBuf>,
        center: [f64; 3],
        size: [f64; 3],
    ) -> Self {
        Self {
            vina_path: vina_path.into(),
            receptor: receptor.into(),
            ligand: ligand.into(),
            out: out.into(),
            center,
            size,
            seed: None,
            num_modes: None,
            energy_range: None,
            exhaustiveness: None,
        }
    }

    fn command_args(&self) -> Vec<String> {
        let mut args = vec![
            "--receptor".to_string(),
            self.receptor.display().to_string(),
            "--ligand".to_string(),
            self.ligand.display().to_string(),
            "--out".to_string(),
            self.out.display().to_string(),
            "--center_x".to_string(),
            self.center[0].to_string(),
            "--center_y".to_string(),
            self.center[1].to_string(),
            "--center_z".to_string(),
            self.center[2].to_string(),
            "--size_x".to_string(),
            self.size[0].to_string(),
            "--size_y".to_string(),
            self.size[1].to_string(),
            "--size_z".to_string(),
            self.size[2].to_string(),
        ];
        if let Some(seed) = self.seed {
            args.push("--seed".to_string());
            args.push(seed.to_string());
        }
        if let Some(num_modes) = self.num_modes {
            args.push("--num_modes".to_string());
            args.push(num_modes.to_string());
        }
        if let Some(energy_range) = self.energy_range {
            args.push("--energy_range".to_string());
            args.push(energy_range.to_string());
        }
        if let Some(exhaustiveness) = self.exhaustiveness {
            args.push("--exhaustiveness".to_string());
            args.push(exhaustiveness.to_string());
        }
        args
    }
}

/// The parsed result of a completed docking run.
#[derive(Debug, Clone, PartialEq)]
pub struct DockingRun {
    /// Docked conformations ordered best energy first, as reported by the
    /// binary.
    pub poses: Vec<Pose>,
}

/// A running docking process.
///
/// Dropping a job without calling [`VinaJob::join`] leaves the child
/// running detached.
#[derive(Debug)]
pub struct VinaJob {
    config: VinaConfig,
    child: Child,
}

impl VinaJob {
    /// Spawns the docking binary and returns without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] if the binary cannot be started.
    pub fn submit(config: VinaConfig) -> Result<Self, Error> {
        let child = Command::new(&config.vina_path)
            .args(config.command_args())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| Error::Spawn {
                path: config.vina_path.clone(),
                source,
            })?;
        Ok(Self { config, child })
    }

    /// Non-blocking completion check.
    ///
    /// Returns `true` once the process has exited; the exit status is only
    /// inspected by [`VinaJob::join`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the process handle cannot be queried.
    pub fn poll(&mut self) -> Result<bool, Error> {
        self.child
            .try_wait()
            .map(|status| status.is_some())
            .map_err(|source| Error::Io {
                path: self.config.vina_path.clone(),
                source,
            })
    }

    /// Waits for the process to finish and parses the output file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProcessFailed`] for a non-zero exit, [`Error::Io`]
    /// if the output file cannot be read, and [`Error::MalformedOutput`] if
    /// it does not contain parsable poses.
    pub fn join(self) -> Result<DockingRun, Error> {
        let out_path = self.config.out;
        let vina_path = self.config.vina_path;

        let result = self.child.wait_with_output().map_err(|source| Error::Io {
            path: vina_path,
            source,
        })?;
        if !result.status.success() {
            return Err(Error::ProcessFailed {
                status: result.status,
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let text = std::fs::read_to_string(&out_path).map_err(|source| Error::Io {
            path: out_path,
            source,
        })?;
        let poses = output::parse_poses(&text)?;
        Ok(DockingRun { poses })
    }
}
