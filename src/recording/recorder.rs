//! Append-only text output streams
//!
//! - energies: `kinetic potential mechanical`, one line per step (SI units)
//! - positions: `x, y` per body, one blank line after each step. Positions
//!   are written before the state is converted back to SI units, so they are
//!   in AU rather than metres.
//! - angular momentum: one value per step (SI units)
//!
//! Floats use the C `%.6e` layout (`1.496000e+11`).

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::simulation::diagnostics::Measurement;
use crate::simulation::states::Body;

/// Which of the three output streams an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Energies,
    Positions,
    AngularMomentum,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stream::Energies => "energies",
            Stream::Positions => "positions",
            Stream::AngularMomentum => "angular momentum",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("failed to open {stream} file {}", .path.display())]
    Open {
        stream: Stream,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {stream} file")]
    Write {
        stream: Stream,
        #[source]
        source: io::Error,
    },
}

/// Locations of the three streams.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub energies: PathBuf,
    pub positions: PathBuf,
    pub angular_momentum: PathBuf,
}

impl OutputPaths {
    /// Prefix every relative path with `dir`.
    pub fn in_dir(self, dir: &Path) -> Self {
        let join = |p: PathBuf| if p.is_relative() { dir.join(p) } else { p };
        Self {
            energies: join(self.energies),
            positions: join(self.positions),
            angular_momentum: join(self.angular_momentum),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            energies: PathBuf::from("energies.txt"),
            positions: PathBuf::from("positions.txt"),
            angular_momentum: PathBuf::from("angular_momentum.txt"),
        }
    }
}

/// Format `value` like C's `%.{precision}e`.
pub fn format_sci(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let s = format!("{:.*e}", precision, value);
    match s.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exp))) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        _ => s,
    }
}

fn sci(value: f64) -> String {
    format_sci(value, 6)
}

pub struct Recorder<W: Write> {
    energies: W,
    positions: W,
    angular_momentum: W,
}

impl Recorder<BufWriter<File>> {
    /// Open (truncate) all three files. Parent directories are created.
    pub fn create(paths: &OutputPaths) -> Result<Self, RecorderError> {
        Ok(Self::new(
            open(Stream::Energies, &paths.energies)?,
            open(Stream::Positions, &paths.positions)?,
            open(Stream::AngularMomentum, &paths.angular_momentum)?,
        ))
    }
}

fn open(stream: Stream, path: &Path) -> Result<BufWriter<File>, RecorderError> {
    let wrap = |source: io::Error| RecorderError::Open {
        stream,
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(wrap)?;
        }
    }
    let file = File::create(path).map_err(wrap)?;
    Ok(BufWriter::new(file))
}

impl<W: Write> Recorder<W> {
    pub fn new(energies: W, positions: W, angular_momentum: W) -> Self {
        Self {
            energies,
            positions,
            angular_momentum,
        }
    }

    pub fn write_energies(&mut self, m: &Measurement) -> Result<(), RecorderError> {
        writeln!(
            self.energies,
            "{} {} {}",
            sci(m.kinetic),
            sci(m.potential),
            sci(m.mechanical())
        )
        .map_err(|source| RecorderError::Write { stream: Stream::Energies, source })
    }

    pub fn write_positions(&mut self, bodies: &[Body]) -> Result<(), RecorderError> {
        let mut write = || -> io::Result<()> {
            for b in bodies {
                writeln!(self.positions, "{}, {}", sci(b.x.x), sci(b.x.y))?;
            }
            // blank line between steps
            writeln!(self.positions)
        };
        write().map_err(|source| RecorderError::Write { stream: Stream::Positions, source })
    }

    pub fn write_angular_momentum(&mut self, value: f64) -> Result<(), RecorderError> {
        writeln!(self.angular_momentum, "{}", sci(value))
            .map_err(|source| RecorderError::Write { stream: Stream::AngularMomentum, source })
    }

    /// Flush every stream and hand the writers back.
    pub fn finish(mut self) -> Result<(W, W, W), RecorderError> {
        for (stream, w) in [
            (Stream::Energies, &mut self.energies),
            (Stream::Positions, &mut self.positions),
            (Stream::AngularMomentum, &mut self.angular_momentum),
        ] {
            w.flush().map_err(|source| RecorderError::Write { stream, source })?;
        }
        Ok((self.energies, self.positions, self.angular_momentum))
    }
}
