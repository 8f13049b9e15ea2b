//! Committing a run's tables to the output directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use epitrack_core::Horizon;
use epitrack_pipeline::PipelineOutput;
use tempfile::NamedTempFile;

use crate::error::ArtifactError;
use crate::table::{write_table, CsvRecord};

/// The five tables a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    CleanTimeseries,
    Forecasts,
    RisingDiseases,
    GeoPoints,
    Hotzones,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::CleanTimeseries,
        ArtifactKind::Forecasts,
        ArtifactKind::RisingDiseases,
        ArtifactKind::GeoPoints,
        ArtifactKind::Hotzones,
    ];

    #[must_use]
    pub fn stem(self) -> &'static str {
        match self {
            ArtifactKind::CleanTimeseries => "clean_timeseries",
            ArtifactKind::Forecasts => "forecasts",
            ArtifactKind::RisingDiseases => "rising_diseases",
            ArtifactKind::GeoPoints => "geo_points",
            ArtifactKind::Hotzones => "hotzones",
        }
    }

    /// Horizon-dependent tables carry the horizon in their snapshot name.
    fn is_per_horizon(self) -> bool {
        matches!(self, ArtifactKind::Forecasts | ArtifactKind::RisingDiseases)
    }

    #[must_use]
    pub fn latest_name(self) -> String {
        format!("{}.csv", self.stem())
    }

    #[must_use]
    pub fn snapshot_name(self, horizon: Horizon, stamp: &str) -> String {
        if self.is_per_horizon() {
            format!("{}_{horizon}_{stamp}.csv", self.stem())
        } else {
            format!("{}_{stamp}.csv", self.stem())
        }
    }

    fn render(self, output: &PipelineOutput) -> std::io::Result<Vec<u8>> {
        fn bytes<R: CsvRecord>(rows: &[R]) -> std::io::Result<Vec<u8>> {
            let mut buf = Vec::new();
            write_table(&mut buf, rows)?;
            Ok(buf)
        }
        match self {
            ArtifactKind::CleanTimeseries => bytes(&output.series),
            ArtifactKind::Forecasts => bytes(&output.forecasts),
            ArtifactKind::RisingDiseases => bytes(&output.summaries),
            ArtifactKind::GeoPoints => bytes(&output.geo_points),
            ArtifactKind::Hotzones => bytes(&output.hotzones),
        }
    }
}

/// `%Y%m%d_%H%M%S`, the suffix of every snapshot file.
#[must_use]
pub fn snapshot_stamp(now: NaiveDateTime) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Paths written by one successful commit, latest copies first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub latest: Vec<PathBuf>,
    pub snapshots: Vec<PathBuf>,
}

fn stage(dir: &Path, target: &Path, content: &[u8]) -> Result<NamedTempFile, ArtifactError> {
    let write_err = |source| ArtifactError::Write {
        path: target.display().to_string(),
        source,
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(content).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    Ok(file)
}

/// Write every table as a latest copy and a snapshot.
///
/// All files are first staged as temporary files inside `out_dir`; nothing
/// is moved into place until every table has been staged, so a failure while
/// rendering or staging leaves the previous artifacts untouched. A failure
/// while moving files into place can leave some latest copies replaced.
///
/// # Errors
///
/// Returns [`ArtifactError`] if the directory cannot be created or any file
/// cannot be written or moved into place.
pub fn write_artifacts(
    out_dir: &Path,
    output: &PipelineOutput,
    horizon: Horizon,
    now: NaiveDateTime,
) -> Result<WrittenArtifacts, ArtifactError> {
    std::fs::create_dir_all(out_dir).map_err(|source| ArtifactError::CreateDir {
        path: out_dir.display().to_string(),
        source,
    })?;
    let stamp = snapshot_stamp(now);

    let mut staged: Vec<(NamedTempFile, PathBuf, bool)> = Vec::new();
    for kind in ArtifactKind::ALL {
        let latest = out_dir.join(kind.latest_name());
        let content = kind.render(output).map_err(|source| ArtifactError::Write {
            path: latest.display().to_string(),
            source,
        })?;
        let snapshot = out_dir.join(kind.snapshot_name(horizon, &stamp));
        staged.push((stage(out_dir, &latest, &content)?, latest, true));
        staged.push((stage(out_dir, &snapshot, &content)?, snapshot, false));
    }

    let mut written = WrittenArtifacts::default();
    for (file, target, is_latest) in staged {
        file.persist(&target).map_err(|e| ArtifactError::Persist {
            path: target.display().to_string(),
            source: e.error,
        })?;
        tracing::debug!(path = %target.display(), "artifact written");
        if is_latest {
            written.latest.push(target);
        } else {
            written.snapshots.push(target);
        }
    }

    tracing::info!(
        out_dir = %out_dir.display(),
        files = written.latest.len() + written.snapshots.len(),
        "artifacts committed"
    );
    Ok(written)
}
