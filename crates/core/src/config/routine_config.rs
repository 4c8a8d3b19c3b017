use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classification::domain::pose_classifier::PoseClassifier;
use crate::classification::domain::pose_definition::{PoseDefinition, PoseId};
use crate::hold::domain::hold_tracker::{HoldConfigError, HoldTracker};
use crate::session::hold_session::HoldSession;
use crate::shared::constants::{
    CONFIG_DIR_NAME, CRESCENT_HOLD_SECS, DEFAULT_GRACE_PERIOD_SECS, ROUTINE_FILE_NAME,
    SEATED_TWIST_HOLD_SECS, SHOULDER_ROLLS_HOLD_SECS,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid routine file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize routine: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("routine has no poses")]
    EmptyRoutine,
    #[error("{0} appears more than once in the routine")]
    DuplicatePose(PoseId),
    #[error("invalid hold settings for {pose}: {source}")]
    Hold {
        pose: PoseId,
        #[source]
        source: HoldConfigError,
    },
    #[error("invalid definition for {pose}: {reason}")]
    Definition { pose: PoseId, reason: String },
}

/// One pose in the routine and how long it must be held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseConfig {
    pub pose: PoseId,
    pub target_duration_secs: f64,
}

/// Which poses to coach, for how long, and (optionally) how to recognise
/// them. Stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineConfig {
    #[serde(default = "default_grace_period")]
    pub grace_period_secs: f64,
    #[serde(default)]
    pub stop_when_complete: bool,
    #[serde(default = "default_poses")]
    pub poses: Vec<PoseConfig>,
    /// Replaces the built-in definition of every pose listed here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<Vec<PoseDefinition>>,
}

fn default_grace_period() -> f64 {
    DEFAULT_GRACE_PERIOD_SECS
}

fn default_poses() -> Vec<PoseConfig> {
    [
        (PoseId::SeatedTwist, SEATED_TWIST_HOLD_SECS),
        (PoseId::ShoulderRolls, SHOULDER_ROLLS_HOLD_SECS),
        (PoseId::LeftCrescent, CRESCENT_HOLD_SECS),
        (PoseId::RightCrescent, CRESCENT_HOLD_SECS),
    ]
    .into_iter()
    .map(|(pose, target_duration_secs)| PoseConfig {
        pose,
        target_duration_secs,
    })
    .collect()
}

impl Default for RoutineConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: default_grace_period(),
            stop_when_complete: false,
            poses: default_poses(),
            definitions: None,
        }
    }
}

impl RoutineConfig {
    /// `<config dir>/PoseCoach/routine.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(ROUTINE_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, json).map_err(write_err)
    }

    /// Built-in table with the overrides from `definitions` applied.
    pub fn effective_definitions(&self) -> Vec<PoseDefinition> {
        let overrides = self.definitions.as_deref().unwrap_or_default();
        let overridden: HashSet<PoseId> = overrides.iter().map(|d| d.pose).collect();

        let mut defs: Vec<PoseDefinition> = PoseId::ALL
            .iter()
            .filter(|pose| !overridden.contains(*pose))
            .map(|&pose| PoseDefinition::default_for(pose))
            .collect();
        defs.extend(overrides.iter().cloned());
        defs
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_trackers()?;
        for def in self.definitions.as_deref().unwrap_or_default() {
            validate_definition(def)?;
        }
        Ok(())
    }

    /// One tracker per routine pose, in routine order.
    pub fn build_trackers(&self) -> Result<Vec<(PoseId, HoldTracker)>, ConfigError> {
        if self.poses.is_empty() {
            return Err(ConfigError::EmptyRoutine);
        }

        let mut seen = HashSet::new();
        let mut trackers = Vec::with_capacity(self.poses.len());
        for entry in &self.poses {
            if !seen.insert(entry.pose) {
                return Err(ConfigError::DuplicatePose(entry.pose));
            }
            let tracker = HoldTracker::with_grace_period(
                entry.pose.display_name(),
                entry.target_duration_secs,
                self.grace_period_secs,
            )
            .map_err(|source| ConfigError::Hold {
                pose: entry.pose,
                source,
            })?;
            trackers.push((entry.pose, tracker));
        }
        Ok(trackers)
    }

    pub fn build_session(&self) -> Result<HoldSession, ConfigError> {
        self.validate()?;
        let classifier = PoseClassifier::new(self.effective_definitions());
        Ok(HoldSession::new(classifier, self.build_trackers()?)
            .with_stop_when_complete(self.stop_when_complete))
    }
}

fn validate_definition(def: &PoseDefinition) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::Definition {
        pose: def.pose,
        reason,
    };

    if def.angles.is_empty() {
        return Err(invalid("no angle windows".to_string()));
    }
    for t in &def.angles {
        if !t.target_deg.is_finite() {
            return Err(invalid(format!("{:?} target is not finite", t.angle)));
        }
        if !(t.tolerance_deg.is_finite() && t.tolerance_deg >= 0.0) {
            return Err(invalid(format!(
                "{:?} tolerance must be >= 0, got {}",
                t.angle, t.tolerance_deg
            )));
        }
    }
    if let Some(max) = def.max_shoulder_distance {
        if !(max.is_finite() && max > 0.0) {
            return Err(invalid(format!(
                "max shoulder distance must be positive, got {max}"
            )));
        }
    }
    Ok(())
}
