//! Replay scripts for the deterministic CLI harness.
//!
//! A replay script is a timeline plus an ordered list of frames: judgements,
//! rewinds (reverts), ticks and setting changes. Running a script drives a
//! fresh engine bound to an in-memory track and records a snapshot after
//! every frame, which makes rewind behaviour easy to inspect and test.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::audio::TrackAdjustments;
use crate::config::AdaptiveSpeedConfig;
use crate::engine::{AdaptiveSpeedEngine, EngineSnapshot};
use crate::error::{log_config_error, log_timeline_error, ConfigError, TimelineError};
use crate::judgement::{HitResult, JudgementResult};
use crate::timeline::{EventId, TimedEvent, Timeline};

/// Default location for replay script assets.
pub const DEFAULT_SCRIPT_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures");

/// One step of a replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayFrame {
    Judge {
        event: EventId,
        time: f64,
        result: HitResult,
    },
    Revert {
        event: EventId,
        result: HitResult,
    },
    Tick {
        dt: f64,
    },
    SetAdjustPitch {
        enabled: bool,
    },
    SetInitialRate {
        rate: f64,
    },
}

/// Optional end-state expectations checked by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayExpectations {
    #[serde(default)]
    pub final_target_rate: Option<f64>,
    #[serde(default)]
    pub final_published_rate: Option<f64>,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    1e-6
}

/// JSON replay script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub name: Option<String>,
    pub events: Vec<TimedEvent>,
    pub frames: Vec<ReplayFrame>,
    #[serde(default)]
    pub expect: Option<ReplayExpectations>,
}

impl ReplayScript {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading replay script {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load by file path, or by name from `root` (`<root>/<name>.json`).
    pub fn resolve(script: &str, root: &Path) -> Result<Self> {
        let as_path = Path::new(script);
        if as_path.exists() {
            return Self::load(as_path);
        }

        let candidate = root.join(format!("{script}.json"));
        if candidate.exists() {
            Self::load(candidate)
        } else {
            Err(anyhow!(
                "Replay script '{script}' not found in {}",
                root.display()
            ))
        }
    }
}

/// List script names available under `root`.
pub fn discover_scripts(root: &Path) -> Result<Vec<PathBuf>> {
    let mut scripts = Vec::new();
    if !root.exists() {
        return Ok(scripts);
    }

    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            scripts.push(path);
        }
    }
    scripts.sort();
    Ok(scripts)
}

/// Outcome of a single frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub index: usize,
    pub frame: ReplayFrame,
    /// Whether the frame changed engine state (ignored judgements report false)
    pub applied: bool,
    pub snapshot: EngineSnapshot,
}

/// Full replay report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub frames: Vec<FrameRecord>,
    pub final_snapshot: EngineSnapshot,
    /// Effective playback speed of the bound track at the end of the replay
    pub track_rate: f64,
}

impl ReplayReport {
    /// Compare the end state against `expect`. Returns the mismatches.
    pub fn verify(&self, expect: &ReplayExpectations) -> std::result::Result<(), Vec<String>> {
        let mut failures = Vec::new();
        let checks = [
            ("final_target_rate", expect.final_target_rate, self.final_snapshot.target_rate),
            (
                "final_published_rate",
                expect.final_published_rate,
                self.final_snapshot.published_rate,
            ),
        ];

        for (name, expected, actual) in checks {
            if let Some(expected) = expected {
                if (expected - actual).abs() > expect.tolerance {
                    failures.push(format!("{name}: expected {expected}, got {actual}"));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}

/// Executes replay scripts against a fresh engine.
pub struct ReplayRunner {
    config: AdaptiveSpeedConfig,
}

impl ReplayRunner {
    pub fn new(config: AdaptiveSpeedConfig) -> Result<Self, ConfigError> {
        config.validate().map_err(|err| {
            log_config_error(&err, "ReplayRunner::new");
            err
        })?;
        Ok(Self { config })
    }

    /// Validate the script's timeline and run every frame.
    ///
    /// Timeline problems surface as a `TimelineError` inside the returned error.
    pub fn run(&self, script: &ReplayScript) -> Result<ReplayReport> {
        let timeline = Timeline::new(script.events.clone()).map_err(|err| {
            log_timeline_error(&err, "ReplayRunner::run");
            err
        })?;
        for frame in &script.frames {
            if let ReplayFrame::Judge { event, .. } | ReplayFrame::Revert { event, .. } = frame {
                if !timeline.contains(*event) {
                    let err = TimelineError::UnknownEvent { id: *event };
                    log_timeline_error(&err, "ReplayRunner::run");
                    return Err(err.into());
                }
            }
        }

        let mut engine = AdaptiveSpeedEngine::attach(timeline.events(), self.config.clone())?;
        let track = Arc::new(TrackAdjustments::new());
        engine.bind_track(track.clone());

        tracing::info!(
            script = script.name.as_deref().unwrap_or("<unnamed>"),
            events = timeline.len(),
            frames = script.frames.len(),
            "[ReplayRunner] starting replay"
        );

        let mut records = Vec::with_capacity(script.frames.len());
        for (index, frame) in script.frames.iter().enumerate() {
            let applied = Self::run_frame(&mut engine, frame);
            if !applied {
                tracing::debug!(index, ?frame, "[ReplayRunner] frame ignored");
            }
            records.push(FrameRecord {
                index,
                frame: frame.clone(),
                applied,
                snapshot: engine.snapshot(),
            });
        }

        let final_snapshot = engine.snapshot();
        let track_rate = track.effective_rate();
        tracing::info!(
            target_rate = final_snapshot.target_rate,
            published_rate = final_snapshot.published_rate,
            track_rate,
            "[ReplayRunner] replay finished"
        );
        engine.detach();

        Ok(ReplayReport {
            frames: records,
            final_snapshot,
            track_rate,
        })
    }

    fn run_frame(engine: &mut AdaptiveSpeedEngine, frame: &ReplayFrame) -> bool {
        match *frame {
            ReplayFrame::Judge { event, time, result } => {
                engine.apply_result(&JudgementResult::new(event, time, result))
            }
            ReplayFrame::Revert { event, result } => {
                // Revert only needs the classification, not the judged time
                engine.revert_result(&JudgementResult::new(event, 0.0, result))
            }
            ReplayFrame::Tick { dt } => {
                engine.tick(dt);
                true
            }
            ReplayFrame::SetAdjustPitch { enabled } => {
                let changed = engine.adjust_pitch() != enabled;
                engine.set_adjust_pitch(enabled);
                changed
            }
            ReplayFrame::SetInitialRate { rate } => match engine.set_initial_rate(rate) {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!("[ReplayRunner] initial rate rejected: {}", err);
                    false
                }
            },
        }
    }
}
