//! JSON summary of an exploration run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use maze_core::{LogEvent, Session};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub seed: u64,
    pub turns: u64,
    pub level: u32,
    pub levels_cleared: u32,
    pub deaths: u32,
    pub exhausted: u32,
    pub throws: u32,
    pub monsters_slain: u32,
    pub score: i64,
    pub snapshot_hash: u64,
}

impl RunReport {
    pub fn from_session(session: &Session) -> Self {
        let mut exhausted = 0;
        let mut throws = 0;
        let mut monsters_slain = 0;
        for event in session.log() {
            match event {
                LogEvent::ExplorationExhausted { .. } => exhausted += 1,
                LogEvent::MonsterSlain { .. } => {
                    throws += 1;
                    monsters_slain += 1;
                }
                LogEvent::ThrowMissed { .. } => throws += 1,
                _ => {}
            }
        }
        Self {
            seed: session.seed(),
            turns: session.turn(),
            level: session.level(),
            levels_cleared: session.levels_cleared(),
            deaths: session.deaths(),
            exhausted,
            throws,
            monsters_slain,
            score: session.score(),
            snapshot_hash: session.snapshot_hash(),
        }
    }

    /// Writes the report as pretty JSON next to `path`, then renames it into place.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create report directory {}", parent.display()))?;
        }
        let mut json = serde_json::to_string_pretty(self).context("serialize run report")?;
        json.push('\n');

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("write temp report {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| format!("replace report {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("read report {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parse report {}", path.display()))
    }
}
