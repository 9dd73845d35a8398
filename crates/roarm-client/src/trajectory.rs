use crate::RoarmClient;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Opaque named-blob persistence for recorded trajectories. The driver only
/// ever reads and writes whole blobs; where they live is the caller's
/// business.
pub trait BlobStore {
    fn write(&mut self, name: &str, bytes: &[u8]) -> anyhow::Result<()>;
    fn read(&self, name: &str) -> anyhow::Result<Vec<u8>>;
}

/// In-process store for tests and ephemeral recordings.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn write(&mut self, name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        self.blobs.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        match self.blobs.get(name) {
            Some(bytes) => Ok(bytes.clone()),
            None => bail!("no blob named {name}"),
        }
    }
}

/// One drag-teach sample: wall-clock seconds plus per-joint radians.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub timestamp: f64,
    pub radians: Vec<f64>,
}

fn epoch_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

/// Drag-teach recording: release holding torque, then sample joint radians
/// until `stop` flips, persisting the JSON-encoded series under `name`.
///
/// Returns the number of samples captured.
pub fn record_trajectory(
    client: &RoarmClient,
    store: &mut dyn BlobStore,
    name: &str,
    stop: &AtomicBool,
) -> anyhow::Result<usize> {
    client.torque_set(0)?;
    let mut samples = Vec::new();
    while !stop.load(Ordering::Relaxed) {
        let radians = client.joints_radian_get()?;
        samples.push(TrajectorySample {
            timestamp: epoch_secs(),
            radians,
        });
    }
    store.write(name, &serde_json::to_vec(&samples)?)?;
    tracing::debug!(count = samples.len(), name, "trajectory saved");
    Ok(samples.len())
}

/// Replay a recorded trajectory with the original pacing.
///
/// Speed and acceleration are derived from consecutive samples: speed in
/// encoder counts as `|Δrad| · 2048/π / Δt`, acceleration as
/// `|Δspeed / (100·Δt)|`. Zero-Δt steps are skipped, as are joints whose
/// derived speed is zero. Returns the number of steps replayed.
pub fn replay_trajectory(
    client: &RoarmClient,
    store: &dyn BlobStore,
    name: &str,
) -> anyhow::Result<usize> {
    let samples: Vec<TrajectorySample> = serde_json::from_slice(&store.read(name)?)
        .context("trajectory blob is not valid JSON")?;
    if samples.len() < 2 {
        bail!("not enough samples to derive speed and acceleration");
    }

    let mut prev_speed = vec![0i32; client.model().joint_count()];
    let mut steps = 0usize;
    for pair in samples.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        let dt = after.timestamp - before.timestamp;
        if dt <= 0.0 {
            tracing::warn!("non-positive time delta, skipping step");
            continue;
        }

        let speed: Vec<i32> = before
            .radians
            .iter()
            .zip(&after.radians)
            .map(|(r1, r2)| ((r2 - r1) / dt * 2048.0 / PI).abs() as i32)
            .collect();
        let acc: Vec<i32> = speed
            .iter()
            .zip(&prev_speed)
            .map(|(spd, prev)| (f64::from(spd - prev) / (100.0 * dt)).abs() as i32)
            .collect();

        for (index, ((&radian, &spd), &acc)) in
            after.radians.iter().zip(&speed).zip(&acc).enumerate()
        {
            if spd != 0 {
                client.joint_radian_ctrl((index + 1) as u8, radian, spd, acc)?;
                std::thread::sleep(Duration::from_secs_f64(dt));
            }
        }
        prev_speed = speed;
        steps += 1;
    }
    tracing::debug!(steps, name, "trajectory replayed");
    Ok(steps)
}
