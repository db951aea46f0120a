//! Parallel construction of many operator sets.
//!
//! A [`SweepConfig`] lists candidate values per parameter; [`expand_requests`]
//! turns them into one [`OperatorRequest`] per combination and [`run_sweep`]
//! builds them on the rayon pool. Construction calls share no state, so the
//! entries come back in expansion order regardless of scheduling.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{bundle::OperatorBundle, error::OperatorResult, factory};

// ============================================================================
// Requests
// ============================================================================

/// One construction call with raw parameter values, as read from a
/// configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatorRequest {
    pub order: u32,
    pub points: usize,
    pub length: f64,
    pub narrowing: u8,
}

impl OperatorRequest {
    pub fn construct(&self) -> OperatorResult<OperatorBundle> {
        factory::construct_raw(self.order, self.points, self.length, self.narrowing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub orders: Vec<u32>,
    pub points: Vec<usize>,
    #[serde(default = "default_lengths")]
    pub lengths: Vec<f64>,
    #[serde(default = "default_narrowings")]
    pub narrowings: Vec<u8>,
}

fn default_lengths() -> Vec<f64> {
    vec![1.0]
}

fn default_narrowings() -> Vec<u8> {
    vec![0, 1, 2]
}

impl SweepConfig {
    pub fn request_count(&self) -> usize {
        self.orders.len() * self.points.len() * self.lengths.len() * self.narrowings.len()
    }
}

/// Cartesian product of the sweep axes; order varies slowest, narrowing fastest.
pub fn expand_requests(config: &SweepConfig) -> Vec<OperatorRequest> {
    let mut requests = Vec::with_capacity(config.request_count());
    for &order in &config.orders {
        for &points in &config.points {
            for &length in &config.lengths {
                for &narrowing in &config.narrowings {
                    requests.push(OperatorRequest {
                        order,
                        points,
                        length,
                        narrowing,
                    });
                }
            }
        }
    }
    requests
}

// ============================================================================
// Execution
// ============================================================================

#[derive(Debug, Clone)]
pub struct SweepEntry {
    /// Position in the expanded request list.
    pub index: usize,
    pub request: OperatorRequest,
    pub outcome: OperatorResult<OperatorBundle>,
    pub duration: Duration,
}

impl SweepEntry {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub fn run_sweep(config: &SweepConfig) -> Vec<SweepEntry> {
    let requests = expand_requests(config);
    info!("sweep: building {} operator sets", requests.len());
    let started = Instant::now();

    let entries: Vec<SweepEntry> = requests
        .par_iter()
        .enumerate()
        .map(|(index, request)| {
            let t0 = Instant::now();
            let outcome = request.construct();
            let duration = t0.elapsed();
            match &outcome {
                Ok(bundle) => debug!(
                    "sweep[{index}]: order={} points={} narrowing={} h={:.4e} in {:.2?}",
                    request.order, bundle.points(), request.narrowing, bundle.h, duration
                ),
                Err(err) => warn!("sweep[{index}]: {err}"),
            }
            SweepEntry {
                index,
                request: *request,
                outcome,
                duration,
            }
        })
        .collect();

    let failed = entries.iter().filter(|e| !e.succeeded()).count();
    info!(
        "sweep: {} built, {} failed in {:.2?}",
        entries.len() - failed,
        failed,
        started.elapsed()
    );
    entries
}
