use rand::SeedableRng;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Random source injected into mine placement.
///
/// Sampling happens in a single call, so a given captured state always yields
/// the same mine set. Snapshot restore relies on that: an ungenerated board
/// must place the same mines after a round trip as it would have without one.
pub trait MineSampler {
    /// Sample `count` distinct coordinates uniformly without replacement.
    fn sample_coords(&mut self, candidates: &[Coord2], count: usize) -> Vec<Coord2>;

    /// Capture the generator state as an opaque blob.
    fn capture_state(&self) -> RngState;

    /// Replace the generator state with a previously captured blob.
    fn restore_state(&mut self, state: &RngState) -> Result<()>;
}

/// Opaque generator state. The persistence layer may re-encode it for storage
/// but must hand it back unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RngState(pub(crate) serde_json::Value);

/// ChaCha8-backed sampler owned by a single game session.
#[derive(Clone, Debug)]
pub struct SessionRng {
    rng: ChaCha8Rng,
}

impl SessionRng {
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_state(state: &RngState) -> Result<Self> {
        let rng = serde_json::from_value(state.0.clone())
            .map_err(|err| GameError::CorruptSnapshot(err.to_string()))?;
        Ok(Self { rng })
    }
}

impl MineSampler for SessionRng {
    fn sample_coords(&mut self, candidates: &[Coord2], count: usize) -> Vec<Coord2> {
        index::sample(&mut self.rng, candidates.len(), count)
            .into_iter()
            .map(|i| candidates[i])
            .collect()
    }

    fn capture_state(&self) -> RngState {
        RngState(serde_json::to_value(&self.rng).expect("rng state should serialize"))
    }

    fn restore_state(&mut self, state: &RngState) -> Result<()> {
        *self = Self::from_state(state)?;
        Ok(())
    }
}

/// Test double with a fixed mine set, ignoring the candidate list.
#[cfg(test)]
pub(crate) struct ScriptedSampler(pub Vec<Coord2>);

#[cfg(test)]
impl MineSampler for ScriptedSampler {
    fn sample_coords(&mut self, _candidates: &[Coord2], count: usize) -> Vec<Coord2> {
        assert_eq!(self.0.len(), count);
        self.0.clone()
    }

    fn capture_state(&self) -> RngState {
        RngState(serde_json::Value::Null)
    }

    fn restore_state(&mut self, _state: &RngState) -> Result<()> {
        Ok(())
    }
}
