use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TopologyError;

/// Layer sizes of a single-hidden-layer network, written `"inputs-hidden-outputs"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl Topology {
    pub fn new(inputs: usize, hidden: usize, outputs: usize) -> Self {
        Topology { inputs, hidden, outputs }
    }
}

impl Default for Topology {
    /// The XOR shape, 2-2-1.
    fn default() -> Self {
        Topology::new(2, 2, 1)
    }
}

impl FromStr for Topology {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(TopologyError::WrongArity(parts.len()));
        }

        let mut counts = [0usize; 3];
        for (slot, raw) in counts.iter_mut().zip(&parts) {
            *slot = raw
                .trim()
                .parse()
                .map_err(|_| TopologyError::InvalidCount(raw.to_string()))?;
        }

        Ok(Topology::new(counts[0], counts[1], counts[2]))
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.inputs, self.hidden, self.outputs)
    }
}
