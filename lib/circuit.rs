//! Ordered gate sequences.
//!
//! A [`Circuit`] only ever grows by one gate at a time or is reset entirely;
//! insertion order is execution order.

use std::fmt;
use serde::{ Deserialize, Serialize };
use thiserror::Error;
use crate::gate::Gate;

#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("malformed circuit JSON: {0}")]
    Json(#[from] serde_json::Error),
}
pub type CircuitResult<T> = Result<T, CircuitError>;

/// An ordered sequence of [`Gate`]s.
///
/// Serializes as a bare JSON array of gates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Circuit {
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create a new, empty circuit.
    pub fn new() -> Self { Self::default() }

    /// Push a gate onto the end of the circuit.
    pub fn append(&mut self, gate: Gate) -> &mut Self {
        tracing::debug!(%gate, position = self.gates.len(), "append gate");
        self.gates.push(gate);
        self
    }

    /// Remove all gates.
    pub fn clear(&mut self) -> &mut Self {
        self.gates.clear();
        self
    }

    /// Return a view of the gates in execution order.
    pub fn snapshot(&self) -> &[Gate] { &self.gates }

    /// Return the number of gates.
    pub fn len(&self) -> usize { self.gates.len() }

    /// Return `true` if there are no gates.
    pub fn is_empty(&self) -> bool { self.gates.is_empty() }

    /// Return the most recently appended gate.
    pub fn last(&self) -> Option<&Gate> { self.gates.last() }

    /// Return an iterator over the gates in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Gate> { self.gates.iter() }

    /// Serialize to a JSON array.
    pub fn to_json(&self) -> CircuitResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from a JSON array of gates.
    pub fn from_json(s: &str) -> CircuitResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl FromIterator<Gate> for Circuit {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = Gate>
    {
        Self { gates: iter.into_iter().collect() }
    }
}

impl Extend<Gate> for Circuit {
    fn extend<I>(&mut self, iter: I)
    where I: IntoIterator<Item = Gate>
    {
        iter.into_iter().for_each(|g| { self.append(g); });
    }
}

impl IntoIterator for Circuit {
    type Item = Gate;
    type IntoIter = std::vec::IntoIter<Gate>;

    fn into_iter(self) -> Self::IntoIter { self.gates.into_iter() }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Gate;
    type IntoIter = std::slice::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter { self.gates.iter() }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.gates.is_empty() {
            return f.write_str("(empty circuit)");
        }
        let lines =
            self.gates.iter().enumerate()
            .map(|(k, g)| format!("{:>3}. {}", k, g));
        f.write_str(&itertools::join(lines, "\n"))
    }
}
