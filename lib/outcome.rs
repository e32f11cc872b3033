//! Displayable simulation results.

use std::fmt;

/// Shown when the service answers successfully but without a statevector.
pub const NO_STATEVECTOR: &str = "No statevector returned.";

/// Shown when the service could not be reached or its answer was unusable.
pub const SIMULATION_ERROR: &str = "Error simulating circuit.";

/// The result of a single submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Amplitude labels returned by the service, in order. Never empty.
    Statevector(Vec<String>),
    /// The service answered successfully but returned no statevector.
    NoStatevector,
    /// The request failed or the response could not be understood.
    Failed,
}

impl Outcome {
    /// Wrap a list of amplitude labels, mapping an empty list to
    /// [`NoStatevector`][Self::NoStatevector].
    pub fn from_statevector(labels: Vec<String>) -> Self {
        if labels.is_empty() { Self::NoStatevector } else { Self::Statevector(labels) }
    }

    /// Return `true` if `self` is `Statevector`.
    pub fn is_statevector(&self) -> bool { matches!(self, Self::Statevector(_)) }

    /// Return `true` if `self` is `Failed`.
    pub fn is_failed(&self) -> bool { matches!(self, Self::Failed) }

    /// Return the lines to display, in order.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::Statevector(labels) => labels.iter().map(String::as_str).collect(),
            Self::NoStatevector => vec![NO_STATEVECTOR],
            Self::Failed => vec![SIMULATION_ERROR],
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Holds the most recent [`Outcome`], if any.
///
/// Every write replaces the previous value wholesale; there is no history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultStore {
    latest: Option<Outcome>,
}

impl ResultStore {
    /// Create a new, empty store.
    pub fn new() -> Self { Self::default() }

    /// Return the stored outcome.
    pub fn get(&self) -> Option<&Outcome> { self.latest.as_ref() }

    /// Return `true` if nothing is stored.
    pub fn is_empty(&self) -> bool { self.latest.is_none() }

    /// Return the lines to display; empty if nothing is stored.
    pub fn lines(&self) -> Vec<&str> {
        self.latest.as_ref().map(Outcome::lines).unwrap_or_default()
    }

    /// Overwrite the stored outcome, returning the previous one.
    pub fn replace(&mut self, outcome: Outcome) -> Option<Outcome> {
        self.latest.replace(outcome)
    }

    /// Discard the stored outcome.
    pub fn clear(&mut self) { self.latest = None; }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sentinel_lines() {
        assert_eq!(Outcome::NoStatevector.lines(), vec!["No statevector returned."]);
        assert_eq!(Outcome::Failed.lines(), vec!["Error simulating circuit."]);
        let sv = Outcome::Statevector(vec!["0.71|00>".into(), "0.71|11>".into()]);
        assert_eq!(sv.lines(), vec!["0.71|00>", "0.71|11>"]);
        assert_eq!(sv.to_string(), "0.71|00>\n0.71|11>");
    }

    #[test]
    fn empty_statevector() {
        assert_eq!(Outcome::from_statevector(Vec::new()), Outcome::NoStatevector);
        assert!(Outcome::from_statevector(vec!["1|0>".into()]).is_statevector());
    }

    #[test]
    fn store_replace_clear() {
        let mut store = ResultStore::new();
        assert!(store.is_empty());
        assert!(store.lines().is_empty());
        assert_eq!(store.replace(Outcome::Failed), None);
        assert_eq!(store.replace(Outcome::NoStatevector), Some(Outcome::Failed));
        assert_eq!(store.get(), Some(&Outcome::NoStatevector));
        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert_eq!(store, ResultStore::new());
    }
}
