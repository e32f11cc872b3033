//! A single owned store for one circuit-building session.
//!
//! [`Session`] threads the form, the circuit and the latest result through
//! a small set of entry points. Submissions are split in two halves so that
//! the network call can run elsewhere while the session keeps accepting
//! edits:
//!
//! ```
//! # use qcircuit_form::{ outcome::Outcome, session::Session };
//! let mut session = Session::new();
//! session.add_gate();
//! let first = session.begin_submit();
//! let second = session.begin_submit();
//! // the later request resolves first, the earlier one is stale
//! assert!(session.finish_submit(second.token, Outcome::NoStatevector));
//! assert!(!session.finish_submit(first.token, Outcome::Failed));
//! assert_eq!(session.results().get(), Some(&Outcome::NoStatevector));
//! ```

use crate::{
    circuit::Circuit,
    client::{ SimulationClient, Transport },
    form::GateForm,
    gate::Gate,
    outcome::{ Outcome, ResultStore },
};

/// Identifies one submission of a [`Session`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmitToken(u64);

/// A submission that has been issued but not yet resolved.
#[derive(Clone, Debug)]
pub struct PendingSubmit {
    pub token: SubmitToken,
    /// Copy of the circuit as it was when the submission was issued.
    pub circuit: Circuit,
}

/// Form, circuit and result of a session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    form: GateForm,
    circuit: Circuit,
    results: ResultStore,
    // most recently issued token; clearing also advances it
    issued: u64,
}

impl Session {
    /// Create a new session with an empty circuit and a default form.
    pub fn new() -> Self { Self::default() }

    /// Return a reference to the form.
    pub fn form(&self) -> &GateForm { &self.form }

    /// Return a mutable reference to the form.
    pub fn form_mut(&mut self) -> &mut GateForm { &mut self.form }

    /// Return a reference to the circuit.
    pub fn circuit(&self) -> &Circuit { &self.circuit }

    /// Return a reference to the latest result.
    pub fn results(&self) -> &ResultStore { &self.results }

    /// Commit the form and append the resulting gate to the circuit.
    pub fn add_gate(&mut self) -> Gate {
        let gate = self.form.commit();
        self.circuit.append(gate);
        gate
    }

    /// Empty the circuit and the results.
    ///
    /// Any submission still in flight is invalidated, so its response will
    /// be discarded when it arrives.
    pub fn clear(&mut self) {
        self.circuit.clear();
        self.results.clear();
        self.issued += 1;
        tracing::debug!("session cleared");
    }

    /// Issue a new submission for the current circuit.
    pub fn begin_submit(&mut self) -> PendingSubmit {
        self.issued += 1;
        PendingSubmit {
            token: SubmitToken(self.issued),
            circuit: self.circuit.clone(),
        }
    }

    /// Return `true` if `token` belongs to the most recently issued
    /// submission.
    pub fn is_current(&self, token: SubmitToken) -> bool {
        token.0 == self.issued
    }

    /// Resolve a submission.
    ///
    /// The outcome replaces the stored result only if `token` is still
    /// current; otherwise it is dropped. Returns whether it was applied.
    pub fn finish_submit(&mut self, token: SubmitToken, outcome: Outcome)
        -> bool
    {
        if self.is_current(token) {
            self.results.replace(outcome);
            true
        } else {
            tracing::debug!(
                token = token.0,
                current = self.issued,
                "discarding stale simulation result",
            );
            false
        }
    }

    /// Submit the current circuit with `client` and store the outcome.
    pub fn simulate<T>(&mut self, client: &SimulationClient<T>) -> &ResultStore
    where T: Transport
    {
        let PendingSubmit { token, circuit } = self.begin_submit();
        let outcome = client.submit(&circuit);
        self.finish_submit(token, outcome);
        &self.results
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        client::{ ClientConfig, ClientResult, RawResponse },
        form::Field,
        gate::GateKind,
    };

    struct Fixed(&'static str);

    impl Transport for Fixed {
        fn post_json(&self, _url: &str, _body: Vec<u8>) -> ClientResult<RawResponse> {
            Ok(RawResponse { status: 200, body: self.0.as_bytes().to_vec() })
        }

        fn get(&self, _url: &str) -> ClientResult<RawResponse> {
            Ok(RawResponse { status: 200, body: b"{}".to_vec() })
        }
    }

    #[test]
    fn add_h_on_qubit_2() {
        let mut session = Session::new();
        session.form_mut().set_str(Field::Qubit, "2").unwrap();
        assert_eq!(session.add_gate(), Gate::h(2));
        assert_eq!(session.circuit().snapshot(), &[Gate::h(2)]);
    }

    #[test]
    fn add_cnot() {
        let mut session = Session::new();
        session.add_gate();
        session.form_mut()
            .select(GateKind::CNOT)
            .set(Field::Control, 0)
            .set(Field::Target, 1);
        session.add_gate();
        assert_eq!(session.circuit().len(), 2);
        assert_eq!(session.circuit().last(), Some(&Gate::cnot(0, 1)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut session = Session::new();
        session.add_gate();
        let pending = session.begin_submit();
        session.finish_submit(pending.token, Outcome::Failed);
        assert!(!session.results().is_empty());
        session.clear();
        assert!(session.circuit().is_empty());
        assert!(session.results().is_empty());
        session.clear();
        assert!(session.circuit().is_empty());
        assert!(session.results().is_empty());
    }

    #[test]
    fn latest_submit_wins() {
        let mut session = Session::new();
        session.add_gate();
        let first = session.begin_submit();
        session.add_gate();
        let second = session.begin_submit();
        assert_eq!(first.circuit.len(), 1);
        assert_eq!(second.circuit.len(), 2);
        assert!(!session.is_current(first.token));
        assert!(session.finish_submit(second.token, Outcome::NoStatevector));
        assert!(!session.finish_submit(first.token, Outcome::Failed));
        assert_eq!(session.results().get(), Some(&Outcome::NoStatevector));
    }

    #[test]
    fn clear_invalidates_in_flight() {
        let mut session = Session::new();
        session.add_gate();
        let pending = session.begin_submit();
        session.clear();
        assert!(!session.finish_submit(pending.token, Outcome::Failed));
        assert!(session.results().is_empty());
    }

    #[test]
    fn simulate_stores_outcome() {
        let client =
            SimulationClient::with_transport(
                ClientConfig::default(),
                Fixed(r#"{"statevector":["0.71|00>","0.71|11>"]}"#),
            );
        let mut session = Session::new();
        session.add_gate();
        let lines = session.simulate(&client).lines();
        assert_eq!(lines, vec!["0.71|00>", "0.71|11>"]);
    }
}
