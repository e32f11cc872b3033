//! This package builds [quantum circuits][qcircuits] one gate at a time and
//! hands them to a remote statevector simulation service.
//!
//! - [`gate`] defines the individual circuit steps: single-qubit H, X, Y, Z
//! gates and two-qubit CNOTs, along with their JSON wire form.
//! - [`circuit`] holds an ordered, append-only sequence of gates.
//! - [`form`] tracks a pending gate selection and validates user-entered qubit
//! indices before they reach a circuit.
//! - [`client`] submits circuits to the simulation service and reduces every
//! answer to a displayable [`Outcome`][outcome::Outcome].
//! - [`outcome`] holds the displayable results themselves.
//! - [`session`] ties the above together into a single owned store, discarding
//! responses to superseded submissions.
//!
//! No simulation happens locally, and nothing here checks that a circuit is
//! physically meaningful: qubit indices are never compared against a qubit
//! count, and a CNOT may target its own control.
//!
//! [qcircuits]: https://en.wikipedia.org/wiki/Quantum_circuit

pub mod gate;
pub mod circuit;
pub mod form;
pub mod outcome;
pub mod client;
pub mod session;

pub use gate::{ Gate, GateKind, SingleGate };
pub use circuit::Circuit;
pub use form::{ Field, GateForm };
pub use outcome::{ Outcome, ResultStore };
pub use client::{ ClientConfig, SimulationClient };
pub use session::Session;
