//! In-progress gate selection prior to adding it to a circuit.
//!
//! A [`GateForm`] holds the selected [`GateKind`] and one stored value for
//! each qubit index field. Only the fields relevant to the selected kind are
//! read when the form is committed, but switching kinds never discards the
//! others.
//!
//! Text input is validated when it is written into the form: anything that
//! is not a non-negative integer is rejected and the stored value is left as
//! it was.
//!
//! ```
//! # use qcircuit_form::{ form::{ Field, GateForm }, gate::{ Gate, GateKind } };
//! let mut form = GateForm::new();
//! form.select(GateKind::CNOT);
//! form.set_str(Field::Control, "0").unwrap();
//! form.set_str(Field::Target, "1").unwrap();
//! assert_eq!(form.commit(), Gate::cnot(0, 1));
//! assert!(form.set_str(Field::Target, "-1").is_err());
//! ```

use std::{ fmt, num::IntErrorKind };
use thiserror::Error;
use crate::gate::{ Gate, GateKind, GateResult };

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} index is empty")]
    Empty(Field),

    #[error("{0} index must be non-negative, got '{1}'")]
    Negative(Field, String),

    #[error("{0} index must be an integer, got '{1}'")]
    NotAnInteger(Field, String),

    #[error("{0} index '{1}' is too large")]
    TooLarge(Field, String),
}
pub type FormResult<T> = Result<T, FormError>;
use FormError::*;

/// A qubit index field of the form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Target of a single-qubit gate.
    Qubit,
    /// Control of a CNOT.
    Control,
    /// Target of a CNOT.
    Target,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qubit => f.write_str("qubit"),
            Self::Control => f.write_str("control"),
            Self::Target => f.write_str("target"),
        }
    }
}

// parse a user-entered qubit index
fn parse_index(field: Field, input: &str) -> FormResult<usize> {
    let s = input.trim();
    s.parse::<usize>()
        .map_err(|err| match err.kind() {
            IntErrorKind::Empty => Empty(field),
            IntErrorKind::PosOverflow => TooLarge(field, s.to_string()),
            _ => {
                let negative_int =
                    s.strip_prefix('-')
                    .is_some_and(|digits| {
                        !digits.is_empty()
                            && digits.bytes().all(|b| b.is_ascii_digit())
                    });
                if negative_int {
                    Negative(field, s.to_string())
                } else {
                    NotAnInteger(field, s.to_string())
                }
            },
        })
}

/// The user's pending gate selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateForm {
    kind: GateKind,
    qubit: usize,
    control: usize,
    target: usize,
}

impl Default for GateForm {
    fn default() -> Self {
        Self { kind: GateKind::H, qubit: 0, control: 0, target: 1 }
    }
}

impl GateForm {
    /// Create a new form with a Hadamard selected on qubit 0, and a CNOT
    /// pair preset to control 0, target 1.
    pub fn new() -> Self { Self::default() }

    /// Return the selected gate kind.
    pub fn kind(&self) -> GateKind { self.kind }

    /// Select a gate kind, keeping all stored field values.
    pub fn select(&mut self, kind: GateKind) -> &mut Self {
        self.kind = kind;
        self
    }

    /// Select a gate kind by name.
    pub fn select_str(&mut self, name: &str) -> GateResult<&mut Self> {
        let kind: GateKind = name.parse()?;
        Ok(self.select(kind))
    }

    /// Return the stored value of a field.
    pub fn get(&self, field: Field) -> usize {
        match field {
            Field::Qubit => self.qubit,
            Field::Control => self.control,
            Field::Target => self.target,
        }
    }

    /// Store an already-validated index in a field.
    pub fn set(&mut self, field: Field, index: usize) -> &mut Self {
        match field {
            Field::Qubit => { self.qubit = index; },
            Field::Control => { self.control = index; },
            Field::Target => { self.target = index; },
        }
        self
    }

    /// Parse and store raw text input in a field.
    ///
    /// Leading and trailing whitespace is ignored. On error, the field keeps
    /// its previous value.
    pub fn set_str(&mut self, field: Field, input: &str)
        -> FormResult<&mut Self>
    {
        let index = parse_index(field, input)?;
        Ok(self.set(field, index))
    }

    /// Return the fields read by [`commit`][Self::commit] for the selected
    /// kind.
    pub fn relevant_fields(&self) -> &'static [Field] {
        match self.kind {
            GateKind::CNOT => &[Field::Control, Field::Target],
            _ => &[Field::Qubit],
        }
    }

    /// Build a gate from the selected kind and its relevant fields.
    ///
    /// No further checks are made; in particular, a CNOT whose control
    /// equals its target is returned as-is.
    pub fn commit(&self) -> Gate {
        let gate =
            match self.kind.as_single() {
                Some(g) => Gate::Single(g, self.qubit),
                None => Gate::Cnot { control: self.control, target: self.target },
            };
        if gate.is_self_controlled() {
            tracing::warn!(%gate, "CNOT control and target are the same qubit");
        }
        gate
    }
}
