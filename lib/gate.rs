//! Single steps of a circuit and their JSON wire form.
//!
//! A [`Gate`] is either a single-qubit Pauli/Hadamard gate acting on one
//! qubit index, or a CNOT acting on a control/target pair. On the wire, each
//! gate is a flat JSON object keyed by `gate`:
//!
//! ```
//! # use qcircuit_form::gate::{ Gate, SingleGate };
//! let h = Gate::Single(SingleGate::H, 2);
//! assert_eq!(
//!     serde_json::to_string(&h).unwrap(),
//!     r#"{"gate":"H","qubit":2}"#,
//! );
//! let cx = Gate::Cnot { control: 0, target: 1 };
//! assert_eq!(
//!     serde_json::to_string(&cx).unwrap(),
//!     r#"{"gate":"CNOT","control":0,"target":1}"#,
//! );
//! ```

use std::{ fmt, str::FromStr };
use serde::{ Deserialize, Serialize };
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("unknown gate '{0}'")]
    UnknownGate(String),

    #[error("gate {0} is missing its '{1}' index")]
    MissingIndex(GateKind, &'static str),

    #[error("gate {0} does not take a '{1}' index")]
    UnexpectedIndex(GateKind, &'static str),
}
pub type GateResult<T> = Result<T, GateError>;
use GateError::*;

/// A single-qubit gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SingleGate {
    /// Hadamard.
    H,
    /// Pauli *x*.
    X,
    /// Pauli *y*.
    Y,
    /// Pauli *z*.
    Z,
}

impl SingleGate {
    /// Return the wire name of the gate.
    pub fn name(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

impl fmt::Display for SingleGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every gate type that can be selected when building a circuit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    CNOT,
}

impl GateKind {
    /// All selectable kinds, in menu order.
    pub const ALL: [GateKind; 5] =
        [Self::H, Self::X, Self::Y, Self::Z, Self::CNOT];

    /// Return the wire name of the gate.
    pub fn name(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::CNOT => "CNOT",
        }
    }

    /// Return the number of qubits the gate acts on.
    pub fn arity(self) -> usize {
        match self {
            Self::CNOT => 2,
            _ => 1,
        }
    }

    /// Return the single-qubit gate this kind names, if any.
    pub fn as_single(self) -> Option<SingleGate> {
        match self {
            Self::H => Some(SingleGate::H),
            Self::X => Some(SingleGate::X),
            Self::Y => Some(SingleGate::Y),
            Self::Z => Some(SingleGate::Z),
            Self::CNOT => None,
        }
    }
}

impl From<SingleGate> for GateKind {
    fn from(gate: SingleGate) -> Self {
        match gate {
            SingleGate::H => Self::H,
            SingleGate::X => Self::X,
            SingleGate::Y => Self::Y,
            SingleGate::Z => Self::Z,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = GateError;

    fn from_str(s: &str) -> GateResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" => Ok(Self::H),
            "X" => Ok(Self::X),
            "Y" => Ok(Self::Y),
            "Z" => Ok(Self::Z),
            "CNOT" | "CX" => Ok(Self::CNOT),
            _ => Err(UnknownGate(s.to_string())),
        }
    }
}

/// A single step of a circuit.
///
/// Qubit indices are plain `usize`s; nothing here checks them against a
/// qubit count, and a CNOT may name the same qubit as control and target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "WireGate", try_from = "WireGate")]
pub enum Gate {
    /// A single-qubit gate on the given qubit.
    Single(SingleGate, usize),
    /// π-rotation about *x* on `target`, controlled by `control`.
    Cnot { control: usize, target: usize },
}

impl Gate {
    /// Create a new Hadamard on qubit `k`.
    pub fn h(k: usize) -> Self { Self::Single(SingleGate::H, k) }

    /// Create a new Pauli *x* on qubit `k`.
    pub fn x(k: usize) -> Self { Self::Single(SingleGate::X, k) }

    /// Create a new Pauli *y* on qubit `k`.
    pub fn y(k: usize) -> Self { Self::Single(SingleGate::Y, k) }

    /// Create a new Pauli *z* on qubit `k`.
    pub fn z(k: usize) -> Self { Self::Single(SingleGate::Z, k) }

    /// Create a new CNOT on qubit `t`, controlled by qubit `c`.
    pub fn cnot(c: usize, t: usize) -> Self {
        Self::Cnot { control: c, target: t }
    }

    /// Return the selectable kind of `self`.
    pub fn kind(&self) -> GateKind {
        match self {
            Self::Single(g, _) => (*g).into(),
            Self::Cnot { .. } => GateKind::CNOT,
        }
    }

    /// Return `true` if `self` is `Single`.
    pub fn is_single(&self) -> bool { matches!(self, Self::Single(..)) }

    /// Return `true` if `self` is `Cnot`.
    pub fn is_cnot(&self) -> bool { matches!(self, Self::Cnot { .. }) }

    /// Return the qubit indices `self` acts on, control first.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Self::Single(_, k) => vec![k],
            Self::Cnot { control, target } => vec![control, target],
        }
    }

    /// Return `true` if `self` is a CNOT whose control is also its target.
    pub fn is_self_controlled(&self) -> bool {
        matches!(self, Self::Cnot { control, target } if control == target)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(g, k) => write!(f, "{} on qubit {}", g, k),
            Self::Cnot { control, target } =>
                write!(f, "CNOT on control {}, target {}", control, target),
        }
    }
}

// flat record used only for (de)serialization
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireGate {
    gate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    qubit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    control: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<usize>,
}

impl From<Gate> for WireGate {
    fn from(gate: Gate) -> Self {
        match gate {
            Gate::Single(g, k) => Self {
                gate: g.name().to_string(),
                qubit: Some(k),
                control: None,
                target: None,
            },
            Gate::Cnot { control, target } => Self {
                gate: GateKind::CNOT.name().to_string(),
                qubit: None,
                control: Some(control),
                target: Some(target),
            },
        }
    }
}

impl TryFrom<WireGate> for Gate {
    type Error = GateError;

    fn try_from(wire: WireGate) -> GateResult<Self> {
        let kind: GateKind = wire.gate.parse()?;
        match kind.as_single() {
            Some(g) => {
                if wire.control.is_some() {
                    return Err(UnexpectedIndex(kind, "control"));
                }
                if wire.target.is_some() {
                    return Err(UnexpectedIndex(kind, "target"));
                }
                let k = wire.qubit.ok_or(MissingIndex(kind, "qubit"))?;
                Ok(Self::Single(g, k))
            },
            None => {
                if wire.qubit.is_some() {
                    return Err(UnexpectedIndex(kind, "qubit"));
                }
                let control =
                    wire.control.ok_or(MissingIndex(kind, "control"))?;
                let target =
                    wire.target.ok_or(MissingIndex(kind, "target"))?;
                Ok(Self::Cnot { control, target })
            },
        }
    }
}
