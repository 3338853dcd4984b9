//! Gate command register and gate actions

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Command held in a gate's register.
///
/// The register is a depth-one channel: it holds at most one pending
/// command, and a second deposit overwrites the first without
/// acknowledgment (last-write-wins by design).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateCommand {
    /// Gate hardware should open on its next poll
    Open,
    /// Nothing pending
    None,
}

impl GateCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::None => "NONE",
        }
    }

    /// Parse a register cell. Anything unrecognized reads as `None`,
    /// so a corrupted cell can never open a gate.
    pub fn from_str(s: &str) -> Self {
        match s {
            "OPEN" => Self::Open,
            _ => Self::None,
        }
    }
}

impl std::fmt::Display for GateCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One gate's register row: `(gate_id, command, booking_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GateRegister {
    pub gate_id: String,
    pub command: GateCommand,
    /// Booking that triggered the pending command; empty when idle
    pub booking_id: Option<String>,
}

impl GateRegister {
    pub fn idle(gate_id: impl Into<String>) -> Self {
        Self {
            gate_id: gate_id.into(),
            command: GateCommand::None,
            booking_id: None,
        }
    }

    pub fn pending(gate_id: impl Into<String>, booking_id: impl Into<String>) -> Self {
        Self {
            gate_id: gate_id.into(),
            command: GateCommand::Open,
            booking_id: Some(booking_id.into()),
        }
    }

    /// Decode a `GateControl` row `(gate_id, command, booking_id)`.
    pub fn from_row(row: &[String]) -> Option<Self> {
        let gate_id = row.first()?.clone();
        let command = GateCommand::from_str(row.get(1).map(String::as_str).unwrap_or(""));
        let booking_id = row.get(2).filter(|s| !s.is_empty()).cloned();
        Some(Self {
            gate_id,
            command,
            booking_id,
        })
    }

    /// Encode as a `GateControl` row.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.gate_id.clone(),
            self.command.as_str().to_string(),
            self.booking_id.clone().unwrap_or_default(),
        ]
    }
}

/// Direction of a requested gate action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GateAction {
    Entry,
    Exit,
}

impl GateAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(Self::Entry),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_roundtrip() {
        for cmd in &[GateCommand::Open, GateCommand::None] {
            assert_eq!(&GateCommand::from_str(cmd.as_str()), cmd);
        }
    }

    #[test]
    fn unknown_command_reads_as_none() {
        assert_eq!(GateCommand::from_str("open"), GateCommand::None);
        assert_eq!(GateCommand::from_str(""), GateCommand::None);
        assert_eq!(GateCommand::from_str("CLOSE"), GateCommand::None);
    }

    #[test]
    fn action_parse() {
        assert_eq!(GateAction::parse("entry"), Some(GateAction::Entry));
        assert_eq!(GateAction::parse("exit"), Some(GateAction::Exit));
        assert_eq!(GateAction::parse("Entry"), None);
        assert_eq!(GateAction::parse(""), None);
    }

    #[test]
    fn idle_register_has_no_booking() {
        let reg = GateRegister::idle("G1");
        assert_eq!(reg.command, GateCommand::None);
        assert!(reg.booking_id.is_none());
    }

    #[test]
    fn register_row_roundtrip() {
        let reg = GateRegister::pending("G1", "SPAB12CD");
        let decoded = GateRegister::from_row(&reg.to_row()).unwrap();
        assert_eq!(decoded, reg);

        let idle = GateRegister::idle("G2");
        let decoded = GateRegister::from_row(&idle.to_row()).unwrap();
        assert_eq!(decoded, idle);
    }

    #[test]
    fn short_row_decodes_as_idle() {
        let reg = GateRegister::from_row(&["G1".to_string()]).unwrap();
        assert_eq!(reg.command, GateCommand::None);
        assert!(GateRegister::from_row(&[]).is_none());
    }
}
