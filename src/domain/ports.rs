//! Outbound ports - interfaces the domain needs the outside world to implement

use async_trait::async_trait;

use super::gate::GateAction;

/// Outcome of a ticket-validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// The validation service accepted and decremented the ticket's
    /// remaining uses; the caller may now deposit a gate command.
    Authorized,
    /// Anything else: invalid/expired/exhausted ticket, a non-success
    /// response body, or a transport failure. Terminal for the request.
    Rejected { reason: String },
}

/// Port for the external ticket-validation service.
///
/// The service atomically checks and decrements a booking's remaining
/// entry/exit allowance. No retries: one validation failure is terminal
/// for that request, and the caller must not deposit a gate command
/// before observing `Authorized`.
#[async_trait]
pub trait TicketValidator: Send + Sync {
    async fn authorize(&self, booking_id: &str, action: GateAction) -> Authorization;
}
