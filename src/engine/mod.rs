mod audit;
mod extension;
mod feasibility;
pub mod interval;
mod types;

pub use audit::audit;
pub use extension::{evaluate_extension, extension_conflicts, extension_window, ExtraNights};
pub use feasibility::{decide_new_booking, evaluate_new_booking};
pub use types::{EngineError, Outcome, ReasonClass, ReasonCode, Violation, ViolationKind};

fn rejected(reason: ReasonCode) -> Outcome {
    #[cfg(feature = "logging")]
    tracing::debug!(reason = reason.as_str(), "request rejected");
    Outcome::Rejected(reason)
}
