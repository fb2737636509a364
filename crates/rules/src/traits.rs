//! Rule trait - interface implemented by every transfer rule

use crate::error::RuleResult;
use crate::request::TransferRequest;
use crate::sink::ResultSink;

/// A pluggable transfer check
///
/// `is_transfer_valid` never fails for a business reason: refusals are
/// verdicts reported to the sink. `Err` is reserved for operations the
/// rule does not support and for infrastructure failures.
pub trait Rule: Send + Sync {
    /// Rule name for logging/debugging
    fn name(&self) -> &str;

    /// Check a transfer and report the verdict to `sink`
    fn is_transfer_valid(&self, request: &TransferRequest, sink: &dyn ResultSink) -> RuleResult<()>;

    /// Update rule state after a transfer went through
    fn after_transfer_hook(&self, request: &TransferRequest) -> RuleResult<()>;

    /// Whether the engine should call `after_transfer_hook`
    fn has_after_transfer_hook(&self) -> bool {
        false
    }
}
