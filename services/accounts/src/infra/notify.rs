use tracing::info;

use crate::domain::repository::Notifier;
use crate::error::AccountsError;

/// Development stand-in for the SMS/email gateway: logs the dispatch instead
/// of sending it. The production gateway implements the same port.
#[derive(Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    async fn send(&self, destination: &str, code: &str) -> Result<(), AccountsError> {
        info!(%destination, %code, "verification code dispatched");
        Ok(())
    }
}
