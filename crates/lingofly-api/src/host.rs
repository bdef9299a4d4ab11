//! Session host that shuts the server down when the session ends.

use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use lingofly_core::host::SessionHost;

/// Flips a watch channel when the session ends; `main` waits on the
/// receiving side to stop serving.
#[derive(Debug)]
pub struct ShutdownHost {
    sender: watch::Sender<bool>,
}

impl ShutdownHost {
    /// Creates the host and the receiver that observes the end of session.
    #[must_use]
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (sender, receiver) = watch::channel(false);
        (Self { sender }, receiver)
    }
}

impl SessionHost for ShutdownHost {
    fn end_session(&self, session_id: Uuid) {
        info!(%session_id, "session ended; shutting down");
        self.sender.send_replace(true);
    }
}

/// Resolves once `receiver` observes the end of session, or the sender is
/// dropped.
pub async fn session_ended(mut receiver: watch::Receiver<bool>) {
    // An Err means the host is gone, which also ends the session.
    let _ = receiver.wait_for(|ended| *ended).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_end_session_resolves_waiter() {
        let (host, receiver) = ShutdownHost::new();
        let waiter = tokio::spawn(session_ended(receiver));

        host.end_session(Uuid::new_v4());

        tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
            .await
            .expect("waiter should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_waiter_stays_pending_until_ended() {
        let (_host, receiver) = ShutdownHost::new();

        let result =
            tokio::time::timeout(std::time::Duration::from_millis(20), session_ended(receiver))
                .await;

        assert!(result.is_err());
    }
}
