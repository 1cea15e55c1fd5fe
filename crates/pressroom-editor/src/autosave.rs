//! Background auto-save driver.

use std::sync::Arc;
use std::time::Duration;

use pressroom_core::repository::BlogRepository;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::session::EditorSession;

/// Drive periodic auto-save ticks against a shared editor session.
///
/// The first tick fires one full interval after spawn, not
/// immediately. Ticks delayed by a slow save are not bunched up
/// afterwards. Abort the returned handle to stop the driver, typically
/// when the editor closes.
pub fn spawn_autosave<B>(
    session: Arc<Mutex<EditorSession<B>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    B: BlogRepository + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() yields immediately on the first tick; swallow it so
        // the editor gets a full interval of quiet after opening.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let outcome = session.lock().await.autosave_tick().await;
            debug!(?outcome, "auto-save tick");
        }
    })
}
