//! Announcements delivered off the game loop
//!
//! The session pushes events into an unbounded channel and moves on; a
//! background task voices them. Nothing here can stall a tick.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::info;

use crate::session::{Announcement, Announcer};

/// Sends announcements to a background voice task
#[derive(Debug, Clone)]
pub struct ChannelAnnouncer {
    tx: UnboundedSender<Announcement>,
}

impl ChannelAnnouncer {
    pub fn new(tx: UnboundedSender<Announcement>) -> Self {
        Self { tx }
    }
}

impl Announcer for ChannelAnnouncer {
    fn announce(&self, event: Announcement) {
        // a closed voice task is not the game's problem
        let _ = self.tx.send(event);
    }
}

/// Spawn the voice task on the current runtime.
///
/// Must be called from within a tokio runtime.
pub fn spawn_voice() -> (ChannelAnnouncer, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(voice(rx));
    (ChannelAnnouncer::new(tx), handle)
}

async fn voice(mut rx: UnboundedReceiver<Announcement>) {
    while let Some(event) = rx.recv().await {
        info!(target: "snake::voice", ?event, "{}", event.phrase());
    }
}
