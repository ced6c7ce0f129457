//! Hand-off to the recalculation queue that recomputes a player's derived
//! state after their roster shrinks.

use crate::database::models::Player;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recalculation {
    pub priority: u8,
    pub player: Player,
}

pub type RecalcSender = mpsc::UnboundedSender<Recalculation>;
pub type RecalcReceiver = mpsc::UnboundedReceiver<Recalculation>;

pub fn channel() -> (RecalcSender, RecalcReceiver) {
    mpsc::unbounded_channel()
}

/// Drains the queue, logging each request. Runs until every sender is dropped.
pub async fn run_consumer(mut rx: RecalcReceiver) {
    while let Some(req) = rx.recv().await {
        tracing::info!(
            target: "units.recalc",
            player_id = req.player.id,
            priority = req.priority,
            "recalculation requested"
        );
    }
    tracing::debug!(target: "units.recalc", "recalculation queue closed");
}
