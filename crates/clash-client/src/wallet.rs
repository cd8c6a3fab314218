//! Wallet connection state.

use crate::collaborators::WalletConnector;
use crate::error::Result;
use battle_engine::Address;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    Connected(Address),
    Switched(Address),
    Disconnected,
    Unchanged,
}

/// Tracks which account, if any, the client acts for.
#[derive(Clone, Debug, Default)]
pub struct WalletSession {
    address: Option<Address>,
}

impl WalletSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&self) -> Option<Address> {
        self.address
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub async fn connect<W: WalletConnector>(&mut self, wallet: &W) -> Result<Address> {
        let address = wallet.connect().await?;
        info!(address = %address, "Wallet connected");
        self.address = Some(address);
        Ok(address)
    }

    pub fn disconnect<W: WalletConnector>(&mut self, wallet: &W) {
        wallet.disconnect();
        if let Some(address) = self.address.take() {
            info!(address = %address, "Wallet disconnected");
        }
    }

    /// Fold an `accountsChanged` notification into the session. An empty
    /// list disconnects; otherwise the first account becomes current.
    pub fn apply_accounts(&mut self, accounts: &[Address]) -> WalletEvent {
        let event = match (accounts.first(), self.address) {
            (None, None) => WalletEvent::Unchanged,
            (None, Some(_)) => WalletEvent::Disconnected,
            (Some(&next), None) => WalletEvent::Connected(next),
            (Some(&next), Some(current)) if next == current => WalletEvent::Unchanged,
            (Some(&next), Some(_)) => WalletEvent::Switched(next),
        };
        self.address = accounts.first().copied();
        if event != WalletEvent::Unchanged {
            info!(?event, "Wallet accounts changed");
        }
        event
    }

    /// Wait for the next account change and apply it. `None` once the
    /// wallet drops its notification channel.
    pub async fn next_change(
        &mut self,
        changes: &mut UnboundedReceiver<Vec<Address>>,
    ) -> Option<WalletEvent> {
        let accounts = changes.recv().await?;
        Some(self.apply_accounts(&accounts))
    }
}
