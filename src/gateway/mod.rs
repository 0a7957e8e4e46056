//! Gateway: the main event loop connecting channels and the backend.
//!
//! Updates are handled one at a time in arrival order. A failing update is
//! logged and dropped; it never stops the loop.

mod dispatch;

#[cfg(test)]
mod tests;

use crate::commands::command_menu;
use crate::i18n::{Lang, DEFAULT_LANG};
use camscout_core::{
    message::{IncomingMessage, OutgoingMessage},
    traits::{Backend, Channel},
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// The central gateway that routes messages between channels and the backend.
pub struct Gateway {
    pub(super) backend: Arc<dyn Backend>,
    pub(super) channels: HashMap<String, Arc<dyn Channel>>,
    /// Send a localized error instead of staying silent when a lookup fails.
    pub(super) notify_failures: bool,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(
        backend: Arc<dyn Backend>,
        channels: HashMap<String, Arc<dyn Channel>>,
        notify_failures: bool,
    ) -> Self {
        Self {
            backend,
            channels,
            notify_failures,
        }
    }

    /// Run the main event loop until Ctrl-C or until every channel closes.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!(
            "camscout gateway running | channels: {} | failures: {}",
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            if self.notify_failures {
                "reported"
            } else {
                "silent"
            },
        );

        self.register_command_menus().await;

        let (tx, mut rx) = mpsc::channel::<IncomingMessage>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(msg) = channel_rx.recv().await {
                    if tx.send(msg).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        loop {
            tokio::select! {
                maybe = rx.recv() => match maybe {
                    Some(incoming) => self.process(incoming).await,
                    None => {
                        info!("All channels closed");
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Handle one update and deliver the reply, if any.
    async fn process(&self, incoming: IncomingMessage) {
        if let Some(reply) = self.handle_message(&incoming).await {
            self.send(&incoming, reply).await;
        }
    }

    async fn send(&self, incoming: &IncomingMessage, msg: OutgoingMessage) {
        match self.channels.get(&incoming.channel) {
            Some(channel) => {
                if let Err(e) = channel.send(msg).await {
                    error!("failed to send message to {}: {e}", incoming.sender_id);
                }
            }
            None => warn!("no channel named {} for reply", incoming.channel),
        }
    }

    /// Publish the slash-command menu in every supported language.
    async fn register_command_menus(&self) {
        for (name, channel) in &self.channels {
            // Empty code = menu for clients in any other language.
            let menus = std::iter::once(("", command_menu(DEFAULT_LANG.code())))
                .chain(Lang::ALL.iter().map(|l| (l.code(), command_menu(l.code()))));
            for (code, menu) in menus {
                if let Err(e) = channel.set_commands(code, &menu).await {
                    warn!("{name}: failed to register command menu ({code:?}): {e}");
                }
            }
        }
    }

    async fn shutdown(&self) {
        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }
        info!("camscout gateway stopped");
    }
}
