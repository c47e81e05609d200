use poll_promise::Promise;
use serde_json::Value;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};

use crate::config::STORE;
use crate::domain::AppConfig;
use crate::store::{ConfigStore, StoreError, Subscription};

use super::state::{MessageKind, PanelStatus, StatusMessage};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// What the store subscription pushes into the panel
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Snapshot(Option<Value>),
    Failed(StoreError),
}

/// Admin form state for the referral program and app display settings.
///
/// A panel is "mounted" by [`SettingsPanel::mount`], which subscribes to the
/// configuration document. Store callbacks may run on any thread; they only
/// forward into a channel that [`SettingsPanel::poll_sync_events`] drains on
/// the owning thread. Dropping the panel releases the subscription.
pub struct SettingsPanel {
    pub(super) store: Arc<dyn ConfigStore>,
    pub(super) config: AppConfig,
    pub(super) status: PanelStatus,
    pub(super) message: Option<StatusMessage>,
    pub(super) save_promise: Option<Promise<Result<(), StoreError>>>,
    subscription: Option<Subscription>,
    events: Receiver<SyncEvent>,
}

impl SettingsPanel {
    pub fn mount(store: Arc<dyn ConfigStore>) -> Self {
        let (tx, rx) = mpsc::channel();
        let error_tx = tx.clone();

        let mut panel = Self {
            store: Arc::clone(&store),
            config: AppConfig::default(),
            status: PanelStatus::Loading,
            message: None,
            save_promise: None,
            subscription: None,
            events: rx,
        };

        log::info!("Settings panel: subscribing to {}", STORE.config_path);
        let subscribed = store.subscribe(
            STORE.config_path,
            Box::new(move |snapshot| {
                // The receiver is gone once the panel unmounts; late pushes are moot.
                let _ = tx.send(SyncEvent::Snapshot(snapshot));
            }),
            Box::new(move |err| {
                let _ = error_tx.send(SyncEvent::Failed(err));
            }),
        );

        match subscribed {
            Ok(subscription) => panel.subscription = Some(subscription),
            Err(err) => {
                log::error!("Settings panel: setup failed: {}", err);
                panel.status = PanelStatus::Error(err.to_string());
            }
        }

        // Stores that answer synchronously have already queued the first snapshot.
        panel.poll_sync_events();
        panel
    }

    /// Tears the panel down and mounts a fresh one against the same store.
    pub fn reload(&mut self) {
        log::info!("Settings panel: reloading");
        let store = Arc::clone(&self.store);
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        *self = Self::mount(store);
    }

    pub fn unmount(mut self) {
        if let Some(subscription) = self.subscription.take() {
            log::info!("Settings panel: cleaning up store listener");
            subscription.unsubscribe();
        }
    }

    /// Drains pending sync and save results. Call once per frame.
    pub fn update(&mut self) {
        self.poll_sync_events();
        self.poll_save();
    }

    /// Applies every queued store event, returning how many were handled.
    pub fn poll_sync_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.apply_sync_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        handled
    }

    fn apply_sync_event(&mut self, event: SyncEvent) {
        if self.status.is_error() {
            return;
        }
        match event {
            SyncEvent::Snapshot(snapshot) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_store_events {
                    log::info!("Settings panel: snapshot received {:?}", snapshot);
                }
                if snapshot.is_none() {
                    log::info!("Settings panel: no stored config, using defaults");
                }
                self.config = AppConfig::from_snapshot(snapshot.as_ref());
                self.status = PanelStatus::Ready;
            }
            SyncEvent::Failed(err) => {
                log::error!("Settings panel: store read error: {}", err);
                self.status = PanelStatus::Error(err.to_string());
                self.subscription = None;
            }
        }
    }

    pub(super) fn show_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message = Some(StatusMessage::new(kind, text));
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn status(&self) -> &PanelStatus {
        &self.status
    }

    /// The current banner, if it has not expired yet
    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref().filter(|msg| !msg.is_expired())
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, ReferralCommission};
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn mounted(store: &InMemoryStore) -> SettingsPanel {
        SettingsPanel::mount(Arc::new(store.clone()))
    }

    #[test]
    fn absent_document_shows_defaults() {
        let store = InMemoryStore::new();
        let panel = mounted(&store);
        assert_eq!(panel.status(), &PanelStatus::Ready);

        let commission = &panel.config().referral_commission;
        assert_eq!(commission.commission_rate, 10.0);
        assert_eq!(commission.min_withdrawal, 10.0);
        assert_eq!(commission.currency, Currency::Usdt);
        let rates: Vec<f64> = commission.levels.iter().map(|l| l.rate).collect();
        assert_eq!(rates, vec![10.0, 5.0, 2.0]);
    }

    #[test]
    fn stays_loading_until_first_snapshot() {
        let store = InMemoryStore::new();
        let (tx, rx) = mpsc::channel();
        let mut panel = SettingsPanel {
            store: Arc::new(store),
            config: AppConfig::default(),
            status: PanelStatus::Loading,
            message: None,
            save_promise: None,
            subscription: None,
            events: rx,
        };
        assert_eq!(panel.poll_sync_events(), 0);
        assert_eq!(panel.status(), &PanelStatus::Loading);

        tx.send(SyncEvent::Snapshot(Some(json!({ "appName": "DreamEarn" })))).unwrap();
        assert_eq!(panel.poll_sync_events(), 1);
        assert_eq!(panel.status(), &PanelStatus::Ready);
        assert_eq!(panel.config().app_name, "DreamEarn");
    }

    #[test]
    fn inbound_snapshot_overwrites_local_edits() {
        let store = InMemoryStore::new();
        let mut panel = mounted(&store);
        panel.set_commission_rate("42");
        assert_eq!(panel.config().referral_commission.commission_rate, 42.0);

        store.set_document(
            STORE.config_path,
            Some(json!({ "referralCommission": { "commissionRate": 7 } })),
        );
        panel.update();
        assert_eq!(panel.config().referral_commission.commission_rate, 7.0);
    }

    #[test]
    fn setup_failure_is_terminal_error() {
        let store = InMemoryStore::new();
        store.fail_subscriptions_with(Some("database offline"));
        let mut panel = mounted(&store);
        assert_eq!(
            panel.status(),
            &PanelStatus::Error("Setup Error: database offline".into())
        );
        assert!(!panel.is_subscribed());

        // Reload re-enters the lifecycle once the store recovers.
        store.fail_subscriptions_with(None);
        panel.reload();
        assert_eq!(panel.status(), &PanelStatus::Ready);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn read_error_is_terminal_and_ignores_later_snapshots() {
        let store = InMemoryStore::new();
        let mut panel = mounted(&store);
        store.emit_error(STORE.config_path, "permission denied");
        panel.update();
        assert_eq!(
            panel.status(),
            &PanelStatus::Error("Store Error: permission denied".into())
        );
        assert!(!panel.is_subscribed());

        store.set_document(STORE.config_path, Some(json!({ "appName": "Late" })));
        panel.update();
        assert!(panel.status().is_error());
        assert_eq!(panel.config().app_name, "");
    }

    #[test]
    fn unmount_and_drop_release_subscription() {
        let store = InMemoryStore::new();
        let panel = mounted(&store);
        assert_eq!(store.subscriber_count(), 1);
        panel.unmount();
        assert_eq!(store.subscriber_count(), 0);

        {
            let _panel = mounted(&store);
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn reload_keeps_one_subscription() {
        let store = InMemoryStore::new();
        let mut panel = mounted(&store);
        panel.reload();
        panel.reload();
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(panel.config().referral_commission, ReferralCommission::default());
    }
}
