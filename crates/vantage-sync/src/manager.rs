//! Sync manager
//!
//! Coordinates one channel of cooperating widgets with exactly one master.
//! The master emits throttled property updates over the broadcast
//! transport; slaves apply them through each property's transform. All
//! `persistent` properties additionally serialize into one row of a host
//! document table, keyed by channel, written debounced after interaction
//! quiesces and guarded by an optimistic version check.
//!
//! Transport and persistence failures are non-fatal: they are logged,
//! surfaced through the error callback, and sync degrades to local-only
//! operation.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vantage_core::{
    BroadcastTransport, CellValue, Clock, PropertyValue, SyncMessage, SystemClock, TableAdapter,
    UserAction,
};

use crate::error::{SyncError, SyncResult};
use crate::property::SyncProperty;
use crate::throttle::Debouncer;

/// Configuration for a sync manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Sync channel; widgets sharing a channel exchange state
    pub channel: String,

    /// Document table holding one persisted row per channel
    pub table_id: String,

    /// Throttle window for properties without their own, in milliseconds
    pub default_throttle_ms: u64,

    /// Quiet period before the persisted row is written, in milliseconds
    pub persist_debounce_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            channel: "main".to_string(),
            table_id: "VantageSync".to_string(),
            default_throttle_ms: 33,
            persist_debounce_ms: 500,
        }
    }
}

impl SyncConfig {
    /// Config for a named channel with default timings.
    pub fn for_channel(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            ..Self::default()
        }
    }
}

/// Whether this widget drives the channel or follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncRole {
    Master,
    Slave,
}

/// Transient snapshot of a manager's state. Derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatus {
    pub id: String,
    pub channel: String,
    pub role: SyncRole,
    pub connected: bool,
    pub properties: Vec<String>,
    pub last_sync_ms: Option<u64>,
}

/// Callback invoked for every non-fatal sync failure.
pub type ErrorCallback = Box<dyn Fn(&SyncError)>;

/// Coordinates property sync for one widget on one channel.
pub struct SyncManager<S> {
    config: SyncConfig,
    id: String,
    role: SyncRole,
    connected: bool,
    properties: Vec<SyncProperty<S>>,
    transport: Box<dyn BroadcastTransport>,
    table: Box<dyn TableAdapter>,
    clock: Arc<dyn Clock>,
    on_error: Option<ErrorCallback>,
    debouncer: Debouncer,
    last_sync_ms: Option<u64>,
    row_id: Option<i64>,
    row_version: i64,
}

impl<S> SyncManager<S> {
    /// Create a manager with the system clock.
    pub fn new(
        config: SyncConfig,
        role: SyncRole,
        transport: Box<dyn BroadcastTransport>,
        table: Box<dyn TableAdapter>,
    ) -> Self {
        Self {
            config,
            id: format!("widget-{}", uuid::Uuid::new_v4()),
            role,
            connected: false,
            properties: Vec::new(),
            transport,
            table,
            clock: Arc::new(SystemClock),
            on_error: None,
            debouncer: Debouncer::new(),
            last_sync_ms: None,
            row_id: None,
            row_version: 0,
        }
    }

    /// Replace the clock (tests use a manual clock).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Install the non-fatal error callback.
    pub fn with_error_callback(mut self, on_error: ErrorCallback) -> Self {
        self.on_error = Some(on_error);
        self
    }

    /// This widget's id, used for echo suppression.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The widget's role on the channel.
    pub fn role(&self) -> SyncRole {
        self.role
    }

    /// Register a property. A property with the same name is overwritten.
    pub fn register(&mut self, property: SyncProperty<S>) {
        if let Some(existing) = self
            .properties
            .iter_mut()
            .find(|p| p.name() == property.name())
        {
            warn!(name = property.name(), "overwriting registered property");
            *existing = property;
        } else {
            self.properties.push(property);
        }
    }

    /// Remove a property by name. Returns whether it existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.properties.len();
        self.properties.retain(|p| p.name() != name);
        self.properties.len() != before
    }

    /// Open the channel: load the persisted row (if any) and apply it to
    /// widget state through each property's transform. Missing table or
    /// row is non-fatal; the channel starts fresh.
    pub fn connect(&mut self, state: &mut S) {
        self.connected = true;

        let data = match self.table.fetch_table(&self.config.table_id) {
            Ok(data) => data,
            Err(err) => {
                self.report(&SyncError::Table(err));
                return;
            }
        };

        let row = data
            .rows()
            .into_iter()
            .find(|r| r.field("channel").as_str() == Some(self.config.channel.as_str()));
        let Some(row) = row else {
            debug!(channel = %self.config.channel, "no persisted row for channel");
            return;
        };

        self.row_id = Some(row.id);
        self.row_version = match row.field("version") {
            CellValue::Int(v) => *v,
            _ => 0,
        };

        let Some(raw) = row.field("state").as_str() else {
            return;
        };
        let parsed: Result<BTreeMap<String, serde_json::Value>, _> = serde_json::from_str(raw);
        let snapshot = match parsed {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.report(&SyncError::MalformedState {
                    message: err.to_string(),
                });
                return;
            }
        };

        for (name, json) in snapshot {
            let Some(value) = PropertyValue::from_json(&json) else {
                continue;
            };
            if let Some(prop) = self.properties.iter_mut().find(|p| p.name() == name) {
                prop.write(state, value);
            }
        }
        debug!(channel = %self.config.channel, version = self.row_version, "bootstrapped from persisted row");
    }

    /// Close the channel and clear all pending timers and gates. No
    /// further emits or receives take effect until `connect`.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.debouncer.reset();
        for prop in &mut self.properties {
            prop.gate.reset();
        }
    }

    /// Emit the current value of a property (master only).
    ///
    /// Returns whether a message was actually published: values inside the
    /// throttle window are dropped, and transport failures degrade to
    /// local-only operation. Emitting an unregistered name is an error.
    pub fn emit(&mut self, name: &str, state: &S) -> SyncResult<bool> {
        if !self.connected || self.role != SyncRole::Master {
            return Ok(false);
        }

        let now = self.clock.now_ms();
        let default_throttle = self.config.default_throttle_ms;

        let prop = self
            .properties
            .iter_mut()
            .find(|p| p.name() == name)
            .ok_or_else(|| SyncError::UnknownProperty {
                name: name.to_string(),
            })?;

        let interval = prop.throttle_ms().unwrap_or(default_throttle);
        if !prop.gate.pass(now, interval) {
            return Ok(false);
        }

        let message = SyncMessage {
            property: name.to_string(),
            value: prop.read(state),
            master_id: self.id.clone(),
            channel: self.config.channel.clone(),
            ts: now,
        };
        // The local value changed regardless of whether the broadcast goes
        // out; persistence runs through the table adapter, not the
        // transport.
        if prop.is_persistent() {
            self.debouncer.note(now);
        }

        if let Err(err) = self.transport.publish(&message) {
            self.report(&SyncError::Transport(err));
            return Ok(false);
        }

        self.last_sync_ms = Some(now);
        debug!(property = name, ts = now, "emitted");
        Ok(true)
    }

    /// Apply an incoming broadcast message to widget state.
    ///
    /// Messages from other channels are ignored, as are this widget's own
    /// messages (echo suppression) and unregistered property names.
    pub fn receive(&mut self, message: &SyncMessage, state: &mut S) {
        if !self.connected || message.channel != self.config.channel {
            return;
        }
        if message.master_id == self.id {
            debug!(property = %message.property, "dropping own echo");
            return;
        }

        if let Some(prop) = self
            .properties
            .iter_mut()
            .find(|p| p.name() == message.property)
        {
            prop.write(state, message.value.clone());
            self.last_sync_ms = Some(self.clock.now_ms());
        }
    }

    /// Drive debounced persistence. Call periodically (or after the host's
    /// idle timer); once the quiet period has elapsed since the last
    /// dirtying emit, all persistent properties are written as one row.
    ///
    /// Returns whether a write happened.
    pub fn tick(&mut self, state: &S) -> bool {
        if !self.connected || self.role != SyncRole::Master {
            return false;
        }
        let now = self.clock.now_ms();
        if !self.debouncer.is_due(now, self.config.persist_debounce_ms) {
            return false;
        }
        self.debouncer.reset();
        self.persist(state, now)
    }

    fn persist(&mut self, state: &S, now: u64) -> bool {
        let mut snapshot = serde_json::Map::new();
        for prop in &self.properties {
            if prop.is_persistent() {
                snapshot.insert(prop.name().to_string(), prop.read(state).to_json());
            }
        }
        let raw = serde_json::Value::Object(snapshot).to_string();

        // Optimistic check: another widget instance may have written the
        // row since we last saw it.
        let remote = match self.table.fetch_table(&self.config.table_id) {
            Ok(data) => data
                .rows()
                .into_iter()
                .find(|r| r.field("channel").as_str() == Some(self.config.channel.as_str())),
            Err(err) => {
                self.report(&SyncError::Table(err));
                return false;
            }
        };

        let action = match &remote {
            Some(row) => {
                let actual = match row.field("version") {
                    CellValue::Int(v) => *v,
                    _ => 0,
                };
                if self.row_id.is_some() && actual != self.row_version {
                    let err = SyncError::PersistConflict {
                        channel: self.config.channel.clone(),
                        expected: self.row_version,
                        actual,
                    };
                    self.report(&err);
                    // Adopt the remote version so the next quiescent write
                    // can go through.
                    self.row_id = Some(row.id);
                    self.row_version = actual;
                    return false;
                }
                self.row_id = Some(row.id);
                self.row_version = actual + 1;
                UserAction::UpdateRecord {
                    table_id: self.config.table_id.clone(),
                    row_id: row.id,
                    fields: persisted_fields(&self.config.channel, &raw, self.row_version, now),
                }
            }
            None => {
                self.row_version = 1;
                UserAction::AddRecord {
                    table_id: self.config.table_id.clone(),
                    fields: persisted_fields(&self.config.channel, &raw, self.row_version, now),
                }
            }
        };

        match self.table.apply_user_actions(vec![action]) {
            Ok(results) => {
                if self.row_id.is_none() {
                    self.row_id = results.ret_values.first().and_then(|v| v.as_i64());
                }
                debug!(channel = %self.config.channel, version = self.row_version, "persisted channel row");
                true
            }
            Err(err) => {
                self.report(&SyncError::Table(err));
                false
            }
        }
    }

    /// Derived status snapshot.
    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            id: self.id.clone(),
            channel: self.config.channel.clone(),
            role: self.role,
            connected: self.connected,
            properties: self.properties.iter().map(|p| p.name().to_string()).collect(),
            last_sync_ms: self.last_sync_ms,
        }
    }

    fn report(&self, err: &SyncError) {
        warn!(error = %err, "sync degraded");
        if let Some(on_error) = &self.on_error {
            on_error(err);
        }
    }
}

fn persisted_fields(
    channel: &str,
    raw_state: &str,
    version: i64,
    now: u64,
) -> BTreeMap<String, CellValue> {
    let mut fields = BTreeMap::new();
    fields.insert("channel".to_string(), CellValue::from(channel));
    fields.insert("state".to_string(), CellValue::from(raw_state));
    fields.insert("version".to_string(), CellValue::Int(version));
    fields.insert("updated_ms".to_string(), CellValue::Int(now as i64));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use vantage_core::{
        ColumnDef, ManualClock, MemoryTableAdapter, TransportError, TransportResult,
    };
    use vantage_transforms::Scale;

    #[derive(Debug, Default, Clone)]
    struct WidgetState {
        index: f64,
        url: String,
    }

    #[derive(Default)]
    struct CollectingTransport {
        messages: Rc<RefCell<Vec<SyncMessage>>>,
    }

    impl BroadcastTransport for CollectingTransport {
        fn publish(&self, message: &SyncMessage) -> TransportResult<()> {
            self.messages.borrow_mut().push(message.clone());
            Ok(())
        }
    }

    struct FailingTransport;

    impl BroadcastTransport for FailingTransport {
        fn publish(&self, _message: &SyncMessage) -> TransportResult<()> {
            Err(TransportError::Unavailable {
                message: "no channel".to_string(),
            })
        }
    }

    fn index_property() -> SyncProperty<WidgetState> {
        SyncProperty::new(
            "index",
            |s: &WidgetState| PropertyValue::Number(s.index),
            |s: &mut WidgetState, v| {
                if let Some(n) = v.as_number() {
                    s.index = n;
                }
            },
        )
    }

    fn url_property() -> SyncProperty<WidgetState> {
        SyncProperty::new(
            "url",
            |s: &WidgetState| PropertyValue::Text(s.url.clone()),
            |s: &mut WidgetState, v| {
                if let PropertyValue::Text(url) = v {
                    s.url = url;
                }
            },
        )
    }

    fn sync_table() -> MemoryTableAdapter {
        let adapter = MemoryTableAdapter::new();
        adapter
            .apply_user_actions(vec![UserAction::AddTable {
                table_id: "VantageSync".to_string(),
                columns: vec![
                    ColumnDef::new("channel", "Text"),
                    ColumnDef::new("state", "Text"),
                    ColumnDef::new("version", "Int"),
                    ColumnDef::new("updated_ms", "Int"),
                ],
            }])
            .unwrap();
        adapter
    }

    fn master(
        clock: Arc<ManualClock>,
    ) -> (SyncManager<WidgetState>, Rc<RefCell<Vec<SyncMessage>>>) {
        let transport = CollectingTransport::default();
        let messages = transport.messages.clone();
        let manager = SyncManager::new(
            SyncConfig::default(),
            SyncRole::Master,
            Box::new(transport),
            Box::new(sync_table()),
        )
        .with_clock(clock);
        (manager, messages)
    }

    #[test]
    fn test_throttled_emit_sends_at_most_once_per_window() {
        let clock = Arc::new(ManualClock::at(10_000));
        let (mut manager, messages) = master(clock.clone());
        manager.register(index_property().with_throttle(33));

        let mut state = WidgetState::default();
        manager.connect(&mut state);

        for _ in 0..10 {
            manager.emit("index", &state).unwrap();
            clock.advance(1);
        }
        assert_eq!(messages.borrow().len(), 1);

        clock.advance(33);
        assert!(manager.emit("index", &state).unwrap());
        assert_eq!(messages.borrow().len(), 2);
    }

    #[test]
    fn test_emit_requires_registration_and_connection() {
        let clock = Arc::new(ManualClock::at(0));
        let (mut manager, messages) = master(clock);
        manager.register(index_property());

        // Not connected: silently local-only.
        let state = WidgetState::default();
        assert!(!manager.emit("index", &state).unwrap());

        let mut state = WidgetState::default();
        manager.connect(&mut state);
        assert!(matches!(
            manager.emit("nope", &state),
            Err(SyncError::UnknownProperty { .. })
        ));
        assert!(messages.borrow().is_empty());
    }

    #[test]
    fn test_slave_does_not_emit() {
        let clock = Arc::new(ManualClock::at(0));
        let transport = CollectingTransport::default();
        let messages = transport.messages.clone();
        let mut manager = SyncManager::new(
            SyncConfig::default(),
            SyncRole::Slave,
            Box::new(transport),
            Box::new(sync_table()),
        )
        .with_clock(clock);
        manager.register(index_property());

        let mut state = WidgetState::default();
        manager.connect(&mut state);
        assert!(!manager.emit("index", &state).unwrap());
        assert!(messages.borrow().is_empty());
    }

    #[test]
    fn test_receive_applies_transform() {
        let clock = Arc::new(ManualClock::at(0));
        let (mut manager, _) = master(clock);
        manager.register(index_property().with_transform(Scale::new(0.5, 1.0)));

        let mut state = WidgetState::default();
        manager.connect(&mut state);

        let message = SyncMessage {
            property: "index".to_string(),
            value: PropertyValue::Number(10.0),
            master_id: "someone-else".to_string(),
            channel: "main".to_string(),
            ts: 1,
        };
        manager.receive(&message, &mut state);
        assert_eq!(state.index, 6.0);
    }

    #[test]
    fn test_receive_suppresses_own_echo() {
        let clock = Arc::new(ManualClock::at(0));
        let (mut manager, _) = master(clock);
        manager.register(index_property());

        let mut state = WidgetState::default();
        manager.connect(&mut state);

        let echo = SyncMessage {
            property: "index".to_string(),
            value: PropertyValue::Number(99.0),
            master_id: manager.id().to_string(),
            channel: "main".to_string(),
            ts: 1,
        };
        manager.receive(&echo, &mut state);
        assert_eq!(state.index, 0.0);
    }

    #[test]
    fn test_receive_ignores_other_channels() {
        let clock = Arc::new(ManualClock::at(0));
        let (mut manager, _) = master(clock);
        manager.register(index_property());

        let mut state = WidgetState::default();
        manager.connect(&mut state);

        let other = SyncMessage {
            property: "index".to_string(),
            value: PropertyValue::Number(99.0),
            master_id: "someone-else".to_string(),
            channel: "secondary".to_string(),
            ts: 1,
        };
        manager.receive(&other, &mut state);
        assert_eq!(state.index, 0.0);
    }

    #[test]
    fn test_burst_persists_exactly_once_after_quiescence() {
        let clock = Arc::new(ManualClock::at(1_000));
        let mut manager = SyncManager::new(
            SyncConfig::default(),
            SyncRole::Master,
            Box::new(CollectingTransport::default()),
            Box::new(sync_table()),
        )
        .with_clock(clock.clone());
        manager.register(index_property().with_throttle(0).persistent());

        let mut state = WidgetState { index: 5.0, url: String::new() };
        manager.connect(&mut state);

        // Burst of interactions.
        for _ in 0..5 {
            manager.emit("index", &state).unwrap();
            clock.advance(100);
        }

        // 100ms after the last emit: not yet due.
        assert!(!manager.tick(&state));

        clock.advance(450);
        assert!(manager.tick(&state));

        // Quiescent: nothing further to write.
        clock.advance(1_000);
        assert!(!manager.tick(&state));
    }

    #[test]
    fn test_connect_bootstraps_from_persisted_row() {
        let clock = Arc::new(ManualClock::at(0));
        let table = sync_table();
        let snapshot = serde_json::json!({
            "index": {"type": "number", "value": 10.0},
            "url": {"type": "text", "value": "https://example.com"},
        })
        .to_string();
        table
            .apply_user_actions(vec![UserAction::AddRecord {
                table_id: "VantageSync".to_string(),
                fields: persisted_fields("main", &snapshot, 3, 0),
            }])
            .unwrap();

        let mut manager = SyncManager::new(
            SyncConfig::default(),
            SyncRole::Slave,
            Box::new(CollectingTransport::default()),
            Box::new(table),
        )
        .with_clock(clock);
        manager.register(index_property().with_transform(Scale::new(0.5, 1.0)));
        manager.register(url_property());

        let mut state = WidgetState::default();
        manager.connect(&mut state);

        // Transform applies on bootstrap exactly as on receive.
        assert_eq!(state.index, 6.0);
        assert_eq!(state.url, "https://example.com");
    }

    #[test]
    fn test_persist_conflict_detected() {
        let clock = Arc::new(ManualClock::at(0));
        let table = sync_table();
        table
            .apply_user_actions(vec![UserAction::AddRecord {
                table_id: "VantageSync".to_string(),
                fields: persisted_fields("main", "{}", 1, 0),
            }])
            .unwrap();

        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let seen_handle = seen.clone();
        let mut manager = SyncManager::new(
            SyncConfig::default(),
            SyncRole::Master,
            Box::new(CollectingTransport::default()),
            Box::new(table),
        )
        .with_clock(clock.clone())
        .with_error_callback(Box::new(move |err| {
            seen_handle.borrow_mut().push(err.to_string());
        }));
        manager.register(index_property().with_throttle(0).persistent());

        let mut state = WidgetState::default();
        manager.connect(&mut state);

        // Another widget bumps the row version behind our back. The
        // manager's adapter owns the table now, so simulate by persisting
        // twice from a stale baseline: first write succeeds and bumps to
        // version 2, then we force the manager's view back.
        manager.emit("index", &state).unwrap();
        clock.advance(600);
        assert!(manager.tick(&state));

        manager.row_version = 1; // stale view
        manager.emit("index", &state).unwrap();
        clock.advance(600);
        assert!(!manager.tick(&state));
        assert!(seen.borrow().iter().any(|m| m.contains("Persist conflict")));

        // Version adopted: the next write goes through.
        manager.emit("index", &state).unwrap();
        clock.advance(600);
        assert!(manager.tick(&state));
    }

    #[test]
    fn test_transport_failure_degrades_to_local() {
        let clock = Arc::new(ManualClock::at(0));
        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let seen_handle = seen.clone();
        let mut manager = SyncManager::new(
            SyncConfig::default(),
            SyncRole::Master,
            Box::new(FailingTransport),
            Box::new(sync_table()),
        )
        .with_clock(clock)
        .with_error_callback(Box::new(move |err| {
            seen_handle.borrow_mut().push(err.to_string());
        }));
        manager.register(index_property());

        let mut state = WidgetState::default();
        manager.connect(&mut state);

        assert!(!manager.emit("index", &state).unwrap());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_persistence_survives_transport_outage() {
        let clock = Arc::new(ManualClock::at(0));
        let mut manager = SyncManager::new(
            SyncConfig::default(),
            SyncRole::Master,
            Box::new(FailingTransport),
            Box::new(sync_table()),
        )
        .with_clock(clock.clone());
        manager.register(index_property().with_throttle(0).persistent());

        let mut state = WidgetState { index: 3.0, url: String::new() };
        manager.connect(&mut state);

        // Broadcast is down, but the table adapter is healthy: the dirty
        // state still reaches the channel row after quiescence.
        assert!(!manager.emit("index", &state).unwrap());
        clock.advance(600);
        assert!(manager.tick(&state));

        // Written once; nothing further is pending.
        assert!(!manager.tick(&state));
    }

    #[test]
    fn test_register_overwrites_same_name() {
        let clock = Arc::new(ManualClock::at(0));
        let (mut manager, _) = master(clock);
        manager.register(index_property());
        manager.register(index_property().with_throttle(999));

        assert_eq!(manager.status().properties, vec!["index".to_string()]);
    }

    #[test]
    fn test_unregister() {
        let clock = Arc::new(ManualClock::at(0));
        let (mut manager, _) = master(clock);
        manager.register(index_property());

        assert!(manager.unregister("index"));
        assert!(!manager.unregister("index"));
        assert!(manager.status().properties.is_empty());
    }

    #[test]
    fn test_status_snapshot() {
        let clock = Arc::new(ManualClock::at(0));
        let (mut manager, _) = master(clock);
        manager.register(index_property());
        manager.register(url_property());

        let mut state = WidgetState::default();
        let status = manager.status();
        assert!(!status.connected);

        manager.connect(&mut state);
        let status = manager.status();
        assert!(status.connected);
        assert_eq!(status.channel, "main");
        assert_eq!(status.role, SyncRole::Master);
        assert_eq!(status.properties.len(), 2);
    }

    #[test]
    fn test_disconnect_clears_gates() {
        let clock = Arc::new(ManualClock::at(0));
        let (mut manager, messages) = master(clock);
        manager.register(index_property().with_throttle(10_000));

        let mut state = WidgetState::default();
        manager.connect(&mut state);
        assert!(manager.emit("index", &state).unwrap());

        manager.disconnect();
        assert!(!manager.emit("index", &state).unwrap());

        manager.connect(&mut state);
        // Gate was reset on disconnect: emits again despite the long window.
        assert!(manager.emit("index", &state).unwrap());
        assert_eq!(messages.borrow().len(), 2);
    }
}
