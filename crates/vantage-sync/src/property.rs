//! Sync property registry entries
//!
//! A property is a named getter/setter pair over the widget's state type,
//! with an optional transform applied on the receiving side, a throttle
//! window, and a persistence flag. Values cross the registry boundary as
//! [`PropertyValue`], whose JSON codec is the wire and persistence format.

use vantage_core::PropertyValue;
use vantage_transforms::Transform;

use crate::throttle::ThrottleGate;

/// A registered sync property over widget state `S`.
pub struct SyncProperty<S> {
    name: String,
    get: Box<dyn Fn(&S) -> PropertyValue>,
    set: Box<dyn FnMut(&mut S, PropertyValue)>,
    transform: Option<Box<dyn Transform>>,
    throttle_ms: Option<u64>,
    persistent: bool,
    pub(crate) gate: ThrottleGate,
}

impl<S> SyncProperty<S> {
    /// Create a property with a getter and setter over the widget state.
    pub fn new(
        name: impl Into<String>,
        get: impl Fn(&S) -> PropertyValue + 'static,
        set: impl FnMut(&mut S, PropertyValue) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            get: Box::new(get),
            set: Box::new(set),
            transform: None,
            throttle_ms: None,
            persistent: false,
            gate: ThrottleGate::new(),
        }
    }

    /// Attach a transform applied to incoming values before the setter.
    pub fn with_transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Override the manager's default throttle window for this property.
    pub fn with_throttle(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = Some(throttle_ms);
        self
    }

    /// Include this property in the persisted channel row.
    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    /// The property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The per-property throttle window, if overridden.
    pub fn throttle_ms(&self) -> Option<u64> {
        self.throttle_ms
    }

    /// Whether the property persists to the channel row.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Read the current value from widget state.
    pub(crate) fn read(&self, state: &S) -> PropertyValue {
        (self.get)(state)
    }

    /// Apply the transform (if any) and write into widget state.
    pub(crate) fn write(&mut self, state: &mut S, value: PropertyValue) {
        let value = match &mut self.transform {
            Some(transform) => transform.apply(&value),
            None => value,
        };
        (self.set)(state, value);
    }
}
