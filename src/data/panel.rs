//! The live panel instance: lifecycle, accessors, and persistence.

use std::sync::Arc;

use cursive::Cursive;
use log::{debug, info};

use crate::{
    data::{
        field::RawInput,
        fields::FieldSet,
        value::Value,
    },
    error::{PanelError, Result},
    store::{Store, ValueMap},
};

/// Callback invoked at a panel lifecycle point.
pub type EventCallback = Arc<dyn Fn(&mut Panel) + Send + Sync>;

/// Lifecycle callback set.
///
/// All hooks are optional and fire synchronously after the
/// corresponding lifecycle action completes.
#[derive(Clone, Default)]
pub struct Events {
    /// Fires after stored values have been loaded.
    pub on_init: Option<EventCallback>,
    /// Fires after the panel layer is shown.
    pub on_open: Option<EventCallback>,
    /// Fires after a successful persist.
    pub on_save: Option<EventCallback>,
    /// Fires after the panel is dismissed.
    pub on_close: Option<EventCallback>,
    /// Fires after defaults are restored.
    pub on_reset: Option<EventCallback>,
}

macro_rules! event_setter {
    ($name:ident) => {
        /// Register the callback of the same name.
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn(&mut Panel) + Send + Sync + 'static,
        {
            self.$name = Some(Arc::new(f));
            self
        }
    };
}

impl Events {
    /// Empty callback set.
    pub fn new() -> Self {
        Events::default()
    }

    event_setter!(on_init);
    event_setter!(on_open);
    event_setter!(on_save);
    event_setter!(on_close);
    event_setter!(on_reset);
}

/// Declarative panel definition used to construct a [`Panel`].
pub struct PanelOptions {
    /// Storage namespace; also used to namespace view names in the UI.
    pub id: String,
    /// Panel title.
    pub title: String,
    /// Ordered field definitions.
    pub fields: FieldSet,
    /// Optional Cursive theme as TOML text.
    pub theme: Option<String>,
    /// Lifecycle callbacks.
    pub events: Events,
}

impl PanelOptions {
    /// Build options from the required parts.
    pub fn new(id: impl Into<String>, title: impl Into<String>, fields: FieldSet) -> Self {
        PanelOptions {
            id: id.into(),
            title: title.into(),
            fields,
            theme: None,
            events: Events::default(),
        }
    }

    /// Set the theme TOML text.
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Set the lifecycle callbacks.
    pub fn events(mut self, events: Events) -> Self {
        self.events = events;
        self
    }
}

enum Hook {
    Init,
    Open,
    Save,
    Close,
    Reset,
}

/// The live configuration panel.
///
/// Lifecycle is caller-driven and strictly sequential: constructed →
/// initialized → optionally opened → values read/written/reset any
/// number of times → closed.
#[derive(Clone)]
pub struct Panel {
    /// Storage namespace.
    pub id: String,
    /// Panel title.
    pub title: String,
    /// Optional Cursive theme as TOML text.
    pub theme: Option<String>,
    fields: FieldSet,
    events: Events,
    store: Arc<dyn Store>,
    initialized: bool,
    opened: bool,
    needs_save: bool,
    save_count: u32,
}

impl Panel {
    /// Build a panel from its definition and a store.
    ///
    /// Field definitions are validated eagerly so that a malformed
    /// panel fails at construction rather than at render time.
    pub fn new(options: PanelOptions, store: Arc<dyn Store>) -> Result<Self> {
        if options.id.is_empty() {
            return Err(PanelError::InvalidField {
                key: "id".to_string(),
                reason: "panel id must not be empty".to_string(),
            });
        }
        options.fields.validate()?;
        Ok(Panel {
            id: options.id,
            title: options.title,
            theme: options.theme,
            fields: options.fields,
            events: options.events,
            store,
            initialized: false,
            opened: false,
            needs_save: false,
            save_count: 0,
        })
    }

    /// The realized fields, in render order.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Whether any change since the last save is pending.
    pub fn needs_save(&self) -> bool {
        self.needs_save
    }

    /// Whether [`save`](Self::save) succeeded at least once.
    pub fn saved(&self) -> bool {
        self.save_count > 0
    }

    /// Whether the panel is currently shown.
    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Load persisted values over the declared defaults.
    ///
    /// Idempotent; [`open`](Self::open) calls this implicitly when it
    /// was skipped. Fires `on_init`.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        if let Some(map) = self.store.load(&self.id)? {
            debug!("loaded {} stored values for panel `{}`", map.len(), self.id);
            self.fields.update_from_json(&map)?;
        }
        self.initialized = true;
        self.fire(Hook::Init);
        Ok(())
    }

    /// Render the panel in an owned event loop and block until it is
    /// dismissed.
    ///
    /// Fires `on_open` once the layer is shown. `on_close` fires from
    /// the close handler, or here when the loop ended without one
    /// (e.g. Ctrl-C).
    pub fn open(&mut self) -> Result<()> {
        self.init()?;
        crate::ui::run_owned(self)
    }

    /// Render the panel inside a caller-owned [`Cursive`] instance.
    ///
    /// The panel state moves into the UI session; retrieve it with
    /// [`crate::ui::take_panel`] after the panel closed. The session
    /// claims the Cursive user-data slot.
    pub fn open_with(mut self, siv: &mut Cursive) -> Result<()> {
        self.init()?;
        crate::ui::install(siv, self, false);
        crate::ui::fire_open(siv);
        Ok(())
    }

    /// Dismiss the panel: fires `on_close`.
    ///
    /// Inside the UI this is driven by the close handler, which also
    /// tears the layer down.
    pub fn close(&mut self) {
        self.opened = false;
        self.fire(Hook::Close);
    }

    /// Persist all field values, clear the dirty flag, fire `on_save`.
    pub fn save(&mut self) -> Result<()> {
        self.write()?;
        self.needs_save = false;
        self.save_count += 1;
        info!("panel `{}` saved", self.id);
        self.fire(Hook::Save);
        Ok(())
    }

    /// Persist the current values without firing `on_save`.
    ///
    /// The low-level half of [`save`](Self::save).
    pub fn write(&self) -> Result<()> {
        self.store.save(&self.id, &self.fields.as_json())
    }

    /// Fetch the raw persisted value map, bypassing the fields.
    pub fn read(&self) -> Result<Option<ValueMap>> {
        self.store.load(&self.id)
    }

    /// Restore every field to its declared default and fire `on_reset`.
    ///
    /// Does not persist by itself.
    pub fn reset(&mut self) {
        self.fields.reset();
        self.needs_save = true;
        self.fire(Hook::Reset);
    }

    /// Current effective value of one field.
    ///
    /// `Ok(None)` for buttons and for optional fields with neither
    /// value nor default.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let field = self
            .fields
            .get(key)
            .ok_or_else(|| PanelError::UnknownKey(key.to_string()))?;
        Ok(field.current())
    }

    /// Type- and domain-checked update of one field's value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let field = self
            .fields
            .get_mut(key)
            .ok_or_else(|| PanelError::UnknownKey(key.to_string()))?;
        field.set_value(value.into())?;
        self.needs_save = true;
        Ok(())
    }

    /// Serialize the current values into a flat JSON map.
    pub fn to_json(&self) -> ValueMap {
        self.fields.as_json()
    }

    pub(crate) fn mark_opened(&mut self) {
        self.opened = true;
        self.fire(Hook::Open);
    }

    pub(crate) fn apply_input(&mut self, key: &str, raw: RawInput) -> Result<()> {
        let field = self
            .fields
            .get_mut(key)
            .ok_or_else(|| PanelError::UnknownKey(key.to_string()))?;
        if field.apply_raw(raw)? {
            self.needs_save = true;
        }
        Ok(())
    }

    fn fire(&mut self, hook: Hook) {
        let cb = match hook {
            Hook::Init => self.events.on_init.clone(),
            Hook::Open => self.events.on_open.clone(),
            Hook::Save => self.events.on_save.clone(),
            Hook::Close => self.events.on_close.clone(),
            Hook::Reset => self.events.on_reset.clone(),
        };
        if let Some(cb) = cb {
            cb(self);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{
        data::field::{Field, FieldKind},
        store::MemStore,
    };

    fn fields() -> FieldSet {
        FieldSet::new()
            .with(Field::new("name", "Name", FieldKind::text(Some("anon"))))
            .unwrap()
            .with(Field::new(
                "level",
                "Level",
                FieldKind::select(&["debug", "info", "warn"], Some(1)),
            ))
            .unwrap()
            .with(Field::new("jobs", "Jobs", FieldKind::unsigned(Some(4), Some(1), Some(32))))
            .unwrap()
            .with(Field::new("verbose", "Verbose", FieldKind::checkbox(false)))
            .unwrap()
            .with(Field::new("schema_rev", "", FieldKind::hidden(2i64)))
            .unwrap()
    }

    fn panel(store: Arc<MemStore>) -> Panel {
        Panel::new(PanelOptions::new("app", "Settings", fields()), store).unwrap()
    }

    #[test]
    fn empty_id_is_rejected() {
        let store = Arc::new(MemStore::new());
        let err = Panel::new(PanelOptions::new("", "Settings", fields()), store);
        assert!(matches!(err, Err(PanelError::InvalidField { .. })));
    }

    #[test]
    fn init_loads_stored_values() {
        let store = Arc::new(MemStore::new());
        let stored = serde_json::json!({ "name": "zr", "jobs": 8 });
        store.save("app", stored.as_object().unwrap()).unwrap();

        let mut panel = panel(store);
        panel.init().unwrap();
        assert_eq!(panel.get("name").unwrap(), Some(Value::Str("zr".into())));
        assert_eq!(panel.get("jobs").unwrap(), Some(Value::Uint(8)));
        // Untouched fields keep their defaults.
        assert_eq!(panel.get("level").unwrap(), Some(Value::Str("info".into())));
    }

    #[test]
    fn save_persists_and_read_returns_raw_map() {
        let store = Arc::new(MemStore::new());
        let mut panel = panel(store);
        panel.init().unwrap();
        panel.set("name", "zr").unwrap();
        panel.set("verbose", true).unwrap();
        assert!(panel.needs_save());

        panel.save().unwrap();
        assert!(!panel.needs_save());
        assert!(panel.saved());

        let map = panel.read().unwrap().unwrap();
        assert_eq!(map["name"], serde_json::json!("zr"));
        assert_eq!(map["verbose"], serde_json::json!(true));
        assert_eq!(map["schema_rev"], serde_json::json!(2));
        assert_eq!(map["level"], serde_json::json!("info"));
    }

    #[test]
    fn reset_restores_defaults() {
        let store = Arc::new(MemStore::new());
        let mut panel = panel(store);
        panel.init().unwrap();
        panel.set("jobs", 16u64).unwrap();
        panel.set("level", "warn").unwrap();

        panel.reset();
        assert_eq!(panel.get("jobs").unwrap(), Some(Value::Uint(4)));
        assert_eq!(panel.get("level").unwrap(), Some(Value::Str("info".into())));
        assert!(panel.needs_save());
    }

    #[test]
    fn set_validates_key_type_and_range() {
        let store = Arc::new(MemStore::new());
        let mut panel = panel(store);
        panel.init().unwrap();

        assert!(matches!(
            panel.set("missing", 1i64),
            Err(PanelError::UnknownKey(_))
        ));
        assert!(matches!(
            panel.set("jobs", "four"),
            Err(PanelError::TypeMismatch { .. })
        ));
        assert!(matches!(
            panel.set("jobs", 64u64),
            Err(PanelError::OutOfRange { .. })
        ));
        assert!(matches!(
            panel.set("level", "fatal"),
            Err(PanelError::UnknownOption { .. })
        ));
    }

    #[test]
    fn lifecycle_events_fire_in_order() {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        let record = |name: &'static str, order: &Arc<std::sync::Mutex<Vec<&'static str>>>| {
            let order = Arc::clone(order);
            move |_p: &mut Panel| {
                COUNTER.fetch_add(1, Ordering::SeqCst);
                order.lock().unwrap().push(name);
            }
        };

        let events = Events::new()
            .on_init(record("init", &order))
            .on_save(record("save", &order))
            .on_reset(record("reset", &order))
            .on_close(record("close", &order));

        let store = Arc::new(MemStore::new());
        let mut panel = Panel::new(
            PanelOptions::new("app", "Settings", fields()).events(events),
            store,
        )
        .unwrap();

        panel.init().unwrap();
        // init is idempotent, the hook must not fire twice
        panel.init().unwrap();
        panel.save().unwrap();
        panel.reset();
        panel.close();

        assert_eq!(*order.lock().unwrap(), ["init", "save", "reset", "close"]);
        assert_eq!(COUNTER.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn write_does_not_fire_on_save() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired2 = Arc::clone(&fired);
        let events = Events::new().on_save(move |_p| {
            fired2.fetch_add(1, Ordering::SeqCst);
        });

        let store = Arc::new(MemStore::new());
        let mut panel = Panel::new(
            PanelOptions::new("app", "Settings", fields()).events(events),
            Arc::clone(&store) as Arc<dyn Store>,
        )
        .unwrap();
        panel.init().unwrap();

        panel.write().unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(store.load("app").unwrap().is_some());
    }
}
