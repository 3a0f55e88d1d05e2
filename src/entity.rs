//! Entities: a tag set, a value map and an explicit lifecycle.
//!
//! Tags are presence-only integer ids. Values are [`Value`] payloads keyed by
//! integer ids. Both live in the slot tables of this crate hashed with
//! [`IdBuildHasher`], so ids map straight onto prime-sized buckets.
//!
//! Every structural change is broadcast through [`EntityEvents`] with the
//! owning [`EntityId`] attached, which is how a [`World`](crate::World) keeps
//! its tag index current without rescanning entities.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::Error;
use crate::error::Result;
use crate::hash_map::Entry;
use crate::hash_map::HashMap;
use crate::hash_set::HashSet;
use crate::hasher::IdBuildHasher;
use crate::observer::Observers;
use crate::value::FromValue;
use crate::value::Value;

/// Identifier of a tag.
pub type TagId = i32;

/// Identifier of a value slot.
pub type ValueId = i32;

/// Identifier of an entity within a [`World`](crate::World).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Wraps a raw id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an entity is in its lifecycle.
///
/// ```text
/// Created -> Initialized -> Enabled <-> Disabled
///                 \____________\___________\______-> Disposed
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Constructed, no hooks have run.
    Created,
    /// `init` hooks have run.
    Initialized,
    /// Receiving ticks.
    Enabled,
    /// Initialized but not receiving ticks.
    Disabled,
    /// Torn down. Tags, values, behaviours and listeners are gone.
    Disposed,
}

/// Logic attached to an entity and driven through its lifecycle.
///
/// All hooks default to doing nothing.
pub trait Behaviour {
    /// Runs once, before the first `enable`.
    fn init(&mut self, entity: &mut Entity) {
        let _ = entity;
    }

    /// Runs on every transition into [`LifecycleState::Enabled`].
    fn enable(&mut self, entity: &mut Entity) {
        let _ = entity;
    }

    /// Runs once per tick while enabled.
    fn tick(&mut self, entity: &mut Entity, delta: f32) {
        let _ = (entity, delta);
    }

    /// Runs on every transition out of [`LifecycleState::Enabled`].
    fn disable(&mut self, entity: &mut Entity) {
        let _ = entity;
    }

    /// Runs once when the entity is disposed.
    fn dispose(&mut self, entity: &mut Entity) {
        let _ = entity;
    }
}

/// Listener lists for one entity.
///
/// Key listeners receive the owning entity and the tag or value id.
#[derive(Default)]
pub struct EntityEvents {
    /// A tag was added.
    pub tag_added: Observers<dyn FnMut(EntityId, TagId)>,
    /// A tag was removed.
    pub tag_removed: Observers<dyn FnMut(EntityId, TagId)>,
    /// A value was added under a new key.
    pub value_added: Observers<dyn FnMut(EntityId, ValueId)>,
    /// A value was removed.
    pub value_removed: Observers<dyn FnMut(EntityId, ValueId)>,
    /// An existing value was replaced.
    pub value_changed: Observers<dyn FnMut(EntityId, ValueId)>,
    /// Any tag or value change. Bulk clears fire this once.
    pub state_changed: Observers<dyn FnMut(EntityId)>,
}

impl EntityEvents {
    /// Disposes every listener on every channel.
    pub fn clear(&mut self) {
        self.tag_added.clear();
        self.tag_removed.clear();
        self.value_added.clear();
        self.value_removed.clear();
        self.value_changed.clear();
        self.state_changed.clear();
    }
}

impl fmt::Debug for EntityEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityEvents")
            .field("tag_added", &self.tag_added.len())
            .field("tag_removed", &self.tag_removed.len())
            .field("value_added", &self.value_added.len())
            .field("value_removed", &self.value_removed.len())
            .field("value_changed", &self.value_changed.len())
            .field("state_changed", &self.state_changed.len())
            .finish()
    }
}

/// A lifecycle step requested from inside a running hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    Init,
    Enable,
    Disable,
    Dispose,
}

/// An entity with tags, values and behaviours.
///
/// Once disposed, an entity ignores tag and value mutations.
///
/// # Examples
///
/// ```rust
/// use entity_slots::Entity;
/// use entity_slots::EntityId;
/// use entity_slots::Error;
///
/// const PLAYER: i32 = 1;
/// const HEALTH: i32 = 7;
///
/// let mut entity = Entity::new(EntityId::new(0), "hero");
/// entity.add_tag(PLAYER);
/// entity.set_value(HEALTH, 42);
///
/// assert!(entity.has_tag(PLAYER));
/// assert_eq!(entity.get_value::<i32>(HEALTH), Ok(42));
/// assert!(matches!(
///     entity.get_value::<String>(HEALTH),
///     Err(Error::TypeMismatch { .. })
/// ));
/// assert_eq!(entity.try_get_value::<String>(HEALTH), None);
/// ```
pub struct Entity {
    id: EntityId,
    name: String,
    tags: HashSet<TagId, IdBuildHasher>,
    values: HashMap<ValueId, Value, IdBuildHasher>,
    state: LifecycleState,
    behaviours: Vec<Box<dyn Behaviour>>,
    events: EntityEvents,
    in_hooks: bool,
    pending: Option<Transition>,
}

impl Entity {
    /// Creates an entity with unallocated tag and value storage.
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self::with_capacity(id, name, 0, 0)
    }

    /// Creates an entity with room for the given number of tags and values.
    ///
    /// # Panics
    ///
    /// Panics if either capacity exceeds
    /// [`MAX_CAPACITY`](crate::primes::MAX_CAPACITY).
    pub fn with_capacity(
        id: EntityId,
        name: impl Into<String>,
        tag_capacity: usize,
        value_capacity: usize,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            tags: HashSet::with_capacity_and_hasher(tag_capacity, IdBuildHasher),
            values: HashMap::with_capacity_and_hasher(value_capacity, IdBuildHasher),
            state: LifecycleState::Created,
            behaviours: Vec::new(),
            events: EntityEvents::default(),
            in_hooks: false,
            pending: None,
        }
    }

    /// Returns the entity's id.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the entity.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Returns the entity's listener lists.
    pub fn events(&self) -> &EntityEvents {
        &self.events
    }

    /// Returns the entity's listener lists for subscribing.
    pub fn events_mut(&mut self) -> &mut EntityEvents {
        &mut self.events
    }

    fn notify_state_changed(&mut self) {
        let id = self.id;
        self.events.state_changed.notify(|f| f(id));
    }

    /// Returns `true` if the tag is present.
    pub fn has_tag(&self, tag: TagId) -> bool {
        self.tags.contains(&tag)
    }

    /// Adds a tag. Returns `false` without notifying if it was present or
    /// the entity is disposed.
    pub fn add_tag(&mut self, tag: TagId) -> bool {
        if self.is_disposed() || !self.tags.insert(tag) {
            return false;
        }
        let id = self.id;
        self.events.tag_added.notify(|f| f(id, tag));
        self.notify_state_changed();
        true
    }

    /// Removes a tag. Returns `false` without notifying if it was absent.
    pub fn remove_tag(&mut self, tag: TagId) -> bool {
        if !self.tags.remove(&tag) {
            return false;
        }
        let id = self.id;
        self.events.tag_removed.notify(|f| f(id, tag));
        self.notify_state_changed();
        true
    }

    /// Removes every tag, notifying once per tag and once for the batch.
    pub fn clear_tags(&mut self) {
        if self.tags.is_empty() {
            return;
        }
        let id = self.id;
        for tag in self.tags.drain() {
            self.events.tag_removed.notify(|f| f(id, tag));
        }
        self.notify_state_changed();
    }

    /// Iterates the entity's tags in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = TagId> + '_ {
        self.tags.iter().copied()
    }

    /// Returns the number of tags.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn has_value(&self, key: ValueId) -> bool {
        self.values.contains_key(&key)
    }

    /// Adds a value under a new key. Returns `false` and leaves the stored
    /// value untouched if the key is taken or the entity is disposed.
    pub fn add_value(&mut self, key: ValueId, value: impl Into<Value>) -> bool {
        if self.is_disposed() {
            return false;
        }
        match self.values.entry(key) {
            Entry::Occupied(_) => return false,
            Entry::Vacant(entry) => {
                entry.insert(value.into());
            }
        }
        let id = self.id;
        self.events.value_added.notify(|f| f(id, key));
        self.notify_state_changed();
        true
    }

    /// Stores a value, replacing any value already under `key`.
    ///
    /// Replacing fires `value_changed`; a new key fires `value_added`. Does
    /// nothing on a disposed entity.
    pub fn set_value(&mut self, key: ValueId, value: impl Into<Value>) {
        if self.is_disposed() {
            return;
        }
        let id = self.id;
        match self.values.entry(key) {
            Entry::Occupied(mut entry) => {
                entry.insert(value.into());
                self.events.value_changed.notify(|f| f(id, key));
            }
            Entry::Vacant(entry) => {
                entry.insert(value.into());
                self.events.value_added.notify(|f| f(id, key));
            }
        }
        self.notify_state_changed();
    }

    /// Removes and returns the value under `key`.
    pub fn remove_value(&mut self, key: ValueId) -> Option<Value> {
        let removed = self.values.remove(&key)?;
        let id = self.id;
        self.events.value_removed.notify(|f| f(id, key));
        self.notify_state_changed();
        Some(removed)
    }

    /// Returns the raw value under `key`.
    pub fn value(&self, key: ValueId) -> Option<&Value> {
        self.values.get(&key)
    }

    /// Returns the value under `key` converted to `T`.
    ///
    /// # Errors
    ///
    /// [`Error::ValueNotFound`] if nothing is stored under `key`, and
    /// [`Error::TypeMismatch`] if the stored value is not a `T`.
    pub fn get_value<T: FromValue>(&self, key: ValueId) -> Result<T> {
        let value = self.values.get(&key).ok_or(Error::ValueNotFound(key))?;
        T::from_value(value).ok_or(Error::TypeMismatch {
            key,
            expected: T::TYPE_NAME,
            found: value.type_name(),
        })
    }

    /// Returns the value under `key` converted to `T`, or `None` if it is
    /// missing or holds another type.
    pub fn try_get_value<T: FromValue>(&self, key: ValueId) -> Option<T> {
        self.values.get(&key).and_then(T::from_value)
    }

    /// Removes every value, notifying once per key and once for the batch.
    pub fn clear_values(&mut self) {
        if self.values.is_empty() {
            return;
        }
        let id = self.id;
        for (key, _) in self.values.drain() {
            self.events.value_removed.notify(|f| f(id, key));
        }
        self.notify_state_changed();
    }

    /// Iterates the entity's values in no particular order.
    pub fn values(&self) -> impl Iterator<Item = (ValueId, &Value)> + '_ {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Returns the number of values.
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Attaches a behaviour, catching it up with the entity's lifecycle.
    ///
    /// Adding to a disposed entity fails with [`Error::EntityDisposed`].
    pub fn add_behaviour(&mut self, behaviour: impl Behaviour + 'static) -> Result<()> {
        self.ensure_alive()?;
        self.attach(Box::new(behaviour));
        Ok(())
    }

    pub(crate) fn attach(&mut self, mut behaviour: Box<dyn Behaviour>) {
        let nested = core::mem::replace(&mut self.in_hooks, true);
        if self.state != LifecycleState::Created {
            behaviour.init(self);
        }
        if self.state == LifecycleState::Enabled {
            behaviour.enable(self);
        }
        self.in_hooks = nested;
        self.behaviours.push(behaviour);
        if !nested {
            self.settle();
        }
    }

    /// Returns the number of attached behaviours.
    pub fn behaviour_count(&self) -> usize {
        self.behaviours.len()
    }

    /// Runs `init` hooks. Does nothing if already initialized.
    ///
    /// Lifecycle calls made from inside a [`Behaviour`] hook are deferred
    /// until the running hooks return. A deferred dispose wins over any other
    /// request, and a nested `tick` is ignored.
    pub fn init(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.init_hooks();
        Ok(())
    }

    /// Enables the entity, initializing it first when needed.
    pub fn enable(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.enable_hooks();
        Ok(())
    }

    /// Runs `tick` hooks if the entity is enabled.
    pub fn tick(&mut self, delta: f32) -> Result<()> {
        self.ensure_alive()?;
        self.tick_hooks(delta);
        Ok(())
    }

    /// Disables the entity if it is enabled.
    pub fn disable(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.disable_hooks();
        Ok(())
    }

    /// Disables the entity if needed, runs `dispose` hooks, then removes all
    /// tags, values, behaviours and listeners.
    ///
    /// Tag and value removals are still broadcast before listeners are
    /// dropped.
    pub fn dispose(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.dispose_hooks();
        Ok(())
    }

    fn is_disposed(&self) -> bool {
        self.state == LifecycleState::Disposed
    }

    fn ensure_alive(&self) -> Result<()> {
        match self.state {
            LifecycleState::Disposed => Err(Error::EntityDisposed(self.id)),
            _ => Ok(()),
        }
    }

    fn set_state(&mut self, state: LifecycleState) {
        tracing::debug!(entity = %self.id, from = ?self.state, to = ?state, "lifecycle");
        self.state = state;
    }

    /// Calls `hook` on each behaviour with the entity itself. Behaviours
    /// attached from inside a hook are kept but not called this round.
    fn run_hooks(&mut self, mut hook: impl FnMut(&mut dyn Behaviour, &mut Entity)) {
        let mut behaviours = core::mem::take(&mut self.behaviours);
        let nested = core::mem::replace(&mut self.in_hooks, true);
        for behaviour in behaviours.iter_mut() {
            hook(behaviour.as_mut(), self);
        }
        self.in_hooks = nested;
        behaviours.append(&mut self.behaviours);
        self.behaviours = behaviours;
    }

    /// Records a transition requested while hooks are running. Returns
    /// `false` if nothing is running and the caller should proceed.
    fn defer(&mut self, transition: Transition) -> bool {
        if !self.in_hooks {
            return false;
        }
        if self.pending != Some(Transition::Dispose) {
            self.pending = Some(transition);
        }
        true
    }

    /// Applies transitions deferred by the hooks that just ran.
    fn settle(&mut self) {
        while let Some(transition) = self.pending.take() {
            match transition {
                Transition::Init => self.run_init(),
                Transition::Enable => self.run_enable(),
                Transition::Disable => self.run_disable(),
                Transition::Dispose => self.run_dispose(),
            }
        }
    }

    pub(crate) fn init_hooks(&mut self) {
        if !self.defer(Transition::Init) {
            self.run_init();
            self.settle();
        }
    }

    pub(crate) fn enable_hooks(&mut self) {
        if !self.defer(Transition::Enable) {
            self.run_enable();
            self.settle();
        }
    }

    pub(crate) fn tick_hooks(&mut self, delta: f32) {
        if self.in_hooks {
            return;
        }
        if self.state == LifecycleState::Enabled {
            self.run_hooks(|b, e| b.tick(e, delta));
        }
        self.settle();
    }

    pub(crate) fn disable_hooks(&mut self) {
        if !self.defer(Transition::Disable) {
            self.run_disable();
            self.settle();
        }
    }

    pub(crate) fn dispose_hooks(&mut self) {
        if !self.defer(Transition::Dispose) {
            self.run_dispose();
            self.settle();
        }
    }

    fn run_init(&mut self) {
        if self.state != LifecycleState::Created {
            return;
        }
        self.run_hooks(|b, e| b.init(e));
        self.set_state(LifecycleState::Initialized);
    }

    fn run_enable(&mut self) {
        self.run_init();
        if matches!(self.state, LifecycleState::Initialized | LifecycleState::Disabled) {
            self.run_hooks(|b, e| b.enable(e));
            self.set_state(LifecycleState::Enabled);
        }
    }

    fn run_disable(&mut self) {
        if self.state == LifecycleState::Enabled {
            self.run_hooks(|b, e| b.disable(e));
            self.set_state(LifecycleState::Disabled);
        }
    }

    fn run_dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.run_disable();
        self.run_hooks(|b, e| b.dispose(e));
        self.behaviours.clear();
        self.clear_tags();
        self.clear_values();
        self.events.clear();
        self.pending = None;
        self.set_state(LifecycleState::Disposed);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("tags", &self.tags)
            .field("values", &self.values)
            .field("behaviours", &self.behaviours.len())
            .finish()
    }
}
