//! An owned collection of entities with a tag index and a lifecycle driver.
//!
//! The world subscribes to each entity's tag channels when it is spawned, so
//! [`World::entities_with_tag`] and [`World::filter`] answer from the index
//! instead of scanning entities.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::entity::Behaviour;
use crate::entity::Entity;
use crate::entity::EntityId;
use crate::entity::LifecycleState;
use crate::entity::TagId;
use crate::error::Error;
use crate::error::Result;
use crate::hash_map::HashMap;
use crate::hash_set::HashSet;
use crate::hasher::IdBuildHasher;
use crate::observer::SubscriptionId;

type TagIndex = HashMap<TagId, HashSet<EntityId, IdBuildHasher>, IdBuildHasher>;

struct Subscriptions {
    tag_added: SubscriptionId,
    tag_removed: SubscriptionId,
}

/// Owns entities and drives them through their lifecycle.
///
/// Entities spawned after [`World::init`] are initialized on spawn, and
/// entities spawned into an enabled world are enabled on spawn. Disposed
/// entities stay in the world until despawned but are skipped by every
/// lifecycle pass.
///
/// # Examples
///
/// ```rust
/// use entity_slots::World;
///
/// const ENEMY: i32 = 3;
///
/// let mut world = World::new();
/// let a = world.spawn("goblin")?;
/// let b = world.spawn("rock")?;
///
/// world.entity_mut(a).unwrap().add_tag(ENEMY);
/// assert_eq!(world.entities_with_tag(ENEMY), [a]);
///
/// world.entity_mut(a).unwrap().remove_tag(ENEMY);
/// assert!(world.entities_with_tag(ENEMY).is_empty());
///
/// world.despawn(b)?;
/// assert_eq!(world.len(), 1);
/// # Ok::<(), entity_slots::Error>(())
/// ```
pub struct World {
    entities: HashMap<EntityId, Entity, IdBuildHasher>,
    subscriptions: HashMap<EntityId, Subscriptions, IdBuildHasher>,
    tag_index: Rc<RefCell<TagIndex>>,
    next_id: u32,
    state: LifecycleState,
}

impl World {
    /// Creates an empty world in the [`LifecycleState::Created`] state.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty world with room for `capacity` entities.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds
    /// [`MAX_CAPACITY`](crate::primes::MAX_CAPACITY).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: HashMap::with_capacity_and_hasher(capacity, IdBuildHasher),
            subscriptions: HashMap::with_capacity_and_hasher(capacity, IdBuildHasher),
            tag_index: Rc::new(RefCell::new(HashMap::with_hasher(IdBuildHasher))),
            next_id: 0,
            state: LifecycleState::Created,
        }
    }

    /// Returns the world's lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Spawns an entity with no behaviours.
    ///
    /// # Errors
    ///
    /// [`Error::EntityIdsExhausted`] once every id has been handed out.
    pub fn spawn(&mut self, name: impl Into<String>) -> Result<EntityId> {
        self.spawn_with(name, Vec::new())
    }

    /// Spawns an entity with the given behaviours attached before it catches
    /// up with the world's lifecycle.
    ///
    /// # Errors
    ///
    /// [`Error::EntityIdsExhausted`] once every id has been handed out. Ids
    /// are never reused, including those of despawned entities.
    pub fn spawn_with(
        &mut self,
        name: impl Into<String>,
        behaviours: Vec<Box<dyn Behaviour>>,
    ) -> Result<EntityId> {
        let id = EntityId::new(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(Error::EntityIdsExhausted)?;

        let mut entity = Entity::new(id, name);
        for behaviour in behaviours {
            entity.attach(behaviour);
        }

        let events = entity.events_mut();
        let index = self.tag_index.clone();
        let tag_added = events.tag_added.subscribe(Box::new(
            move |entity: EntityId, tag: TagId| {
                index.borrow_mut().entry(tag).or_default().insert(entity);
            },
        ));
        let index = self.tag_index.clone();
        let tag_removed = events.tag_removed.subscribe(Box::new(
            move |entity: EntityId, tag: TagId| {
                unindex(&mut index.borrow_mut(), tag, entity);
            },
        ));
        self.subscriptions.insert(
            id,
            Subscriptions {
                tag_added,
                tag_removed,
            },
        );

        match self.state {
            LifecycleState::Enabled => entity.enable_hooks(),
            LifecycleState::Initialized | LifecycleState::Disabled => entity.init_hooks(),
            LifecycleState::Created | LifecycleState::Disposed => {}
        }

        tracing::debug!(entity = %id, name = entity.name(), "spawned");
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Removes an entity from the world and returns it.
    ///
    /// The entity is detached from the tag index but otherwise left as is;
    /// it is not disposed.
    ///
    /// # Errors
    ///
    /// [`Error::EntityNotFound`] if the world holds no entity with this id.
    pub fn despawn(&mut self, id: EntityId) -> Result<Entity> {
        let mut entity = self.entities.remove(&id).ok_or(Error::EntityNotFound(id))?;
        if let Some(subs) = self.subscriptions.remove(&id) {
            entity.events_mut().tag_added.unsubscribe(subs.tag_added);
            entity.events_mut().tag_removed.unsubscribe(subs.tag_removed);
        }
        let mut index = self.tag_index.borrow_mut();
        for tag in entity.tags() {
            unindex(&mut index, tag, id);
        }
        drop(index);
        tracing::debug!(entity = %id, "despawned");
        Ok(entity)
    }

    /// Returns the entity with this id.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns the entity with this id for mutation.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Returns `true` if the world holds an entity with this id.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Returns the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the world holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates the entities in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Returns the ids of every entity carrying `tag`, sorted.
    pub fn entities_with_tag(&self, tag: TagId) -> Vec<EntityId> {
        let index = self.tag_index.borrow();
        let mut ids: Vec<EntityId> = index
            .get(&tag)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Returns the ids of every entity carrying all of `tags`, sorted. An
    /// empty tag list matches every entity.
    pub fn filter(&self, tags: &[TagId]) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = match tags {
            [] => self.entities.keys().copied().collect(),
            _ => {
                let index = self.tag_index.borrow();
                let smallest = tags
                    .iter()
                    .map(|tag| index.get(tag).map_or(0, |set| set.len()))
                    .zip(tags)
                    .min_by_key(|(len, _)| *len)
                    .and_then(|(_, tag)| index.get(tag));
                match smallest {
                    Some(set) => set
                        .iter()
                        .copied()
                        .filter(|id| {
                            self.entities
                                .get(id)
                                .is_some_and(|e| tags.iter().all(|&t| e.has_tag(t)))
                        })
                        .collect(),
                    None => Vec::new(),
                }
            }
        };
        ids.sort_unstable();
        ids
    }

    fn for_each_live(&mut self, mut f: impl FnMut(&mut Entity)) {
        for entity in self.entities.values_mut() {
            if entity.state() != LifecycleState::Disposed {
                f(entity);
            }
        }
    }

    fn set_state(&mut self, state: LifecycleState) {
        tracing::debug!(from = ?self.state, to = ?state, entities = self.len(), "world lifecycle");
        self.state = state;
    }

    /// Initializes every entity. Does nothing after the first call.
    pub fn init(&mut self) {
        if self.state != LifecycleState::Created {
            return;
        }
        self.for_each_live(Entity::init_hooks);
        self.set_state(LifecycleState::Initialized);
    }

    /// Enables every entity, initializing the world first when needed.
    pub fn enable(&mut self) {
        self.init();
        if matches!(self.state, LifecycleState::Initialized | LifecycleState::Disabled) {
            self.for_each_live(Entity::enable_hooks);
            self.set_state(LifecycleState::Enabled);
        }
    }

    /// Ticks every enabled entity once.
    pub fn tick(&mut self, delta: f32) {
        if self.state == LifecycleState::Enabled {
            self.for_each_live(|e| e.tick_hooks(delta));
        }
    }

    /// Disables every entity.
    pub fn disable(&mut self) {
        if self.state == LifecycleState::Enabled {
            self.for_each_live(Entity::disable_hooks);
            self.set_state(LifecycleState::Disabled);
        }
    }

    /// Disposes and drops every entity.
    pub fn dispose(&mut self) {
        if self.state == LifecycleState::Disposed {
            return;
        }
        self.for_each_live(Entity::dispose_hooks);
        self.entities.clear();
        self.subscriptions.clear();
        self.tag_index.borrow_mut().clear();
        self.set_state(LifecycleState::Disposed);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for World {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("World")
            .field("state", &self.state)
            .field("entities", &self.entities.len())
            .field("tags", &self.tag_index.borrow().len())
            .finish()
    }
}

fn unindex(index: &mut TagIndex, tag: TagId, entity: EntityId) {
    if let Some(set) = index.get_mut(&tag) {
        set.remove(&entity);
        if set.is_empty() {
            index.remove(&tag);
        }
    }
}
