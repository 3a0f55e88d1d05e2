#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod entity;
pub mod error;

/// A key-value map over the chained slot table.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers.
pub mod hash_map;

pub mod hash_table;

/// A hash set over the chained slot table.
///
/// This module provides a `HashSet` that wraps the `HashTable` and provides
/// a standard set interface with configurable hashers.
pub mod hash_set;

pub mod hasher;
pub mod observer;
pub mod primes;
pub mod reactive_list;
pub mod reactive_set;
pub mod reactive_variable;
pub mod value;
pub mod world;

pub use entity::Behaviour;
pub use entity::Entity;
pub use entity::EntityId;
pub use entity::LifecycleState;
pub use entity::TagId;
pub use entity::ValueId;
pub use error::Error;
pub use error::Result;
pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use observer::Observers;
pub use observer::SubscriptionId;
pub use reactive_list::ReactiveList;
pub use reactive_set::ReactiveHashSet;
pub use reactive_variable::ReactiveVariable;
pub use value::FromValue;
pub use value::Value;
pub use world::World;
