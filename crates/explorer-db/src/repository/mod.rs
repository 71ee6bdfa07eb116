//! # Repository Module
//!
//! Storage seams and the stores built on them.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Shell entry point                                                     │
//! │       │  favorites.toggle(7)                                           │
//! │       ▼                                                                 │
//! │  FavoritesStore<S>          read ─► mutate FavoriteSet ─► write back   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KeyValueStore (trait)      get(key) / set(key, value)                 │
//! │       │                                                                 │
//! │       ├── SqliteKeyValueStore   key_value_store table                  │
//! │       └── MemoryKeyValueStore   HashMap, for tests                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv`] - The [`kv::KeyValueStore`] seam and its implementations
//! - [`favorites`] - The [`favorites::FavoritesStore`]

pub mod favorites;
pub mod kv;
