//! radkit runtime module.
//!
//! This module provides the core object infrastructure for radkit:
//!
//! - [`typedesc`]: Immutable per-type metadata and type identity
//! - [`object`]: Reference-counted object lifecycle (create/retain/release/clone)
//! - [`binding`]: Foreign-peer identity association
//! - [`registry`]: Lazily-built name -> descriptor registry
//! - [`hashtable`]: String-keyed owning map of objects
//! - [`list`]: Owning ordered list of objects
//! - [`plain`]: Non-owning ordered list for caller-managed values
//!
//! # Architecture
//!
//! Every domain type implements [`CoreObject`] and declares one static
//! [`TypeDescriptor`]. Instances are reached only through [`ObjectRef`]
//! handles; cloning a handle retains the instance, dropping it releases,
//! and the payload's destructor runs exactly once when the last handle
//! goes away. Aggregates are composed with the owning containers, which
//! retain their elements and release them on removal and destruction.

pub mod binding;
pub mod hashtable;
pub mod list;
pub mod object;
pub mod plain;
pub mod registry;
pub mod typedesc;

pub use binding::Peer;
pub use hashtable::ObjectHashTable;
pub use list::ObjectList;
pub use object::{CoreObject, ObjectRef};
pub use plain::PlainList;
pub use registry::{
    is_registered, new_object, register_type, registered_type_names,
    type_from_name,
};
pub use typedesc::{Constructor, TypeDescriptor};
