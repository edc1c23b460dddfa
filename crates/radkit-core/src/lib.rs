//! radkit-core: object runtime for the radkit weather-radar toolkit.
//!
//! Every data type in the toolkit — grids, parameters, attributes, areas,
//! registries — is an instance of this small object runtime. It provides:
//!
//! - **Uniform lifecycle**: descriptor-driven construction, atomic
//!   reference counting, explicit deep cloning
//! - **Ownership-aware containers**: a string-keyed owning hash table and
//!   an owning ordered list, plus a non-owning companion list
//! - **Foreign-peer binding** for identity-stable scripting wrappers
//!
//! # Architecture
//!
//! Retain and release are not callable functions: they are `Clone` and
//! `Drop` on [`runtime::ObjectRef`], which makes double-release and
//! use-after-destroy unrepresentable in safe code. Type identity is the
//! pointer of a static [`runtime::TypeDescriptor`], so downcast checks
//! are one comparison.
//!
//! # Example
//!
//! ```
//! use radkit_core::runtime::{CoreObject, ObjectHashTable, ObjectRef, TypeDescriptor};
//! use std::any::Any;
//!
//! #[derive(Default)]
//! struct Marker;
//!
//! static MARKER_TYPE: TypeDescriptor =
//!     TypeDescriptor::new("Marker", || Ok(Box::new(Marker)));
//!
//! impl CoreObject for Marker {
//!     fn type_descriptor(&self) -> &'static TypeDescriptor {
//!         &MARKER_TYPE
//!     }
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let obj = ObjectRef::create(&MARKER_TYPE).unwrap();
//!
//! let mut params = ObjectHashTable::new();
//! params.put("DBZH", &obj);
//! assert_eq!(obj.refcount(), 2);
//! ```

pub mod error;
pub mod runtime;

// Re-export commonly used types
pub use error::{Error, Result};
pub use runtime::{
    CoreObject, ObjectHashTable, ObjectList, ObjectRef, Peer, PlainList,
    TypeDescriptor,
};
