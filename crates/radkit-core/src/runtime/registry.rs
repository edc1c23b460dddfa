//! Global type registry for the radkit runtime.
//!
//! The registry maps type names to their static descriptors so that
//! consumers which only know a name — the persistence layer materializing
//! objects from file metadata, scripting hosts — can create instances
//! without compile-time knowledge of the type.
//!
//! Registration is optional: descriptors are usable directly as statics;
//! the registry only adds the by-name lookup path. It is lazily built and
//! guarded by a `RwLock`, so lookups from many threads proceed in
//! parallel.

use crate::error::{Error, Result};
use crate::runtime::object::ObjectRef;
use crate::runtime::plain::PlainList;
use crate::runtime::typedesc::TypeDescriptor;
use fxhash::FxBuildHasher;
use hashbrown::HashMap;
use std::sync::{OnceLock, RwLock};

/// Map of type name -> static descriptor.
type RegistryMap = HashMap<&'static str, &'static TypeDescriptor, FxBuildHasher>;

/// Global registry instance, built on first use.
static REGISTRY: OnceLock<RwLock<RegistryMap>> = OnceLock::new();

fn registry() -> &'static RwLock<RegistryMap> {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::default()))
}

/// Registers a type descriptor under its name.
///
/// # Errors
///
/// Returns [`Error::TypeAlreadyRegistered`] if a descriptor with the same
/// name is already present. Re-registering the identical descriptor is
/// accepted as a no-op (module initialization paths may race).
pub fn register_type(ty: &'static TypeDescriptor) -> Result<()> {
    let mut map = registry().write().unwrap();

    if let Some(existing) = map.get(ty.name()) {
        if TypeDescriptor::same_type(existing, ty) {
            return Ok(());
        }
        return Err(Error::TypeAlreadyRegistered { name: ty.name() });
    }

    radkit_log::debug!("registered type {}", ty.name());
    map.insert(ty.name(), ty);
    Ok(())
}

/// Returns the descriptor registered under `name`, if any.
#[must_use]
pub fn type_from_name(name: &str) -> Option<&'static TypeDescriptor> {
    registry().read().unwrap().get(name).copied()
}

/// Returns true if a descriptor is registered under `name`.
#[must_use]
pub fn is_registered(name: &str) -> bool {
    registry().read().unwrap().contains_key(name)
}

/// Creates a fresh instance of the type registered under `name`.
///
/// # Errors
///
/// Returns [`Error::TypeNotRegistered`] if the name is unknown, or the
/// constructor's [`Error::ConstructorFailure`].
pub fn new_object(name: &str) -> Result<ObjectRef> {
    let ty = type_from_name(name).ok_or_else(|| Error::TypeNotRegistered {
        name: name.to_string(),
    })?;
    ObjectRef::create(ty)
}

/// Returns the registered type names as a non-owning list.
///
/// Order is unspecified.
#[must_use]
pub fn registered_type_names() -> PlainList<&'static str> {
    registry().read().unwrap().keys().copied().collect()
}
