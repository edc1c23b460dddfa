//! Registry of named area definitions.
//!
//! An [`AreaRegistry`] owns a list of [`Area`](crate::area::Area)
//! instances and resolves them by identifier. Production setups load one
//! registry at startup and hand out retained references to the areas a
//! product generator asks for.

use crate::area::{Area, AREA_TYPE};
use radkit_core::error::{Error, Result};
use radkit_core::runtime::{CoreObject, ObjectList, ObjectRef, TypeDescriptor};
use std::any::Any;
use std::sync::RwLock;

/// Ordered, id-addressable collection of area definitions.
///
/// Every stored area is retained by the registry. Lookup by identifier
/// is a linear scan; registries are small (tens of areas) and are read
/// far more often than written.
#[derive(Debug, Default)]
pub struct AreaRegistry {
    areas: RwLock<ObjectList>,
}

/// Descriptor for [`AreaRegistry`]; clonable.
pub static AREA_REGISTRY_TYPE: TypeDescriptor =
    TypeDescriptor::new("AreaRegistry", || Ok(Box::new(AreaRegistry::default()))).clonable();

impl AreaRegistry {
    /// Creates an empty registry instance.
    ///
    /// # Errors
    ///
    /// Construction itself cannot fail; the `Result` mirrors descriptor
    /// construction so callers handle one shape everywhere.
    pub fn create() -> Result<ObjectRef> {
        ObjectRef::create(&AREA_REGISTRY_TYPE)
    }

    /// Adds an area to the registry, retaining it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the object is not an `Area`.
    pub fn add(&self, area: &ObjectRef) -> Result<()> {
        if !area.is_type(&AREA_TYPE) {
            radkit_log::warn!(
                "rejected {} instance offered to area registry",
                area.type_name()
            );
            return Err(Error::TypeMismatch {
                expected: "Area",
                got: area.type_name(),
            });
        }
        self.areas.write().unwrap().add(area);
        Ok(())
    }

    /// Returns the number of registered areas.
    #[must_use]
    pub fn size(&self) -> usize {
        self.areas.read().unwrap().size()
    }

    /// Returns a freshly retained reference to the area at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ObjectRef> {
        self.areas.read().unwrap().get(index)
    }

    /// Returns a freshly retained reference to the area with the given
    /// identifier, or `None` if no area matches.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<ObjectRef> {
        let areas = self.areas.read().unwrap();
        for obj in areas.iter() {
            if let Some(area) = obj.downcast_ref::<Area>() {
                if area.id().as_deref() == Some(id) {
                    return Some(obj.clone());
                }
            }
        }
        None
    }

    /// Removes the area at `index`, transferring the registry's
    /// reference to the caller.
    pub fn remove(&self, index: usize) -> Option<ObjectRef> {
        self.areas.write().unwrap().remove(index)
    }

    /// Removes the first area with the given identifier, transferring
    /// the registry's reference to the caller.
    pub fn remove_by_id(&self, id: &str) -> Option<ObjectRef> {
        let mut areas = self.areas.write().unwrap();
        let index = areas
            .iter()
            .position(|obj| {
                obj.downcast_ref::<Area>()
                    .is_some_and(|area| area.id().as_deref() == Some(id))
            })?;
        areas.remove(index)
    }
}

impl CoreObject for AreaRegistry {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &AREA_REGISTRY_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deep_clone(&self) -> Result<Box<dyn CoreObject>> {
        let areas = self.areas.read().unwrap().try_clone()?;
        Ok(Box::new(AreaRegistry {
            areas: RwLock::new(areas),
        }))
    }
}
