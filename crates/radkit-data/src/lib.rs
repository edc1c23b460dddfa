//! radkit-data: weather-radar data types built on the radkit object
//! runtime.
//!
//! Every type here implements [`radkit_core::runtime::CoreObject`] and
//! declares one static [`radkit_core::runtime::TypeDescriptor`]:
//!
//! - [`attribute::Attribute`]: named long/double/text metadata values
//! - [`area::Area`]: cartesian grid geometry definitions
//! - [`area_registry::AreaRegistry`]: id-addressable collection of areas
//! - [`cartesian::Cartesian`] and [`cartesian::CartesianParam`]:
//!   projected 2-D products and their quantity layers
//! - [`radar_definition::RadarDefinition`]: radar site descriptions
//!
//! Instances are reached through `ObjectRef` handles and composed with
//! the runtime's owning containers; all of the types above declare the
//! deep-clone capability.
//!
//! Call [`register_builtin_types`] once at startup if objects need to be
//! materialized by name (scripting hosts, persistence layers). Direct
//! use of the descriptors does not require registration.

pub mod area;
pub mod area_registry;
pub mod attribute;
pub mod cartesian;
pub mod radar_definition;

pub use area::{Area, AREA_TYPE};
pub use area_registry::{AreaRegistry, AREA_REGISTRY_TYPE};
pub use attribute::{Attribute, AttributeValue, ATTRIBUTE_TYPE};
pub use cartesian::{Cartesian, CartesianParam, CARTESIAN_PARAM_TYPE, CARTESIAN_TYPE};
pub use radar_definition::{RadarDefinition, RADAR_DEFINITION_TYPE};

use radkit_core::error::Result;
use radkit_core::runtime::register_type;

/// Registers every data type with the global name registry.
///
/// Safe to call more than once; re-registration of the same descriptors
/// is a no-op.
///
/// # Errors
///
/// Returns [`radkit_core::error::Error::TypeAlreadyRegistered`] if a
/// foreign descriptor already claimed one of the names.
pub fn register_builtin_types() -> Result<()> {
    register_type(&ATTRIBUTE_TYPE)?;
    register_type(&AREA_TYPE)?;
    register_type(&AREA_REGISTRY_TYPE)?;
    register_type(&CARTESIAN_TYPE)?;
    register_type(&CARTESIAN_PARAM_TYPE)?;
    register_type(&RADAR_DEFINITION_TYPE)?;
    radkit_log::info!("registered builtin data types");
    Ok(())
}
