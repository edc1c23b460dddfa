//! Cartesian area definitions.
//!
//! An [`Area`] describes the geometry of a product grid: an identifier,
//! the projection it is expressed in, the grid dimensions and resolution,
//! and the surface extent in projection coordinates.

use radkit_core::error::{Error, Result};
use radkit_core::runtime::{CoreObject, ObjectRef, TypeDescriptor};
use std::any::Any;
use std::sync::RwLock;

/// Surface extent in projection coordinates: (llx, lly, urx, ury).
pub type Extent = (f64, f64, f64, f64);

#[derive(Debug, Default, Clone)]
struct AreaInner {
    id: Option<String>,
    description: Option<String>,
    pcs_id: Option<String>,
    xsize: usize,
    ysize: usize,
    xscale: f64,
    yscale: f64,
    extent: Extent,
}

/// Geometry definition for a cartesian product grid.
///
/// State is guarded by an `RwLock` so areas can be shared between a
/// registry and the products that were generated from them.
///
/// # Example
///
/// ```
/// use radkit_data::area::{Area, AREA_TYPE};
/// use radkit_core::runtime::ObjectRef;
///
/// let obj = ObjectRef::create(&AREA_TYPE).unwrap();
/// let area = obj.downcast_ref::<Area>().unwrap();
///
/// area.set_id("swegmaps_2000").unwrap();
/// area.set_xsize(970);
/// area.set_ysize(1124);
/// area.set_xscale(2000.0);
/// area.set_yscale(2000.0);
///
/// assert_eq!(area.id(), Some("swegmaps_2000".to_string()));
/// assert_eq!(area.xsize(), 970);
/// ```
#[derive(Debug, Default)]
pub struct Area {
    inner: RwLock<AreaInner>,
}

/// Descriptor for [`Area`]; clonable.
pub static AREA_TYPE: TypeDescriptor =
    TypeDescriptor::new("Area", || Ok(Box::new(Area::default()))).clonable();

impl Area {
    /// Creates an empty area instance.
    ///
    /// # Errors
    ///
    /// Construction itself cannot fail; the `Result` mirrors descriptor
    /// construction so callers handle one shape everywhere.
    pub fn create() -> Result<ObjectRef> {
        ObjectRef::create(&AREA_TYPE)
    }

    /// Returns the area identifier.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.inner.read().unwrap().id.clone()
    }

    /// Sets the area identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the identifier is empty.
    pub fn set_id(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::InvalidArgument {
                type_name: "Area",
                reason: "area identifier must not be empty".to_string(),
            });
        }
        self.inner.write().unwrap().id = Some(id.to_string());
        Ok(())
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.inner.read().unwrap().description.clone()
    }

    /// Sets the free-text description.
    pub fn set_description(&self, description: &str) {
        self.inner.write().unwrap().description = Some(description.to_string());
    }

    /// Returns the projection identifier this area is expressed in.
    #[must_use]
    pub fn pcs_id(&self) -> Option<String> {
        self.inner.read().unwrap().pcs_id.clone()
    }

    /// Sets the projection identifier.
    pub fn set_pcs_id(&self, pcs_id: &str) {
        self.inner.write().unwrap().pcs_id = Some(pcs_id.to_string());
    }

    /// Returns the number of columns in the grid.
    #[must_use]
    pub fn xsize(&self) -> usize {
        self.inner.read().unwrap().xsize
    }

    /// Sets the number of columns in the grid.
    pub fn set_xsize(&self, xsize: usize) {
        self.inner.write().unwrap().xsize = xsize;
    }

    /// Returns the number of rows in the grid.
    #[must_use]
    pub fn ysize(&self) -> usize {
        self.inner.read().unwrap().ysize
    }

    /// Sets the number of rows in the grid.
    pub fn set_ysize(&self, ysize: usize) {
        self.inner.write().unwrap().ysize = ysize;
    }

    /// Returns the horizontal resolution in projection units.
    #[must_use]
    pub fn xscale(&self) -> f64 {
        self.inner.read().unwrap().xscale
    }

    /// Sets the horizontal resolution in projection units.
    pub fn set_xscale(&self, xscale: f64) {
        self.inner.write().unwrap().xscale = xscale;
    }

    /// Returns the vertical resolution in projection units.
    #[must_use]
    pub fn yscale(&self) -> f64 {
        self.inner.read().unwrap().yscale
    }

    /// Sets the vertical resolution in projection units.
    pub fn set_yscale(&self, yscale: f64) {
        self.inner.write().unwrap().yscale = yscale;
    }

    /// Returns the surface extent (llx, lly, urx, ury).
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.inner.read().unwrap().extent
    }

    /// Sets the surface extent (llx, lly, urx, ury).
    pub fn set_extent(&self, extent: Extent) {
        self.inner.write().unwrap().extent = extent;
    }
}

impl CoreObject for Area {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &AREA_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deep_clone(&self) -> Result<Box<dyn CoreObject>> {
        let inner = self.inner.read().unwrap();
        Ok(Box::new(Area {
            inner: RwLock::new(inner.clone()),
        }))
    }
}
