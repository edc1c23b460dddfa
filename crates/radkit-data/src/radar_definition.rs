//! Radar site definitions.
//!
//! A [`RadarDefinition`] describes a radar installation: identifier,
//! geographic position, antenna properties and the scan strategy's
//! elevation angles. Product generators use it to decide coverage and
//! quality weighting for a site.

use radkit_core::error::{Error, Result};
use radkit_core::runtime::{CoreObject, ObjectRef, TypeDescriptor};
use std::any::Any;
use std::sync::RwLock;

#[derive(Debug, Default, Clone)]
struct RadarDefinitionInner {
    id: Option<String>,
    description: Option<String>,
    longitude: f64,
    latitude: f64,
    height: f64,
    elangles: Vec<f64>,
    nrays: usize,
    nbins: usize,
    scale: f64,
    beamwidth: f64,
    wavelength: f64,
}

/// Definition of a radar installation.
///
/// Angles are in radians, the position in radians/meters, `scale` is the
/// range-bin length in meters. State is guarded by an `RwLock` so
/// definitions can be shared between registries and generators.
#[derive(Debug, Default)]
pub struct RadarDefinition {
    inner: RwLock<RadarDefinitionInner>,
}

/// Descriptor for [`RadarDefinition`]; clonable.
pub static RADAR_DEFINITION_TYPE: TypeDescriptor =
    TypeDescriptor::new("RadarDefinition", || Ok(Box::new(RadarDefinition::default()))).clonable();

impl RadarDefinition {
    /// Creates an empty radar definition instance.
    ///
    /// # Errors
    ///
    /// Construction itself cannot fail; the `Result` mirrors descriptor
    /// construction so callers handle one shape everywhere.
    pub fn create() -> Result<ObjectRef> {
        ObjectRef::create(&RADAR_DEFINITION_TYPE)
    }

    /// Returns the radar identifier.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.inner.read().unwrap().id.clone()
    }

    /// Sets the radar identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the identifier is empty.
    pub fn set_id(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::InvalidArgument {
                type_name: "RadarDefinition",
                reason: "radar identifier must not be empty".to_string(),
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

    /// Returns the site longitude in radians.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.inner.read().unwrap().longitude
    }

    /// Sets the site longitude in radians.
    pub fn set_longitude(&self, longitude: f64) {
        self.inner.write().unwrap().longitude = longitude;
    }

    /// Returns the site latitude in radians.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.inner.read().unwrap().latitude
    }

    /// Sets the site latitude in radians.
    pub fn set_latitude(&self, latitude: f64) {
        self.inner.write().unwrap().latitude = latitude;
    }

    /// Returns the antenna height above sea level in meters.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.inner.read().unwrap().height
    }

    /// Sets the antenna height above sea level in meters.
    pub fn set_height(&self, height: f64) {
        self.inner.write().unwrap().height = height;
    }

    /// Returns the scan strategy's elevation angles in radians.
    #[must_use]
    pub fn elangles(&self) -> Vec<f64> {
        self.inner.read().unwrap().elangles.clone()
    }

    /// Sets the scan strategy's elevation angles in radians.
    pub fn set_elangles(&self, elangles: Vec<f64>) {
        self.inner.write().unwrap().elangles = elangles;
    }

    /// Returns the number of rays per scan.
    #[must_use]
    pub fn nrays(&self) -> usize {
        self.inner.read().unwrap().nrays
    }

    /// Sets the number of rays per scan.
    pub fn set_nrays(&self, nrays: usize) {
        self.inner.write().unwrap().nrays = nrays;
    }

    /// Returns the number of range bins per ray.
    #[must_use]
    pub fn nbins(&self) -> usize {
        self.inner.read().unwrap().nbins
    }

    /// Sets the number of range bins per ray.
    pub fn set_nbins(&self, nbins: usize) {
        self.inner.write().unwrap().nbins = nbins;
    }

    /// Returns the range-bin length in meters.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.inner.read().unwrap().scale
    }

    /// Sets the range-bin length in meters.
    pub fn set_scale(&self, scale: f64) {
        self.inner.write().unwrap().scale = scale;
    }

    /// Returns the antenna beam width in radians.
    #[must_use]
    pub fn beamwidth(&self) -> f64 {
        self.inner.read().unwrap().beamwidth
    }

    /// Sets the antenna beam width in radians.
    pub fn set_beamwidth(&self, beamwidth: f64) {
        self.inner.write().unwrap().beamwidth = beamwidth;
    }

    /// Returns the radar wavelength in meters.
    #[must_use]
    pub fn wavelength(&self) -> f64 {
        self.inner.read().unwrap().wavelength
    }

    /// Sets the radar wavelength in meters.
    pub fn set_wavelength(&self, wavelength: f64) {
        self.inner.write().unwrap().wavelength = wavelength;
    }
}

impl CoreObject for RadarDefinition {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &RADAR_DEFINITION_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deep_clone(&self) -> Result<Box<dyn CoreObject>> {
        let inner = self.inner.read().unwrap();
        Ok(Box::new(RadarDefinition {
            inner: RwLock::new(inner.clone()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_definition() -> ObjectRef {
        let obj = RadarDefinition::create().unwrap();
        let def = obj.downcast_ref::<RadarDefinition>().unwrap();
        def.set_id("sella").unwrap();
        def.set_description("Luleå radar");
        def.set_longitude(0.38);
        def.set_latitude(1.15);
        def.set_height(17.0);
        def.set_elangles(vec![0.009, 0.014, 0.021]);
        def.set_nrays(420);
        def.set_nbins(480);
        def.set_scale(500.0);
        def.set_beamwidth(0.017);
        def.set_wavelength(0.053);
        obj
    }

    #[test]
    fn test_accessors() {
        let obj = sample_definition();
        let def = obj.downcast_ref::<RadarDefinition>().unwrap();

        assert_eq!(def.id(), Some("sella".to_string()));
        assert_eq!(def.elangles().len(), 3);
        assert_eq!(def.nrays(), 420);
        assert_eq!(def.nbins(), 480);
        assert_eq!(def.scale(), 500.0);
        assert_eq!(def.beamwidth(), 0.017);
        assert_eq!(def.wavelength(), 0.053);
    }

    #[test]
    fn test_empty_id_rejected() {
        let obj = RadarDefinition::create().unwrap();
        let def = obj.downcast_ref::<RadarDefinition>().unwrap();

        assert!(matches!(
            def.set_id(""),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(def.id(), None);
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let obj = sample_definition();
        let copy = obj.try_clone().unwrap();
        assert_ne!(copy, obj);

        let original = obj.downcast_ref::<RadarDefinition>().unwrap();
        let cloned = copy.downcast_ref::<RadarDefinition>().unwrap();
        assert_eq!(cloned.id(), Some("sella".to_string()));
        assert_eq!(cloned.elangles(), original.elangles());

        // The elevation angles were duplicated, not shared.
        cloned.set_elangles(vec![0.04]);
        assert_eq!(original.elangles().len(), 3);
        assert_eq!(cloned.elangles().len(), 1);
    }
}
