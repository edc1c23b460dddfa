//! Cartesian products and their parameters.
//!
//! A [`Cartesian`] is a projected 2-D radar product: grid geometry taken
//! from an [`Area`](crate::area::Area), a set of named
//! [`CartesianParam`] quantities ("DBZH", "TH", ...), top-level metadata
//! attributes, and optional quality fields. The parameters and
//! attributes live in owning hash tables, the quality fields in an
//! owning list, so the product releases everything it holds exactly
//! once when the last handle goes away.

use crate::area::{Area, Extent, AREA_TYPE};
use crate::attribute::{Attribute, ATTRIBUTE_TYPE};
use radkit_core::error::{Error, Result};
use radkit_core::runtime::{
    CoreObject, ObjectHashTable, ObjectList, ObjectRef, PlainList, TypeDescriptor,
};
use std::any::Any;
use std::sync::RwLock;

/// Returns true if `name` is a valid attribute name: a `what/`, `where/`
/// or `how/` group prefix followed by a non-empty rest.
fn valid_attribute_name(name: &str) -> bool {
    match name.split_once('/') {
        Some((group, rest)) => {
            matches!(group, "what" | "where" | "how") && !rest.is_empty()
        }
        None => false,
    }
}

#[derive(Debug)]
struct ParamInner {
    quantity: Option<String>,
    gain: f64,
    offset: f64,
    nodata: f64,
    undetect: f64,
    xsize: usize,
    ysize: usize,
    data: Vec<f64>,
    attrs: ObjectHashTable,
}

impl Default for ParamInner {
    fn default() -> Self {
        Self {
            quantity: None,
            gain: 1.0,
            offset: 0.0,
            nodata: 0.0,
            undetect: 0.0,
            xsize: 0,
            ysize: 0,
            data: Vec::new(),
            attrs: ObjectHashTable::new(),
        }
    }
}

/// One quantity layer of a cartesian product.
///
/// Stored values are raw; [`CartesianParam::converted_value`] applies
/// the linear `offset + gain * raw` scaling.
#[derive(Debug, Default)]
pub struct CartesianParam {
    inner: RwLock<ParamInner>,
}

/// Descriptor for [`CartesianParam`]; clonable.
pub static CARTESIAN_PARAM_TYPE: TypeDescriptor =
    TypeDescriptor::new("CartesianParam", || Ok(Box::new(CartesianParam::default()))).clonable();

impl CartesianParam {
    /// Creates an empty parameter instance.
    ///
    /// # Errors
    ///
    /// Construction itself cannot fail; the `Result` mirrors descriptor
    /// construction so callers handle one shape everywhere.
    pub fn create() -> Result<ObjectRef> {
        ObjectRef::create(&CARTESIAN_PARAM_TYPE)
    }

    /// Returns the quantity name ("DBZH", "TH", ...).
    #[must_use]
    pub fn quantity(&self) -> Option<String> {
        self.inner.read().unwrap().quantity.clone()
    }

    /// Sets the quantity name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the quantity is empty.
    pub fn set_quantity(&self, quantity: &str) -> Result<()> {
        if quantity.is_empty() {
            return Err(Error::InvalidArgument {
                type_name: "CartesianParam",
                reason: "quantity must not be empty".to_string(),
            });
        }
        self.inner.write().unwrap().quantity = Some(quantity.to_string());
        Ok(())
    }

    /// Returns the linear scaling gain (default 1.0).
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.inner.read().unwrap().gain
    }

    /// Sets the linear scaling gain.
    pub fn set_gain(&self, gain: f64) {
        self.inner.write().unwrap().gain = gain;
    }

    /// Returns the linear scaling offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.inner.read().unwrap().offset
    }

    /// Sets the linear scaling offset.
    pub fn set_offset(&self, offset: f64) {
        self.inner.write().unwrap().offset = offset;
    }

    /// Returns the raw value marking "no data collected".
    #[must_use]
    pub fn nodata(&self) -> f64 {
        self.inner.read().unwrap().nodata
    }

    /// Sets the nodata marker value.
    pub fn set_nodata(&self, nodata: f64) {
        self.inner.write().unwrap().nodata = nodata;
    }

    /// Returns the raw value marking "measured but nothing detected".
    #[must_use]
    pub fn undetect(&self) -> f64 {
        self.inner.read().unwrap().undetect
    }

    /// Sets the undetect marker value.
    pub fn set_undetect(&self, undetect: f64) {
        self.inner.write().unwrap().undetect = undetect;
    }

    /// Returns the grid dimensions (xsize, ysize).
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        let inner = self.inner.read().unwrap();
        (inner.xsize, inner.ysize)
    }

    /// Installs the data grid, row-major with `ysize` rows of `xsize`
    /// columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `xsize * ysize` overflows
    /// or the data length does not match it.
    pub fn set_data(&self, xsize: usize, ysize: usize, data: Vec<f64>) -> Result<()> {
        let expected = xsize.checked_mul(ysize).ok_or_else(|| Error::InvalidArgument {
            type_name: "CartesianParam",
            reason: format!("grid dimensions {xsize}x{ysize} overflow"),
        })?;
        if data.len() != expected {
            return Err(Error::InvalidArgument {
                type_name: "CartesianParam",
                reason: format!(
                    "data length {} does not match {xsize}x{ysize}",
                    data.len()
                ),
            });
        }
        let mut inner = self.inner.write().unwrap();
        inner.xsize = xsize;
        inner.ysize = ysize;
        inner.data = data;
        Ok(())
    }

    /// Returns the raw value at grid position (x, y), or `None` if the
    /// position is outside the grid.
    #[must_use]
    pub fn value(&self, x: usize, y: usize) -> Option<f64> {
        let inner = self.inner.read().unwrap();
        if x >= inner.xsize || y >= inner.ysize {
            return None;
        }
        Some(inner.data[y * inner.xsize + x])
    }

    /// Sets the raw value at grid position (x, y). Returns false if the
    /// position is outside the grid.
    pub fn set_value(&self, x: usize, y: usize, value: f64) -> bool {
        let mut inner = self.inner.write().unwrap();
        if x >= inner.xsize || y >= inner.ysize {
            return false;
        }
        let index = y * inner.xsize + x;
        inner.data[index] = value;
        true
    }

    /// Returns the scaled value `offset + gain * raw` at (x, y).
    ///
    /// Nodata and undetect markers are raw values and are returned
    /// unscaled.
    #[must_use]
    pub fn converted_value(&self, x: usize, y: usize) -> Option<f64> {
        let raw = self.value(x, y)?;
        let inner = self.inner.read().unwrap();
        if raw == inner.nodata || raw == inner.undetect {
            return Some(raw);
        }
        Some(inner.offset + inner.gain * raw)
    }

    /// Adds a metadata attribute, retaining it. The attribute's name is
    /// the table key, so re-adding a name replaces the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the object is not an
    /// `Attribute`, or [`Error::InvalidArgument`] if its name lacks a
    /// `what/`, `where/` or `how/` group prefix.
    pub fn add_attribute(&self, attr: &ObjectRef) -> Result<()> {
        let name = checked_attribute_name("CartesianParam", attr)?;
        self.inner.write().unwrap().attrs.put(&name, attr);
        Ok(())
    }

    /// Returns a freshly retained reference to the named attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<ObjectRef> {
        self.inner.read().unwrap().attrs.get(name)
    }

    /// Returns the attribute names. Order is unspecified.
    #[must_use]
    pub fn attribute_names(&self) -> PlainList<String> {
        self.inner.read().unwrap().attrs.keys()
    }
}

impl CoreObject for CartesianParam {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &CARTESIAN_PARAM_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deep_clone(&self) -> Result<Box<dyn CoreObject>> {
        let inner = self.inner.read().unwrap();
        Ok(Box::new(CartesianParam {
            inner: RwLock::new(ParamInner {
                quantity: inner.quantity.clone(),
                gain: inner.gain,
                offset: inner.offset,
                nodata: inner.nodata,
                undetect: inner.undetect,
                xsize: inner.xsize,
                ysize: inner.ysize,
                data: inner.data.clone(),
                attrs: inner.attrs.try_clone()?,
            }),
        }))
    }
}

/// Type-checks an object as an `Attribute` with a grouped name and
/// returns that name.
fn checked_attribute_name(owner: &'static str, attr: &ObjectRef) -> Result<String> {
    let Some(payload) = attr.downcast_ref::<Attribute>() else {
        return Err(Error::TypeMismatch {
            expected: "Attribute",
            got: attr.type_name(),
        });
    };
    debug_assert!(attr.is_type(&ATTRIBUTE_TYPE));

    let name = payload.name();
    if !valid_attribute_name(&name) {
        radkit_log::warn!("rejected attribute name '{name}'");
        return Err(Error::InvalidArgument {
            type_name: owner,
            reason: format!("attribute name '{name}' lacks a what/, where/ or how/ group"),
        });
    }
    Ok(name)
}

#[derive(Debug, Default)]
struct CartesianInner {
    date: Option<String>,
    time: Option<String>,
    source: Option<String>,
    xsize: usize,
    ysize: usize,
    xscale: f64,
    yscale: f64,
    extent: Extent,
    default_parameter: Option<String>,
    attrs: ObjectHashTable,
    params: ObjectHashTable,
    quality: ObjectList,
}

/// A projected 2-D radar product.
///
/// # Example
///
/// ```
/// use radkit_data::cartesian::{Cartesian, CartesianParam};
///
/// let product = Cartesian::create().unwrap();
/// let cartesian = product.downcast_ref::<Cartesian>().unwrap();
///
/// let param = CartesianParam::create().unwrap();
/// param
///     .downcast_ref::<CartesianParam>()
///     .unwrap()
///     .set_quantity("DBZH")
///     .unwrap();
///
/// cartesian.add_parameter(&param).unwrap();
/// assert!(cartesian.has_parameter("DBZH"));
/// assert_eq!(cartesian.default_parameter(), Some("DBZH".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct Cartesian {
    inner: RwLock<CartesianInner>,
}

/// Descriptor for [`Cartesian`]; clonable.
pub static CARTESIAN_TYPE: TypeDescriptor =
    TypeDescriptor::new("Cartesian", || Ok(Box::new(Cartesian::default()))).clonable();

impl Cartesian {
    /// Creates an empty product instance.
    ///
    /// # Errors
    ///
    /// Construction itself cannot fail; the `Result` mirrors descriptor
    /// construction so callers handle one shape everywhere.
    pub fn create() -> Result<ObjectRef> {
        ObjectRef::create(&CARTESIAN_TYPE)
    }

    /// Copies grid geometry from an area definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the object is not an `Area`.
    pub fn init(&self, area_obj: &ObjectRef) -> Result<()> {
        let Some(area) = area_obj.downcast_ref::<Area>() else {
            return Err(Error::TypeMismatch {
                expected: "Area",
                got: area_obj.type_name(),
            });
        };
        debug_assert!(area_obj.is_type(&AREA_TYPE));

        let mut inner = self.inner.write().unwrap();
        inner.xsize = area.xsize();
        inner.ysize = area.ysize();
        inner.xscale = area.xscale();
        inner.yscale = area.yscale();
        inner.extent = area.extent();
        Ok(())
    }

    /// Returns the nominal date as `YYYYMMDD`.
    #[must_use]
    pub fn date(&self) -> Option<String> {
        self.inner.read().unwrap().date.clone()
    }

    /// Sets the nominal date (`YYYYMMDD`).
    pub fn set_date(&self, date: &str) {
        self.inner.write().unwrap().date = Some(date.to_string());
    }

    /// Returns the nominal time as `HHmmss`.
    #[must_use]
    pub fn time(&self) -> Option<String> {
        self.inner.read().unwrap().time.clone()
    }

    /// Sets the nominal time (`HHmmss`).
    pub fn set_time(&self, time: &str) {
        self.inner.write().unwrap().time = Some(time.to_string());
    }

    /// Returns the data source identifier.
    #[must_use]
    pub fn source(&self) -> Option<String> {
        self.inner.read().unwrap().source.clone()
    }

    /// Sets the data source identifier.
    pub fn set_source(&self, source: &str) {
        self.inner.write().unwrap().source = Some(source.to_string());
    }

    /// Returns the grid dimensions (xsize, ysize).
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        let inner = self.inner.read().unwrap();
        (inner.xsize, inner.ysize)
    }

    /// Returns the horizontal resolution in projection units.
    #[must_use]
    pub fn xscale(&self) -> f64 {
        self.inner.read().unwrap().xscale
    }

    /// Returns the vertical resolution in projection units.
    #[must_use]
    pub fn yscale(&self) -> f64 {
        self.inner.read().unwrap().yscale
    }

    /// Returns the surface extent (llx, lly, urx, ury).
    #[must_use]
    pub fn extent(&self) -> Extent {
        self.inner.read().unwrap().extent
    }

    /// Adds a top-level metadata attribute, retaining it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the object is not an
    /// `Attribute`, or [`Error::InvalidArgument`] if its name lacks a
    /// `what/`, `where/` or `how/` group prefix.
    pub fn add_attribute(&self, attr: &ObjectRef) -> Result<()> {
        let name = checked_attribute_name("Cartesian", attr)?;
        self.inner.write().unwrap().attrs.put(&name, attr);
        Ok(())
    }

    /// Returns a freshly retained reference to the named attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<ObjectRef> {
        self.inner.read().unwrap().attrs.get(name)
    }

    /// Returns true if the named attribute exists.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.inner.read().unwrap().attrs.exists(name)
    }

    /// Returns the attribute names. Order is unspecified.
    #[must_use]
    pub fn attribute_names(&self) -> PlainList<String> {
        self.inner.read().unwrap().attrs.keys()
    }

    /// Adds a parameter, retaining it and keying it by its quantity.
    ///
    /// Re-adding a quantity replaces (and releases) the previous
    /// parameter. The first added parameter becomes the default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the object is not a
    /// `CartesianParam`, or [`Error::InvalidArgument`] if the parameter
    /// has no quantity.
    pub fn add_parameter(&self, param_obj: &ObjectRef) -> Result<()> {
        let Some(param) = param_obj.downcast_ref::<CartesianParam>() else {
            return Err(Error::TypeMismatch {
                expected: "CartesianParam",
                got: param_obj.type_name(),
            });
        };

        let Some(quantity) = param.quantity() else {
            return Err(Error::InvalidArgument {
                type_name: "Cartesian",
                reason: "parameter has no quantity".to_string(),
            });
        };

        let mut inner = self.inner.write().unwrap();
        inner.params.put(&quantity, param_obj);
        if inner.default_parameter.is_none() {
            inner.default_parameter = Some(quantity);
        }
        Ok(())
    }

    /// Returns a freshly retained reference to the parameter for
    /// `quantity`.
    #[must_use]
    pub fn parameter(&self, quantity: &str) -> Option<ObjectRef> {
        self.inner.read().unwrap().params.get(quantity)
    }

    /// Returns true if a parameter for `quantity` exists.
    #[must_use]
    pub fn has_parameter(&self, quantity: &str) -> bool {
        self.inner.read().unwrap().params.exists(quantity)
    }

    /// Removes the parameter for `quantity`, transferring the product's
    /// reference to the caller.
    pub fn remove_parameter(&self, quantity: &str) -> Option<ObjectRef> {
        self.inner.write().unwrap().params.remove(quantity)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.inner.read().unwrap().params.size()
    }

    /// Returns the parameter quantities. Order is unspecified.
    #[must_use]
    pub fn parameter_names(&self) -> PlainList<String> {
        self.inner.read().unwrap().params.keys()
    }

    /// Returns the default parameter quantity.
    #[must_use]
    pub fn default_parameter(&self) -> Option<String> {
        self.inner.read().unwrap().default_parameter.clone()
    }

    /// Selects the default parameter quantity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if no parameter for `quantity`
    /// exists.
    pub fn set_default_parameter(&self, quantity: &str) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        if !inner.params.exists(quantity) {
            return Err(Error::InvalidArgument {
                type_name: "Cartesian",
                reason: format!("no parameter for quantity '{quantity}'"),
            });
        }
        inner.default_parameter = Some(quantity.to_string());
        Ok(())
    }

    /// Appends a quality field, retaining it.
    pub fn add_quality_field(&self, field: &ObjectRef) {
        self.inner.write().unwrap().quality.add(field);
    }

    /// Returns a freshly retained reference to the quality field at
    /// `index`.
    #[must_use]
    pub fn quality_field(&self, index: usize) -> Option<ObjectRef> {
        self.inner.read().unwrap().quality.get(index)
    }

    /// Removes the quality field at `index`, transferring the product's
    /// reference to the caller.
    pub fn remove_quality_field(&self, index: usize) -> Option<ObjectRef> {
        self.inner.write().unwrap().quality.remove(index)
    }

    /// Returns the number of quality fields.
    #[must_use]
    pub fn quality_field_count(&self) -> usize {
        self.inner.read().unwrap().quality.size()
    }
}

impl CoreObject for Cartesian {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &CARTESIAN_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deep_clone(&self) -> Result<Box<dyn CoreObject>> {
        let inner = self.inner.read().unwrap();
        Ok(Box::new(Cartesian {
            inner: RwLock::new(CartesianInner {
                date: inner.date.clone(),
                time: inner.time.clone(),
                source: inner.source.clone(),
                xsize: inner.xsize,
                ysize: inner.ysize,
                xscale: inner.xscale,
                yscale: inner.yscale,
                extent: inner.extent,
                default_parameter: inner.default_parameter.clone(),
                attrs: inner.attrs.try_clone()?,
                params: inner.params.try_clone()?,
                quality: inner.quality.try_clone()?,
            }),
        }))
    }
}
