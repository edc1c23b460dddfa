//! Named scalar/text attributes.
//!
//! An [`Attribute`] is the smallest unit of radar metadata: a name like
//! `how/wavelength` paired with a long, double, or text value. Products
//! and parameters keep their attributes in an `ObjectHashTable` keyed by
//! the attribute name.

use radkit_core::error::{Error, Result};
use radkit_core::runtime::{CoreObject, ObjectRef, TypeDescriptor};
use std::any::Any;
use std::sync::RwLock;

/// The value carried by an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Signed integer value.
    Long(i64),
    /// Floating-point value.
    Double(f64),
    /// Text value.
    Text(String),
}

#[derive(Debug, Default)]
struct AttributeInner {
    name: String,
    value: Option<AttributeValue>,
}

/// A named metadata value.
///
/// State is guarded by an `RwLock` so attributes can be read through
/// shared handles from multiple threads.
///
/// # Example
///
/// ```
/// use radkit_data::attribute::{Attribute, AttributeValue};
///
/// let attr = Attribute::create("how/wavelength", AttributeValue::Double(5.35)).unwrap();
/// let payload = attr.downcast_ref::<Attribute>().unwrap();
///
/// assert_eq!(payload.name(), "how/wavelength");
/// assert_eq!(payload.value(), Some(AttributeValue::Double(5.35)));
/// ```
#[derive(Debug, Default)]
pub struct Attribute {
    inner: RwLock<AttributeInner>,
}

/// Descriptor for [`Attribute`]; clonable.
pub static ATTRIBUTE_TYPE: TypeDescriptor =
    TypeDescriptor::new("Attribute", || Ok(Box::new(Attribute::default()))).clonable();

impl Attribute {
    /// Creates an attribute with the given name and value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstructorFailure`] if the name is empty.
    pub fn create(name: &str, value: AttributeValue) -> Result<ObjectRef> {
        if name.is_empty() {
            return Err(Error::ConstructorFailure {
                type_name: "Attribute",
                reason: "attribute name must not be empty".to_string(),
            });
        }

        let attr = Attribute {
            inner: RwLock::new(AttributeInner {
                name: name.to_string(),
                value: Some(value),
            }),
        };
        Ok(ObjectRef::from_instance(Box::new(attr)))
    }

    /// Returns the attribute name.
    #[must_use]
    pub fn name(&self) -> String {
        self.inner.read().unwrap().name.clone()
    }

    /// Sets the attribute name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is empty.
    pub fn set_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidArgument {
                type_name: "Attribute",
                reason: "attribute name must not be empty".to_string(),
            });
        }
        self.inner.write().unwrap().name = name.to_string();
        Ok(())
    }

    /// Returns the attribute value, if one has been set.
    #[must_use]
    pub fn value(&self) -> Option<AttributeValue> {
        self.inner.read().unwrap().value.clone()
    }

    /// Sets the attribute value.
    pub fn set_value(&self, value: AttributeValue) {
        self.inner.write().unwrap().value = Some(value);
    }
}

impl CoreObject for Attribute {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &ATTRIBUTE_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deep_clone(&self) -> Result<Box<dyn CoreObject>> {
        let inner = self.inner.read().unwrap();
        Ok(Box::new(Attribute {
            inner: RwLock::new(AttributeInner {
                name: inner.name.clone(),
                value: inner.value.clone(),
            }),
        }))
    }
}
