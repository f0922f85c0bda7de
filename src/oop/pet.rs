use std::collections::BTreeMap;
use std::fmt;

use crate::dispatch::Value;
use crate::error::BindingError;

/// Name a [`Dog`] gets when none is given
pub const DEFAULT_DOG_NAME: &str = "AtomicDog";

/// What every dog says
pub const BARK: &str = "woof!";

/// A pet with a public, read-write name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    /// Pet name
    pub name: String,
}

impl Pet {
    /// Named pet
    pub fn new(name: impl Into<String>) -> Self {
        Pet { name: name.into() }
    }

    /// Current name
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Rename
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// `<example.Pet named 'NAME'>`
impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<example.Pet named '{}'>", self.name)
    }
}

// ============================================================================
// Pet2: property access and dynamic attributes
// ============================================================================

/// A pet whose name is a typed property and which accepts arbitrary extra
/// attributes
#[derive(Debug, Clone, Default)]
pub struct Pet2 {
    name: String,
    attrs: BTreeMap<String, Value>,
}

impl Pet2 {
    /// Named pet with no extra attributes
    pub fn new(name: impl Into<String>) -> Self {
        Pet2 {
            name: name.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// `name` property getter
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `name` property setter
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set an attribute. `name` is the typed property and only takes a
    /// string; every other key is stored as given.
    pub fn set_attr(&mut self, key: &str, value: impl Into<Value>) -> Result<(), BindingError> {
        let value = value.into();
        if key == "name" {
            return match value {
                Value::Str(s) => {
                    self.name = s;
                    Ok(())
                }
                other => Err(BindingError::InvalidArgument(format!(
                    "`name` expects str, got {}",
                    other.type_name()
                ))),
            };
        }
        self.attrs.insert(key.to_string(), value);
        Ok(())
    }

    /// Look up an attribute, including the `name` property
    pub fn get_attr(&self, key: &str) -> Result<Value, BindingError> {
        if key == "name" {
            return Ok(Value::Str(self.name.clone()));
        }
        self.attrs
            .get(key)
            .cloned()
            .ok_or_else(|| BindingError::UnknownAttribute(key.to_string()))
    }

    /// Dynamic attributes only, in key order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ============================================================================
// Dog: composition over Pet
// ============================================================================

/// Anything that can bark
pub trait Bark {
    /// The sound it makes
    fn bark(&self) -> &str;
}

/// A [`Pet`] that barks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dog {
    pet: Pet,
}

impl Dog {
    /// Named dog
    pub fn new(name: impl Into<String>) -> Self {
        Dog { pet: Pet::new(name) }
    }

    /// The underlying pet
    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    /// The underlying pet, mutably
    pub fn pet_mut(&mut self) -> &mut Pet {
        &mut self.pet
    }

    /// Current name
    pub fn get_name(&self) -> &str {
        self.pet.get_name()
    }

    /// Rename
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.pet.set_name(name);
    }
}

impl Default for Dog {
    fn default() -> Self {
        Dog::new(DEFAULT_DOG_NAME)
    }
}

impl Bark for Dog {
    fn bark(&self) -> &str {
        BARK
    }
}

/// Drops the bark capability; only the pet remains
impl From<Dog> for Pet {
    fn from(dog: Dog) -> Self {
        dog.pet
    }
}

/// A dog named Molly, handed out as a plain [`Pet`]
pub fn pet_store() -> Pet {
    Dog::new("Molly").into()
}

// ============================================================================
// Polymorphic exposure
// ============================================================================

/// A pet whose capabilities can be queried after type erasure
pub trait PolymorphicPet: fmt::Debug {
    /// Concrete type name
    fn type_name(&self) -> &'static str;

    /// Bark capability, if the concrete type has one
    fn as_bark(&self) -> Option<&dyn Bark> {
        None
    }
}

/// A dog reachable through [`PolymorphicPet`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolymorphicDog;

impl Bark for PolymorphicDog {
    fn bark(&self) -> &str {
        BARK
    }
}

impl PolymorphicPet for PolymorphicDog {
    fn type_name(&self) -> &'static str {
        "PolymorphicDog"
    }

    fn as_bark(&self) -> Option<&dyn Bark> {
        Some(self)
    }
}

/// A [`PolymorphicDog`] behind the base trait; its bark stays reachable
pub fn pet_store2() -> Box<dyn PolymorphicPet> {
    Box::new(PolymorphicDog)
}
