//! Class wrappers: Pet, Pet2, Dog, PolymorphicDog, Overlord, Bird and the
//! custom-constructor demos.

use pyo3::prelude::*;
use pyo3::types::PyType;

use crate::oop::{
    self, create_pub, Attributes, Bird, BirdKind, Dog, Overlord, Pet, Pet2, PrivateCtor,
    SetArg, BARK, DEFAULT_OVERLORD_AGE, DEFAULT_OVERLORD_NAME,
};

// ============================================================================
// Pet / Pet2 / Dog
// ============================================================================

/// Python-visible Pet wrapper
#[pyclass(name = "Pet", subclass)]
#[derive(Clone)]
pub struct PyPet {
    inner: Pet,
}

#[pymethods]
impl PyPet {
    #[new]
    fn new(name: String) -> Self {
        PyPet { inner: Pet::new(name) }
    }

    fn get_name(&self) -> String {
        self.inner.get_name().to_string()
    }

    fn set_name(&mut self, name: String) {
        self.inner.set_name(name);
    }

    #[getter(name)]
    fn name_attr(&self) -> String {
        self.inner.name.clone()
    }

    #[setter(name)]
    fn set_name_attr(&mut self, name: String) {
        self.inner.name = name;
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

/// Python-visible Pet2 wrapper; instances accept dynamic attributes
#[pyclass(name = "Pet2", dict, unsendable)]
pub struct PyPet2 {
    inner: Pet2,
}

#[pymethods]
impl PyPet2 {
    #[new]
    fn new(name: String) -> Self {
        PyPet2 { inner: Pet2::new(name) }
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name().to_string()
    }

    #[setter]
    fn set_name(&mut self, name: String) {
        self.inner.set_name(name);
    }
}

/// Python-visible Dog; a subclass of Pet
#[pyclass(name = "Dog", extends = PyPet)]
pub struct PyDog;

#[pymethods]
impl PyDog {
    #[new]
    #[pyo3(signature = (name=None))]
    fn new(name: Option<String>) -> (Self, PyPet) {
        let dog = name.map_or_else(Dog::default, Dog::new);
        (PyDog, PyPet { inner: dog.into() })
    }

    fn bark(&self) -> &'static str {
        BARK
    }
}

/// A dog named Molly, returned as a plain Pet without `bark`
#[pyfunction]
pub fn pet_store() -> PyPet {
    PyPet {
        inner: oop::pet_store(),
    }
}

// ============================================================================
// Polymorphic exposure
// ============================================================================

/// Python-visible base of the polymorphic pets
#[pyclass(name = "PolymorphicPet", subclass)]
pub struct PyPolymorphicPet;

/// Python-visible PolymorphicDog
#[pyclass(name = "PolymorphicDog", extends = PyPolymorphicPet)]
pub struct PyPolymorphicDog;

#[pymethods]
impl PyPolymorphicDog {
    #[new]
    fn new() -> (Self, PyPolymorphicPet) {
        (PyPolymorphicDog, PyPolymorphicPet)
    }

    fn bark(&self) -> &'static str {
        BARK
    }
}

/// A polymorphic pet, exposed as its most derived Python class
#[pyfunction]
pub fn pet_store2(py: Python<'_>) -> PyResult<PyObject> {
    let pet = oop::pet_store2();
    tracing::trace!(kind = pet.type_name(), "exposing polymorphic pet");
    if pet.as_bark().is_some() {
        let init = PyClassInitializer::from(PyPolymorphicPet).add_subclass(PyPolymorphicDog);
        Ok(Py::new(py, init)?.into_any())
    } else {
        Ok(Py::new(py, PyPolymorphicPet)?.into_any())
    }
}

// ============================================================================
// Overlord
// ============================================================================

/// Argument of `Overlord.set`
#[derive(FromPyObject)]
pub enum PySetArg {
    /// int sets the age
    Age(i32),
    /// str sets the name
    Name(String),
}

impl From<PySetArg> for SetArg {
    fn from(arg: PySetArg) -> Self {
        match arg {
            PySetArg::Age(age) => SetArg::Age(age),
            PySetArg::Name(name) => SetArg::Name(name),
        }
    }
}

/// Python-visible Overlord wrapper
#[pyclass(name = "Overlord")]
pub struct PyOverlord {
    inner: Overlord,
}

#[pymethods]
impl PyOverlord {
    #[new]
    #[pyo3(signature = (name=DEFAULT_OVERLORD_NAME.to_string(), age=DEFAULT_OVERLORD_AGE))]
    fn new(name: String, age: i32) -> Self {
        PyOverlord {
            inner: Overlord::new(name, age),
        }
    }

    /// Set the overlord's age (int) or name (str)
    fn set(&mut self, value: PySetArg) {
        self.inner.set(SetArg::from(value));
    }

    /// Get the overlord's name
    fn get_name(&self) -> String {
        self.inner.name().to_string()
    }

    /// Get the overlord's age
    fn get_age(&self) -> i32 {
        self.inner.age()
    }
}

// ============================================================================
// Bird
// ============================================================================

/// `Bird.Kind`
#[pyclass(name = "Kind", eq, eq_int)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PyBirdKind {
    /// Crow = 0
    Crow = 0,
    /// Goose = 1
    Goose = 1,
}

impl From<PyBirdKind> for BirdKind {
    fn from(kind: PyBirdKind) -> Self {
        match kind {
            PyBirdKind::Crow => BirdKind::Crow,
            PyBirdKind::Goose => BirdKind::Goose,
        }
    }
}

impl From<BirdKind> for PyBirdKind {
    fn from(kind: BirdKind) -> Self {
        match kind {
            BirdKind::Crow => PyBirdKind::Crow,
            BirdKind::Goose => PyBirdKind::Goose,
        }
    }
}

/// `Bird.Attributes`
#[pyclass(name = "Attributes")]
#[derive(Clone, Copy)]
pub struct PyAttributes {
    #[pyo3(get, set)]
    age: f32,
}

#[pymethods]
impl PyAttributes {
    #[new]
    fn new() -> Self {
        Attributes::default().into()
    }
}

impl From<Attributes> for PyAttributes {
    fn from(attr: Attributes) -> Self {
        PyAttributes { age: attr.age }
    }
}

/// Python-visible Bird wrapper
///
/// `attr` is returned by value; assign it back to update the bird.
#[pyclass(name = "Bird")]
pub struct PyBird {
    inner: Bird,
}

#[pymethods]
impl PyBird {
    #[new]
    fn new(name: String, kind: PyBirdKind) -> Self {
        PyBird {
            inner: Bird::new(name, kind.into()),
        }
    }

    #[classattr]
    #[pyo3(name = "Kind")]
    fn kind_type(py: Python<'_>) -> Py<PyType> {
        py.get_type::<PyBirdKind>().unbind()
    }

    #[classattr]
    #[pyo3(name = "Attributes")]
    fn attributes_type(py: Python<'_>) -> Py<PyType> {
        py.get_type::<PyAttributes>().unbind()
    }

    #[classattr]
    #[pyo3(name = "Crow")]
    fn crow() -> PyBirdKind {
        PyBirdKind::Crow
    }

    #[classattr]
    #[pyo3(name = "Goose")]
    fn goose() -> PyBirdKind {
        PyBirdKind::Goose
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[setter]
    fn set_name(&mut self, name: String) {
        self.inner.name = name;
    }

    #[getter]
    fn kind(&self) -> PyBirdKind {
        self.inner.kind.into()
    }

    #[setter]
    fn set_kind(&mut self, kind: PyBirdKind) {
        self.inner.kind = kind.into();
    }

    #[getter]
    fn attr(&self) -> PyAttributes {
        self.inner.attr.into()
    }

    #[setter]
    fn set_attr(&mut self, attr: PyAttributes) {
        self.inner.attr = Attributes { age: attr.age };
    }
}

// ============================================================================
// Custom constructors
// ============================================================================

/// Built through the `PrivateCtor::create` factory
#[pyclass(name = "PrivateCtor")]
pub struct PyPrivateCtor {
    inner: PrivateCtor,
}

#[pymethods]
impl PyPrivateCtor {
    #[new]
    fn new(i: i32) -> Self {
        PyPrivateCtor {
            inner: PrivateCtor::create(i),
        }
    }

    #[getter]
    fn i(&self) -> i32 {
        self.inner.i()
    }

    #[setter]
    fn set_i(&mut self, i: i32) {
        self.inner.set_i(i);
    }
}

/// Built from a float through `create_pub`, truncating
#[pyclass(name = "PublicCtor")]
pub struct PyPublicCtor {
    #[pyo3(get, set)]
    i: i32,
}

#[pymethods]
impl PyPublicCtor {
    #[new]
    fn new(x: f64) -> Self {
        PyPublicCtor { i: create_pub(x).i }
    }
}
