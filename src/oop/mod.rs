//! Class demos
//!
//! Plain structs with public fields and accessors, composition in place of
//! inheritance, a capability trait for polymorphic exposure, tagged-variant
//! overloads, nested types and factory constructors.

mod bird;
mod constructors;
mod overlord;
mod pet;

pub use bird::{Attributes, Bird, BirdKind};
pub use constructors::{create_pub, PrivateCtor, PublicCtor};
pub use overlord::{Overlord, SetArg, DEFAULT_OVERLORD_AGE, DEFAULT_OVERLORD_NAME};
pub use pet::{pet_store, pet_store2, Bark, BARK, Dog, Pet, Pet2, PolymorphicDog, PolymorphicPet, DEFAULT_DOG_NAME};
