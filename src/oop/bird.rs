use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BindingError;

/// Kind of [`Bird`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum BirdKind {
    /// Crow, 0
    Crow = 0,
    /// Goose, 1
    Goose,
}

impl BirdKind {
    /// Integer value
    pub fn value(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for BirdKind {
    type Error = BindingError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BirdKind::Crow),
            1 => Ok(BirdKind::Goose),
            other => Err(BindingError::InvalidArgument(format!("no Bird.Kind with value {}", other))),
        }
    }
}

impl fmt::Display for BirdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BirdKind::Crow => "Kind.Crow",
            BirdKind::Goose => "Kind.Goose",
        })
    }
}

/// Per-bird attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Age in years
    pub age: f32,
}

/// A bird with a kind and nested attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Name
    pub name: String,
    /// Kind
    pub kind: BirdKind,
    /// Attributes, default-initialised
    pub attr: Attributes,
}

impl Bird {
    /// Bird with default attributes
    pub fn new(name: impl Into<String>, kind: BirdKind) -> Self {
        Bird {
            name: name.into(),
            kind,
            attr: Attributes::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_values() {
        assert_eq!(BirdKind::Crow.value(), 0);
        assert_eq!(BirdKind::try_from(1).unwrap(), BirdKind::Goose);
        assert!(BirdKind::try_from(2).is_err());
    }

    #[test]
    fn attributes_start_at_zero() {
        let mut b = Bird::new("Scrooge", BirdKind::Goose);
        assert_eq!(b.attr.age, 0.0);
        b.attr.age = 3.5;
        assert_eq!(b.attr, Attributes { age: 3.5 });
    }
}
