use serde::{Deserialize, Serialize};

/// Default overlord name
pub const DEFAULT_OVERLORD_NAME: &str = "Morgoth";

/// Default overlord age
pub const DEFAULT_OVERLORD_AGE: i32 = 141;

/// Argument of [`Overlord::set`]: an age or a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetArg {
    /// Set the overlord's age
    Age(i32),
    /// Set the overlord's name
    Name(String),
}

impl From<i32> for SetArg {
    fn from(age: i32) -> Self {
        SetArg::Age(age)
    }
}

impl From<&str> for SetArg {
    fn from(name: &str) -> Self {
        SetArg::Name(name.to_string())
    }
}

impl From<String> for SetArg {
    fn from(name: String) -> Self {
        SetArg::Name(name)
    }
}

/// Named, aged overlord
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlord {
    /// Name
    pub name: String,
    /// Age
    pub age: i32,
}

impl Overlord {
    /// Overlord with the given name and age
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Overlord { name: name.into(), age }
    }

    /// Set the age or the name, depending on the argument
    pub fn set(&mut self, arg: impl Into<SetArg>) {
        match arg.into() {
            SetArg::Age(age) => self.age = age,
            SetArg::Name(name) => self.name = name,
        }
    }

    /// Name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age
    pub fn age(&self) -> i32 {
        self.age
    }
}

impl Default for Overlord {
    fn default() -> Self {
        Overlord::new(DEFAULT_OVERLORD_NAME, DEFAULT_OVERLORD_AGE)
    }
}
