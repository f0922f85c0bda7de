/// Constructible only through [`PrivateCtor::create`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivateCtor {
    i: i32,
}

impl PrivateCtor {
    /// Factory
    pub fn create(i: i32) -> Self {
        PrivateCtor { i }
    }

    /// Stored value
    pub fn i(&self) -> i32 {
        self.i
    }

    /// Replace the stored value
    pub fn set_i(&mut self, i: i32) {
        self.i = i;
    }
}

/// Publicly constructible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicCtor {
    /// Stored value
    pub i: i32,
}

impl PublicCtor {
    /// Construct directly
    pub fn new(i: i32) -> Self {
        PublicCtor { i }
    }
}

/// Build a [`PublicCtor`] from a float, truncating toward zero
/// (saturating at the `i32` range)
pub fn create_pub(x: f64) -> PublicCtor {
    PublicCtor::new(x as i32)
}
