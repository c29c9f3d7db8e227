//! Capability contracts with colliding member names
//!
//! `BaseOne` and `BaseTwo` both declare an associated constant called `VALUE`
//! and a method called `show`. A type implementing both cannot refer to
//! `Self::VALUE` or call `.show()` unqualified; it has to name the contract
//! with fully qualified syntax. `DerivedValue` does that once, at
//! construction, and keeps the two constants in distinct fields.

use std::fmt;

/// First capability contract
pub trait BaseOne {
    const VALUE: i32;

    fn show(&self) -> String;
}

/// Second capability contract; deliberately reuses the names from `BaseOne`
pub trait BaseTwo {
    const VALUE: i32;

    fn show(&self) -> String;
}

/// The composite value displayed on every loop iteration
///
/// Built fresh each time and never mutated, so `sum` always equals
/// `base_one_value + base_two_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedValue {
    base_one_value: i32,
    base_two_value: i32,
    sum: i32,
}

impl BaseOne for DerivedValue {
    const VALUE: i32 = 10;

    fn show(&self) -> String {
        format!("Base 1 ({})", self.base_one_value())
    }
}

impl BaseTwo for DerivedValue {
    const VALUE: i32 = 20;

    fn show(&self) -> String {
        format!("Base 2 ({})", self.base_two_value())
    }
}

impl DerivedValue {
    pub fn new() -> Self {
        let base_one_value = <Self as BaseOne>::VALUE;
        let base_two_value = <Self as BaseTwo>::VALUE;

        Self {
            base_one_value,
            base_two_value,
            sum: base_one_value + base_two_value,
        }
    }

    pub fn base_one_value(&self) -> i32 {
        self.base_one_value
    }

    pub fn base_two_value(&self) -> i32 {
        self.base_two_value
    }

    pub fn sum(&self) -> i32 {
        self.sum
    }
}

impl Default for DerivedValue {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the addition sentence, e.g.
/// "Addition of first number inherited from Base 1 (10) and second number
/// inherited from Base 2 (20) is 30!!!"
impl fmt::Display for DerivedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Addition of first number inherited from {} and second number inherited from {} is {}!!!",
            BaseOne::show(self),
            BaseTwo::show(self),
            self.sum()
        )
    }
}
