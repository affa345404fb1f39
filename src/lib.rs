
pub mod error;
pub mod morphable;
pub mod fitting;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);
