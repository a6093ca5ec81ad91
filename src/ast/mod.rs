pub mod trace;
pub mod value;

pub use trace::*;
pub use value::*;
