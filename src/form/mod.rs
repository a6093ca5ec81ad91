pub mod artifact;
pub mod conversion;
pub mod definition;
pub mod logic;
pub mod store;

pub use artifact::*;
pub use conversion::*;
pub use definition::*;
pub use logic::*;
pub use store::*;
