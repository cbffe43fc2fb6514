pub mod conversion;
pub mod definition;
pub mod signature;

pub use conversion::*;
pub use definition::*;
pub use signature::*;
