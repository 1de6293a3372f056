pub mod actor;
pub mod claims;
pub mod movie;

pub use actor::*;
pub use claims::*;
pub use movie::*;
