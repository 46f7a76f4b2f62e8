// Transport module: connection establishment and teardown
pub mod error;
pub mod tcp;
pub mod traits;

pub use error::*;
pub use tcp::*;
pub use traits::*;
