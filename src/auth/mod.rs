pub mod api_key;
pub mod catchers;

pub use api_key::*;
pub use catchers::*;
