mod bulk;
pub mod utils;
