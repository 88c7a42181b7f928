pub mod kind;

pub use mathcheck_error::Error;
