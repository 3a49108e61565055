pub mod environment;

pub use environment::{DIGDAG_BIN_ENV, get_digdag_program};
