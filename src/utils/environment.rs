use std::env;
use std::path::PathBuf;

pub const DIGDAG_BIN_ENV: &str = "DIGDAG_BIN";
const DEFAULT_DIGDAG_PROGRAM: &str = "digdag";

/// Get the digdag client executable, `$DIGDAG_BIN` or `digdag` from `PATH`
pub fn get_digdag_program() -> PathBuf {
    match env::var_os(DIGDAG_BIN_ENV) {
        Some(program) if !program.is_empty() => PathBuf::from(program),
        _ => PathBuf::from(DEFAULT_DIGDAG_PROGRAM),
    }
}
