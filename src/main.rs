use anyhow::Result;

fn main() -> Result<()> {
    digdag_sessions::cli::run()
}
