use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{fmt, EnvFilter};

/// Load `.env` from the working directory (when present) and install a
/// global `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Intended for binaries and examples embedding the crate. Fails when a
/// global subscriber is already installed.
pub fn init_tracing() -> Result<(), SetGlobalDefaultError> {
    // Loaded first so RUST_LOG may come from the file.
    let env_file = dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(fmt().with_env_filter(filter).finish())?;

    match env_file {
        Some(path) => tracing::info!(path = %path.display(), "environment file loaded"),
        None => tracing::debug!("no .env file found"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_installed_subscriber() {
        // Only this test installs a global subscriber in the unit test binary.
        init_tracing().expect("first install");
        assert!(init_tracing().is_err());
    }
}
