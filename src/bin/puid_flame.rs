use puid::{Chars, Puid};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), puid::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let puid = Puid::builder().chars(Chars::AlphaNum).bits(128.0).build()?;
    tracing::info!(info = ?puid.info(), "profiling generation");

    let mut generator = puid.generator();
    let mut total = 0usize;
    for _ in 0..10_000_000 {
        total += generator.generate().len();
    }
    tracing::info!(total, carried = generator.carried_bits(), "done");
    Ok(())
}
