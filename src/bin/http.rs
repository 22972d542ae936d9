#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use shoot_margin::{CalculatorSession, Settings, http_api};

    env_logger::init();
    let settings = Settings::from_env();
    let addr = settings.socket_addr()?;
    let config = settings.load_config()?;

    let session = CalculatorSession::new(config);
    http_api::serve(addr, session).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
