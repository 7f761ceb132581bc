use jellyseek_core::{ClientConfig, ConnectionStatus, JellyfinSource};

fn env(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::new(
        env("JELLYSEEK_BASE_URL"),
        env("JELLYSEEK_USER_ID"),
        env("JELLYSEEK_API_KEY"),
    );

    let source = JellyfinSource::new(config)?;

    match source.check_connection().await {
        ConnectionStatus::Success => println!("✅ server reachable, credentials accepted"),
        ConnectionStatus::Failed => println!("❌ connection check failed"),
    }

    Ok(())
}
