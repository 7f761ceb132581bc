use futures::TryStreamExt;
use jellyseek_core::{ClientConfig, EpisodeRange, JellyfinSource, SubjectQuery};

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
    let subject = std::env::args().nth(1).unwrap_or_else(|| "Naruto".to_string());

    let source = JellyfinSource::new(config)?;

    println!("🔍 Searching for '{subject}'...\n");

    let query = SubjectQuery::new([subject]);
    let matches: Vec<_> = source.fetch(&query).try_collect().await?;

    println!("Found {} matches:", matches.len());
    for m in &matches {
        let episode = match &m.episodes {
            EpisodeRange::Single(index) => format!("episode {index}"),
            EpisodeRange::UnknownSeason => "movie/special".to_string(),
        };
        println!(
            "  • {} [{}] ({}, {} subtitle tracks)",
            m.title,
            m.resolution,
            episode,
            m.subtitles.len()
        );
        println!("    stream: {}", m.download_url);
        for sub in &m.subtitles {
            println!(
                "    subtitle [{}]: {}",
                sub.language.as_deref().unwrap_or("?"),
                sub.url
            );
        }
    }

    Ok(())
}
