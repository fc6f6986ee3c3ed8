//! Live OpenAI tests. Run with `--features api` and `OPENAI_API_KEY` set.

use factreel_core::{ImagePrompt, Topic};
use factreel_interface::{ContentGenerator, ImageDownloader, ImageProvider};
use factreel_models::{HttpImageDownloader, OpenAIConfig, OpenAIContentGenerator, OpenAIImageProvider};

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_generates_facts() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let generator = OpenAIContentGenerator::new(OpenAIConfig::default())?;
    let topic = Topic::new("Roman Empire")?;

    let facts = generator.generate_facts(&topic, 3).await?;

    assert!(!facts.is_empty(), "Should receive at least one fact");
    println!("Facts: {:?}", facts);
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_generates_image_query() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let generator = OpenAIContentGenerator::new(OpenAIConfig::default())?;
    let prompt = generator
        .generate_image_prompt(0, "Roman Empire fact 1: Romans built roads across Europe")
        .await?;

    assert!(!prompt.as_str().is_empty());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_image_round_trip() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let provider = OpenAIImageProvider::new(OpenAIConfig::default())?;
    let prompt = ImagePrompt::new(0, "A Roman aqueduct at sunset, oil painting")?;

    let source = provider.generate_image(&prompt).await?;
    if let factreel_core::ImageSource::Url(url) = source {
        let image = HttpImageDownloader::new().download(&url).await?;
        assert!(!image.data().is_empty());
    }
    Ok(())
}
