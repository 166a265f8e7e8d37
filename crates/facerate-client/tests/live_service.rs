//! Tests against the real scoring service.
//!
//! Scores vary with framing and cropping, so these only check that a
//! plausible result comes back. Run with:
//! `FACERATE_SAMPLE_IMAGE=/path/to/face.jpg cargo test -- --ignored`

use facerate_client::{FaceRateConfig, ScoreClient};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
#[ignore = "requires network access and FACERATE_SAMPLE_IMAGE"]
async fn test_live_score_from_path() {
    dotenvy::dotenv().ok();
    init_tracing();

    let image = std::env::var("FACERATE_SAMPLE_IMAGE").expect("FACERATE_SAMPLE_IMAGE not set");
    let client = ScoreClient::new(&FaceRateConfig::from_env()).unwrap();

    let result = client.get_score_from_path(&image).await.unwrap();

    assert!((0.0..=100.0).contains(&result.score()), "score {} out of range", result.score());
    assert!(
        (0.0..=100.0).contains(&result.top_percentile()),
        "percentile {} out of range",
        result.top_percentile()
    );
}
