//! Test Prediction Client
//!
//! Generates synthetic tumour measurements and posts them to a running
//! prediction service.

use diagnosis_service::types::{BreastSample, PredictionResponse};
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

/// Sample generator for testing
struct SampleGenerator {
    rng: rand::rngs::ThreadRng,
}

impl SampleGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Small, regular tumour
    fn generate_benign(&mut self) -> BreastSample {
        BreastSample {
            concavity_mean: self.rng.gen_range(0.005..0.08),
            concave_points_mean: self.rng.gen_range(0.002..0.05),
            perimeter_se: self.rng.gen_range(0.75..4.0),
            area_se: self.rng.gen_range(6.0..50.0),
            texture_worst: self.rng.gen_range(12.0..30.0),
            area_worst: self.rng.gen_range(185.0..800.0),
        }
    }

    /// Large tumour with pronounced concavities
    fn generate_malignant(&mut self) -> BreastSample {
        BreastSample {
            concavity_mean: self.rng.gen_range(0.1..0.42),
            concave_points_mean: self.rng.gen_range(0.05..0.2),
            perimeter_se: self.rng.gen_range(1.5..20.0),
            area_se: self.rng.gen_range(20.0..500.0),
            texture_worst: self.rng.gen_range(17.0..45.0),
            area_worst: self.rng.gen_range(900.0..4000.0),
        }
    }

    fn generate(&mut self, malignant_rate: f64) -> (BreastSample, bool) {
        if self.rng.gen_bool(malignant_rate) {
            (self.generate_malignant(), true)
        } else {
            (self.generate_benign(), false)
        }
    }
}

/// Share of malignant samples, clamped to [0, 1]; defaults to 0.4
fn parse_rate(arg: Option<&str>) -> f64 {
    arg.and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.4)
        .clamp(0.0, 1.0)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("test_client=info".parse()?),
        )
        .init();

    info!("Starting Test Prediction Client");

    let args: Vec<String> = std::env::args().collect();
    let base_url = args
        .get(1)
        .map(|s| s.trim_end_matches('/'))
        .unwrap_or("http://localhost:8000");
    let count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);
    let malignant_rate = parse_rate(args.get(3).map(String::as_str));
    let delay_ms: u64 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(100);

    info!(
        url = %base_url,
        count = count,
        malignant_rate = malignant_rate,
        delay_ms = delay_ms,
        "Configuration loaded"
    );

    let client = reqwest::Client::new();
    let health_url = format!("{base_url}/health");
    if let Err(e) = client.get(&health_url).send().await.and_then(|r| r.error_for_status()) {
        warn!(error = %e, "Service not reachable. Running in dry-run mode.");
        return run_dry_mode(count, malignant_rate, delay_ms).await;
    }
    info!("Connected to prediction service");

    let predict_url = format!("{base_url}/predict");
    let mut generator = SampleGenerator::new();
    let mut agreed = 0u64;
    let mut failed = 0u64;

    for i in 0..count {
        let (sample, malignant) = generator.generate(malignant_rate);

        match client.post(&predict_url).json(&sample).send().await {
            Ok(response) if response.status().is_success() => {
                let body: PredictionResponse = response.json().await?;
                if (body.prediction == 1) == malignant {
                    agreed += 1;
                }
            }
            Ok(response) => {
                failed += 1;
                warn!(status = %response.status(), "Prediction request rejected");
            }
            Err(e) => {
                failed += 1;
                warn!(error = %e, "Prediction request failed");
            }
        }

        if (i + 1) % 10 == 0 {
            info!(
                "Sent {}/{} samples ({} agreed with generator, {} failed)",
                i + 1,
                count,
                agreed,
                failed
            );
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    info!(
        "Completed! Sent {} samples ({} agreed with generator, {} failed)",
        count, agreed, failed
    );

    Ok(())
}

async fn run_dry_mode(count: u64, malignant_rate: f64, delay_ms: u64) -> anyhow::Result<()> {
    info!("Running in dry-run mode (no service connection)");

    let mut generator = SampleGenerator::new();

    for i in 0..count {
        let (sample, _) = generator.generate(malignant_rate);
        let json = serde_json::to_string_pretty(&sample)?;

        if (i + 1) % 10 == 0 || i == 0 {
            info!("Sample {}:\n{}", i + 1, json);
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    Ok(())
}
