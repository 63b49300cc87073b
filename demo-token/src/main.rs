use std::thread::sleep;
use std::time::Duration;

use dotenvy::dotenv;
use serde_json::{Value, json};
use session_token::{IssueOptions, TokenService, VerificationResult, VerifyOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_millis(name: &str, default: i64) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "demo_token=debug,session_token=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let access_ttl = env_millis("DEMO_ACCESS_TTL_MS", 1_000);
    let refresh_ttl = env_millis("DEMO_REFRESH_TTL_MS", 60_000);

    let service = TokenService::new();
    let issued = service.issue_token(
        &json!({"user_id": "demo-user", "role": "viewer"}),
        IssueOptions::new()
            .access_token_expired_in(access_ttl)
            .refresher_expired_in(refresh_ttl),
    )?;
    tracing::info!("Issued token: {}", issued.token);

    let result: VerificationResult<Value> =
        service.verify_token(&issued.token, &issued.key, VerifyOptions::new());
    tracing::info!("Immediate verification: {}", result.status);

    let wait = u64::try_from(access_ttl.max(0))? + 50;
    tracing::info!("Waiting {wait}ms for the access window to lapse");
    sleep(Duration::from_millis(wait));

    let result: VerificationResult<Value> = service.verify_token(
        &issued.token,
        &issued.key,
        VerifyOptions::new().is_key_random(true).random_key_length(12),
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
