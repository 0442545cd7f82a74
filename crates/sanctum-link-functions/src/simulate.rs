use std::time::Duration;

use alloy::dyn_abi::DynSolValue;
use sanctum_functions::{
    pipeline, DataSource, FunctionsError, ReqwestFetcher, RequestConfig, RequestPipeline,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn render(value: &DynSolValue) -> String {
    match value {
        DynSolValue::String(s) => format!("{s:?}"),
        DynSolValue::Uint(n, _) => n.to_string(),
        other => format!("{other:?}"),
    }
}

async fn simulate(config: &RequestConfig) -> Result<(), FunctionsError> {
    let args = config.validate()?;
    let source = config.source.data_source();
    let fetcher = ReqwestFetcher::with_timeout(Duration::from_millis(config.timeout_ms));
    let runner = RequestPipeline::with_base_url(fetcher, config.api_base_url.clone());

    println!("Simulating request...");
    println!("  Source:      {}", config.source);
    println!("  Args:        {:?}", config.args);
    println!("  Return type: {}", config.expected_return_type.as_str());

    // Stages run one by one so the encoding spec can be shown alongside the bytes.
    let response = runner.fetch(&source, &args).await;
    let data = pipeline::validate(&response)?;
    let spec = source.build_spec(&args, data)?;
    let encoded = spec.encode()?;

    println!("\nEncoded tuple:");
    for (ty, value) in spec.type_names().iter().zip(spec.values()) {
        println!("  {ty:<8} {}", render(value));
    }
    println!("\nResult ({} bytes):", encoded.len());
    println!("{encoded}");
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match RequestConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = simulate(&config).await {
        tracing::error!("simulation failed: {e}");
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
