//! ttl_kv demo - Several threads hammering one store through the command layer

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_kv::demo::{run_demo, DemoConfig, Sink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_kv=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    println!("=================================================");
    println!("  Multi-Threaded Database Demo");
    println!("=================================================");

    let sink: Sink = Arc::new(|line: String| println!("{}", line));
    run_demo(&DemoConfig::default(), sink).await?;

    println!("Demo complete!");
    Ok(())
}
