use tokio_util::sync::CancellationToken;
use topic_gate::KafkaConsumer;
use topic_gate::Result;
use topic_gate::WatchConfig;
use topic_gate::WatchReport;
use topic_gate::Watcher;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_observability();

    match run().await {
        Ok(report) => {
            info!("Done, {} messages observed.", report.messages_seen);
            std::process::exit(0);
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("topic-gate: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<WatchReport> {
    let config_path = std::env::args().nth(1);
    let config = WatchConfig::load(config_path.as_deref())?;

    // Initializing Shutdown Signal
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl+C detected.");
                    shutdown.cancel();
                }
                Err(e) => error!("Failed to listen for shutdown signal: {}", e),
            }
        });
    }

    let consumer = KafkaConsumer::new(&config);
    Watcher::new(config, consumer).run(shutdown).await
}

fn init_observability() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
