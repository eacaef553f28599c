use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sentiment_ai::Classifier;
use sentiment_client::PredictClient;
use sentiment_server::AppState;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod display;
mod frontend;

const SERVE_LOG_FILTER: &str =
    "sentiment=info,sentiment_server=info,sentiment_ai=info,sentiment_core=info,tower_http=info";
const CLIENT_LOG_FILTER: &str = "warn";

/// Sentiment analysis: serve a pre-trained classifier over HTTP, or submit text to it.
#[derive(Parser)]
#[command(name = "sentiment", version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the model and serve the HTTP API
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0", env = "SENTIMENT_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 5000, env = "SENTIMENT_PORT")]
        port: u16,

        /// Directory holding model.onnx and vocab.json
        #[arg(
            short,
            long,
            default_value = "models/sentiment",
            env = "SENTIMENT_MODEL_DIR"
        )]
        model_dir: PathBuf,
    },

    /// Classify text once; one line calls /predict, several call /predict/batch
    Predict {
        #[command(flatten)]
        server: ServerArgs,

        /// Texts to classify, one per argument (reads stdin when omitted)
        texts: Vec<String>,
    },

    /// Prompt for text repeatedly and show predictions inline
    Interactive {
        #[command(flatten)]
        server: ServerArgs,
    },
}

#[derive(Args)]
struct ServerArgs {
    /// Base URL of the sentiment API
    #[arg(
        long,
        default_value = "http://127.0.0.1:5000",
        env = "SENTIMENT_SERVER"
    )]
    server: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve { .. } => SERVE_LOG_FILTER,
        _ => CLIENT_LOG_FILTER,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            model_dir,
        } => {
            serve(&host, port, &model_dir).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Predict { server, texts } => {
            let input = if texts.is_empty() {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("reading text from stdin")?;
                buf
            } else {
                texts.join("\n")
            };

            let client = PredictClient::new(server.server);
            let reply = frontend::submit(&client, &input).await;
            println!("{reply}");
            Ok(if reply.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Interactive { server } => {
            let client = PredictClient::new(server.server);
            frontend::run_interactive(&client).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn serve(host: &str, port: u16, model_dir: &std::path::Path) -> anyhow::Result<()> {
    info!("sentiment v{}", env!("CARGO_PKG_VERSION"));
    info!("Loading model and vocabulary from {}", model_dir.display());

    let classifier = Classifier::load(model_dir)
        .with_context(|| format!("loading model artifacts from {}", model_dir.display()))?;
    info!(
        words = classifier.vocabulary().len(),
        max_len = classifier.vocabulary().max_len(),
        "Model and vocabulary loaded"
    );
    let state = AppState::new(classifier);

    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    sentiment_server::serve(listener, state).await
}
