//! Interactive front-end: read text, submit it, render the reply inline.

use std::fmt;
use std::io::Write;

use sentiment_client::{ClientError, Outcome, PredictClient, Submission};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::display;

/// What the user sees after a submission. Failures are shown, never fatal.
#[derive(Debug)]
pub enum Reply {
    Rendered(String),
    Warning(String),
    Error(String),
}

impl Reply {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rendered(s) => write!(f, "{s}"),
            Self::Warning(s) => write!(f, "Warning: {s}"),
            Self::Error(s) => write!(f, "{s}"),
        }
    }
}

/// Split the input into lines and call the single or batch endpoint.
pub async fn submit(client: &PredictClient, input: &str) -> Reply {
    let Some(submission) = Submission::from_input(input) else {
        return Reply::Warning("Please enter some text first!".to_string());
    };

    match client.submit(&submission).await {
        Ok(Outcome::Single(prediction)) => Reply::Rendered(display::render_prediction(&prediction)),
        Ok(Outcome::Batch(response)) => Reply::Rendered(display::render_batch(&response)),
        Err(ClientError::Server { status, .. }) => {
            tracing::debug!(status, "sentiment API rejected request");
            Reply::Error("Error: Could not get prediction from API.".to_string())
        }
        Err(e) => Reply::Error(format!("Error connecting to API: {e}")),
    }
}

/// Prompt for text until EOF. Each submission ends at an empty line.
pub async fn run_interactive(client: &PredictClient) -> anyhow::Result<()> {
    println!("Sentiment Analysis ({})", client.base_url());
    println!("Enter one or more texts, one per line. Submit with an empty line; Ctrl+D quits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut block = Vec::new();
        let mut eof = false;
        loop {
            match lines.next_line().await? {
                None => {
                    eof = true;
                    break;
                }
                Some(line) if line.trim().is_empty() => break,
                Some(line) => {
                    block.push(line);
                    print!("  ");
                    std::io::stdout().flush()?;
                }
            }
        }

        if eof && block.is_empty() {
            println!();
            return Ok(());
        }

        println!("{}\n", submit(client, &block.join("\n")).await);

        if eof {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_ai::{Classifier, SentimentModel};
    use sentiment_core::Vocabulary;
    use sentiment_server::AppState;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    struct StubModel;

    impl SentimentModel for StubModel {
        fn score(&self, sequence: &[i64]) -> anyhow::Result<f32> {
            Ok(if sequence.contains(&4) { 0.9 } else { 0.2 })
        }
    }

    fn local_client(base_url: String) -> PredictClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        PredictClient::with_client(base_url, client)
    }

    async fn spawn_server() -> String {
        let words: HashMap<String, u32> = [("love".to_string(), 1)].into_iter().collect();
        let vocab = Vocabulary::from_parts(words, 100, 5).unwrap();
        let state = AppState::new(Classifier::new(vocab, Box::new(StubModel)));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(sentiment_server::serve(listener, state));
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn blank_input_warns_without_request() {
        // Nothing listens here; a request would fail with a connection error.
        let client = local_client("http://127.0.0.1:9".into());
        let reply = submit(&client, "  \n \n").await;
        assert!(matches!(reply, Reply::Warning(_)), "got {reply:?}");
    }

    #[tokio::test]
    async fn single_line_renders_bar() {
        let client = local_client(spawn_server().await);
        let reply = submit(&client, "I love it\n").await;
        let text = reply.to_string();
        assert!(text.starts_with("Predicted Label: Positive"), "{text}");
        assert!(text.contains("Confidence: 90.00%"), "{text}");
    }

    #[tokio::test]
    async fn several_lines_render_table() {
        let client = local_client(spawn_server().await);
        let reply = submit(&client, "I love it\n\nterrible\n").await;
        let text = reply.to_string();
        assert!(text.starts_with("Batch Prediction Results (2)"), "{text}");
        assert!(text.contains("80.00%"), "{text}");
    }

    #[tokio::test]
    async fn unreachable_server_is_inline_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client(format!("http://{addr}"));
        let reply = submit(&client, "hello").await;
        assert!(reply.is_error());
        assert!(reply.to_string().contains("Error connecting to API"));
    }
}
