//! Client side of the sentiment API: HTTP calls and the single-vs-batch submission rule.

mod http;
mod submission;

pub use http::{ClientError, Outcome, PredictClient};
pub use submission::Submission;
