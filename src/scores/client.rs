use super::{ErrorBody, NewScore, ScoreRecord};
use crate::consts;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{header::CONTENT_TYPE, Request, StatusCode, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::{runtime::Handle, sync::oneshot};

/// HTTP client for the score server's ingest endpoint
#[derive(Clone, Debug)]
pub(crate) struct ScoreClient {
    http: Client<HttpConnector, Full<Bytes>>,
    endpoint: Uri,
}

impl ScoreClient {
    /// Create a client for the score server at `server_url`, e.g.,
    /// `http://127.0.0.1:3000`.  Only plain HTTP is supported.
    pub(crate) fn new(server_url: &str) -> Result<ScoreClient, ClientError> {
        let url = format!(
            "{}{}",
            server_url.trim_end_matches('/'),
            consts::SCORE_ENDPOINT
        );
        let endpoint = url
            .parse::<Uri>()
            .map_err(|source| ClientError::InvalidUrl {
                url: server_url.to_owned(),
                source,
            })?;
        if endpoint.scheme_str() != Some("http") || endpoint.authority().is_none() {
            return Err(ClientError::UnsupportedUrl {
                url: server_url.to_owned(),
            });
        }
        let http = Client::builder(TokioExecutor::new()).build_http();
        Ok(ScoreClient { http, endpoint })
    }

    pub(crate) fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Send one score to the server and return the record it created.  This
    /// is a single attempt; failures are not retried.
    pub(crate) async fn submit(&self, entry: &NewScore) -> Result<ScoreRecord, SubmitError> {
        let payload = serde_json::to_vec(entry).map_err(SubmitError::Encode)?;
        let req = Request::post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(payload)))
            .map_err(SubmitError::Request)?;
        let resp = self
            .http
            .request(req)
            .await
            .map_err(SubmitError::Transport)?;
        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(SubmitError::Body)?
            .to_bytes();
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|eb| eb.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(SubmitError::Status { status, message });
        }
        serde_json::from_slice(&body).map_err(SubmitError::Decode)
    }
}

/// Something that can carry a finished game's score off to be saved.
///
/// Submission must not block: the result is delivered through the returned
/// [`PendingSave`], which the game loop polls.
pub(crate) trait ScoreSink {
    fn submit(&mut self, entry: NewScore) -> PendingSave;
}

/// A [`ScoreSink`] that posts scores to the score server on a background
/// runtime
#[derive(Debug)]
pub(crate) struct HttpScoreSink {
    client: ScoreClient,
    runtime: Handle,
}

impl HttpScoreSink {
    pub(crate) fn new(client: ScoreClient, runtime: Handle) -> HttpScoreSink {
        HttpScoreSink { client, runtime }
    }
}

impl ScoreSink for HttpScoreSink {
    fn submit(&mut self, entry: NewScore) -> PendingSave {
        let (sender, pending) = PendingSave::channel();
        let client = self.client.clone();
        tracing::info!(name = %entry.name, score = entry.score, endpoint = %client.endpoint(), "submitting score");
        let _task = self.runtime.spawn(async move {
            let r = client.submit(&entry).await;
            match r {
                Ok(ref record) => tracing::info!(id = record.id, "score saved"),
                Err(ref e) => {
                    let error: &(dyn std::error::Error + 'static) = e;
                    tracing::warn!(error, "failed to save score");
                }
            }
            // The receiver is gone if the player has already moved on to a
            // new game; the result no longer matters then.
            let _ = sender.send(r);
        });
        pending
    }
}

/// The eventual outcome of a [`ScoreSink::submit()`] call
#[derive(Debug)]
pub(crate) struct PendingSave(oneshot::Receiver<Result<ScoreRecord, SubmitError>>);

impl PendingSave {
    pub(crate) fn channel() -> (oneshot::Sender<Result<ScoreRecord, SubmitError>>, PendingSave) {
        let (sender, receiver) = oneshot::channel();
        (sender, PendingSave(receiver))
    }

    /// Return the outcome of the submission if it has finished
    pub(crate) fn try_outcome(&mut self) -> Option<Result<ScoreRecord, SubmitError>> {
        match self.0.try_recv() {
            Ok(r) => Some(r),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(SubmitError::Abandoned)),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ClientError {
    #[error("invalid score server URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: hyper::http::uri::InvalidUri,
    },
    #[error("unsupported score server URL {url:?}; expected http://HOST[:PORT]")]
    UnsupportedUrl { url: String },
}

#[derive(Debug, Error)]
pub(crate) enum SubmitError {
    #[error("failed to encode score submission")]
    Encode(#[source] serde_json::Error),
    #[error("failed to build score submission request")]
    Request(#[source] hyper::http::Error),
    #[error("failed to reach score server")]
    Transport(#[source] hyper_util::client::legacy::Error),
    #[error("failed to read score server response")]
    Body(#[source] hyper::Error),
    #[error("score server responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("score server sent an unreadable record")]
    Decode(#[source] serde_json::Error),
    #[error("score submission was abandoned before it completed")]
    Abandoned,
}
