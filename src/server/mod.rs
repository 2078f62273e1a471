//! The score server: a single JSON endpoint that writes each submitted score
//! to the database
mod store;
#[cfg(test)]
pub(crate) use self::store::testing;
pub(crate) use self::store::{PgScoreStore, ScoreStore};
use crate::consts;
use crate::scores::{ErrorBody, NewScore};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::io;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the server's routes on top of `store`.  Requests from any origin are
/// allowed.
pub(crate) fn router<S: ScoreStore>(store: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    Router::new()
        .route(consts::SCORE_ENDPOINT, post(save_score::<S>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Bind a listening socket on `addr`
pub(crate) async fn bind(addr: &str) -> Result<TcpListener, ServeError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_owned(),
            source,
        })
}

/// Serve requests on `listener` until Ctrl-C is received
pub(crate) async fn serve<S: ScoreStore>(listener: TcpListener, store: S) -> Result<(), ServeError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "score server listening");
    }
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServeError::Serve)?;
    tracing::info!("score server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl-C; shutting down"),
        Err(e) => {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

/// `POST /api/score`.
///
/// Every failure, whether the body could not be understood or the database
/// refused the row, gets the same 500 response; the details only go to the
/// log.
async fn save_score<S: ScoreStore>(
    State(store): State<S>,
    payload: Result<Json<NewScore>, JsonRejection>,
) -> Response {
    let entry = match payload {
        Ok(Json(entry)) => entry,
        Err(e) => {
            let error: &(dyn std::error::Error + 'static) = &e;
            tracing::warn!(error, "rejected score submission");
            return save_failed();
        }
    };
    tracing::debug!(name = %entry.name, score = entry.score, "saving score");
    match store.save(entry).await {
        Ok(record) => {
            tracing::info!(id = record.id, name = %record.name, score = record.score, "score saved");
            Json(record).into_response()
        }
        Err(e) => {
            let error: &(dyn std::error::Error + 'static) = &e;
            tracing::error!(error, "failed to save score");
            save_failed()
        }
    }
}

fn save_failed() -> Response {
    let body = ErrorBody {
        error: String::from(consts::SAVE_FAILED_MESSAGE),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[derive(Debug, Error)]
pub(crate) enum ServeError {
    #[error("failed to listen on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("score server failed")]
    Serve(#[source] io::Error),
}
