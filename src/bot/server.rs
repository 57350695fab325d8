//! Reaction webhook
//!
//! The chat bridge posts each reaction to `POST /reactions`, authenticated
//! with the bot credential as a bearer token. Each request runs on its own
//! task; the reply body tells the bridge what to post back to the channel.
//!
//! - `POST /reactions` - handle one [`ReactionEvent`]
//! - `GET /health` - liveness plus the resolved project

use crate::bot::events::ReactionEvent;
use crate::bot::handler::ReactionHandler;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, warn};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

/// Largest accepted event body
const MAX_EVENT_BYTES: u64 = 16 * 1024;

/// HTTP server receiving reaction events
pub struct ReactionServer {
    handler: Arc<ReactionHandler>,
    bot_token: Arc<str>,
    port: u16,
}

/// Rejection raised when the bot credential is missing or wrong
#[derive(Debug)]
struct Unauthorized;

impl warp::reject::Reject for Unauthorized {}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    project: Option<String>,
}

impl ReactionServer {
    pub fn new(handler: Arc<ReactionHandler>, bot_token: impl Into<String>, port: u16) -> Self {
        Self {
            handler,
            bot_token: Arc::from(bot_token.into()),
            port,
        }
    }

    /// All webhook routes, usable directly with `warp::test`
    pub fn routes(&self) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        let reaction_handler = self.handler.clone();
        let token = self.bot_token.clone();

        // Credential check runs before the body is read
        let authorized = warp::header::optional::<String>("authorization")
            .and_then(move |authorization: Option<String>| {
                let token = token.clone();
                async move {
                    if is_authorized(authorization.as_deref(), &token) {
                        Ok(())
                    } else {
                        warn!("Rejected unauthenticated reaction");
                        Err(warp::reject::custom(Unauthorized))
                    }
                }
            })
            .untuple_one();

        // POST /reactions
        let reactions_route = warp::path("reactions")
            .and(warp::path::end())
            .and(warp::post())
            .and(authorized)
            .and(warp::body::content_length_limit(MAX_EVENT_BYTES))
            .and(warp::body::json::<ReactionEvent>())
            .and_then(move |event: ReactionEvent| {
                let handler = reaction_handler.clone();
                async move {
                    let reply = handler.handle(&event).await;
                    let status = if reply.is_failure() {
                        StatusCode::BAD_GATEWAY
                    } else {
                        StatusCode::OK
                    };
                    Ok::<_, Infallible>(warp::reply::with_status(
                        warp::reply::json(&reply),
                        status,
                    ))
                }
            });

        // GET /health
        let health_handler = self.handler.clone();
        let health_route = warp::path("health")
            .and(warp::path::end())
            .and(warp::get())
            .and_then(move || {
                let handler = health_handler.clone();
                async move {
                    let response = HealthResponse {
                        status: "ok",
                        project: handler.pipeline().project().map(|p| p.name.clone()),
                    };
                    Ok::<_, Infallible>(warp::reply::json(&response))
                }
            });

        reactions_route.or(health_route).recover(handle_rejection)
    }

    /// Serve until the future is dropped
    pub async fn run(self) {
        info!("Starting reaction webhook on port {}", self.port);
        warp::serve(self.routes()).run(([0, 0, 0, 0], self.port)).await;
    }
}

/// Turn a missing or wrong credential into a 401; other rejections pass through
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    if err.find::<Unauthorized>().is_some() {
        let body = ErrorResponse {
            error: "unauthorized".to_string(),
        };
        return Ok(warp::reply::with_status(
            warp::reply::json(&body),
            StatusCode::UNAUTHORIZED,
        ));
    }
    Err(err)
}

/// Compare an Authorization header against the bot credential (pure function)
///
/// The scheme matches case-insensitively. Token bytes are compared without
/// short-circuiting; only the length comparison can return early.
fn is_authorized(authorization: Option<&str>, token: &str) -> bool {
    let Some((scheme, presented)) = authorization.and_then(|value| value.trim().split_once(' '))
    else {
        return false;
    };
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return false;
    }
    tokens_match(presented.trim().as_bytes(), token.as_bytes())
}

fn tokens_match(presented: &[u8], expected: &[u8]) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
