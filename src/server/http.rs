//! Plain GET endpoint: `/?user_input=...`.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::render;
use crate::dispatcher::Dispatcher;

#[derive(Debug, Default, Deserialize)]
pub struct AskQuery {
    pub user_input: Option<String>,
}

pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(dispatcher)
        .layer(TraceLayer::new_for_http())
}

async fn index(
    State(dispatcher): State<Arc<Dispatcher>>,
    query: Result<Query<AskQuery>, QueryRejection>,
) -> Html<String> {
    let mut body = String::from(render::TITLE);

    let user_input = match query {
        Ok(Query(query)) => query.user_input,
        Err(rejection) => {
            warn!(%rejection, "Ignoring malformed query");
            None
        }
    };

    if let Some(user_input) = user_input.filter(|input| !input.is_empty()) {
        match dispatcher.ask(user_input).await {
            Ok(result) => body.push_str(&render::endpoint_fragment(&result)),
            Err(e) => {
                warn!(error = %e, "Dispatch failed");
                body.push_str(render::FAILURE_MESSAGE);
            }
        }
    }

    Html(body)
}
