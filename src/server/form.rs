//! Browser form: `GET /` shows the page, `POST /` submits a question.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::render;
use crate::dispatcher::Dispatcher;

#[derive(Debug, Default, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub user_input: String,
}

pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/", get(show).post(submit))
        .with_state(dispatcher)
        .layer(TraceLayer::new_for_http())
}

async fn show() -> Html<String> {
    Html(render::form_page("", None))
}

// Empty submissions are forwarded as is and fall through to generation.
async fn submit(
    State(dispatcher): State<Arc<Dispatcher>>,
    form: Result<Form<AskForm>, FormRejection>,
) -> Html<String> {
    let user_input = match form {
        Ok(Form(form)) => form.user_input,
        Err(rejection) => {
            warn!(%rejection, "Ignoring malformed form submission");
            return Html(render::form_page("", None));
        }
    };

    let answer = match dispatcher.ask(user_input.clone()).await {
        Ok(result) => render::form_answer(&result),
        Err(e) => {
            warn!(error = %e, "Dispatch failed");
            format!("<p>{}</p>\n", render::FAILURE_MESSAGE)
        }
    };

    Html(render::form_page(&user_input, Some(&answer)))
}
