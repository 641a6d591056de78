use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::Form;

use crate::advisor::AdviceRequest;
use crate::web::render::{page, Outcome};
use crate::web::AppState;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn index() -> Html<String> {
    Html(page(&AdviceRequest::default(), &Outcome::Empty))
}

pub async fn submit_advice(
    State(state): State<Arc<AppState>>,
    Form(request): Form<AdviceRequest>,
) -> Html<String> {
    if let Err(e) = request.validate() {
        tracing::info!(error = ?e, "advice request rejected");
        return Html(page(&request, &Outcome::Warning(e.to_string())));
    }

    let outcome = match state.runner.run(&request).await {
        Ok(output) => Outcome::Advice {
            markdown: output.raw,
            filename: request.download_filename(),
        },
        Err(e) => {
            tracing::error!(crop = %request.crop_name, error = %e, "advice crew failed");
            Outcome::Error(e.to_string())
        }
    };

    Html(page(&request, &outcome))
}
