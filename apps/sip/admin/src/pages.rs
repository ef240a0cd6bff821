//! Static SIP pages.

use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use axum_helpers::AppError;
use handlebars::Handlebars;
use std::sync::Arc;
use web_widgets::{WidgetResult, register_partials, stakeholders_context};

const STAKEHOLDERS_PAGE: &str = "stakeholders_page";

const STAKEHOLDERS_PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head><meta charset="utf-8"><title>Prestataires</title></head>
<body>
<main class="page">
{{> stakeholders}}
</main>
</body>
</html>"#;

pub struct Pages {
    handlebars: Handlebars<'static>,
}

impl Pages {
    pub fn new() -> WidgetResult<Self> {
        let mut handlebars = Handlebars::new();
        register_partials(&mut handlebars)?;
        handlebars.register_template_string(STAKEHOLDERS_PAGE, STAKEHOLDERS_PAGE_TEMPLATE)?;
        Ok(Self { handlebars })
    }
}

pub fn router() -> WidgetResult<Router> {
    Ok(Router::new()
        .route("/sip/stakeholders", get(stakeholders_page))
        .with_state(Arc::new(Pages::new()?)))
}

async fn stakeholders_page(State(pages): State<Arc<Pages>>) -> Response {
    match pages
        .handlebars
        .render(STAKEHOLDERS_PAGE, &stakeholders_context())
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => AppError::InternalServerError(e.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use web_widgets::STAKEHOLDERS;

    #[tokio::test]
    async fn renders_every_stakeholder() {
        let app = router().unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sip/stakeholders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(html.matches("stakeholders__value").count(), STAKEHOLDERS.len());
        assert!(html.contains("RSHP + Jacques Bugna SA"));
        assert!(!html.contains("<input"));
    }
}
