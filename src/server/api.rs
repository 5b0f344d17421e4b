use std::collections::BTreeMap;

use actix_web::{
    Responder, Result as ActixResult,
    error::{ErrorBadRequest, ErrorNotFound},
    web,
};
use datepicker_widget::{
    DatePicker, RenderEnv,
    libs::translations::{NAMESPACE, TranslationKey},
};
use strum::IntoEnumIterator;

// POST /api/render
async fn handle_render(
    env: web::Data<RenderEnv>,
    widget: web::Json<DatePicker>,
) -> ActixResult<impl Responder> {
    match widget.render(&env) {
        Ok(rendered) => Ok(web::Json(rendered)),
        Err(e) => {
            tracing::warn!("Rejected widget definition: {:?}", e);
            Err(ErrorBadRequest(format!("Invalid widget definition: {}", e)))
        }
    }
}

// POST /api/render/batch
async fn handle_render_batch(
    env: web::Data<RenderEnv>,
    widgets: web::Json<Vec<DatePicker>>,
) -> ActixResult<impl Responder> {
    let rendered = widgets
        .iter()
        .enumerate()
        .map(|(i, widget)| {
            widget.render(&env).map_err(|e| {
                tracing::warn!("Rejected widget #{}: {:?}", i + 1, e);
                ErrorBadRequest(format!("Invalid widget #{}: {}", i + 1, e))
            })
        })
        .collect::<ActixResult<Vec<_>>>()?;
    Ok(web::Json(rendered))
}

// GET /api/translations/{locale}
async fn handle_translations(
    env: web::Data<RenderEnv>,
    locale: web::Path<String>,
) -> ActixResult<impl Responder> {
    if env.registry.source(NAMESPACE).is_none() {
        return Err(ErrorNotFound(format!(
            "No message source registered for `{}`",
            NAMESPACE
        )));
    }
    let messages: BTreeMap<String, String> = TranslationKey::iter()
        .map(|key| (key.to_string(), env.registry.lookup(Some(&locale), key)))
        .collect();
    Ok(web::Json(messages))
}

// --- Actix App Configuration ---
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    let scope = web::scope("/api")
        .service(
            web::scope("/render")
                .route("", web::post().to(handle_render))
                .route("/batch", web::post().to(handle_render_batch)),
        )
        .route("/translations/{locale}", web::get().to(handle_translations));
    cfg.service(scope);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web::Data};
    use datepicker_widget::TranslationRegistry;
    use serde_json::{Value, json};

    use super::*;

    async fn setup_test_app(
        env: RenderEnv,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(App::new().app_data(Data::new(env)).configure(config_routes)).await
    }

    #[actix_web::test]
    async fn test_render() {
        let app = setup_test_app(RenderEnv::default()).await;

        let req = test::TestRequest::post()
            .uri("/api/render")
            .set_json(json!({
                "model": {"formName": "Event", "attribute": "start_at", "value": "2024-05-01"},
                "language": "ru",
                "dropdownItems": [{"label": "Today", "url": "#", "value": "2024-05-01"}],
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], "event-start_at");
        assert_eq!(body["config"]["locale"], "ru");
        assert_eq!(body["config"]["tooltips"]["clear"], "Очистить");
        assert_eq!(body["script"].as_array().unwrap().len(), 2);
        assert!(
            body["html"]
                .as_str()
                .unwrap()
                .contains(r#"name="Event[start_at]" value="2024-05-01""#)
        );
    }

    #[actix_web::test]
    async fn test_render_rejects_bad_definitions() {
        let app = setup_test_app(RenderEnv::default()).await;

        // neither name nor model
        let req = test::TestRequest::post()
            .uri("/api/render")
            .set_json(json!({"readonly": true}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // a name that yields no element id
        let req = test::TestRequest::post()
            .uri("/api/render")
            .set_json(json!({"name": "[]"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // template without the dropdown slot fails while parsing the body
        let req = test::TestRequest::post()
            .uri("/api/render")
            .set_json(json!({"name": "due", "template": "{input}{addon}"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_render_batch() {
        let app = setup_test_app(RenderEnv::default()).await;

        let req = test::TestRequest::post()
            .uri("/api/render/batch")
            .set_json(json!([{"name": "start"}, {"name": "end", "addon": false}]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Vec<Value> = test::read_body_json(resp).await;
        assert_eq!(body.len(), 2);
        assert_eq!(body[1]["html"], r#"<input type="text" id="end" class="form-control" name="end">"#);

        let req = test::TestRequest::post()
            .uri("/api/render/batch")
            .set_json(json!([{"name": "start"}, {}]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_translations() {
        let app = setup_test_app(RenderEnv::default()).await;

        let req = test::TestRequest::get()
            .uri("/api/translations/de-AT")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: BTreeMap<String, String> = test::read_body_json(resp).await;
        assert_eq!(body.len(), TranslationKey::iter().count());
        assert_eq!(body["today"], "Zu heute springen");
    }

    #[actix_web::test]
    async fn test_translations_without_source() {
        let env = RenderEnv::new(Arc::new(TranslationRegistry::new()), None);
        let app = setup_test_app(env).await;

        let req = test::TestRequest::get()
            .uri("/api/translations/ru")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
