use super::api;
use super::login;

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder};
use utoipa::{openapi::security::SecurityScheme, Modify, OpenApi};
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

struct SecurityAddon;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::v0::status::get_status,
        api::v0::user::get_user_info,
        api::v0::user::get_balance,
        api::v0::user::adjust_balance,
        api::v0::uploads::list_uploads,
        api::v0::uploads::upload_pdf,
        api::v0::uploads::upload_youtube,
        api::v0::summaries::list_summaries,
        api::v0::summaries::create_summary,
        api::v0::flashcards::list_flashcards,
        api::v0::flashcards::create_flashcards,
        api::v0::quizzes::list_quizzes,
        api::v0::quizzes::create_quiz,
        api::v0::artifacts::list_artifacts,
        api::v0::artifacts::get_artifact_content,
        api::v0::process::process_upload,
        login::register,
        login::login,
        login::logout,
    ),
    modifiers(&SecurityAddon),
    tags()
)]
struct ApiDoc;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // we can unwrap safely, since there already are components registered.
        let components = openapi.components.as_mut().expect("components not registered");
        components.add_security_scheme(
            "token",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Api Token"))
                    .build(),
            ),
        );
    }
}

pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        // There is no need to create `RapiDoc::with_openapi` because the OpenApi is served
        // via SwaggerUi instead we only make rapidoc to point to the existing doc.
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
}
