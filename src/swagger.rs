use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::external::AUTH_HEADER;
use crate::handlers;
use crate::models::*;
use crate::validation::FieldError;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(AUTH_HEADER))),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::session,
        handlers::resources::course_chapters,
    ),
    components(
        schemas(
            LoginForm,
            FieldError,
            PaginationParams,
            PaginationInfo,
            AlgoBot,
            AlgoBotForm,
            BotForm,
            Category,
            CategoryForm,
            ChapterForm,
            Company,
            CompanyForm,
            Coupon,
            CouponForm,
            CourseType,
            CourseForm,
            CourseSessionForm,
            Gender,
            CustomerForm,
            TelegramChannelForm,
            TelegramPlanForm,
            UtilitySettingForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Admin login and session"),
        (name = "courses", description = "Courses, chapters and sessions"),
    ),
    info(
        title = "Algodesk Admin Gateway",
        version = "0.1.0",
        description = "JSON gateway over the admin dashboard pages. Listed here are the \
            auth routes and the course chapter listing."
    ),
    servers(
        (url = "/", description = "Local gateway")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
