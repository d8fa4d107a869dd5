//! Generic list/create/update/delete routes, mounted once per resource under
//! `/api/v1/<slug>`.

use actix_multipart::Multipart;
use actix_web::guard::{self, GuardContext};
use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError, Result, web};
use futures_util::TryStreamExt;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::{Resource, Upload};
use crate::models::*;
use crate::services::ConsoleService;

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusForm {
    pub is_active: bool,
}

pub async fn list<R: Resource>(
    console: web::Data<ConsoleService>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let mut page = match console.page::<R>() {
        Ok(page) => page,
        Err(e) => return Ok(e.error_response()),
    };
    page.seek(
        query.get_page(),
        query.get_per_page(console.dashboard().default_page_size),
        query.get_search(),
    );
    match page.load().await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(page.response()))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Validates and saves through a fresh list page; `id` selects update.
async fn save<R: Resource>(
    console: &ConsoleService,
    id: Option<&str>,
    form: R::Form,
) -> HttpResponse {
    let mut page = match console.page::<R>() {
        Ok(page) => page,
        Err(e) => return e.error_response(),
    };
    let verb = match id {
        Some(id) => {
            page.open_edit_with(id, form);
            "updated"
        }
        None => {
            page.open_create(form);
            "created"
        }
    };
    match page.submit().await {
        Ok(_) => HttpResponse::Ok().json(ApiResponse::<()>::message(format!(
            "{} {verb} successfully",
            R::LABEL
        ))),
        Err(e) => e.error_response(),
    }
}

pub async fn create<R: Resource>(
    console: web::Data<ConsoleService>,
    form: web::Json<R::Form>,
) -> Result<HttpResponse> {
    Ok(save::<R>(&console, None, form.into_inner()).await)
}

pub async fn update<R: Resource>(
    console: web::Data<ConsoleService>,
    path: web::Path<String>,
    form: web::Json<R::Form>,
) -> Result<HttpResponse> {
    Ok(save::<R>(&console, Some(path.as_str()), form.into_inner()).await)
}

pub async fn create_upload<R: Resource>(
    console: web::Data<ConsoleService>,
    payload: Multipart,
) -> Result<HttpResponse> {
    match read_upload::<R>(payload).await {
        Ok(form) => Ok(save::<R>(&console, None, form).await),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn update_upload<R: Resource>(
    console: web::Data<ConsoleService>,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse> {
    match read_upload::<R>(payload).await {
        Ok(form) => Ok(save::<R>(&console, Some(path.as_str()), form).await),
        Err(e) => Ok(e.error_response()),
    }
}

fn is_multipart(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

fn bad_part(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(format!("Malformed upload: {e}"))
}

/// Reads an upload: a `form` part holding the JSON values plus an optional
/// file part named `R::UPLOAD_FIELD`. Other parts are ignored.
async fn read_upload<R: Resource>(mut payload: Multipart) -> AppResult<R::Form> {
    let mut form: Option<R::Form> = None;
    let mut upload: Option<Upload> = None;

    while let Some(mut field) = payload.try_next().await.map_err(bad_part)? {
        let name = field.name().to_string();
        let file_name = field
            .content_disposition()
            .get_filename()
            .unwrap_or_default()
            .to_string();
        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(bad_part)? {
            data.extend_from_slice(&chunk);
        }

        if name == "form" {
            form = Some(serde_json::from_slice(&data).map_err(bad_part)?);
        } else if R::UPLOAD_FIELD == Some(name.as_str()) && !data.is_empty() {
            log::info!("Received {} upload {file_name} ({} bytes)", R::SLUG, data.len());
            upload = Some(Upload::new(file_name, data));
        }
    }

    let mut form = form.ok_or_else(|| AppError::BadRequest("Missing form part".to_string()))?;
    if let Some(upload) = upload {
        R::attach(&mut form, upload);
    }
    Ok(form)
}

pub async fn delete<R: Resource>(
    console: web::Data<ConsoleService>,
    path: web::Path<String>,
    query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse> {
    let mut page = match console.page::<R>() {
        Ok(page) => page,
        Err(e) => return Ok(e.error_response()),
    };
    page.request_delete(&path);
    confirm_or_prompt(&mut page, query.confirm).await
}

pub async fn set_status<R: Resource>(
    console: web::Data<ConsoleService>,
    path: web::Path<String>,
    query: web::Query<ConfirmQuery>,
    form: web::Json<StatusForm>,
) -> Result<HttpResponse> {
    let mut page = match console.page::<R>() {
        Ok(page) => page,
        Err(e) => return Ok(e.error_response()),
    };
    page.request_set_active(&path, form.is_active);
    confirm_or_prompt(&mut page, query.confirm).await
}

/// Runs the pending action only when the caller already confirmed it;
/// otherwise answers with the prompt and leaves everything untouched.
async fn confirm_or_prompt<R: Resource>(
    page: &mut crate::dashboard::ListPage<R, crate::external::ResourceApi<R>>,
    confirmed: bool,
) -> Result<HttpResponse> {
    if !confirmed {
        let prompt = page
            .confirm_dialog()
            .prompt()
            .unwrap_or("Please confirm this action")
            .to_string();
        page.cancel_confirm();
        return Ok(AppError::ConfirmationRequired(prompt).error_response());
    }
    match page.confirm().await {
        Ok(Some(ack)) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(ack.message))),
        Ok(None) => Ok(AppError::InternalError("Nothing to confirm".to_string()).error_response()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/chapters",
    tag = "courses",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Chapters of the course in chapter order"),
        (status = 502, description = "Backend call failed")
    )
)]
pub async fn course_chapters(
    console: web::Data<ConsoleService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let api = match console.api::<Chapters>() {
        Ok(api) => api,
        Err(e) => return Ok(e.error_response()),
    };
    match api.for_course(&path).await {
        Ok(listing) => {
            let pagination = PaginationInfo::new(1, listing.data.len().max(1) as u32, listing.total);
            let items = listing
                .data
                .into_iter()
                .enumerate()
                .map(|(index, item)| Row {
                    serial: index + 1,
                    item,
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(PaginatedResponse {
                items,
                pagination,
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

/// Mounts the routes `R` supports.
pub fn resource_config<R: Resource>(cfg: &mut web::ServiceConfig) {
    let mut scope = web::scope(&format!("/{}", R::SLUG)).route("", web::get().to(list::<R>));
    if R::EDITABLE {
        if R::UPLOAD_FIELD.is_some() {
            scope = scope
                .route(
                    "",
                    web::post()
                        .guard(guard::fn_guard(is_multipart))
                        .to(create_upload::<R>),
                )
                .route(
                    "/{id}",
                    web::put()
                        .guard(guard::fn_guard(is_multipart))
                        .to(update_upload::<R>),
                );
        }
        scope = scope
            .route("", web::post().to(create::<R>))
            .route("/{id}", web::put().to(update::<R>));
    }
    if R::TOGGLEABLE {
        scope = scope.route("/{id}/status", web::put().to(set_status::<R>));
    }
    if R::DELETABLE {
        scope = scope.route("/{id}", web::delete().to(delete::<R>));
    }
    cfg.service(scope);
}

pub fn resources_config(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/courses/{course_id}/chapters",
        web::get().to(course_chapters),
    );
    resource_config::<AlgoBots>(cfg);
    resource_config::<Bots>(cfg);
    resource_config::<Categories>(cfg);
    resource_config::<Companies>(cfg);
    resource_config::<Coupons>(cfg);
    resource_config::<Courses>(cfg);
    resource_config::<Chapters>(cfg);
    resource_config::<CourseSessions>(cfg);
    resource_config::<Customers>(cfg);
    resource_config::<Payments>(cfg);
    resource_config::<Contacts>(cfg);
    resource_config::<Newsletter>(cfg);
    resource_config::<TelegramChannels>(cfg);
    resource_config::<TelegramPlans>(cfg);
    resource_config::<UtilitySettings>(cfg);
}
