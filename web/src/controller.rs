use actix_files::NamedFile;
use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;

use crate::{
    app_data::AppData,
    app_error::{AppError, Response},
    services::{self, AddCommentInput},
};

#[derive(Serialize)]
struct UploadStatus {
    status: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn route(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health)
        .service(upload_img)
        .service(photos_of_user)
        .service(image)
        .service(add_comment);
}

/// Malformed JSON bodies answer with the same error shape as everything else.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::InvalidBody(err.to_string()).into())
}

/// Liveness only; touches neither the database nor the disk.
#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

#[post("/uploadImg")]
async fn upload_img(payload: Multipart, st: web::Data<AppData>) -> Response {
    services::upload_image(payload, &st).await?;
    Ok(HttpResponse::Ok().json(UploadStatus { status: true }))
}

#[get("/photosOfUser/{id}")]
async fn photos_of_user(path: web::Path<String>, st: web::Data<AppData>) -> Response {
    let photos = services::photos_of_user(&path, &st).await?;
    Ok(HttpResponse::Ok().json(photos))
}

#[get("/image/{file_name}")]
async fn image(path: web::Path<String>, st: web::Data<AppData>) -> Response<NamedFile> {
    services::open_image(&path, &st.images).await
}

#[post("/{id}/addComment")]
async fn add_comment(
    path: web::Path<String>,
    body: web::Json<AddCommentInput>,
    st: web::Data<AppData>,
) -> Response {
    let photo = services::add_comment(&path, body.into_inner(), &st).await?;
    Ok(HttpResponse::Ok().json(photo))
}
