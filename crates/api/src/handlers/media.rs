//! Handlers for the `/media` resource (brand media library).
//!
//! Items either point at an external URL (`POST /media`) or at a file
//! uploaded through `POST /media/upload` and stored under the configured
//! media root as `{brand_id}/{uuid}.{ext}`.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use brandpanel_core::error::CoreError;
use brandpanel_core::media::{extension_for_mime, sanitize_file_name, MediaKind};
use brandpanel_core::permissions::{Action, Resource};
use brandpanel_core::types::DbId;
use brandpanel_db::models::media::{
    CreateMediaItem, MediaItem, RegisterMediaItem, UpdateMediaItem,
};
use brandpanel_db::repositories::MediaItemRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::resolve_page;
use crate::response::DataResponse;
use crate::state::AppState;

const MAX_ALT_TEXT_LENGTH: usize = 500;
const MAX_FOLDER_LENGTH: usize = 160;

/// Query parameters for `GET /media`.
#[derive(Debug, Deserialize)]
pub struct MediaListParams {
    pub brand_id: DbId,
    pub kind: Option<MediaKind>,
    pub folder: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Parsed fields of an upload form.
#[derive(Debug, Default)]
struct UploadForm {
    brand_id: Option<DbId>,
    file: Option<UploadedFile>,
    alt_text: Option<String>,
    folder: Option<String>,
}

#[derive(Debug)]
struct UploadedFile {
    file_name: String,
    mime_type: String,
    data: Vec<u8>,
}

/// GET /api/v1/media?brand_id=&kind=&folder=&limit=&offset=
pub async fn list_media(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<MediaListParams>,
) -> AppResult<Json<DataResponse<Vec<MediaItem>>>> {
    auth_user.require(params.brand_id, Resource::Media, Action::Read)?;
    let (limit, offset) = resolve_page(params.limit, params.offset);

    let items = MediaItemRepo::list_by_brand(
        &state.pool,
        params.brand_id,
        params.kind.map(|k| k.as_str()),
        params.folder.as_deref(),
        limit,
        offset,
    )
    .await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/media/{id}
pub async fn get_media(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MediaItem>>> {
    let item = find_media(&state, id).await?;
    auth_user.require(item.brand_id, Resource::Media, Action::Read)?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/media
///
/// Register a file hosted elsewhere. The kind is derived from the MIME type.
pub async fn register_media(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<RegisterMediaItem>,
) -> AppResult<(StatusCode, Json<DataResponse<MediaItem>>)> {
    input.validate()?;
    auth_user.require(input.brand_id, Resource::Media, Action::Write)?;
    let kind = MediaKind::from_mime(&input.mime_type)?;

    let dto = CreateMediaItem {
        brand_id: input.brand_id,
        file_name: input.file_name,
        url: input.url,
        mime_type: input.mime_type,
        kind: kind.as_str().to_string(),
        size_bytes: input.size_bytes,
        alt_text: input.alt_text,
        folder: input.folder,
        storage_key: None,
        uploaded_by: Some(auth_user.user_id),
    };
    let item = MediaItemRepo::create(&state.pool, &dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// POST /api/v1/media/upload
///
/// Multipart form with fields `brand_id` (required), `file` (required),
/// `alt_text` and `folder`. The file's declared content type must be on the
/// allowlist and its size within the configured limit (413 otherwise). The
/// stored file's extension follows the content type, not the file name.
pub async fn upload_media(
    State(state): State<AppState>,
    auth_user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<MediaItem>>)> {
    let form = read_upload_form(multipart, state.config.media.max_upload_bytes).await?;

    let brand_id = form
        .brand_id
        .ok_or_else(|| AppError::BadRequest("Missing required 'brand_id' field".into()))?;
    auth_user.require(brand_id, Resource::Media, Action::Write)?;

    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if file.data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    let kind = MediaKind::from_mime(&file.mime_type)?;
    let file_name = sanitize_file_name(&file.file_name)?;
    check_optional_length(form.alt_text.as_deref(), MAX_ALT_TEXT_LENGTH, "alt_text")?;
    check_optional_length(form.folder.as_deref(), MAX_FOLDER_LENGTH, "folder")?;

    let ext = extension_for_mime(&file.mime_type)?;
    let storage_key = format!("{brand_id}/{}.{ext}", uuid::Uuid::new_v4());
    let path = state.config.media.root.join(&storage_key);
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create media directory: {e}")))?;
    }
    tokio::fs::write(&path, &file.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let dto = CreateMediaItem {
        brand_id,
        file_name,
        url: state.config.media.public_url(&storage_key),
        mime_type: file.mime_type,
        kind: kind.as_str().to_string(),
        size_bytes: Some(file.data.len() as i64),
        alt_text: form.alt_text,
        folder: form.folder,
        storage_key: Some(storage_key),
        uploaded_by: Some(auth_user.user_id),
    };

    let item = match MediaItemRepo::create(&state.pool, &dto).await {
        Ok(item) => item,
        Err(e) => {
            remove_stored_file(&path).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        media_id = item.id,
        brand_id,
        size_bytes = file.data.len(),
        kind = kind.as_str(),
        "Media uploaded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/media/{id}
///
/// Only the display name, alt text and folder can change.
pub async fn update_media(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMediaItem>,
) -> AppResult<Json<DataResponse<MediaItem>>> {
    input.validate()?;
    let existing = find_media(&state, id).await?;
    auth_user.require(existing.brand_id, Resource::Media, Action::Write)?;

    let item = MediaItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaItem",
            id,
        }))?;
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/media/{id}
///
/// Removes the row and, for uploaded items, the stored file.
pub async fn delete_media(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = find_media(&state, id).await?;
    auth_user.require(item.brand_id, Resource::Media, Action::Write)?;

    if !MediaItemRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MediaItem",
            id,
        }));
    }
    if let Some(key) = &item.storage_key {
        remove_stored_file(&state.config.media.root.join(key)).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_media(state: &AppState, id: DbId) -> AppResult<MediaItem> {
    MediaItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaItem",
            id,
        }))
}

/// Read the upload form, failing as soon as the file exceeds `max_bytes`.
async fn read_upload_form(mut multipart: Multipart, max_bytes: usize) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field
                    .content_type()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::BadRequest("File has no content type".into()))?;

                let mut data = Vec::new();
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                {
                    if data.len() + chunk.len() > max_bytes {
                        return Err(AppError::PayloadTooLarge(format!(
                            "File exceeds the {max_bytes} byte upload limit"
                        )));
                    }
                    data.extend_from_slice(&chunk);
                }
                form.file = Some(UploadedFile {
                    file_name,
                    mime_type,
                    data,
                });
            }
            "brand_id" => {
                let text = field_text(field).await?;
                let brand_id = text.trim().parse::<DbId>().map_err(|_| {
                    AppError::BadRequest(format!("Invalid brand_id '{text}'"))
                })?;
                form.brand_id = Some(brand_id);
            }
            "alt_text" => form.alt_text = Some(field_text(field).await?),
            "folder" => {
                let folder = field_text(field).await?;
                form.folder = Some(folder.trim().to_string()).filter(|f| !f.is_empty());
            }
            _ => {} // ignore unknown fields
        }
    }
    Ok(form)
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn check_optional_length(value: Option<&str>, max: usize, field: &str) -> AppResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::Core(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )))),
        _ => Ok(()),
    }
}

/// Best effort; a file that is already gone is fine.
async fn remove_stored_file(path: &std::path::Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove stored media file");
        }
    }
}
