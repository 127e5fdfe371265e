use axum::extract::{Extension, Form, Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path as FsPath, PathBuf};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use crate::calendar::parse_civil_date;
use crate::components::site_config::{
    HeroSection, LocationInfo, Ministry, PastorInfo, ServiceTime, SiteConfig, SocialLinks,
    StaffMember,
};
use crate::components::store::Collection;
use crate::content::defaults;
use crate::error::{store_error, Error, SiteResult};
use crate::web::auth::{AuthError, Credentials, JwtAuth, AUTH_COOKIE};
use crate::web::pages::{
    self, AdminCollectionPage, AdminDashboardPage, AdminLoginPage, AdminSitePage, CollectionLink,
    FieldFormView, RowView,
};
use crate::web::AppState;

/// Fixed client-side limit on how long a save waits for the store
const SAVE_TIMEOUT_SECS: u64 = 300;

/// List of acceptable login error messages
const ALLOWED_ERROR_MESSAGES: [&str; 2] = ["Invalid credentials", "Authentication error occurred"];

/// Race a store write against the save timeout.
///
/// Timing out only gives up waiting: the write itself keeps running on
/// its task and may still complete server-side. Nothing is retried.
async fn with_save_timeout<T, F>(write: F) -> SiteResult<T>
where
    T: Send + 'static,
    F: Future<Output = SiteResult<T>> + Send + 'static,
{
    let in_flight = tokio::spawn(write);
    match tokio::time::timeout(Duration::from_secs(SAVE_TIMEOUT_SECS), in_flight).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(store_error(&format!("Save task failed: {}", join_error))),
        Err(_) => Err(Error::StoreTimeout(SAVE_TIMEOUT_SECS)),
    }
}

// Login

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
}

/// Handler for the login form page
pub async fn login_form_handler(Query(query): Query<LoginQuery>) -> SiteResult<impl IntoResponse> {
    // Only display errors from our allowed list
    let error = query
        .error
        .filter(|message| ALLOWED_ERROR_MESSAGES.contains(&message.as_str()))
        .unwrap_or_default();

    pages::render(AdminLoginPage { error })
}

/// Handler for login form submission
pub async fn login_handler(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Response {
    match state
        .auth_service
        .authenticate(&credentials.username, &credentials.password)
    {
        Ok(token) => {
            info!("Admin {} successfully authenticated", credentials.username);
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Strict",
                AUTH_COOKIE, token
            );
            let mut response = Redirect::to("/admin").into_response();
            if let Ok(value) = header::HeaderValue::from_str(&cookie) {
                response.headers_mut().insert(header::SET_COOKIE, value);
            }
            response
        }
        Err(AuthError::Unauthorized) => {
            error!("Failed admin login attempt for {}", credentials.username);
            login_failure_response(ALLOWED_ERROR_MESSAGES[0])
        }
        Err(err) => {
            error!("Authentication error: {:?}", err);
            login_failure_response(ALLOWED_ERROR_MESSAGES[1])
        }
    }
}

fn login_failure_response(message: &str) -> Response {
    let encoded = urlencoding::encode(message);
    let mut response = Redirect::to(&format!("/admin/login?error={}", encoded)).into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        header::HeaderValue::from_static("admin_token=; Path=/; HttpOnly; Max-Age=0"),
    );
    response
}

/// Handler for logging out of the admin panel
pub async fn logout_handler() -> Response {
    let mut response = Redirect::to("/admin/login").into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        header::HeaderValue::from_static("admin_token=; Path=/; HttpOnly; Max-Age=0"),
    );
    response
}

// Dashboard

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub uploaded: Option<String>,
}

/// Handler for the admin dashboard
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<JwtAuth>,
    Query(query): Query<DashboardQuery>,
) -> SiteResult<impl IntoResponse> {
    let mut collections = Vec::with_capacity(Collection::ALL.len());
    for collection in Collection::ALL {
        // A failed count renders as zero rather than blocking the page
        let count = state
            .store
            .get_collection(collection)
            .await
            .map(|items| items.len())
            .unwrap_or(0);
        collections.push(CollectionLink {
            slug: collection.slug().to_string(),
            label: collection_title(collection).to_string(),
            count,
        });
    }

    pages::render(AdminDashboardPage {
        username: auth.claims.sub,
        uploaded_url: query.uploaded.unwrap_or_default(),
        collections,
    })
}

// Site configuration editor

#[derive(Debug, Deserialize)]
pub struct SiteFormQuery {
    pub saved: Option<String>,
    pub error: Option<String>,
}

/// Handler for the site configuration form
pub async fn site_form_handler(
    State(state): State<AppState>,
    Extension(_auth): Extension<JwtAuth>,
    Query(query): Query<SiteFormQuery>,
) -> SiteResult<impl IntoResponse> {
    let site = state.site.current();

    let services_json = serde_json::to_string_pretty(&site.services)?;
    let staff_json = serde_json::to_string_pretty(&site.staff)?;
    let ministries_json = serde_json::to_string_pretty(&site.ministries)?;
    let greeting_text = site.pastor.greeting.join("\n");
    let greeting_en_text = site.pastor.greeting_en.join("\n");

    pages::render(AdminSitePage {
        site,
        services_json,
        staff_json,
        ministries_json,
        greeting_text,
        greeting_en_text,
        saved: query.saved.is_some(),
        error: query.error.unwrap_or_default(),
    })
}

/// The site configuration form payload
#[derive(Debug, Deserialize)]
pub struct SiteForm {
    pub hero_title: String,
    pub hero_title_en: String,
    pub hero_subtitle: String,
    pub hero_subtitle_en: String,
    pub hero_banner_url: String,
    #[serde(default)]
    pub hero_dark_overlay: Option<String>,
    pub pastor_name: String,
    pub pastor_name_en: String,
    pub pastor_photo_url: String,
    pub pastor_greeting: String,
    pub pastor_greeting_en: String,
    pub location_address: String,
    pub location_address_en: String,
    pub location_map_embed_url: String,
    pub location_phone: String,
    pub location_email: String,
    pub social_youtube: String,
    pub social_instagram: String,
    pub social_kakao: String,
    pub services_json: String,
    pub staff_json: String,
    pub ministries_json: String,
}

/// Handler for saving the site configuration.
///
/// Builds the whole document from the form and overwrites the stored
/// one (last write wins); the push subscription brings the new value
/// back into the cache.
pub async fn site_save_handler(
    State(state): State<AppState>,
    Extension(_auth): Extension<JwtAuth>,
    Form(form): Form<SiteForm>,
) -> SiteResult<Response> {
    let services: Vec<ServiceTime> = match serde_json::from_str(&form.services_json) {
        Ok(services) => services,
        Err(e) => return Ok(site_form_error(&format!("Services list: {}", e))),
    };
    let staff: Vec<StaffMember> = match serde_json::from_str(&form.staff_json) {
        Ok(staff) => staff,
        Err(e) => return Ok(site_form_error(&format!("Staff list: {}", e))),
    };
    let ministries: Vec<Ministry> = match serde_json::from_str(&form.ministries_json) {
        Ok(ministries) => ministries,
        Err(e) => return Ok(site_form_error(&format!("Ministries list: {}", e))),
    };

    // Banners are carried over from the cached document; this form does
    // not edit them
    let previous = state.site.current();

    let config = SiteConfig {
        hero: HeroSection {
            title: form.hero_title,
            title_en: form.hero_title_en,
            subtitle: form.hero_subtitle,
            subtitle_en: form.hero_subtitle_en,
            banner_url: form.hero_banner_url,
            dark_overlay: form.hero_dark_overlay.is_some(),
        },
        banners: previous.banners,
        pastor: PastorInfo {
            name: form.pastor_name,
            name_en: form.pastor_name_en,
            photo_url: form.pastor_photo_url,
            greeting: split_paragraphs(&form.pastor_greeting),
            greeting_en: split_paragraphs(&form.pastor_greeting_en),
        },
        location: LocationInfo {
            address: form.location_address,
            address_en: form.location_address_en,
            map_embed_url: form.location_map_embed_url,
            phone: form.location_phone,
            email: form.location_email,
        },
        social: SocialLinks {
            youtube: form.social_youtube,
            instagram: form.social_instagram,
            kakao: form.social_kakao,
        },
        services,
        staff,
        ministries,
    };

    let document = serde_json::to_value(&config)?;

    let store = state.store.clone();
    let to_write = document.clone();
    with_save_timeout(async move { store.set_config(to_write).await }).await?;

    // Reflect the save locally right away; the push update that follows
    // is an idempotent merge of the same document
    state.site.apply_update(document).await;

    info!("Site configuration saved");
    Ok(Redirect::to("/admin/site?saved=1").into_response())
}

fn site_form_error(message: &str) -> Response {
    Redirect::to(&format!(
        "/admin/site?error={}",
        urlencoding::encode(message)
    ))
    .into_response()
}

fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

// Collection editors

/// One form field of a collection editor
struct FieldSpec {
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
}

enum FieldKind {
    Text,
    Date,
    Url,
    Textarea,
    Checkbox,
    Select(&'static [&'static str]),
}

impl FieldKind {
    fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::Url => "url",
            FieldKind::Textarea => "textarea",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Select(_) => "select",
        }
    }

    fn options(&self) -> Vec<String> {
        match self {
            FieldKind::Select(options) => options.iter().map(|o| o.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}

fn collection_title(collection: Collection) -> &'static str {
    match collection {
        Collection::Sermons => "Sermons",
        Collection::Bulletins => "Bulletins",
        Collection::Notices => "Notices",
        Collection::Gallery => "Gallery",
        Collection::CalendarEvents => "Calendar Events",
        Collection::Columns => "Columns",
        Collection::Devotionals => "Daily Devotionals",
    }
}

fn fields_for(collection: Collection) -> &'static [FieldSpec] {
    match collection {
        Collection::Sermons => &[
            FieldSpec { name: "title", label: "Title", kind: FieldKind::Text, required: true },
            FieldSpec { name: "title_en", label: "Title (EN)", kind: FieldKind::Text, required: false },
            FieldSpec { name: "preacher", label: "Preacher", kind: FieldKind::Text, required: true },
            FieldSpec { name: "scripture", label: "Scripture", kind: FieldKind::Text, required: true },
            FieldSpec { name: "date", label: "Date", kind: FieldKind::Date, required: true },
            FieldSpec { name: "video_url", label: "Video URL", kind: FieldKind::Url, required: true },
        ],
        Collection::Bulletins => &[
            FieldSpec { name: "title", label: "Title", kind: FieldKind::Text, required: true },
            FieldSpec { name: "date", label: "Date", kind: FieldKind::Date, required: true },
            FieldSpec { name: "file_url", label: "File URL", kind: FieldKind::Url, required: true },
        ],
        Collection::Notices => &[
            FieldSpec { name: "title", label: "Title", kind: FieldKind::Text, required: true },
            FieldSpec { name: "title_en", label: "Title (EN)", kind: FieldKind::Text, required: false },
            FieldSpec { name: "body", label: "Body", kind: FieldKind::Textarea, required: true },
            FieldSpec { name: "body_en", label: "Body (EN)", kind: FieldKind::Textarea, required: false },
            FieldSpec { name: "date", label: "Date", kind: FieldKind::Date, required: true },
            FieldSpec { name: "pinned", label: "Pinned", kind: FieldKind::Checkbox, required: false },
        ],
        Collection::Gallery => &[
            FieldSpec { name: "title", label: "Title", kind: FieldKind::Text, required: true },
            FieldSpec { name: "date", label: "Date", kind: FieldKind::Date, required: true },
            FieldSpec { name: "media_url", label: "Media URL", kind: FieldKind::Url, required: true },
        ],
        Collection::CalendarEvents => &[
            FieldSpec { name: "title", label: "Title", kind: FieldKind::Text, required: true },
            FieldSpec { name: "title_en", label: "Title (EN)", kind: FieldKind::Text, required: false },
            FieldSpec { name: "start_date", label: "Start date", kind: FieldKind::Date, required: true },
            FieldSpec { name: "end_date", label: "End date", kind: FieldKind::Date, required: false },
            FieldSpec { name: "note", label: "Note", kind: FieldKind::Textarea, required: false },
            FieldSpec { name: "note_en", label: "Note (EN)", kind: FieldKind::Textarea, required: false },
            FieldSpec { name: "kind", label: "Kind", kind: FieldKind::Select(&["default", "special"]), required: true },
        ],
        Collection::Columns => &[
            FieldSpec { name: "title", label: "Title", kind: FieldKind::Text, required: true },
            FieldSpec { name: "author", label: "Author", kind: FieldKind::Text, required: true },
            FieldSpec { name: "body", label: "Body", kind: FieldKind::Textarea, required: true },
            FieldSpec { name: "date", label: "Date", kind: FieldKind::Date, required: true },
        ],
        Collection::Devotionals => &[
            FieldSpec { name: "date", label: "Date", kind: FieldKind::Date, required: true },
            FieldSpec { name: "scripture", label: "Scripture", kind: FieldKind::Text, required: true },
            FieldSpec { name: "body", label: "Body", kind: FieldKind::Textarea, required: true },
            FieldSpec { name: "author", label: "Author", kind: FieldKind::Text, required: true },
        ],
    }
}

#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    pub edit: Option<String>,
    pub saved: Option<String>,
    pub error: Option<String>,
}

/// Handler for a collection editor page
pub async fn collection_page_handler(
    State(state): State<AppState>,
    Extension(_auth): Extension<JwtAuth>,
    Path(slug): Path<String>,
    Query(query): Query<CollectionQuery>,
) -> SiteResult<Response> {
    let Some(collection) = Collection::from_slug(&slug) else {
        return Ok(Redirect::to("/admin").into_response());
    };
    let fields = fields_for(collection);

    let items = state.store.get_collection(collection).await.unwrap_or_else(|e| {
        error!("Failed to load {}: {}", collection.slug(), e);
        Vec::new()
    });

    let rows: Vec<RowView> = items
        .iter()
        .map(|item| RowView {
            id: field_text(item, "id"),
            values: fields.iter().map(|field| field_text(item, field.name)).collect(),
        })
        .collect();

    // Prefill the form when editing an existing item
    let editing = query.edit.as_deref().and_then(|id| {
        items
            .iter()
            .find(|item| item.get("id").and_then(Value::as_str) == Some(id))
    });

    let form: Vec<FieldFormView> = fields
        .iter()
        .map(|field| FieldFormView {
            name: field.name.to_string(),
            label: field.label.to_string(),
            kind: field.kind.as_str().to_string(),
            options: field.kind.options(),
            value: editing.map(|item| field_text(item, field.name)).unwrap_or_default(),
        })
        .collect();

    let page = AdminCollectionPage {
        slug: collection.slug().to_string(),
        title: collection_title(collection).to_string(),
        columns: fields.iter().map(|field| field.label.to_string()).collect(),
        rows,
        form,
        edit_id: query.edit.unwrap_or_default(),
        saved: query.saved.is_some(),
        error: query.error.unwrap_or_default(),
    };

    Ok(pages::render(page)?.into_response())
}

fn field_text(item: &Value, name: &str) -> String {
    match item.get(name) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(true)) => "on".to_string(),
        Some(Value::Bool(false)) => String::new(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Handler for creating or updating a collection item
pub async fn collection_save_handler(
    State(state): State<AppState>,
    Extension(_auth): Extension<JwtAuth>,
    Path(slug): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> SiteResult<Response> {
    let Some(collection) = Collection::from_slug(&slug) else {
        return Ok(Redirect::to("/admin").into_response());
    };

    let item = match build_item(collection, &form) {
        Ok(item) => item,
        Err(message) => return Ok(collection_error(collection, &message)),
    };

    let id = field_text(&item, "id");
    let store = state.store.clone();
    let to_write = item.clone();
    let item_id = id.clone();
    with_save_timeout(async move { store.put_item(collection, &item_id, to_write).await }).await?;

    info!("Saved {} item {}", collection.slug(), id);
    Ok(Redirect::to(&format!("/admin/content/{}?saved=1", slug)).into_response())
}

/// Build a store document from the submitted form fields
fn build_item(collection: Collection, form: &HashMap<String, String>) -> Result<Value, String> {
    let mut item = Map::new();

    let id = form
        .get("id")
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    item.insert("id".to_string(), Value::String(id));

    for field in fields_for(collection) {
        let raw = form.get(field.name).map(|value| value.trim()).unwrap_or("");

        match field.kind {
            FieldKind::Checkbox => {
                item.insert(field.name.to_string(), Value::Bool(!raw.is_empty()));
            }
            FieldKind::Date => {
                if raw.is_empty() {
                    if field.required {
                        return Err(format!("{} is required", field.label));
                    }
                    continue;
                }
                if parse_civil_date(raw).is_none() {
                    return Err(format!("{} is not a valid date", field.label));
                }
                item.insert(field.name.to_string(), Value::String(raw.to_string()));
            }
            _ => {
                if raw.is_empty() {
                    if field.required {
                        return Err(format!("{} is required", field.label));
                    }
                    continue;
                }
                item.insert(field.name.to_string(), Value::String(raw.to_string()));
            }
        }
    }

    // Calendar events must form a forward range
    if collection == Collection::CalendarEvents {
        let start = item.get("start_date").and_then(Value::as_str).and_then(parse_civil_date);
        let end = item.get("end_date").and_then(Value::as_str).and_then(parse_civil_date);
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err("End date must not be before the start date".to_string());
            }
        }
    }

    Ok(Value::Object(item))
}

fn collection_error(collection: Collection, message: &str) -> Response {
    Redirect::to(&format!(
        "/admin/content/{}?error={}",
        collection.slug(),
        urlencoding::encode(message)
    ))
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub id: String,
}

/// Handler for deleting a collection item
pub async fn collection_delete_handler(
    State(state): State<AppState>,
    Extension(_auth): Extension<JwtAuth>,
    Path(slug): Path<String>,
    Form(form): Form<DeleteForm>,
) -> SiteResult<Response> {
    let Some(collection) = Collection::from_slug(&slug) else {
        return Ok(Redirect::to("/admin").into_response());
    };

    let store = state.store.clone();
    let id = form.id.clone();
    with_save_timeout(async move { store.delete_item(collection, &id).await }).await?;

    info!("Deleted {} item {}", collection.slug(), form.id);
    Ok(Redirect::to(&format!("/admin/content/{}", slug)).into_response())
}

/// Handler for resetting a collection to its seed content
pub async fn collection_reset_handler(
    State(state): State<AppState>,
    Extension(_auth): Extension<JwtAuth>,
    Path(slug): Path<String>,
) -> SiteResult<Response> {
    let Some(collection) = Collection::from_slug(&slug) else {
        return Ok(Redirect::to("/admin").into_response());
    };

    let items = defaults::for_collection(collection)?;
    let store = state.store.clone();
    with_save_timeout(async move { store.reset_collection(collection, items).await }).await?;

    info!("Reset {} to defaults", collection.slug());
    Ok(Redirect::to(&format!("/admin/content/{}", slug)).into_response())
}

// Uploads

/// Handler for media uploads.
///
/// Stores the file under a logical folder inside the upload directory
/// and hands the public URL back to the dashboard so it can be pasted
/// into a media field.
pub async fn upload_handler(
    State(state): State<AppState>,
    Extension(_auth): Extension<JwtAuth>,
    mut multipart: Multipart,
) -> Result<Response, StatusCode> {
    let mut folder = String::new();
    let mut file_name = None;
    let mut file_data = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "folder" {
            if let Ok(value) = field.text().await {
                folder = value;
            }
        } else if name == "file" {
            file_name = field.file_name().map(|n| n.to_string());
            let data = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            file_data = Some(data);
        }
    }

    let Some(data) = file_data else {
        error!("Upload is missing the file field");
        return Err(StatusCode::BAD_REQUEST);
    };

    let folder = sanitize_folder(&folder);
    let stored_name = stored_file_name(file_name.as_deref());

    let mut dir = PathBuf::from(&state.upload_dir);
    dir.push(&folder);
    tokio::fs::create_dir_all(&dir).await.map_err(|e| {
        error!("Failed to create upload folder: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let path = dir.join(&stored_name);
    tokio::fs::write(&path, &data).await.map_err(|e| {
        error!("Failed to store upload: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let public_url = format!("/uploads/{}/{}", folder, stored_name);
    info!("Stored upload at {}", public_url);

    Ok(Redirect::to(&format!(
        "/admin?uploaded={}",
        urlencoding::encode(&public_url)
    ))
    .into_response())
}

/// Clamp a logical folder name to a safe path segment
fn sanitize_folder(folder: &str) -> String {
    let cleaned: String = folder
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if cleaned.is_empty() {
        "media".to_string()
    } else {
        cleaned
    }
}

/// Unique stored name keeping the original extension
fn stored_file_name(original: Option<&str>) -> String {
    let extension = original
        .and_then(|name| FsPath::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ext.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        })
        .filter(|ext| !ext.is_empty());

    match extension {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase()),
        None => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_item_assigns_id_and_skips_empty_optionals() {
        let item = build_item(
            Collection::CalendarEvents,
            &form(&[
                ("title", "성탄 축하 예배"),
                ("start_date", "2025-12-25"),
                ("kind", "special"),
                ("end_date", ""),
                ("note", ""),
            ]),
        )
        .expect("valid item");

        assert!(!field_text(&item, "id").is_empty());
        assert_eq!(item.get("end_date"), None);
        assert_eq!(item.get("note"), None);
        assert_eq!(
            item.get("kind").and_then(Value::as_str),
            Some("special")
        );

        // The produced document deserializes into the event model
        let event: crate::calendar::CalendarEvent =
            serde_json::from_value(item).expect("valid event document");
        assert_eq!(event.start_date, "2025-12-25");
    }

    #[test]
    fn test_build_item_rejects_missing_required_field() {
        let result = build_item(
            Collection::Sermons,
            &form(&[("title", "은혜의 강단"), ("date", "2025-01-05")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_item_rejects_invalid_date() {
        let result = build_item(
            Collection::CalendarEvents,
            &form(&[("title", "행사"), ("start_date", "someday"), ("kind", "default")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_item_rejects_inverted_range() {
        let result = build_item(
            Collection::CalendarEvents,
            &form(&[
                ("title", "행사"),
                ("start_date", "2025-12-26"),
                ("end_date", "2025-12-24"),
                ("kind", "default"),
            ]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_item_keeps_submitted_id() {
        let item = build_item(
            Collection::Notices,
            &form(&[
                ("id", "notice-7"),
                ("title", "안내"),
                ("body", "본문"),
                ("date", "2025-01-10"),
            ]),
        )
        .expect("valid item");

        assert_eq!(field_text(&item, "id"), "notice-7");
        // Unchecked checkbox still lands as an explicit false
        assert_eq!(item.get("pinned"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_sanitize_folder() {
        assert_eq!(sanitize_folder("bulletins"), "bulletins");
        assert_eq!(sanitize_folder("../etc"), "etc");
        assert_eq!(sanitize_folder("갤러리/.."), "media");
        assert_eq!(sanitize_folder(""), "media");
    }

    #[test]
    fn test_stored_file_name_keeps_extension() {
        let name = stored_file_name(Some("retreat photo.JPG"));
        assert!(name.ends_with(".jpg"));
        assert!(!stored_file_name(None).contains('.'));
        assert!(!stored_file_name(Some("no_extension")).contains('.'));
    }
}
