use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::components::site_config::SiteConfig;
use crate::error::Error;
use crate::utils::i18n::Lang;

/// Shared page chrome: navigation, banner, footer
#[derive(Debug, Clone)]
pub struct Chrome {
    pub lang: Lang,
    pub title: String,
    pub banner_image: String,
    pub banner_title: String,
    pub banner_subtitle: String,
    pub banner_color: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub mailto: String,
    pub youtube: String,
    pub instagram: String,
    pub kakao: String,
}

impl Chrome {
    /// Assemble the chrome for one page from the cached site config.
    ///
    /// `page_key` selects the per-page banner; pages without a
    /// configured banner render without one.
    pub fn build(lang: Lang, site: &SiteConfig, page_key: &str, title: String) -> Self {
        let banner = site.banners.get(page_key);

        let mailto = format!(
            "mailto:{}?subject={}",
            site.location.email,
            urlencoding::encode(&lang.t("contact.subject"))
        );

        Self {
            title,
            banner_image: banner.map(|b| b.image_url.clone()).unwrap_or_default(),
            banner_title: banner
                .map(|b| lang.pick(&b.title, &b.title_en).to_string())
                .unwrap_or_default(),
            banner_subtitle: banner
                .map(|b| lang.pick(&b.subtitle, &b.subtitle_en).to_string())
                .unwrap_or_default(),
            banner_color: banner
                .map(|b| b.text_color.clone())
                .unwrap_or_else(|| "#ffffff".to_string()),
            address: lang
                .pick(&site.location.address, &site.location.address_en)
                .to_string(),
            phone: site.location.phone.clone(),
            email: site.location.email.clone(),
            mailto,
            youtube: site.social.youtube.clone(),
            instagram: site.social.instagram.clone(),
            kakao: site.social.kakao.clone(),
            lang,
        }
    }
}

// Public page views

#[derive(Debug, Clone)]
pub struct HeroView {
    pub title: String,
    pub subtitle: String,
    pub banner_url: String,
    pub dark_overlay: bool,
}

#[derive(Debug, Clone)]
pub struct ServiceView {
    pub name: String,
    pub day: String,
    pub time: String,
    pub place: String,
}

#[derive(Debug, Clone)]
pub struct NoticeView {
    pub title: String,
    pub body: String,
    pub date: String,
    pub pinned: bool,
}

#[derive(Debug, Clone)]
pub struct SermonView {
    pub title: String,
    pub preacher: String,
    pub scripture: String,
    pub date: String,
    pub embed_url: String,
}

#[derive(Debug, Clone)]
pub struct BulletinView {
    pub title: String,
    pub date: String,
    pub file_url: String,
}

#[derive(Debug, Clone)]
pub struct GalleryView {
    pub title: String,
    pub date: String,
    pub media_url: String,
    pub is_video: bool,
}

#[derive(Debug, Clone)]
pub struct ColumnView {
    pub title: String,
    pub author: String,
    pub body: String,
    pub date: String,
}

#[derive(Debug, Clone)]
pub struct DevotionalView {
    pub date: String,
    pub scripture: String,
    pub body: String,
    pub author: String,
}

#[derive(Debug, Clone)]
pub struct PastorView {
    pub name: String,
    pub photo_url: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StaffView {
    pub name: String,
    pub role: String,
    pub photo_url: String,
}

#[derive(Debug, Clone)]
pub struct LocationView {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub map_embed_url: String,
}

#[derive(Debug, Clone)]
pub struct MinistryView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub photo_url: String,
}

// Calendar views

#[derive(Debug, Clone)]
pub struct CellEventView {
    pub title: String,
    pub special: bool,
}

#[derive(Debug, Clone)]
pub struct CellView {
    pub day: u32,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub link: String,
    pub events: Vec<CellEventView>,
}

#[derive(Debug, Clone)]
pub struct EventDetailView {
    pub title: String,
    pub note: String,
    pub range: String,
    pub special: bool,
}

// Page templates

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub chrome: Chrome,
    pub hero: HeroView,
    pub services: Vec<ServiceView>,
    pub notices: Vec<NoticeView>,
    pub sermons: Vec<SermonView>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub chrome: Chrome,
    pub section: String,
    pub pastor: PastorView,
    pub staff: Vec<StaffView>,
    pub location: LocationView,
}

#[derive(Template)]
#[template(path = "ministry.html")]
pub struct MinistryPage {
    pub chrome: Chrome,
    pub ministries: Vec<MinistryView>,
}

#[derive(Template)]
#[template(path = "ministry_detail.html")]
pub struct MinistryDetailPage {
    pub chrome: Chrome,
    pub ministry: MinistryView,
}

#[derive(Template)]
#[template(path = "notices.html")]
pub struct NoticesPage {
    pub chrome: Chrome,
    pub notices: Vec<NoticeView>,
}

#[derive(Template)]
#[template(path = "bulletins.html")]
pub struct BulletinsPage {
    pub chrome: Chrome,
    pub bulletins: Vec<BulletinView>,
}

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryPage {
    pub chrome: Chrome,
    pub items: Vec<GalleryView>,
}

#[derive(Template)]
#[template(path = "calendar.html")]
pub struct CalendarPage {
    pub chrome: Chrome,
    pub month_label: String,
    pub prev_link: String,
    pub next_link: String,
    pub weeks: Vec<Vec<CellView>>,
    pub selected_label: String,
    pub selected_events: Vec<EventDetailView>,
}

#[derive(Template)]
#[template(path = "columns.html")]
pub struct ColumnsPage {
    pub chrome: Chrome,
    pub columns: Vec<ColumnView>,
}

#[derive(Template)]
#[template(path = "sermons.html")]
pub struct SermonsPage {
    pub chrome: Chrome,
    pub sermons: Vec<SermonView>,
}

#[derive(Template)]
#[template(path = "devotionals.html")]
pub struct DevotionalsPage {
    pub chrome: Chrome,
    pub devotionals: Vec<DevotionalView>,
}

#[derive(Template)]
#[template(path = "coming_soon.html")]
pub struct ComingSoonPage {
    pub chrome: Chrome,
}

/// Top-level error boundary page: shown instead of a blank response
/// whenever a handler fails
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub message: String,
    pub timed_out: bool,
}

// Admin templates

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginPage {
    pub error: String,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardPage {
    pub username: String,
    pub uploaded_url: String,
    pub collections: Vec<CollectionLink>,
}

#[derive(Debug, Clone)]
pub struct CollectionLink {
    pub slug: String,
    pub label: String,
    pub count: usize,
}

#[derive(Template)]
#[template(path = "admin/site.html")]
pub struct AdminSitePage {
    pub site: SiteConfig,
    pub services_json: String,
    pub staff_json: String,
    pub ministries_json: String,
    pub greeting_text: String,
    pub greeting_en_text: String,
    pub saved: bool,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct FieldFormView {
    pub name: String,
    pub label: String,
    pub kind: String,
    pub options: Vec<String>,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub id: String,
    pub values: Vec<String>,
}

#[derive(Template)]
#[template(path = "admin/collection.html")]
pub struct AdminCollectionPage {
    pub slug: String,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<RowView>,
    pub form: Vec<FieldFormView>,
    pub edit_id: String,
    pub saved: bool,
    pub error: String,
}

/// Render a template, mapping failures into the application error
pub fn render<T: Template>(template: T) -> Result<Html<String>, Error> {
    Ok(Html(template.render()?))
}

// The error boundary: any handler error renders as a retry page
// instead of blanking the response
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let timed_out = matches!(self, Error::StoreTimeout(_));
        let status = match &self {
            Error::StoreTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Error::Store(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!("Request failed: {}", self);

        let page = ErrorPage {
            message: self.to_string(),
            timed_out,
        };
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, "Something went wrong").into_response(),
        }
    }
}
