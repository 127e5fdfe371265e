use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Datelike;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use crate::calendar::{
    build_month_grid, selected_day_events, today_in_timezone, CalendarEvent, EventKind,
};
use crate::components::store::{Collection, StoreHandle};
use crate::content::{self, defaults};
use crate::error::SiteResult;
use crate::utils::i18n::Lang;
use crate::utils::media;
use crate::web::pages::{self, Chrome};
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub lang: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Resolve the request language from the query or the lang cookie,
/// persisting an explicit choice back into the cookie
async fn page_lang(state: &AppState, jar: CookieJar, query_lang: Option<&str>) -> (Lang, CookieJar) {
    if let Some(chosen) = query_lang {
        let lang = Lang::new(chosen);
        let jar = jar.add(Cookie::new("lang", lang.0.clone()));
        return (lang, jar);
    }

    if let Some(cookie) = jar.get("lang") {
        return (Lang::new(cookie.value()), jar);
    }

    let default_locale = {
        let config = state.config.read().await;
        config.site_locale.clone()
    };
    (Lang::new(&default_locale), jar)
}

/// Read a collection, falling back to the compiled-in seed content when
/// the store is unavailable
async fn load_or_default<T: DeserializeOwned>(
    store: &StoreHandle,
    collection: Collection,
    fallback: fn() -> Vec<T>,
) -> Vec<T> {
    match store.list(collection).await {
        Ok(items) => items,
        Err(e) => {
            warn!("Falling back to default {}: {}", collection.slug(), e);
            fallback()
        }
    }
}

fn sermon_view(sermon: &content::Sermon, lang: &Lang) -> pages::SermonView {
    pages::SermonView {
        title: lang
            .pick(&sermon.title, sermon.title_en.as_deref().unwrap_or(""))
            .to_string(),
        preacher: sermon.preacher.clone(),
        scripture: sermon.scripture.clone(),
        date: sermon.date.clone(),
        embed_url: media::normalize_media_url(&sermon.video_url),
    }
}

fn notice_view(notice: &content::Notice, lang: &Lang) -> pages::NoticeView {
    pages::NoticeView {
        title: lang
            .pick(&notice.title, notice.title_en.as_deref().unwrap_or(""))
            .to_string(),
        body: lang
            .pick(&notice.body, notice.body_en.as_deref().unwrap_or(""))
            .to_string(),
        date: notice.date.clone(),
        pinned: notice.pinned,
    }
}

/// Handler for the home page
pub async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let mut notices =
        load_or_default(&state.store, Collection::Notices, defaults::notices).await;
    notices.sort_by(|a, b| (b.pinned, &b.date).cmp(&(a.pinned, &a.date)));
    notices.truncate(3);

    let mut sermons =
        load_or_default(&state.store, Collection::Sermons, defaults::sermons).await;
    sermons.sort_by(|a, b| b.date.cmp(&a.date));
    sermons.truncate(2);

    let page = pages::IndexPage {
        chrome: Chrome::build(lang.clone(), &site, "", lang.t("nav.home")),
        hero: pages::HeroView {
            title: lang.pick(&site.hero.title, &site.hero.title_en).to_string(),
            subtitle: lang
                .pick(&site.hero.subtitle, &site.hero.subtitle_en)
                .to_string(),
            banner_url: site.hero.banner_url.clone(),
            dark_overlay: site.hero.dark_overlay,
        },
        services: site
            .services
            .iter()
            .map(|service| pages::ServiceView {
                name: lang.pick(&service.name, &service.name_en).to_string(),
                day: lang.pick(&service.day, &service.day_en).to_string(),
                time: service.time.clone(),
                place: lang.pick(&service.place, &service.place_en).to_string(),
            })
            .collect(),
        notices: notices.iter().map(|n| notice_view(n, &lang)).collect(),
        sermons: sermons.iter().map(|s| sermon_view(s, &lang)).collect(),
    };

    Ok((jar, pages::render(page)?))
}

/// Handler for the about page
pub async fn about_handler(
    state: State<AppState>,
    query: Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    render_about(state, jar, query.0.lang, "overview".to_string()).await
}

/// Handler for about sub-pages (greeting, staff, directions)
pub async fn about_section_handler(
    state: State<AppState>,
    Path(section): Path<String>,
    query: Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    render_about(state, jar, query.0.lang, section).await
}

async fn render_about(
    State(state): State<AppState>,
    jar: CookieJar,
    query_lang: Option<String>,
    section: String,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query_lang.as_deref()).await;
    let site = state.site.current();

    let greeting = if lang.is_korean() || site.pastor.greeting_en.is_empty() {
        site.pastor.greeting.clone()
    } else {
        site.pastor.greeting_en.clone()
    };

    let page = pages::AboutPage {
        chrome: Chrome::build(lang.clone(), &site, "about", lang.t("nav.about")),
        section,
        pastor: pages::PastorView {
            name: lang.pick(&site.pastor.name, &site.pastor.name_en).to_string(),
            photo_url: site.pastor.photo_url.clone(),
            paragraphs: greeting,
        },
        staff: site
            .staff
            .iter()
            .map(|member| pages::StaffView {
                name: lang.pick(&member.name, &member.name_en).to_string(),
                role: lang.pick(&member.role, &member.role_en).to_string(),
                photo_url: member.photo_url.clone(),
            })
            .collect(),
        location: pages::LocationView {
            address: lang
                .pick(&site.location.address, &site.location.address_en)
                .to_string(),
            phone: site.location.phone.clone(),
            email: site.location.email.clone(),
            map_embed_url: site.location.map_embed_url.clone(),
        },
    };

    Ok((jar, pages::render(page)?))
}

fn ministry_view(ministry: &crate::components::site_config::Ministry, lang: &Lang) -> pages::MinistryView {
    pages::MinistryView {
        slug: ministry.slug.clone(),
        name: lang.pick(&ministry.name, &ministry.name_en).to_string(),
        description: lang
            .pick(&ministry.description, &ministry.description_en)
            .to_string(),
        photo_url: ministry.photo_url.clone(),
    }
}

/// Handler for the ministries overview page
pub async fn ministry_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let page = pages::MinistryPage {
        chrome: Chrome::build(lang.clone(), &site, "ministry", lang.t("nav.ministry")),
        ministries: site
            .ministries
            .iter()
            .map(|m| ministry_view(m, &lang))
            .collect(),
    };

    Ok((jar, pages::render(page)?))
}

/// Handler for a single ministry page
pub async fn ministry_detail_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<axum::response::Response> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let Some(ministry) = site.ministries.iter().find(|m| m.slug == slug) else {
        return Ok(Redirect::to("/ministry").into_response());
    };

    let page = pages::MinistryDetailPage {
        chrome: Chrome::build(lang.clone(), &site, "ministry", lang.t("nav.ministry")),
        ministry: ministry_view(ministry, &lang),
    };

    Ok((jar, pages::render(page)?).into_response())
}

/// Handler for the notices page
pub async fn notices_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let mut notices =
        load_or_default(&state.store, Collection::Notices, defaults::notices).await;
    notices.sort_by(|a, b| (b.pinned, &b.date).cmp(&(a.pinned, &a.date)));

    let page = pages::NoticesPage {
        chrome: Chrome::build(lang.clone(), &site, "news", lang.t("nav.notices")),
        notices: notices.iter().map(|n| notice_view(n, &lang)).collect(),
    };

    Ok((jar, pages::render(page)?))
}

/// Handler for the bulletins page
pub async fn bulletins_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let mut bulletins =
        load_or_default(&state.store, Collection::Bulletins, defaults::bulletins).await;
    bulletins.sort_by(|a, b| b.date.cmp(&a.date));

    let page = pages::BulletinsPage {
        chrome: Chrome::build(lang.clone(), &site, "news", lang.t("nav.bulletins")),
        bulletins: bulletins
            .iter()
            .map(|bulletin| pages::BulletinView {
                title: bulletin.title.clone(),
                date: bulletin.date.clone(),
                file_url: bulletin.file_url.clone(),
            })
            .collect(),
    };

    Ok((jar, pages::render(page)?))
}

/// Handler for the gallery page
pub async fn gallery_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let mut items = load_or_default(&state.store, Collection::Gallery, defaults::gallery).await;
    items.sort_by(|a, b| b.date.cmp(&a.date));

    let page = pages::GalleryPage {
        chrome: Chrome::build(lang.clone(), &site, "news", lang.t("nav.gallery")),
        items: items
            .iter()
            .map(|item| pages::GalleryView {
                title: item.title.clone(),
                date: item.date.clone(),
                media_url: media::normalize_media_url(&item.media_url),
                is_video: media::is_video_url(&item.media_url),
            })
            .collect(),
    };

    Ok((jar, pages::render(page)?))
}

/// Handler for the columns page
pub async fn columns_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let mut columns = load_or_default(&state.store, Collection::Columns, defaults::columns).await;
    columns.sort_by(|a, b| b.date.cmp(&a.date));

    let page = pages::ColumnsPage {
        chrome: Chrome::build(lang.clone(), &site, "news", lang.t("nav.columns")),
        columns: columns
            .iter()
            .map(|column| pages::ColumnView {
                title: column.title.clone(),
                author: column.author.clone(),
                body: column.body.clone(),
                date: column.date.clone(),
            })
            .collect(),
    };

    Ok((jar, pages::render(page)?))
}

/// Handler for the sermons page
pub async fn sermons_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let mut sermons = load_or_default(&state.store, Collection::Sermons, defaults::sermons).await;
    sermons.sort_by(|a, b| b.date.cmp(&a.date));

    let page = pages::SermonsPage {
        chrome: Chrome::build(lang.clone(), &site, "sermons", lang.t("nav.sermons")),
        sermons: sermons.iter().map(|s| sermon_view(s, &lang)).collect(),
    };

    Ok((jar, pages::render(page)?))
}

/// Handler for the daily devotional page
pub async fn devotionals_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let mut devotionals =
        load_or_default(&state.store, Collection::Devotionals, defaults::devotionals).await;
    devotionals.sort_by(|a, b| b.date.cmp(&a.date));

    let page = pages::DevotionalsPage {
        chrome: Chrome::build(lang.clone(), &site, "sermons", lang.t("nav.devotionals")),
        devotionals: devotionals
            .iter()
            .map(|devotional| pages::DevotionalView {
                date: devotional.date.clone(),
                scripture: devotional.scripture.clone(),
                body: devotional.body.clone(),
                author: devotional.author.clone(),
            })
            .collect(),
    };

    Ok((jar, pages::render(page)?))
}

/// Handler for the church calendar page
pub async fn calendar_handler(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let timezone = {
        let config = state.config.read().await;
        config.timezone.clone()
    };
    let today = today_in_timezone(&timezone);

    let grid = build_month_grid(
        query.year.unwrap_or_else(|| today.year()),
        query.month.unwrap_or_else(|| today.month()),
    );

    // The grid may have fallen back to the current month on bad input;
    // read the displayed month back off the cells
    let (year, month) = grid
        .iter()
        .flatten()
        .find(|cell| cell.in_current_month)
        .map(|cell| (cell.date.year(), cell.date.month()))
        .unwrap_or((today.year(), today.month()));

    // A failed fetch renders the grid with zero events; navigation keeps
    // working either way
    let events: Vec<CalendarEvent> = match state.store.list(Collection::CalendarEvents).await {
        Ok(events) => events,
        Err(e) => {
            warn!("Calendar events unavailable: {}", e);
            Vec::new()
        }
    };

    let selected_date = query
        .day
        .and_then(|day| chrono::NaiveDate::from_ymd_opt(year, month, day));

    let weeks: Vec<Vec<pages::CellView>> = grid
        .iter()
        .map(|week| {
            week.iter()
                .map(|cell| pages::CellView {
                    day: cell.date.day(),
                    in_current_month: cell.in_current_month,
                    is_today: cell.date == today,
                    is_selected: selected_date == Some(cell.date),
                    link: format!(
                        "/news/calendar?year={}&month={}&day={}",
                        cell.date.year(),
                        cell.date.month(),
                        cell.date.day()
                    ),
                    events: selected_day_events(&events, cell.date)
                        .into_iter()
                        .map(|event| pages::CellEventView {
                            title: event.display_title(&lang.0).to_string(),
                            special: event.kind == EventKind::Special,
                        })
                        .collect(),
                })
                .collect()
        })
        .collect();

    let selected_events: Vec<pages::EventDetailView> = selected_date
        .map(|day| {
            selected_day_events(&events, day)
                .into_iter()
                .map(|event| pages::EventDetailView {
                    title: event.display_title(&lang.0).to_string(),
                    note: event.display_note(&lang.0).to_string(),
                    range: match &event.end_date {
                        Some(end) if *end != event.start_date => {
                            format!("{} ~ {}", event.start_date, end)
                        }
                        _ => event.start_date.clone(),
                    },
                    special: event.kind == EventKind::Special,
                })
                .collect()
        })
        .unwrap_or_default();

    let (prev_year, prev_month) = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    let month_label = if lang.is_korean() {
        format!("{}년 {}월", year, month)
    } else {
        chrono::NaiveDate::from_ymd_opt(year, month, 1)
            .map(|date| date.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{}", year, month))
    };

    let page = pages::CalendarPage {
        chrome: Chrome::build(lang.clone(), &site, "news", lang.t("nav.calendar")),
        month_label,
        prev_link: format!("/news/calendar?year={}&month={}", prev_year, prev_month),
        next_link: format!("/news/calendar?year={}&month={}", next_year, next_month),
        weeks,
        selected_label: selected_date
            .map(|day| day.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        selected_events,
    };

    Ok((jar, pages::render(page)?))
}

/// Fallback handler for routes that are not built yet
pub async fn coming_soon_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> SiteResult<impl IntoResponse> {
    let (lang, jar) = page_lang(&state, jar, query.lang.as_deref()).await;
    let site = state.site.current();

    let page = pages::ComingSoonPage {
        chrome: Chrome::build(lang.clone(), &site, "", lang.t("coming_soon.title")),
    };

    Ok((jar, pages::render(page)?))
}

/// Handler for health checks
pub async fn health_handler() -> &'static str {
    "OK"
}
