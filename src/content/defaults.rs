//! Compiled-in seed content.
//!
//! Serves two purposes: the admin "reset to defaults" operation, and the
//! fallback shown on public pages when a store read fails.

use super::{Bulletin, Column, Devotional, GalleryItem, Notice, Sermon};
use crate::calendar::{CalendarEvent, EventKind};
use crate::components::store::Collection;
use crate::error::SiteResult;
use serde_json::Value;

pub fn sermons() -> Vec<Sermon> {
    vec![
        Sermon {
            id: "seed-sermon-1".to_string(),
            title: "광야에서 만나는 은혜".to_string(),
            title_en: Some("Grace in the Wilderness".to_string()),
            preacher: "김한빛 담임목사".to_string(),
            scripture: "출애굽기 16:1-12".to_string(),
            date: "2025-01-05".to_string(),
            video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        },
        Sermon {
            id: "seed-sermon-2".to_string(),
            title: "새 힘을 얻으리니".to_string(),
            title_en: Some("They Shall Renew Their Strength".to_string()),
            preacher: "김한빛 담임목사".to_string(),
            scripture: "이사야 40:27-31".to_string(),
            date: "2025-01-12".to_string(),
            video_url: "https://youtu.be/aqz-KE-bpKQ".to_string(),
        },
    ]
}

pub fn bulletins() -> Vec<Bulletin> {
    vec![Bulletin {
        id: "seed-bulletin-1".to_string(),
        title: "2025년 1월 둘째 주 주보".to_string(),
        date: "2025-01-12".to_string(),
        file_url: "/uploads/bulletins/2025-01-12.pdf".to_string(),
    }]
}

pub fn notices() -> Vec<Notice> {
    vec![
        Notice {
            id: "seed-notice-1".to_string(),
            title: "새가족 환영회 안내".to_string(),
            title_en: Some("Newcomers' Welcome".to_string()),
            body: "이번 주일 2부 예배 후 친교실에서 새가족 환영회가 있습니다.".to_string(),
            body_en: Some(
                "A welcome gathering for newcomers follows the second service this Sunday."
                    .to_string(),
            ),
            date: "2025-01-10".to_string(),
            pinned: true,
        },
        Notice {
            id: "seed-notice-2".to_string(),
            title: "겨울 수련회 등록".to_string(),
            title_en: None,
            body: "청년부 겨울 수련회 등록이 시작되었습니다.".to_string(),
            body_en: None,
            date: "2025-01-08".to_string(),
            pinned: false,
        },
    ]
}

pub fn gallery() -> Vec<GalleryItem> {
    vec![GalleryItem {
        id: "seed-gallery-1".to_string(),
        title: "성탄 전야 예배".to_string(),
        date: "2024-12-24".to_string(),
        media_url: "/assets/img/gallery-christmas.jpg".to_string(),
    }]
}

pub fn calendar_events() -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            id: "seed-event-1".to_string(),
            title: "신년 새벽기도회".to_string(),
            title_en: Some("New Year Dawn Prayer".to_string()),
            start_date: "2025-01-01".to_string(),
            end_date: Some("2025-01-07".to_string()),
            note: Some("매일 새벽 5시 30분, 본당".to_string()),
            note_en: Some("Daily at 5:30am in the main sanctuary".to_string()),
            kind: EventKind::Special,
        },
        CalendarEvent {
            id: "seed-event-2".to_string(),
            title: "제직회".to_string(),
            title_en: Some("Officers' Meeting".to_string()),
            start_date: "2025-01-19".to_string(),
            end_date: None,
            note: None,
            note_en: None,
            kind: EventKind::Default,
        },
    ]
}

pub fn columns() -> Vec<Column> {
    vec![Column {
        id: "seed-column-1".to_string(),
        title: "한 해를 시작하며".to_string(),
        author: "김한빛 담임목사".to_string(),
        body: "새해에도 변함없이 말씀 위에 서는 한 해가 되기를 소망합니다.".to_string(),
        date: "2025-01-01".to_string(),
    }]
}

pub fn devotionals() -> Vec<Devotional> {
    vec![Devotional {
        id: "seed-devotional-1".to_string(),
        date: "2025-01-12".to_string(),
        scripture: "시편 23:1".to_string(),
        body: "여호와는 나의 목자시니 내게 부족함이 없으리로다.".to_string(),
        author: "김한빛 담임목사".to_string(),
    }]
}

/// Seed items for a collection as raw store documents
pub fn for_collection(collection: Collection) -> SiteResult<Vec<Value>> {
    let values = match collection {
        Collection::Sermons => to_values(&sermons())?,
        Collection::Bulletins => to_values(&bulletins())?,
        Collection::Notices => to_values(&notices())?,
        Collection::Gallery => to_values(&gallery())?,
        Collection::CalendarEvents => to_values(&calendar_events())?,
        Collection::Columns => to_values(&columns())?,
        Collection::Devotionals => to_values(&devotionals())?,
    };
    Ok(values)
}

fn to_values<T: serde::Serialize>(items: &[T]) -> SiteResult<Vec<Value>> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(crate::error::Error::from))
        .collect()
}
