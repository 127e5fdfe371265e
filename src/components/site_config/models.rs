use crate::error::{store_error, SiteResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level keys that merge field-wise instead of being replaced wholesale.
/// Everything else, including every list, is replaced by the incoming value.
pub const STRUCTURED_MERGE_KEYS: [&str; 3] = ["pastor", "location", "social"];

/// The whole site configuration document.
///
/// The store owns this document; the in-process cache is a read replica
/// with last-write-wins semantics. Unknown keys from older documents are
/// ignored on read, missing keys fall back to the compiled-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub hero: HeroSection,
    pub banners: BTreeMap<String, PageBanner>,
    pub pastor: PastorInfo,
    pub location: LocationInfo,
    pub social: SocialLinks,
    pub services: Vec<ServiceTime>,
    pub staff: Vec<StaffMember>,
    pub ministries: Vec<Ministry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSection {
    pub title: String,
    pub title_en: String,
    pub subtitle: String,
    pub subtitle_en: String,
    pub banner_url: String,
    pub dark_overlay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PageBanner {
    pub image_url: String,
    pub title: String,
    pub title_en: String,
    pub subtitle: String,
    pub subtitle_en: String,
    pub text_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PastorInfo {
    pub name: String,
    pub name_en: String,
    pub photo_url: String,
    pub greeting: Vec<String>,
    pub greeting_en: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationInfo {
    pub address: String,
    pub address_en: String,
    pub map_embed_url: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SocialLinks {
    pub youtube: String,
    pub instagram: String,
    pub kakao: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceTime {
    pub name: String,
    pub name_en: String,
    pub day: String,
    pub day_en: String,
    pub time: String,
    pub place: String,
    pub place_en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StaffMember {
    pub name: String,
    pub name_en: String,
    pub role: String,
    pub role_en: String,
    pub photo_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Ministry {
    pub slug: String,
    pub name: String,
    pub name_en: String,
    pub description: String,
    pub description_en: String,
    pub photo_url: String,
}

impl Default for HeroSection {
    fn default() -> Self {
        Self {
            title: "한빛교회에 오신 것을 환영합니다".to_string(),
            title_en: "Welcome to Hanbit Church".to_string(),
            subtitle: "말씀과 기도로 세워지는 공동체".to_string(),
            subtitle_en: "A community built on word and prayer".to_string(),
            banner_url: "/assets/img/hero.jpg".to_string(),
            dark_overlay: true,
        }
    }
}

impl Default for PastorInfo {
    fn default() -> Self {
        Self {
            name: "김한빛 담임목사".to_string(),
            name_en: "Rev. Hanbit Kim".to_string(),
            photo_url: "/assets/img/pastor.jpg".to_string(),
            greeting: vec![
                "한빛교회 홈페이지를 찾아주신 여러분을 환영합니다.".to_string(),
                "우리 교회는 말씀 위에 세워진 건강한 신앙 공동체를 꿈꿉니다.".to_string(),
            ],
            greeting_en: vec![
                "Welcome to the Hanbit Church homepage.".to_string(),
                "We dream of a healthy community of faith built on the word.".to_string(),
            ],
        }
    }
}

impl Default for LocationInfo {
    fn default() -> Self {
        Self {
            address: "서울특별시 은평구 한빛로 12".to_string(),
            address_en: "12 Hanbit-ro, Eunpyeong-gu, Seoul".to_string(),
            map_embed_url: String::new(),
            phone: "02-1234-5678".to_string(),
            email: "office@hanbitchurch.org".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut banners = BTreeMap::new();
        banners.insert(
            "about".to_string(),
            PageBanner {
                image_url: "/assets/img/banner-about.jpg".to_string(),
                title: "교회 소개".to_string(),
                title_en: "About Us".to_string(),
                subtitle: "한빛교회를 소개합니다".to_string(),
                subtitle_en: "Get to know Hanbit Church".to_string(),
                text_color: "#ffffff".to_string(),
            },
        );
        banners.insert(
            "ministry".to_string(),
            PageBanner {
                image_url: "/assets/img/banner-ministry.jpg".to_string(),
                title: "사역과 모임".to_string(),
                title_en: "Ministries".to_string(),
                subtitle: "함께 섬기는 공동체".to_string(),
                subtitle_en: "Serving together".to_string(),
                text_color: "#ffffff".to_string(),
            },
        );
        banners.insert(
            "news".to_string(),
            PageBanner {
                image_url: "/assets/img/banner-news.jpg".to_string(),
                title: "교회 소식".to_string(),
                title_en: "News".to_string(),
                subtitle: "교회의 소식을 전합니다".to_string(),
                subtitle_en: "News from our church".to_string(),
                text_color: "#ffffff".to_string(),
            },
        );
        banners.insert(
            "sermons".to_string(),
            PageBanner {
                image_url: "/assets/img/banner-sermons.jpg".to_string(),
                title: "설교 말씀".to_string(),
                title_en: "Sermons".to_string(),
                subtitle: "은혜의 말씀을 나눕니다".to_string(),
                subtitle_en: "Sharing the word of grace".to_string(),
                text_color: "#ffffff".to_string(),
            },
        );

        Self {
            hero: HeroSection::default(),
            banners,
            pastor: PastorInfo::default(),
            location: LocationInfo::default(),
            social: SocialLinks {
                youtube: "https://www.youtube.com/@hanbitchurch".to_string(),
                instagram: String::new(),
                kakao: String::new(),
            },
            services: vec![
                ServiceTime {
                    name: "주일 1부 예배".to_string(),
                    name_en: "Sunday Service I".to_string(),
                    day: "주일".to_string(),
                    day_en: "Sunday".to_string(),
                    time: "09:00".to_string(),
                    place: "본당".to_string(),
                    place_en: "Main Sanctuary".to_string(),
                },
                ServiceTime {
                    name: "주일 2부 예배".to_string(),
                    name_en: "Sunday Service II".to_string(),
                    day: "주일".to_string(),
                    day_en: "Sunday".to_string(),
                    time: "11:00".to_string(),
                    place: "본당".to_string(),
                    place_en: "Main Sanctuary".to_string(),
                },
                ServiceTime {
                    name: "수요 기도회".to_string(),
                    name_en: "Wednesday Prayer".to_string(),
                    day: "수요일".to_string(),
                    day_en: "Wednesday".to_string(),
                    time: "19:30".to_string(),
                    place: "소예배실".to_string(),
                    place_en: "Chapel".to_string(),
                },
            ],
            staff: vec![
                StaffMember {
                    name: "김한빛".to_string(),
                    name_en: "Hanbit Kim".to_string(),
                    role: "담임목사".to_string(),
                    role_en: "Senior Pastor".to_string(),
                    photo_url: "/assets/img/pastor.jpg".to_string(),
                },
                StaffMember {
                    name: "이은혜".to_string(),
                    name_en: "Eunhye Lee".to_string(),
                    role: "교육전도사".to_string(),
                    role_en: "Education Pastor".to_string(),
                    photo_url: String::new(),
                },
            ],
            ministries: vec![
                Ministry {
                    slug: "children".to_string(),
                    name: "유초등부".to_string(),
                    name_en: "Children's Ministry".to_string(),
                    description: "주일 오전 11시, 어린이들이 함께 예배하고 배웁니다.".to_string(),
                    description_en: "Children worship and learn together, Sundays at 11am."
                        .to_string(),
                    photo_url: String::new(),
                },
                Ministry {
                    slug: "youth".to_string(),
                    name: "청소년부".to_string(),
                    name_en: "Youth Ministry".to_string(),
                    description: "중고등학생들의 예배와 모임입니다.".to_string(),
                    description_en: "Worship and fellowship for middle and high schoolers."
                        .to_string(),
                    photo_url: String::new(),
                },
                Ministry {
                    slug: "choir".to_string(),
                    name: "찬양대".to_string(),
                    name_en: "Choir".to_string(),
                    description: "주일 예배를 찬양으로 섬깁니다.".to_string(),
                    description_en: "Serving Sunday worship through praise.".to_string(),
                    photo_url: String::new(),
                },
            ],
        }
    }
}

impl SiteConfig {
    /// Validate a raw store document against the typed schema
    pub fn from_value(document: &Value) -> SiteResult<Self> {
        serde_json::from_value(document.clone())
            .map_err(|e| store_error(&format!("Invalid site config document: {}", e)))
    }
}

/// Shallow-merge an incoming document over the current one.
///
/// Top-level keys are replaced by the incoming value, except the
/// STRUCTURED_MERGE_KEYS sections which merge field-wise. Lists are
/// always replaced wholesale, so a partial update to one list item
/// requires resubmitting the entire list.
pub fn merge_update(current: &mut Value, patch: Value) {
    let Value::Object(patch_map) = patch else {
        // Non-object patches carry nothing to merge
        return;
    };

    let Some(current_map) = current.as_object_mut() else {
        *current = Value::Object(patch_map);
        return;
    };

    for (key, incoming) in patch_map {
        if STRUCTURED_MERGE_KEYS.contains(&key.as_str()) {
            if let Value::Object(fields) = incoming {
                match current_map.get_mut(&key) {
                    Some(Value::Object(existing)) => {
                        for (field, value) in fields {
                            existing.insert(field, value);
                        }
                    }
                    _ => {
                        current_map.insert(key, Value::Object(fields));
                    }
                }
                continue;
            }
            // A non-object value for a structured section still replaces it
            current_map.insert(key, incoming);
        } else {
            current_map.insert(key, incoming);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_document() -> Value {
        serde_json::to_value(SiteConfig::default()).expect("default config serializes")
    }

    #[test]
    fn test_defaults_round_trip() {
        let document = base_document();
        let parsed = SiteConfig::from_value(&document).expect("defaults validate");
        assert_eq!(parsed, SiteConfig::default());
    }

    #[test]
    fn test_top_level_keys_are_replaced() {
        let mut document = base_document();
        merge_update(
            &mut document,
            json!({
                "hero": {
                    "title": "새해 특별 새벽기도회",
                    "subtitle": "함께 기도해요",
                }
            }),
        );
        merge_update(
            &mut document,
            json!({
                "hero": {
                    "title": "봄 부흥회",
                }
            }),
        );

        // "hero" is not a structured section: the second update replaced the
        // whole object, so the earlier subtitle edit did not survive
        let parsed = SiteConfig::from_value(&document).expect("merged document validates");
        assert_eq!(parsed.hero.title, "봄 부흥회");
        assert_eq!(parsed.hero.subtitle, HeroSection::default().subtitle);
    }

    #[test]
    fn test_structured_sections_merge_field_wise() {
        let mut document = base_document();
        merge_update(
            &mut document,
            json!({
                "location": {
                    "phone": "02-9999-0000",
                }
            }),
        );

        let parsed = SiteConfig::from_value(&document).expect("merged document validates");
        assert_eq!(parsed.location.phone, "02-9999-0000");
        // Untouched fields of a structured section survive the update
        assert_eq!(parsed.location.email, "office@hanbitchurch.org");
    }

    #[test]
    fn test_lists_are_replaced_wholesale() {
        let mut document = base_document();
        merge_update(
            &mut document,
            json!({
                "services": [
                    {
                        "name": "주일 연합 예배",
                        "name_en": "Combined Sunday Service",
                        "day": "주일",
                        "day_en": "Sunday",
                        "time": "10:30",
                        "place": "본당",
                        "place_en": "Main Sanctuary",
                    }
                ]
            }),
        );

        let parsed = SiteConfig::from_value(&document).expect("merged document validates");
        assert_eq!(parsed.services.len(), 1);
        assert_eq!(parsed.services[0].time, "10:30");
    }

    #[test]
    fn test_unknown_top_level_keys_are_tolerated() {
        let mut document = base_document();
        merge_update(&mut document, json!({ "legacy_field": 42 }));

        // Validation ignores unknown keys rather than rejecting the document
        assert!(SiteConfig::from_value(&document).is_ok());
    }

    #[test]
    fn test_non_object_patch_is_ignored() {
        let mut document = base_document();
        let before = document.clone();
        merge_update(&mut document, json!("not a document"));
        assert_eq!(document, before);
    }
}
