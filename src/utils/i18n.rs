/// Locales the site ships translations for
pub const SUPPORTED_LOCALES: [&str; 2] = ["ko", "en"];

/// Clamp an arbitrary locale tag to a supported one
pub fn normalize_locale(locale: &str) -> &str {
    let base = locale.split(['-', '_']).next().unwrap_or(locale);
    if SUPPORTED_LOCALES.contains(&base) {
        base
    } else {
        crate::config::DEFAULT_LOCALE
    }
}

/// Set the process-wide fallback locale
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(normalize_locale(locale));
}

/// Per-request language, passed into templates
#[derive(Debug, Clone)]
pub struct Lang(pub String);

impl Lang {
    pub fn new(locale: &str) -> Self {
        Self(normalize_locale(locale).to_string())
    }

    /// The locale code, e.g. for the html lang attribute
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Translate a key in this request's locale
    pub fn t(&self, key: &str) -> String {
        t!(key, locale = &self.0).to_string()
    }

    pub fn is_korean(&self) -> bool {
        self.0 == "ko"
    }

    /// Pick the Korean text or its English counterpart, falling back to
    /// Korean when no translation was entered
    pub fn pick<'a>(&self, korean: &'a str, english: &'a str) -> &'a str {
        if self.is_korean() || english.is_empty() {
            korean
        } else {
            english
        }
    }

    /// The locale the language toggle switches to
    pub fn other(&self) -> &'static str {
        if self.is_korean() {
            "en"
        } else {
            "ko"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("ko"), "ko");
        assert_eq!(normalize_locale("en"), "en");
        assert_eq!(normalize_locale("en-US"), "en");
        assert_eq!(normalize_locale("ko_KR"), "ko");
        assert_eq!(normalize_locale("fr"), "ko");
        assert_eq!(normalize_locale(""), "ko");
    }

    #[test]
    fn test_pick_falls_back_to_korean() {
        let english = Lang::new("en");
        assert_eq!(english.pick("안내", "Notice"), "Notice");
        assert_eq!(english.pick("안내", ""), "안내");

        let korean = Lang::new("ko");
        assert_eq!(korean.pick("안내", "Notice"), "안내");
    }
}
