/// Pseudo-code meaning "infer the source language"
pub const AUTO: &str = "auto";

pub const DEFAULT_SOURCE: &str = AUTO;
pub const DEFAULT_TARGET: &str = "es";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub display_name: &'static str,
}

const fn lang(code: &'static str, display_name: &'static str) -> LanguageOption {
    LanguageOption { code, display_name }
}

/// Every selectable language, in display order
pub static LANGUAGES: [LanguageOption; 30] = [
    lang(AUTO, "Auto Detect"),
    lang("en", "English"),
    lang("es", "Spanish"),
    lang("fr", "French"),
    lang("de", "German"),
    lang("it", "Italian"),
    lang("pt", "Portuguese"),
    lang("ru", "Russian"),
    lang("ja", "Japanese"),
    lang("ko", "Korean"),
    lang("zh", "Chinese"),
    lang("ar", "Arabic"),
    lang("hi", "Hindi"),
    lang("nl", "Dutch"),
    lang("sv", "Swedish"),
    lang("da", "Danish"),
    lang("no", "Norwegian"),
    lang("fi", "Finnish"),
    lang("pl", "Polish"),
    lang("tr", "Turkish"),
    lang("cs", "Czech"),
    lang("hu", "Hungarian"),
    lang("ro", "Romanian"),
    lang("bg", "Bulgarian"),
    lang("hr", "Croatian"),
    lang("sk", "Slovak"),
    lang("sl", "Slovenian"),
    lang("et", "Estonian"),
    lang("lv", "Latvian"),
    lang("lt", "Lithuanian"),
];

pub fn is_auto(code: &str) -> bool {
    code == AUTO
}

pub fn find(code: &str) -> Option<&'static LanguageOption> {
    LANGUAGES.iter().find(|l| l.code == code)
}

/// Source selector entries, auto-detect included
pub fn source_languages() -> impl Iterator<Item = &'static LanguageOption> {
    LANGUAGES.iter()
}

/// Target selector entries; auto-detect is never a valid target
pub fn target_languages() -> impl Iterator<Item = &'static LanguageOption> {
    LANGUAGES.iter().filter(|l| !is_auto(l.code))
}

pub fn is_valid_source(code: &str) -> bool {
    find(code).is_some()
}

pub fn is_valid_target(code: &str) -> bool {
    !is_auto(code) && find(code).is_some()
}

pub fn display_name(code: &str) -> &str {
    find(code).map(|l| l.display_name).unwrap_or(code)
}
