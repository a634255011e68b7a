//! Interface text in the supported languages.
//!
//! Lookup is a pure function over a static catalog. Missing keys fall back
//! to English, then to the key itself, so a typo degrades to visible text
//! instead of a blank label.

/// A supported interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    ZhCn,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::ZhCn, Language::En];

    /// BCP 47 style tag used in the settings file.
    pub fn tag(self) -> &'static str {
        match self {
            Language::ZhCn => "zh-CN",
            Language::En => "en",
        }
    }

    /// Parses a stored tag, tolerating the underscore form. Unknown tags
    /// map to the default language.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "en" | "en-US" | "en_US" => Language::En,
            _ => Language::ZhCn,
        }
    }

    /// Name shown in the language selector, in the language itself.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::ZhCn => "中文",
            Language::En => "English",
        }
    }
}

/// Returns the text for `key` in `language`.
pub fn text(language: Language, key: &'static str) -> &'static str {
    lookup(language, key)
        .or_else(|| lookup(Language::En, key))
        .unwrap_or(key)
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(catalog_key, _, _)| *catalog_key == key)
        .map(|(_, zh, en)| match language {
            Language::ZhCn => *zh,
            Language::En => *en,
        })
}

/// (key, zh-CN, en) triples.
static CATALOG: &[(&str, &str, &str)] = &[
    (
        "window_title",
        "ElementEye - HTML元素分析器",
        "ElementEye - HTML Element Analyzer",
    ),
    ("url_label", "URL:", "URL:"),
    ("url_placeholder", "输入网页地址...", "Enter webpage URL..."),
    ("parse_button", "解析", "Parse"),
    ("filter_label", "过滤:", "Filter:"),
    (
        "filter_placeholder",
        "输入标签名、class、id或属性...",
        "Enter tag name, class, id or attributes...",
    ),
    ("preview_label", "标签预览:", "Tag Preview:"),
    ("export_button", "导出", "Export"),
    ("copy_button", "复制", "Copy"),
    ("menu_file", "文件", "File"),
    ("menu_new_tab", "新建标签页", "New Tab"),
    ("menu_open", "打开", "Open"),
    ("menu_save", "保存", "Save"),
    ("menu_exit", "退出", "Exit"),
    ("menu_edit", "编辑", "Edit"),
    ("menu_settings", "设置", "Settings"),
    ("menu_view", "视图", "View"),
    ("menu_history", "历史记录", "History"),
    ("menu_help", "帮助", "Help"),
    ("menu_about", "关于", "About"),
    ("settings_title", "设置", "Settings"),
    ("settings_theme", "主题:", "Theme:"),
    ("settings_theme_light", "浅色", "Light"),
    ("settings_theme_dark", "深色", "Dark"),
    ("settings_language", "语言:", "Language:"),
    (
        "settings_timeout",
        "请求超时(秒):",
        "Request Timeout (seconds):",
    ),
    ("settings_history", "最大历史记录数:", "Max History Records:"),
    ("settings_font_size", "字体大小:", "Font Size:"),
    ("settings_font_preview", "字体预览:", "Font Preview:"),
    ("settings_ok", "确定", "OK"),
    ("settings_cancel", "取消", "Cancel"),
    ("msg_error", "错误", "Error"),
    ("msg_success", "成功", "Success"),
    ("msg_warning", "警告", "Warning"),
    ("msg_invalid_url", "请输入有效的URL", "Please enter a valid URL"),
    ("msg_parsing", "正在解析...", "Parsing..."),
    ("msg_parse_error", "解析失败: {}", "Parse failed: {}"),
    ("msg_save_success", "文件保存成功", "File saved successfully"),
    ("msg_save_error", "保存失败: {}", "Save failed: {}"),
    ("msg_no_content", "没有可导出的内容", "No content to export"),
    ("about_title", "关于 ElementEye", "About ElementEye"),
    (
        "about_content",
        "ElementEye HTML元素分析器\n版本: 1.0.0\n\n这是一个用于解析和分析HTML元素的专业工具。\n\n功能特点:\n- HTML解析和可视化\n- 标签过滤和搜索\n- 标签属性查看\n- 历史记录管理",
        "ElementEye HTML Element Analyzer\nVersion: 1.0.0\n\nA professional tool for parsing and analyzing HTML elements.\n\nFeatures:\n- HTML parsing and visualization\n- Tag filtering and search\n- Tag attributes viewing\n- History management",
    ),
];

/// Fills the `{}` slot of a message template such as `msg_parse_error`.
pub fn format_message(template: &str, detail: &str) -> String {
    if template.contains("{}") {
        template.replacen("{}", detail, 1)
    } else {
        format!("{template} {detail}")
    }
}

#[cfg(test)]
mod tests {
    use super::Language;
    use super::format_message;
    use super::text;

    #[test]
    fn looks_up_both_languages() {
        assert_eq!(text(Language::En, "parse_button"), "Parse");
        assert_eq!(text(Language::ZhCn, "parse_button"), "解析");
    }

    #[test]
    fn unknown_key_falls_back_to_the_key() {
        assert_eq!(text(Language::En, "no_such_key"), "no_such_key");
    }

    #[test]
    fn parses_stored_tags() {
        assert_eq!(Language::from_tag("zh-CN"), Language::ZhCn);
        assert_eq!(Language::from_tag("zh_CN"), Language::ZhCn);
        assert_eq!(Language::from_tag("en"), Language::En);
        assert_eq!(Language::from_tag("fr"), Language::ZhCn);
    }

    #[test]
    fn tag_round_trips() {
        for language in Language::ALL {
            assert_eq!(Language::from_tag(language.tag()), language);
        }
    }

    #[test]
    fn every_catalog_key_has_text_in_both_languages() {
        for (key, zh, en) in super::CATALOG {
            assert!(!zh.is_empty(), "missing zh text for {key}");
            assert!(!en.is_empty(), "missing en text for {key}");
        }
    }

    #[test]
    fn formats_message_templates() {
        assert_eq!(
            format_message(text(Language::En, "msg_parse_error"), "timed out"),
            "Parse failed: timed out"
        );
    }
}
