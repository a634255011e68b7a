use super::parse::load_local_file;
use super::parse::load_page;
use super::*;
use ee_core::EyeError;
use ee_core::EyeResult;
use ee_dom::apply_filter;
use ee_dom::build_document;
use ee_i18n::format_message;
use ee_i18n::text;
use tracing::warn;

const MAX_TAB_LABEL_CHARS: usize = 24;

impl PageTab {
    fn install_page(&mut self, page: ParsedPage) {
        self.current_url = Some(page.final_url.clone());
        self.status_line = format!(
            "{} · {} {} · {} bytes",
            page.final_url, page.http_version, page.status, page.body_bytes
        );
        self.label = clamp_label(
            page.title
                .as_deref()
                .filter(|title| !title.is_empty())
                .unwrap_or(&page.final_url),
        );
        self.tree = page.document.as_ref().and_then(build_document);
        if let Some(root) = self.tree.as_mut() {
            apply_filter(root, &self.filter_input);
        }
        self.applied_filter = self.filter_input.clone();
        self.preview_text.clear();
        self.page = Some(page);
        self.last_error = None;
    }
}

impl ElementEyeApp {
    pub(super) fn new() -> Self {
        let settings_store = match SettingsStore::open() {
            Ok(store) => Some(store),
            Err(error) => {
                warn!(%error, "settings unavailable, running with defaults");
                None
            }
        };
        let settings = settings_store
            .as_ref()
            .map(|store| store.settings.clone())
            .unwrap_or_default();
        let history = match HistoryStore::open(settings.max_history) {
            Ok(store) => Some(store),
            Err(error) => {
                warn!(%error, "history unavailable");
                None
            }
        };
        let language = Language::from_tag(&settings.language);

        Self {
            tabs: vec![PageTab::new()],
            active_tab: 0,
            settings_draft: settings.clone(),
            settings_store,
            settings,
            language,
            history,
            show_settings: false,
            show_history: false,
            show_about: false,
            show_open_file: false,
            open_file_input: String::new(),
            show_export: false,
            export_path_input: String::new(),
            feedback: None,
        }
    }

    fn t(&self, key: &'static str) -> &'static str {
        text(self.language, key)
    }

    fn navigate(&mut self, tab_index: usize, raw_input: String) {
        let timeout = Duration::from_secs(self.settings.timeout_secs);
        let parsing_message = self.t("msg_parsing").to_owned();
        let invalid_message = self.t("msg_invalid_url").to_owned();

        let Some(tab) = self.tabs.get_mut(tab_index) else {
            return;
        };

        let trimmed = raw_input.trim().to_owned();
        if trimmed.is_empty() {
            tab.last_error = Some(invalid_message);
            return;
        }

        let url = ee_net::normalize_input_url(&trimmed);
        tab.address_input = url.clone();
        tab.status_line = parsing_message;
        tab.last_error = None;

        let request_id = tab.next_request_id;
        tab.next_request_id = tab.next_request_id.saturating_add(1);
        tab.inflight_request_id = Some(request_id);

        let (tx, rx) = mpsc::channel();
        tab.receiver = Some(rx);

        let job = move || {
            let result = load_page(&url, timeout);
            let _ = tx.send(ParseOutcome {
                request_id,
                url,
                result,
            });
        };

        if thread::Builder::new()
            .name("elementeye-parse".to_owned())
            .stack_size(PARSE_THREAD_STACK_SIZE)
            .spawn(job)
            .is_err()
        {
            tab.inflight_request_id = None;
            tab.receiver = None;
            tab.status_line.clear();
            tab.last_error = Some("failed to spawn parse worker".to_owned());
        }
    }

    fn poll_tabs(&mut self) {
        let error_template = self.t("msg_parse_error");
        let mut visited: Vec<String> = Vec::new();

        for tab in &mut self.tabs {
            loop {
                let message = tab
                    .receiver
                    .as_ref()
                    .and_then(|receiver| receiver.try_recv().ok());

                let Some(message) = message else {
                    break;
                };

                // A stale result from a superseded request is discarded.
                if Some(message.request_id) != tab.inflight_request_id {
                    continue;
                }

                tab.inflight_request_id = None;
                tab.receiver = None;

                match message.result {
                    Ok(page) => {
                        tab.install_page(page);
                        visited.push(message.url);
                    }
                    Err(error) => {
                        tab.status_line.clear();
                        tab.last_error = Some(format_message(error_template, &error));
                    }
                }
            }
        }

        for url in visited {
            self.record_history(&url);
        }
    }

    fn record_history(&mut self, url: &str) {
        if let Some(history) = self.history.as_mut() {
            if let Err(error) = history.record(url) {
                warn!(%error, "failed to persist history");
            }
        }
    }

    fn apply_visuals(&self, ctx: &egui::Context) {
        match self.settings.theme {
            Theme::Light => ctx.set_visuals(egui::Visuals::light()),
            Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
        }
        ctx.set_zoom_factor(self.settings.font_size / BASE_FONT_SIZE);
    }

    fn commit_settings(&mut self) {
        self.settings = self.settings_draft.clone().clamped();
        self.settings_draft = self.settings.clone();
        self.language = Language::from_tag(&self.settings.language);

        if let Some(store) = self.settings_store.as_mut() {
            store.settings = self.settings.clone();
            if let Err(error) = store.save() {
                warn!(%error, "failed to save settings");
            }
        }

        if let Some(history) = self.history.as_mut() {
            if let Err(error) = history.set_max_entries(self.settings.max_history) {
                warn!(%error, "failed to trim history");
            }
        }

        self.show_settings = false;
    }

    /// Markup written by the export window: the selected node's source,
    /// or the whole tree when nothing is selected.
    fn export_content(&self) -> String {
        match self.tabs.get(self.active_tab) {
            Some(tab) if !tab.preview_text.is_empty() => tab.preview_text.clone(),
            Some(tab) => tab
                .tree
                .as_ref()
                .map(|root| root.source_text.clone())
                .unwrap_or_default(),
            None => String::new(),
        }
    }

    fn export_active(&mut self) {
        let empty_message = self.t("msg_no_content");

        if self.export_content().is_empty() {
            self.feedback = Some((FeedbackKind::Error, empty_message.to_owned()));
            return;
        }

        if self.export_path_input.trim().is_empty() {
            self.export_path_input = default_export_path();
        }
        self.show_export = true;
    }

    fn confirm_export(&mut self) {
        let success_message = self.t("msg_save_success");
        let error_template = self.t("msg_save_error");
        let empty_message = self.t("msg_no_content");

        let path = self.export_path_input.trim().to_owned();
        if path.is_empty() {
            return;
        }

        let content = self.export_content();
        if content.is_empty() {
            self.feedback = Some((FeedbackKind::Error, empty_message.to_owned()));
            self.show_export = false;
            return;
        }

        match write_export(std::path::Path::new(&path), &content) {
            Ok(()) => {
                self.feedback = Some((
                    FeedbackKind::Success,
                    format!("{success_message} ({path})"),
                ));
                self.show_export = false;
            }
            Err(error) => {
                self.feedback = Some((
                    FeedbackKind::Error,
                    format_message(error_template, &error.to_string()),
                ));
            }
        }
    }

    fn open_local_file(&mut self) {
        let error_template = self.t("msg_parse_error");
        let path = self.open_file_input.trim().to_owned();
        if path.is_empty() {
            return;
        }

        match load_local_file(&path) {
            Ok(page) => {
                if let Some(tab) = self.tabs.get_mut(self.active_tab) {
                    tab.address_input = path;
                    tab.install_page(page);
                }
                self.show_open_file = false;
            }
            Err(error) => {
                self.feedback = Some((
                    FeedbackKind::Error,
                    format_message(error_template, &error),
                ));
            }
        }
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let mut new_tab = false;
        let mut export = false;

        egui::menu::bar(ui, |ui| {
            ui.menu_button(self.t("menu_file"), |ui| {
                if ui.button(self.t("menu_new_tab")).clicked() {
                    new_tab = true;
                    ui.close_menu();
                }
                if ui.button(self.t("menu_open")).clicked() {
                    self.show_open_file = true;
                    ui.close_menu();
                }
                if ui.button(self.t("export_button")).clicked() {
                    export = true;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button(self.t("menu_exit")).clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button(self.t("menu_edit"), |ui| {
                if ui.button(self.t("menu_settings")).clicked() {
                    self.settings_draft = self.settings.clone();
                    self.show_settings = true;
                    ui.close_menu();
                }
            });

            ui.menu_button(self.t("menu_view"), |ui| {
                if ui.button(self.t("menu_history")).clicked() {
                    self.show_history = true;
                    ui.close_menu();
                }
            });

            ui.menu_button(self.t("menu_help"), |ui| {
                if ui.button(self.t("menu_about")).clicked() {
                    self.show_about = true;
                    ui.close_menu();
                }
            });
        });

        if new_tab {
            self.tabs.push(PageTab::new());
            self.active_tab = self.tabs.len() - 1;
        }
        if export {
            self.export_active();
        }
    }

    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        let fallback_label = self.t("menu_new_tab");
        let mut select: Option<usize> = None;
        let mut close: Option<usize> = None;

        ui.horizontal(|ui| {
            for (index, tab) in self.tabs.iter().enumerate() {
                let label = if tab.label.is_empty() {
                    fallback_label
                } else {
                    tab.label.as_str()
                };
                if ui
                    .selectable_label(index == self.active_tab, label)
                    .clicked()
                {
                    select = Some(index);
                }
                if self.tabs.len() > 1 && ui.small_button("×").clicked() {
                    close = Some(index);
                }
                ui.separator();
            }

            if ui.button("+").clicked() {
                select = Some(self.tabs.len());
            }
        });

        if let Some(index) = select {
            if index == self.tabs.len() {
                self.tabs.push(PageTab::new());
            }
            self.active_tab = index.min(self.tabs.len() - 1);
        }

        if let Some(index) = close {
            if self.tabs.len() > 1 {
                self.tabs.remove(index);
                self.active_tab = active_tab_after_close(self.active_tab, index, self.tabs.len());
            }
        }
    }

    fn render_address_row(&mut self, ui: &mut egui::Ui) {
        let url_label = self.t("url_label");
        let url_placeholder = self.t("url_placeholder");
        let parse_label = self.t("parse_button");
        let active = self.active_tab;

        let mut go: Option<String> = None;
        if let Some(tab) = self.tabs.get_mut(active) {
            ui.horizontal(|ui| {
                ui.label(url_label);

                let width = (ui.available_width() - 120.0).max(200.0);
                let response = ui.add_sized(
                    [width, 24.0],
                    egui::TextEdit::singleline(&mut tab.address_input).hint_text(url_placeholder),
                );

                let pressed_enter = response.lost_focus()
                    && ui.input(|input| input.key_pressed(egui::Key::Enter));
                let clicked = ui
                    .add_enabled(!tab.is_loading(), egui::Button::new(parse_label))
                    .clicked();

                if pressed_enter || clicked {
                    go = Some(tab.address_input.clone());
                }

                if tab.is_loading() {
                    ui.spinner();
                }
            });
        }

        if let Some(raw) = go {
            self.navigate(active, raw);
        }
    }

    fn render_filter_row(&mut self, ui: &mut egui::Ui) {
        let filter_label = self.t("filter_label");
        let filter_placeholder = self.t("filter_placeholder");

        let Some(tab) = self.tabs.get_mut(self.active_tab) else {
            return;
        };

        ui.horizontal(|ui| {
            ui.label(filter_label);
            let width = (ui.available_width() - 120.0).max(200.0);
            ui.add_sized(
                [width, 24.0],
                egui::TextEdit::singleline(&mut tab.filter_input).hint_text(filter_placeholder),
            );

            if let Some(root) = &tab.tree {
                ui.label(format!("{}", root.descendant_count() + 1));
            }
        });

        // Filtering is incremental: every edit recomputes visibility.
        if tab.filter_input != tab.applied_filter {
            if let Some(root) = tab.tree.as_mut() {
                apply_filter(root, &tab.filter_input);
            }
            tab.applied_filter = tab.filter_input.clone();
        }
    }

    fn render_tree_panel(&mut self, ui: &mut egui::Ui) {
        let Some(tab) = self.tabs.get_mut(self.active_tab) else {
            return;
        };

        let mut selected: Option<String> = None;
        egui::ScrollArea::both()
            .id_salt("element_tree_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| match &tab.tree {
                Some(root) => {
                    let mut path = Vec::new();
                    render_tree_node(ui, root, &mut path, &mut selected);
                }
                None => {
                    if let Some(page) = &tab.page {
                        ui.label(format!("{} · {}", page.content_type, page.final_url));
                        for (name, value) in &page.headers {
                            ui.label(
                                egui::RichText::new(format!("{name}: {value}"))
                                    .monospace()
                                    .size(12.0)
                                    .weak(),
                            );
                        }
                        ui.separator();
                        ui.label(
                            egui::RichText::new(page.text_preview.as_str())
                                .monospace()
                                .size(12.0),
                        );
                    }
                }
            });

        if let Some(source) = selected {
            tab.preview_text = source;
        }
    }

    fn render_preview_panel(&mut self, ui: &mut egui::Ui) {
        let preview_label = self.t("preview_label");
        let copy_label = self.t("copy_button");
        let export_label = self.t("export_button");
        let success_message = self.t("msg_success");

        let mut copy: Option<String> = None;
        let mut export = false;

        if let Some(tab) = self.tabs.get(self.active_tab) {
            ui.horizontal(|ui| {
                ui.label(preview_label);
                if ui
                    .add_enabled(!tab.preview_text.is_empty(), egui::Button::new(copy_label))
                    .clicked()
                {
                    copy = Some(tab.preview_text.clone());
                }
                if ui.button(export_label).clicked() {
                    export = true;
                }
            });
            ui.separator();
            egui::ScrollArea::both()
                .id_salt("tag_preview_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(tab.preview_text.as_str())
                            .monospace()
                            .size(12.0),
                    );
                });
        }

        if let Some(content) = copy {
            ui.ctx().copy_text(content);
            self.feedback = Some((FeedbackKind::Success, success_message.to_owned()));
        }
        if export {
            self.export_active();
        }
    }

    fn render_settings_window(&mut self, ctx: &egui::Context) {
        let title = self.t("settings_title");
        let theme_label = self.t("settings_theme");
        let theme_light = self.t("settings_theme_light");
        let theme_dark = self.t("settings_theme_dark");
        let language_label = self.t("settings_language");
        let timeout_label = self.t("settings_timeout");
        let history_label = self.t("settings_history");
        let font_label = self.t("settings_font_size");
        let font_preview_label = self.t("settings_font_preview");
        let ok_label = self.t("settings_ok");
        let cancel_label = self.t("settings_cancel");

        let mut open = self.show_settings;
        let mut commit = false;
        let mut cancel = false;

        egui::Window::new(title)
            .id(egui::Id::new("settings_window"))
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                let draft = &mut self.settings_draft;

                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([16.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(theme_label);
                        egui::ComboBox::from_id_salt("settings_theme_combo")
                            .selected_text(match draft.theme {
                                Theme::Light => theme_light,
                                Theme::Dark => theme_dark,
                            })
                            .show_ui(ui, |ui| {
                                ui.selectable_value(&mut draft.theme, Theme::Light, theme_light);
                                ui.selectable_value(&mut draft.theme, Theme::Dark, theme_dark);
                            });
                        ui.end_row();

                        ui.label(language_label);
                        let mut draft_language = Language::from_tag(&draft.language);
                        egui::ComboBox::from_id_salt("settings_language_combo")
                            .selected_text(draft_language.native_name())
                            .show_ui(ui, |ui| {
                                for language in Language::ALL {
                                    ui.selectable_value(
                                        &mut draft_language,
                                        language,
                                        language.native_name(),
                                    );
                                }
                            });
                        draft.language = draft_language.tag().to_owned();
                        ui.end_row();

                        ui.label(timeout_label);
                        ui.add(egui::Slider::new(
                            &mut draft.timeout_secs,
                            Settings::TIMEOUT_RANGE.0..=Settings::TIMEOUT_RANGE.1,
                        ));
                        ui.end_row();

                        ui.label(history_label);
                        ui.add(egui::Slider::new(
                            &mut draft.max_history,
                            Settings::HISTORY_RANGE.0..=Settings::HISTORY_RANGE.1,
                        ));
                        ui.end_row();

                        ui.label(font_label);
                        ui.add(egui::Slider::new(
                            &mut draft.font_size,
                            Settings::FONT_RANGE.0..=Settings::FONT_RANGE.1,
                        ));
                        ui.end_row();

                        ui.label(font_preview_label);
                        ui.label(
                            egui::RichText::new("ElementEye 示例 Abc 123").size(draft.font_size),
                        );
                        ui.end_row();
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button(ok_label).clicked() {
                        commit = true;
                    }
                    if ui.button(cancel_label).clicked() {
                        cancel = true;
                    }
                });
            });

        self.show_settings = open;
        if commit {
            self.commit_settings();
        } else if cancel {
            self.show_settings = false;
        }
    }

    fn render_history_window(&mut self, ctx: &egui::Context) {
        let title = self.t("menu_history");
        let mut open = self.show_history;
        let mut navigate_to: Option<String> = None;
        let mut clear = false;

        let entries: Vec<(String, String)> = self
            .history
            .as_ref()
            .map(|history| {
                history
                    .entries()
                    .iter()
                    .map(|entry| {
                        (
                            entry.url.clone(),
                            entry
                                .timestamp
                                .with_timezone(&chrono::Local)
                                .format("%Y-%m-%d %H:%M:%S")
                                .to_string(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        egui::Window::new(title)
            .id(egui::Id::new("history_window"))
            .open(&mut open)
            .default_size([520.0, 400.0])
            .show(ctx, |ui| {
                if ui.button("🗑").clicked() {
                    clear = true;
                }
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("history_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for (url, timestamp) in &entries {
                            ui.horizontal(|ui| {
                                ui.label(timestamp);
                                if ui.link(url).clicked() {
                                    navigate_to = Some(url.clone());
                                }
                            });
                        }
                    });
            });

        self.show_history = open;

        if clear {
            if let Some(history) = self.history.as_mut() {
                if let Err(error) = history.clear() {
                    warn!(%error, "failed to clear history");
                }
            }
        }

        if let Some(url) = navigate_to {
            self.show_history = false;
            self.navigate(self.active_tab, url);
        }
    }

    fn render_about_window(&mut self, ctx: &egui::Context) {
        let title = self.t("about_title");
        let content = self.t("about_content");
        let mut open = self.show_about;

        egui::Window::new(title)
            .id(egui::Id::new("about_window"))
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(content);
            });

        self.show_about = open;
    }

    fn render_export_window(&mut self, ctx: &egui::Context) {
        let title = self.t("export_button");
        let ok_label = self.t("settings_ok");
        let cancel_label = self.t("settings_cancel");
        let mut open = self.show_export;
        let mut confirm = false;
        let mut cancel = false;

        egui::Window::new(title)
            .id(egui::Id::new("export_window"))
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                let response = ui.add_sized(
                    [420.0, 24.0],
                    egui::TextEdit::singleline(&mut self.export_path_input)
                        .hint_text("/path/to/export.html"),
                );
                let pressed_enter = response.lost_focus()
                    && ui.input(|input| input.key_pressed(egui::Key::Enter));

                ui.horizontal(|ui| {
                    if ui.button(ok_label).clicked() || pressed_enter {
                        confirm = true;
                    }
                    if ui.button(cancel_label).clicked() {
                        cancel = true;
                    }
                });
            });

        self.show_export = open;
        if confirm {
            self.confirm_export();
        } else if cancel {
            self.show_export = false;
        }
    }

    fn render_open_file_window(&mut self, ctx: &egui::Context) {
        let title = self.t("menu_open");
        let ok_label = self.t("settings_ok");
        let cancel_label = self.t("settings_cancel");
        let mut open = self.show_open_file;
        let mut confirm = false;
        let mut cancel = false;

        egui::Window::new(title)
            .id(egui::Id::new("open_file_window"))
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                let response = ui.add_sized(
                    [420.0, 24.0],
                    egui::TextEdit::singleline(&mut self.open_file_input)
                        .hint_text("/path/to/page.html"),
                );
                let pressed_enter = response.lost_focus()
                    && ui.input(|input| input.key_pressed(egui::Key::Enter));

                ui.horizontal(|ui| {
                    if ui.button(ok_label).clicked() || pressed_enter {
                        confirm = true;
                    }
                    if ui.button(cancel_label).clicked() {
                        cancel = true;
                    }
                });
            });

        self.show_open_file = open;
        if confirm {
            self.open_local_file();
        } else if cancel {
            self.show_open_file = false;
        }
    }
}

fn render_tree_node(
    ui: &mut egui::Ui,
    node: &ElementNode,
    path: &mut Vec<usize>,
    selected: &mut Option<String>,
) {
    if !node.visible {
        return;
    }

    let summary = node.attribute_summary();
    let label = if summary.is_empty() {
        node.display_label()
    } else {
        format!("{}  [{summary}]", node.display_label())
    };
    let has_visible_children = node.children.iter().any(|child| child.visible);

    if has_visible_children {
        let response = egui::CollapsingHeader::new(label)
            .id_salt(("element_tree", path.clone()))
            .default_open(path.len() < 2)
            .show(ui, |ui| {
                for (index, child) in node.children.iter().enumerate() {
                    path.push(index);
                    render_tree_node(ui, child, path, selected);
                    path.pop();
                }
            });
        if response.header_response.clicked() {
            *selected = Some(node.source_text.clone());
        }
    } else if ui.selectable_label(false, label).clicked() {
        *selected = Some(node.source_text.clone());
    }
}

/// Active-tab index after removing the tab at `closed`. Tabs at or below
/// the active one shift it down by one so the same tab stays selected.
pub(super) fn active_tab_after_close(active: usize, closed: usize, remaining: usize) -> usize {
    let shifted = if closed <= active && active > 0 {
        active - 1
    } else {
        active
    };
    shifted.min(remaining.saturating_sub(1))
}

fn clamp_label(input: &str) -> String {
    if input.chars().count() <= MAX_TAB_LABEL_CHARS {
        return input.to_owned();
    }

    let mut clipped: String = input.chars().take(MAX_TAB_LABEL_CHARS).collect();
    clipped.push('…');
    clipped
}

/// Suggested destination offered when the export window opens.
fn default_export_path() -> String {
    let name = format!(
        "elementeye-{}.html",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    );
    match ee_storage::config_dir() {
        Ok(dir) => dir.join("exports").join(name).display().to_string(),
        Err(_) => name,
    }
}

/// Writes export content to a caller-chosen path, creating parent
/// directories as needed.
pub(super) fn write_export(path: &std::path::Path, content: &str) -> EyeResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|error| {
                EyeError::new(
                    "export.create_dir",
                    format!("cannot create {}: {error}", parent.display()),
                )
            })?;
        }
    }

    std::fs::write(path, content).map_err(|error| {
        EyeError::new(
            "export.write",
            format!("cannot write {}: {error}", path.display()),
        )
    })
}

impl eframe::App for ElementEyeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_tabs();
        self.apply_visuals(ctx);

        if self.tabs.iter().any(PageTab::is_loading) {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
            self.render_menu_bar(ctx, ui);
        });

        egui::TopBottomPanel::top("toolbar_panel").show(ctx, |ui| {
            self.render_tab_bar(ui);
            self.render_address_row(ui);
            self.render_filter_row(ui);
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                if let Some(tab) = self.tabs.get(self.active_tab) {
                    if let Some(error) = &tab.last_error {
                        ui.colored_label(egui::Color32::from_rgb(200, 65, 65), error);
                    } else {
                        ui.label(&tab.status_line);
                    }
                }

                if let Some((kind, message)) = &self.feedback {
                    ui.separator();
                    match kind {
                        FeedbackKind::Success => {
                            ui.colored_label(egui::Color32::from_rgb(70, 160, 70), message);
                        }
                        FeedbackKind::Error => {
                            ui.colored_label(egui::Color32::from_rgb(200, 65, 65), message);
                        }
                    }
                }
            });
        });

        egui::SidePanel::right("preview_panel")
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                self.render_preview_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_tree_panel(ui);
        });

        if self.show_settings {
            self.render_settings_window(ctx);
        }
        if self.show_history {
            self.render_history_window(ctx);
        }
        if self.show_about {
            self.render_about_window(ctx);
        }
        if self.show_open_file {
            self.render_open_file_window(ctx);
        }
        if self.show_export {
            self.render_export_window(ctx);
        }
    }
}
