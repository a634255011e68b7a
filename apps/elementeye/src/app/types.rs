const BASE_FONT_SIZE: f32 = 14.0;
const MAX_PREVIEW_BYTES: usize = 256 * 1024;
const PARSE_THREAD_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Outcome of one fetch-and-parse job, delivered from a worker thread.
#[derive(Debug)]
struct ParseOutcome {
    request_id: u64,
    url: String,
    result: Result<ParsedPage, String>,
}

/// A page after fetching and HTML parsing, before tree building.
#[derive(Debug, Clone)]
struct ParsedPage {
    final_url: String,
    status: u16,
    http_version: String,
    content_type: String,
    headers: Vec<(String, String)>,
    body_bytes: usize,
    title: Option<String>,
    document: Option<ee_html::HtmlDocument>,
    text_preview: String,
}

/// One analyzer tab. Each tab owns its in-flight request bookkeeping so a
/// newer parse supersedes an older one without mixing results.
struct PageTab {
    label: String,
    address_input: String,
    current_url: Option<String>,
    page: Option<ParsedPage>,
    tree: Option<ElementNode>,
    filter_input: String,
    applied_filter: String,
    preview_text: String,
    status_line: String,
    last_error: Option<String>,
    next_request_id: u64,
    inflight_request_id: Option<u64>,
    receiver: Option<mpsc::Receiver<ParseOutcome>>,
}

impl PageTab {
    fn new() -> Self {
        Self {
            label: String::new(),
            address_input: String::new(),
            current_url: None,
            page: None,
            tree: None,
            filter_input: String::new(),
            applied_filter: String::new(),
            preview_text: String::new(),
            status_line: String::new(),
            last_error: None,
            next_request_id: 1,
            inflight_request_id: None,
            receiver: None,
        }
    }

    fn is_loading(&self) -> bool {
        self.inflight_request_id.is_some()
    }
}

/// Transient message shown in the status bar after an export or copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedbackKind {
    Success,
    Error,
}

struct ElementEyeApp {
    tabs: Vec<PageTab>,
    active_tab: usize,
    settings_store: Option<SettingsStore>,
    settings: Settings,
    language: Language,
    history: Option<HistoryStore>,
    show_settings: bool,
    settings_draft: Settings,
    show_history: bool,
    show_about: bool,
    show_open_file: bool,
    open_file_input: String,
    show_export: bool,
    export_path_input: String,
    feedback: Option<(FeedbackKind, String)>,
}
