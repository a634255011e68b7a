use super::*;

pub(crate) fn run() -> Result<(), eframe::Error> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ElementEye")
            .with_inner_size([1180.0, 760.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ElementEye",
        native_options,
        Box::new(|cc| {
            install_platform_fonts(&cc.egui_ctx);
            Ok(Box::new(ElementEyeApp::new()))
        }),
    )
}

#[cfg(target_os = "windows")]
const FONT_CANDIDATES: &[(&str, &str)] = &[
    ("microsoft_yahei", r"C:\Windows\Fonts\msyh.ttc"),
    ("simsun", r"C:\Windows\Fonts\simsun.ttc"),
];

#[cfg(target_os = "macos")]
const FONT_CANDIDATES: &[(&str, &str)] = &[
    ("pingfang", "/System/Library/Fonts/PingFang.ttc"),
    ("hiragino", "/System/Library/Fonts/Hiragino Sans GB.ttc"),
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const FONT_CANDIDATES: &[(&str, &str)] = &[
    (
        "noto_cjk",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ),
    (
        "wqy_microhei",
        "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    ),
];

/// egui's bundled fonts have no CJK coverage, so the interface would show
/// boxes for Chinese text. Load the first system fonts that cover it.
fn install_platform_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    let mut inserted = Vec::new();

    for (name, path) in FONT_CANDIDATES {
        if let Ok(bytes) = std::fs::read(path) {
            fonts.font_data.insert(
                (*name).to_owned(),
                egui::FontData::from_owned(bytes).into(),
            );
            inserted.push((*name).to_owned());
        }
    }

    if !inserted.is_empty() {
        if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
            for name in &inserted {
                proportional.push(name.clone());
            }
        }
        if let Some(monospace) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
            for name in inserted {
                monospace.push(name);
            }
        }
    }

    ctx.set_fonts(fonts);
}
