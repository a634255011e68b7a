use eframe::egui;
use ee_dom::ElementNode;
use ee_i18n::Language;
use ee_storage::HistoryStore;
use ee_storage::Settings;
use ee_storage::SettingsStore;
use ee_storage::Theme;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

include!("types.rs");

mod parse;
mod startup;
mod ui;

pub(crate) use startup::run;
