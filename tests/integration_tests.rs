//! Integration tests for the translation catalogues
//!
//! These tests load the catalogues shipped under resources/i18n and verify
//! lookup, fail-open behavior, statistics and validation end to end.

use proptest::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use ts_catalogue::{
    catalogue::{Catalogue, CatalogueStats, CatalogueValidator, TranslationStatus},
    locale::Locale,
    translator::Translator,
};

// ==================== Test Helpers ====================

fn i18n_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/i18n")
}

fn load(name: &str) -> Catalogue {
    Catalogue::load(i18n_dir().join(name)).expect("Shipped catalogue should load")
}

// ==================== Lookup Tests ====================

#[test]
fn test_settings_simplified_chinese() {
    let catalogue = load("settings.zh_CN.ts");
    assert_eq!(catalogue.language(), "zh_CN");
    assert_eq!(catalogue.lookup("SettingInterface", "Settings"), "设置");
    assert_eq!(catalogue.lookup("SettingInterface", "Language"), "语言");
}

#[test]
fn test_settings_hong_kong_chinese() {
    let catalogue = load("settings.zh_HK.ts");
    assert_eq!(catalogue.language(), "zh_HK");
    assert_eq!(catalogue.lookup("SettingInterface", "Settings"), "設置");
    assert_eq!(catalogue.lookup("SettingInterface", "Language"), "語言");
}

#[test]
fn test_unfinished_falls_back_to_source() {
    let catalogue = load("ultralytics_ui.zh_CN.ts");
    assert_eq!(catalogue.lookup("ModelParameterWidget", "epochs: "), "epochs: ");
    assert_eq!(
        catalogue.lookup("AnnotationWidget", "Image path is not existed"),
        "Image path is not existed"
    );

    let hk = load("settings.zh_HK.ts");
    let source = "Acrylic effect has better visual experience, but it may cause the window to become stuck";
    assert_eq!(hk.lookup("SettingInterface", source), source);
}

#[test]
fn test_vanished_falls_back_to_source() {
    let catalogue = load("settings.zh_CN.ts");
    assert_eq!(catalogue.lookup("SettingInterface", "Online Music"), "Online Music");
}

#[test]
fn test_missing_entry_falls_back_to_source() {
    let catalogue = load("settings.zh_CN.ts");
    assert_eq!(catalogue.lookup("NoSuchWidget", "Settings"), "Settings");
    assert_eq!(catalogue.lookup("SettingInterface", "No such text"), "No such text");
}

#[test]
fn test_entities_in_shipped_catalogue() {
    let catalogue = load("ultralytics_ui.zh_CN.ts");
    let translated = catalogue.lookup(
        "DeviceWidget",
        "expect 'cpu','mps',0,[0,1,2...], but get value{value}",
    );
    assert!(translated.starts_with("期望的类型为"));
}

#[test]
fn test_every_finished_entry_round_trips() {
    for name in ["settings.zh_CN.ts", "settings.zh_HK.ts", "ultralytics_ui.zh_CN.ts"] {
        let catalogue = load(name);
        for (context, message) in catalogue.messages() {
            let result = catalogue.lookup(context, &message.source);
            match message.status {
                TranslationStatus::Finished => {
                    assert_eq!(result, message.translation.primary(), "{}: {}", name, message.source)
                }
                TranslationStatus::Unfinished => assert_eq!(result, message.source),
                TranslationStatus::Vanished => {}
            }
        }
    }
}

#[test]
fn test_loading_twice_is_deterministic() {
    let first = load("ultralytics_ui.zh_CN.ts");
    let second = load("ultralytics_ui.zh_CN.ts");
    assert_eq!(first, second);

    for (context, message) in first.messages() {
        assert_eq!(
            first.lookup(context, &message.source),
            second.lookup(context, &message.source)
        );
    }
}

// ==================== Statistics Tests ====================

#[test]
fn test_stats_settings_catalogues() {
    let cn = CatalogueStats::collect(&load("settings.zh_CN.ts"));
    assert_eq!(cn.contexts, 1);
    assert_eq!(cn.finished, 24);
    assert_eq!(cn.unfinished, 0);
    assert_eq!(cn.vanished, 34);
    assert_eq!(cn.completion_rate, 100.0);

    let hk = CatalogueStats::collect(&load("settings.zh_HK.ts"));
    assert_eq!(hk.finished, 23);
    assert_eq!(hk.unfinished, 1);
    assert_eq!(hk.vanished, 35);
}

#[test]
fn test_stats_application_catalogue() {
    let stats = CatalogueStats::collect(&load("ultralytics_ui.zh_CN.ts"));
    assert_eq!(stats.contexts, 54);
    assert_eq!(stats.messages, 358);
    assert_eq!(stats.finished, 288);
    assert_eq!(stats.unfinished, 70);
    assert_eq!(stats.vanished, 0);
}

// ==================== Validation Tests ====================

#[test]
fn test_validator_flags_misspelled_placeholder() {
    let report = CatalogueValidator::validate(&load("ultralytics_ui.zh_CN.ts"));

    assert!(!report.has_errors());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("DeviceWidget"));
    assert!(report.warnings[0].contains("{valuse}"));
}

#[test]
fn test_validator_settings_clean() {
    assert!(CatalogueValidator::validate(&load("settings.zh_CN.ts")).is_clean());
    assert!(CatalogueValidator::validate(&load("settings.zh_HK.ts")).is_clean());
}

// ==================== Translator Tests ====================

#[test]
fn test_translator_loads_all_domains() {
    let translator = Translator::load(
        Locale::CHINESE_SIMPLIFIED,
        &["settings", "ultralytics_ui"],
        i18n_dir(),
    );

    assert_eq!(translator.catalogues().len(), 2);
    assert_eq!(translator.translate("SettingInterface", "Settings"), "设置");
    assert_eq!(translator.translate("ModelParameterWidget", "epochs: "), "epochs: ");
}

#[test]
fn test_translator_hong_kong_missing_domain_fails_open() {
    // Only the settings catalogue ships for zh_HK
    let translator = Translator::load(
        Locale::CHINESE_HONG_KONG,
        &["settings", "ultralytics_ui"],
        i18n_dir(),
    );

    assert_eq!(translator.catalogues().len(), 1);
    assert_eq!(translator.translate("SettingInterface", "Settings"), "設置");
    assert_eq!(translator.translate("AnnotationWidget", "Save"), "Save");
}

#[test]
fn test_translator_shared_across_threads() {
    let translator = Arc::new(Translator::load(
        Locale::CHINESE_SIMPLIFIED,
        &["settings"],
        i18n_dir(),
    ));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let translator = Arc::clone(&translator);
            std::thread::spawn(move || translator.translate("SettingInterface", "Settings").to_string())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), "设置");
    }
}

// ==================== Fail-Open Loading Tests ====================

#[test]
fn test_load_or_empty_on_malformed_file() {
    let temp_dir = TempDir::new().expect("tempdir");
    let path = temp_dir.path().join("broken.zh_CN.ts");
    std::fs::write(&path, "<TS><context><name>A</name></message>").expect("write");

    assert!(Catalogue::load(&path).is_err());

    let catalogue = Catalogue::load_or_empty(&path, "zh_CN");
    assert!(catalogue.is_empty());
    assert_eq!(catalogue.lookup("A", "Settings"), "Settings");
}

#[test]
fn test_load_or_empty_on_missing_file() {
    let temp_dir = TempDir::new().expect("tempdir");
    let catalogue = Catalogue::load_or_empty(temp_dir.path().join("missing.ts"), "zh_HK");

    assert_eq!(catalogue.language(), "zh_HK");
    assert!(catalogue.is_empty());
}

#[test]
fn test_load_missing_file_error_names_path() {
    let err = Catalogue::load("/nonexistent/settings.zh_CN.ts").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/settings.zh_CN.ts"));
}

// ==================== Property Tests ====================

proptest! {
    #[test]
    fn prop_unknown_context_returns_source(source in "\\PC*") {
        let catalogue = load("settings.zh_CN.ts");
        prop_assert_eq!(catalogue.lookup("NoSuchContext", &source), source.as_str());
    }

    #[test]
    fn prop_empty_catalogue_returns_source(context in "[A-Za-z]{1,20}", source in "\\PC*") {
        let catalogue = Catalogue::empty("zh_CN");
        prop_assert_eq!(catalogue.lookup(&context, &source), source.as_str());
    }

    #[test]
    fn prop_plural_without_translation_substitutes(n in -1000i64..1000) {
        let catalogue = Catalogue::empty("zh_CN");
        let result = catalogue.lookup_plural("Dialog", "%n file(s)", n);
        prop_assert_eq!(result.as_ref(), format!("{} file(s)", n));
    }
}
