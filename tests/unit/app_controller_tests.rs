/*!
 * Tests for the application controller
 */

use anyhow::Result;
use ppat::app_config::Config;
use ppat::app_controller::{Controller, LanguageInfo};
use ppat::rules::Category;

use crate::common;

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_with_config_withTestResources_shouldLoadRulesAndIndex() -> Result<()> {
    let controller = Controller::with_config(common::test_config())?;

    assert_eq!(controller.load_failures(), 0);
    assert_eq!(controller.translator().rules().len(), 1);
    assert_eq!(controller.index().len(Category::People), 2);
    assert_eq!(
        controller.languages(),
        vec![LanguageInfo {
            code: "en".to_string(),
            name: "English".to_string(),
            iso_name: Some("English".to_string()),
        }]
    );
    Ok(())
}

#[test]
fn test_with_config_withMissingIndex_shouldContinueWithEmptyIndex() -> Result<()> {
    let config = Config {
        index_dir: common::test_resource_path("no-such-index"),
        ..common::test_config()
    };
    let controller = Controller::with_config(config)?;
    assert!(controller.index().is_empty());
    Ok(())
}

#[test]
fn test_with_config_withoutRuleFiles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config {
        rules_dir: temp_dir.path().to_path_buf(),
        ..common::test_config()
    };
    let err = Controller::with_config(config).err().expect("empty rules dir should fail");
    assert!(err.to_string().contains("No usable rule file"));
    Ok(())
}

#[test]
fn test_with_config_withoutDictionary_shouldFailRuleLookupsOnly() -> Result<()> {
    let config = Config {
        phonetic_dictionary: None,
        ..common::test_config()
    };
    let controller = Controller::with_config(config)?;

    assert!(controller.translate("Mike", &[]).is_err());
    let lookup = controller.lookup("Mike", &[])?;
    assert_eq!(lookup.index.len(), 1);
    assert!(lookup.rules[0].result.is_err());
    Ok(())
}

#[test]
fn test_resolve_languages_shouldMapIsoCodesAndDeduplicate() -> Result<()> {
    let controller = Controller::with_config(common::test_config())?;
    assert_eq!(controller.resolve_languages(&codes(&["eng", "en"]))?, ["en"]);
    assert!(controller.resolve_languages(&[])?.is_empty());
    Ok(())
}

#[test]
fn test_resolve_languages_withUnknownCode_shouldListAvailable() -> Result<()> {
    let controller = Controller::with_config(common::test_config())?;
    let err = controller.resolve_languages(&codes(&["en", "fr", "zz"])).unwrap_err();
    assert_eq!(err.to_string(), "Unknown language code(s): fr, zz (available: en)");
    Ok(())
}

#[test]
fn test_resolve_languages_withEmptyRequest_shouldUseConfiguredDefaults() -> Result<()> {
    let mut config = common::test_config();
    config.default_languages = codes(&["fr"]);
    let controller = Controller::with_config(config)?;

    assert!(controller.resolve_languages(&[]).is_err());
    assert_eq!(controller.resolve_languages(&codes(&["en"]))?, ["en"]);
    Ok(())
}

#[test]
fn test_lookup_shouldReturnIndexHitsAndRuleOutcomes() -> Result<()> {
    let controller = Controller::with_config(common::test_config())?;
    let lookup = controller.lookup("nina", &[])?;

    let index: Vec<(&str, Category, &str)> = lookup
        .index
        .iter()
        .map(|r| (r.language.as_str(), r.category, r.chinese.as_str()))
        .collect();
    assert_eq!(
        index,
        [
            ("English", Category::People, "尼娜"),
            ("Spanish", Category::People, "妮娜"),
            ("English", Category::Places, "尼纳"),
        ]
    );

    assert_eq!(lookup.rules.len(), 1);
    let records = lookup.rules[0].result.as_ref().expect("en should translate Nina");
    assert_eq!(records[0].chinese, "尼纳");
    assert_eq!(records[1].chinese, "尼娜");
    Ok(())
}

#[test]
fn test_translate_withUnknownWord_shouldReturnError() -> Result<()> {
    let controller = Controller::with_config(common::test_config())?;
    let err = controller.translate("Zed", &[]).unwrap_err();
    assert!(err.to_string().contains("Zed"));
    Ok(())
}

#[test]
fn test_check_withFileAndDirectory_shouldReportEachRule() -> Result<()> {
    let controller = Controller::with_config(common::test_config())?;

    let report = controller.check(common::test_resource_path("rules/en.rule"))?;
    assert_eq!(report.rules.len(), 1);
    assert!(report.failures.is_empty());

    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "en.rule", &common::fixture_rule_text())?;
    common::create_test_file(temp_dir.path(), "bad.rule", ".meta\nlanguage_name\n")?;
    let report = controller.check(temp_dir.path())?;
    assert_eq!(report.rules.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].line(), Some(2));

    assert!(controller.check(temp_dir.path().join("missing.rule")).is_err());
    Ok(())
}
