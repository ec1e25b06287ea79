//! Integration tests for Settings layered loading.
//!
//! Only one test touches `GENEALOGY_*` environment variables; the others use
//! `from_toml_str`, which never reads the environment.

use vampire_genealogy::config::Settings;
use vampire_genealogy::domain::Genealogy;

#[test]
fn given_empty_overlay_when_parsing_then_uses_defaults() {
    // Act
    let settings = Settings::from_toml_str("").expect("parse settings");

    // Assert
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_partial_overlay_when_parsing_then_keeps_unspecified_defaults() {
    // Arrange
    let overlay = r#"
millennial_year = 2000
"#;

    // Act
    let settings = Settings::from_toml_str(overlay).expect("parse settings");

    // Assert
    assert_eq!(settings.millennial_year, 2000);
    assert!(settings.show_years, "unspecified show_years keeps default");
}

#[test]
fn given_invalid_overlay_when_parsing_then_errors() {
    // Act
    let result = Settings::from_toml_str("millennial_year = \"soon\"");

    // Assert
    assert!(result.is_err());
}

#[test]
fn given_env_override_when_loading_then_env_wins_over_overlay() {
    // Arrange
    std::env::set_var("GENEALOGY_MILLENNIAL_YEAR", "1899");
    let overlay = r#"
millennial_year = 2000
show_years = false
"#;

    // Act
    let settings = Settings::load(Some(overlay));
    std::env::remove_var("GENEALOGY_MILLENNIAL_YEAR");
    let settings = settings.expect("load settings");

    // Assert
    assert_eq!(settings.millennial_year, 1899);
    assert!(!settings.show_years);
}

#[test]
fn given_custom_threshold_when_collecting_millennials_then_threshold_applies() {
    // Arrange
    let settings = Settings::from_toml_str("millennial_year = 1860").expect("parse settings");
    let mut g = Genealogy::with_settings(settings);
    let ansel = g.add_vampire("Ansel", 1800);
    let sarah = g.add_vampire("Sarah", 1850);
    let andrew = g.add_vampire("Andrew", 1900);
    g.add_offspring(ansel, sarah).unwrap();
    g.add_offspring(sarah, andrew).unwrap();

    // Act
    let millennials = g.millennial_vampires(ansel).unwrap();

    // Assert
    assert_eq!(millennials, vec![andrew]);
}
