#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use biome::simulation::environment::BiomeType;
use biome::simulation::params::{Params, ParamsError};
use biome::simulation::species::Species;
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("biome_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_save_and_load_params() {
    let path = temp_path("roundtrip");
    let mut params = Params {
        mate_radius: 20.0,
        initial_biome: BiomeType::Ocean,
        rng_seed: Some(99),
        ..Params::default()
    };
    params.population_caps.insert(Species::Rabbit, 4);

    params.save_to_file(&path).expect("Failed to save params");
    let loaded = Params::load_from_file(&path).expect("Failed to load params");
    let _ = fs::remove_file(&path);

    assert_eq!(loaded.mate_radius, 20.0);
    assert_eq!(loaded.initial_biome, BiomeType::Ocean);
    assert_eq!(loaded.rng_seed, Some(99));
    assert_eq!(loaded.population_cap(Species::Rabbit), 4);
    assert_eq!(loaded.population_cap(Species::Fox), 8);
}

#[test]
fn test_partial_file_takes_defaults() {
    let path = temp_path("partial");
    fs::write(&path, r#"{ "base_interval_ms": 1000.0, "population_caps": { "grass": 12 } }"#)
        .expect("Failed to write params");

    let loaded = Params::load_from_file(&path).expect("Failed to load params");
    let _ = fs::remove_file(&path);

    let defaults = Params::default();
    assert_eq!(loaded.base_interval_ms, 1000.0);
    assert_eq!(loaded.population_cap(Species::Grass), 12);
    assert_eq!(loaded.season_length_ms, defaults.season_length_ms);
    assert_eq!(loaded.mating_health, defaults.mating_health);
    assert!(loaded.behaviors_enabled);
}

#[test]
fn test_invalid_params_are_rejected() {
    let path = temp_path("invalid");
    fs::write(&path, r#"{ "initial_speed": 20.0 }"#).expect("Failed to write params");

    let result = Params::load_from_file(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(ParamsError::Invalid {
            name: "initial_speed",
            ..
        })
    ));

    let params = Params {
        base_interval_ms: 0.0,
        ..Params::default()
    };
    assert!(params.validate().is_err());
    assert!(Params::default().validate().is_ok());
}

#[test]
fn test_load_errors() {
    let missing = Params::load_from_file(temp_path("does_not_exist"));
    assert!(matches!(missing, Err(ParamsError::Io(_))));

    let path = temp_path("garbage");
    fs::write(&path, "not json").expect("Failed to write params");
    let garbage = Params::load_from_file(&path);
    let _ = fs::remove_file(&path);
    assert!(matches!(garbage, Err(ParamsError::Json(_))));
}
