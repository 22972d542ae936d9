#![cfg(feature = "cli_api")]

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains as str_contains;
use shoot_margin::{CalculatorConfig, save_config_to_json};
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env_remove("SHOOT_MARGIN_CONFIG")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_shows_default_dashboard_on_start() {
    run_cli("quit\n")
        .success()
        .stdout(str_contains("Shoot Margin (CLI) - type 'help' for commands"))
        .stdout(str_contains("+¥1,600,000"))
        .stdout(str_contains("+¥834,500"))
        .stdout(str_contains("80.0% margin"));
}

#[test]
fn cli_set_coerces_grouped_amounts() {
    run_cli("set quote 825,000\nquit\n")
        .success()
        .stdout(str_contains("quote set to 825000."));
}

#[test]
fn cli_set_negative_value_becomes_zero() {
    run_cli("set travel -500\nquit\n")
        .success()
        .stdout(str_contains("travel set to 0."));
}

#[test]
fn cli_rejects_unknown_field() {
    run_cli("set budget 10\nquit\n")
        .success()
        .stdout(str_contains("Error: unknown input field 'budget'"));
}

#[test]
fn cli_preset_loads_small_video() {
    run_cli("preset small-video\nquit\n")
        .success()
        .stdout(str_contains("Loaded preset 'small-video'."))
        .stdout(str_contains("+¥665,000"));
}

#[test]
fn cli_unknown_preset_leaves_inputs_unchanged() {
    run_cli("preset nope\nquit\n")
        .success()
        .stdout(str_contains("Unknown preset 'nope'. Inputs unchanged."));
}

#[test]
fn cli_team_rejects_unknown_member() {
    run_cli("team ghost 2\nquit\n")
        .success()
        .stdout(str_contains("Error: unknown team member 'ghost'"));
}

#[test]
fn cli_team_updates_member_days() {
    run_cli("team yuki 4\nquit\n")
        .success()
        .stdout(str_contains("yuki set to 4 days."))
        .stdout(str_contains("¥44,000"));
}

#[test]
fn cli_overhead_toggle_and_usd_display() {
    run_cli("overhead off\ncurrency usd\nquit\n")
        .success()
        .stdout(str_contains("Overhead excluded."))
        .stdout(str_contains("excl. overhead"))
        .stdout(str_contains("+$10,667"));
}

#[test]
fn cli_reset_restores_defaults() {
    let assert = run_cli("set quote 1\nreset\nquit\n").success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    let after_reset = output
        .split("Inputs reset to defaults.")
        .last()
        .unwrap_or_default();
    assert!(
        after_reset.contains("+¥834,500"),
        "expected default net profit after reset:\n{}",
        after_reset
    );
}

#[test]
fn cli_reference_lists_past_jobs() {
    run_cli("reference\nquit\n")
        .success()
        .stdout(str_contains("Hilton Odawara - Conference"))
        .stdout(str_contains("weak"))
        .stdout(str_contains("Average margin 70.3% across 9 jobs"));
}

#[test]
#[allow(deprecated)]
fn cli_loads_config_file_even_with_bad_http_address() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let mut config = CalculatorConfig::default();
    config.benchmarks.monthly_overhead = 0.0;
    save_config_to_json(&config, tmp.path()).expect("write config");

    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.env("SHOOT_MARGIN_CONFIG", tmp.path())
        .env("SHOOT_MARGIN_HTTP_ADDR", "not-an-address")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(str_contains("+¥1,453,500"))
        .stdout(str_contains("Config error").not());
}

#[test]
fn cli_config_save_and_load_round_trip() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().replace('\\', "\\\\");
    let script = format!("config save {}\nconfig load {}\nquit\n", path, path);
    run_cli(&script)
        .success()
        .stdout(str_contains("Config saved to"))
        .stdout(str_contains("Config loaded from"));
}

#[test]
fn cli_unknown_command() {
    run_cli("frobnicate\nquit\n")
        .success()
        .stdout(str_contains("Unknown command. Type 'help'."));
}
