use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs the binary against an empty config home so a real user config never
/// leaks into the assertions.
fn drawpp_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("drawpp").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn write_config(config_home: &TempDir, contents: &str) {
    let dir = config_home.path().join("drawpp");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Draws primitive shapes and cursor animations in a Wayland window",
        ))
        .stdout(predicate::str::contains("--exact-drift"));
}

#[test]
fn list_demos_names_builtins_and_scripts() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(&temp)
        .arg("--list-demos")
        .assert()
        .success()
        .stdout(predicate::str::contains("shapes"))
        .stdout(predicate::str::contains("cursor"))
        .stdout(predicate::str::contains("spiral"));
}

#[test]
fn viewer_requires_wayland_env() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(&temp)
        .env_remove("WAYLAND_DISPLAY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("WAYLAND_DISPLAY not set"));
}

#[test]
fn headless_shapes_summary() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(&temp)
        .env_remove("WAYLAND_DISPLAY")
        .arg("--headless")
        .assert()
        .success()
        .stdout(predicate::str::contains("scene: shapes"))
        .stdout(predicate::str::contains("rects: 1"))
        .stdout(predicate::str::contains("lines: 1"))
        .stdout(predicate::str::contains("bounds: 100,100 601x601"));
}

#[test]
fn headless_cursor_demo_reports_the_cursor() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(&temp)
        .args(["--headless", "--demo", "cursor", "--exact-drift"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lines: 27"))
        .stdout(predicate::str::contains("cursor: ("));
}

#[test]
fn eval_prints_afficher_output() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(&temp)
        .args(["--headless", "--eval", "pour i de 1 à 3 { afficher(i * i) }"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1\n4\n9\nscene: inline"));
}

#[test]
fn script_errors_fail_with_line_number() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(&temp)
        .args(["--headless", "--eval", "n -> 1\nn -> n / 0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2: division by zero"));
}

#[test]
fn unknown_demo_is_rejected() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(&temp)
        .args(["--headless", "--demo", "teapot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown demo 'teapot'"));
}

#[test]
fn demo_and_eval_conflict() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(&temp)
        .args(["--demo", "star", "--eval", "n -> 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn print_config_reads_config_home() {
    let temp = TempDir::new().unwrap();
    write_config(&temp, "[window]\ntitle = \"Formes\"\nwidth = 20\n");

    drawpp_cmd(&temp)
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("title = \"Formes\""))
        .stdout(predicate::str::contains("width = 100"))
        .stdout(predicate::str::contains("precision = \"float\""));
}

#[test]
fn exact_drift_overrides_config_precision() {
    let temp = TempDir::new().unwrap();
    drawpp_cmd(&temp)
        .args(["--print-config", "--exact-drift"])
        .assert()
        .success()
        .stdout(predicate::str::contains("precision = \"truncate\""));
}

#[test]
fn configured_phases_replace_the_cursor_demo() {
    let temp = TempDir::new().unwrap();
    write_config(
        &temp,
        "[[animation.phases]]\nrepeat = 3\nrotate_by = 120.0\nstride = { kind = \"heading\" }\n",
    );

    drawpp_cmd(&temp)
        .args(["--headless", "--demo", "cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lines: 3\n"));
}
