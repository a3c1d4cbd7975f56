use std::process::Command;

fn autoplay(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_asari-stg"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to invoke the asari-stg binary");

    assert!(
        output.status.success(),
        "asari-stg exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf-8 output")
}

#[test]
fn autoplay_reports_hud_lines() {
    let stdout = autoplay(&["--difficulty", "Easy", "--seed", "3", "--duration", "5"]);

    assert!(stdout.contains("Score: "), "{stdout}");
    assert!(stdout.contains("SP "), "{stdout}");
}

#[test]
fn autoplay_is_deterministic_for_a_seed() {
    let args = ["--seed", "11", "--duration", "20", "--autofire", "--report-every", "30"];
    assert_eq!(autoplay(&args), autoplay(&args));
}

#[test]
fn invalid_frame_length_is_rejected() {
    let status = Command::new(env!("CARGO_BIN_EXE_asari-stg"))
        .args(["--frame-ms", "0"])
        .status()
        .expect("failed to invoke the asari-stg binary");
    assert!(!status.success());
}

#[test]
fn bundled_config_is_accepted() {
    let config = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/asari-stg.toml");
    let stdout = autoplay(&["--config", config, "--duration", "2"]);
    assert!(stdout.contains("Score: "), "{stdout}");
}
