// Drives the compiled binary through a PTY, exercising the real event loop
// and crossterm input handling.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Unix-only and ignored by default.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn quit_from_home_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("spellbee");
    let cmd = format!("{} --no-speech --mute", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("\x1b")?; // ESC on the home screen
    p.expect(Eof)?;
    Ok(())
}

#[test]
#[ignore]
fn letter_session_quits_through_summary() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("spellbee");
    let cmd = format!("{} --no-speech --mute --letter c", bin.display());

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("cat")?;
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(200));

    // ESC opens the quit dialog, y confirms, q leaves the summary
    p.send("\x1b")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("y")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("q")?;

    p.expect(Eof)?;
    Ok(())
}
