use std::process::Command;

use anyhow::Result;

#[test]
fn stdout_carries_only_the_annotated_document() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("page.html");
    std::fs::write(
        &input,
        "<html><body><p>שלום from the chat</p></body></html>",
    )?;

    let output = Command::new(env!("CARGO_BIN_EXE_bidifix"))
        .arg(&input)
        .env_remove("RUST_LOG")
        .output()?;

    assert!(output.status.success(), "bidifix should exit cleanly");

    let stdout = String::from_utf8(output.stdout)?;
    assert!(
        stdout.contains("direction: rtl"),
        "the annotated document goes to stdout"
    );
    assert!(
        !stdout.contains("annotation finished"),
        "log lines must not contaminate the document stream"
    );

    let stderr = String::from_utf8(output.stderr)?;
    assert!(
        stderr.contains("annotation finished"),
        "the summary log goes to stderr"
    );
    Ok(())
}
