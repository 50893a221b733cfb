#![allow(dead_code)]

pub mod mocks;

pub use mocks::MockFile;

use std::{
    io::Write,
    process::{Command, Stdio},
};

use outputty::core::table::Table;

/// Captured result of one `outputty` invocation.
pub struct Execution {
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl Execution {
    pub fn stdout_text(&self) -> String {
        String::from_utf8(self.stdout.clone()).expect("stdout should be UTF-8")
    }
}

/// Runs the compiled binary with `args`, feeding `input` on stdin.
pub fn execute(args: &[&str], input: &[u8]) -> Execution {
    let mut child = Command::new(env!("CARGO_BIN_EXE_outputty"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("outputty should start");

    if let Some(mut stdin) = child.stdin.take() {
        // the process may exit before reading stdin, e.g. when the sink cannot be opened
        let _ = stdin.write_all(input);
    }

    let output = child.wait_with_output().expect("outputty should finish");
    Execution {
        code: output.status.code(),
        stdout: output.stdout,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

pub fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
    .expect("rows should fit the header")
}

pub fn utf16_with_bom(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    text.encode_utf16()
        .for_each(|unit| bytes.extend_from_slice(&unit.to_le_bytes()));
    bytes
}
