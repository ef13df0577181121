//! Tests that run the parley-chat binary itself.

#![cfg(feature = "binaries")]

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::process::{Command, Stdio};

    use parley::credential::{API_KEY_VARIABLE, remediation};

    #[test]
    fn missing_key_exits_before_the_chat_loop() {
        let dir = std::env::temp_dir().join(format!("parley-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut child = Command::new(env!("CARGO_BIN_EXE_parley-chat"))
            .current_dir(&dir)
            .env_remove(API_KEY_VARIABLE)
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        // The process may exit before reading any of this.
        let _ = child.stdin.take().unwrap().write_all(b"Hello\nquit\n");
        let output = child.wait_with_output().unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stdout = String::from_utf8(output.stdout).unwrap();
        let expected: String = remediation(API_KEY_VARIABLE)
            .into_iter()
            .map(|line| line + "\n")
            .collect();
        assert_eq!(stdout, expected);
        assert!(!stdout.contains("You: "));
        assert!(!stdout.contains("Chatbot:"));
    }
}
