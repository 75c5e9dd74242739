//! Validation of the supervised command line.

use anyhow::{Result, bail};

/// Split the raw trailing CLI arguments into command and arguments.
///
/// The command is later executed directly (never through a shell), so the
/// only injection surface left is the command path itself: traversal
/// sequences and embedded NUL bytes are rejected up front. Arguments are
/// passed to the child verbatim.
pub fn split_command(argv: &[String]) -> Result<(&str, &[String])> {
    let Some((cmd, args)) = argv.split_first() else {
        bail!("no command specified");
    };
    if cmd.is_empty() {
        bail!("no command specified");
    }
    if cmd.contains("..") {
        bail!("invalid command {cmd:?}: contains a path-traversal sequence");
    }
    if cmd.contains('\0') {
        bail!("invalid command: contains an embedded NUL byte");
    }
    Ok((cmd.as_str(), args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| (*part).to_string()).collect()
    }

    #[test]
    fn splits_command_and_arguments() {
        let raw = argv(&["node", "server.mjs", "--port", "3000"]);
        let (cmd, args) = split_command(&raw).expect("valid command");
        assert_eq!(cmd, "node");
        assert_eq!(args, ["server.mjs", "--port", "3000"]);
    }

    #[test]
    fn empty_argv_is_rejected() {
        let err = split_command(&[]).expect_err("missing command");
        assert!(err.to_string().contains("no command"));
    }

    #[test]
    fn traversal_command_is_rejected() {
        let raw = argv(&["../evil"]);
        let err = split_command(&raw).expect_err("traversal command");
        assert!(err.to_string().contains("path-traversal"));
    }

    #[test]
    fn embedded_traversal_is_rejected() {
        let raw = argv(&["/usr/bin/../../evil", "arg"]);
        assert!(split_command(&raw).is_err());
    }

    #[test]
    fn nul_byte_is_rejected() {
        let raw = argv(&["node\0sh"]);
        let err = split_command(&raw).expect_err("nul byte");
        assert!(err.to_string().contains("NUL"));
    }

    #[test]
    fn arguments_are_not_validated() {
        // Only the command is an injection surface; the child interprets its
        // own arguments.
        let raw = argv(&["node", "../relative/script.mjs"]);
        let (cmd, args) = split_command(&raw).expect("valid command");
        assert_eq!(cmd, "node");
        assert_eq!(args, ["../relative/script.mjs"]);
    }
}
