//! Shell completions command

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::CompletionsArgs;
use crate::error::{RebuildError, Result};

fn parse_shell(name: &str) -> Option<Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "elvish" => Some(Shell::Elvish),
        "fish" => Some(Shell::Fish),
        "powershell" | "pwsh" => Some(Shell::PowerShell),
        "zsh" => Some(Shell::Zsh),
        _ => None,
    }
}

fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "innorebuild", out);
}

/// Generate shell completions
pub fn run(args: CompletionsArgs) -> Result<()> {
    let shell = parse_shell(&args.shell).ok_or_else(|| RebuildError::UnsupportedShell {
        shell: args.shell.clone(),
    })?;
    write_completions(shell, &mut std::io::stdout().lock());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_names() {
        assert_eq!(parse_shell("bash"), Some(Shell::Bash));
        assert_eq!(parse_shell("elvish"), Some(Shell::Elvish));
        assert_eq!(parse_shell("fish"), Some(Shell::Fish));
        assert_eq!(parse_shell("powershell"), Some(Shell::PowerShell));
        assert_eq!(parse_shell("pwsh"), Some(Shell::PowerShell));
        assert_eq!(parse_shell("zsh"), Some(Shell::Zsh));
    }

    #[test]
    fn test_parse_shell_is_case_insensitive() {
        assert_eq!(parse_shell("BASH"), Some(Shell::Bash));
        assert_eq!(parse_shell("Zsh"), Some(Shell::Zsh));
    }

    #[test]
    fn test_unknown_shell() {
        let err = run(CompletionsArgs {
            shell: "tcsh".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, RebuildError::UnsupportedShell { .. }));
    }

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("innorebuild"));
        assert!(script.contains("rebuild"));
        assert!(script.contains("unpack"));
    }
}
