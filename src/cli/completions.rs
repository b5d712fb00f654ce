use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    innorebuild completions --shell bash > ~/.bash_completion.d/innorebuild\n\n\
                  Generate zsh completions:\n    innorebuild completions --shell zsh > ~/.zfunc/_innorebuild\n\n\
                  Generate fish completions:\n    innorebuild completions --shell fish > ~/.config/fish/completions/innorebuild.fish\n\n\
                  Generate PowerShell completions:\n    innorebuild completions --shell powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
