//! Shell completions command implementation

use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

/// Write the completion script for `shell` to `out`
pub fn run(shell: Shell, out: &mut dyn Write) {
    let mut cmd = crate::Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, out);
}
