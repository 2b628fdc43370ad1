//! `repo rename` command implementation

use anyhow::Result;
use repokit_core::{validate_new_repo_name, ApiClient, ConfigManager, RepoRef, ValidationError};

use crate::output::OutputContext;
use crate::ExitCode;

/// Produces an API client for a host
pub type HttpClientFn<'a> = dyn Fn(&str) -> repokit_core::Result<ApiClient> + 'a;

/// Validated input for a single rename
pub struct RenameOptions<'a> {
    pub http_client: &'a HttpClientFn<'a>,
    pub io: &'a OutputContext,

    pub old_repo_name: String,
    pub new_repo_name: String,
}

pub fn run(config: &ConfigManager, args: &[String], ctx: &OutputContext) -> Result<ExitCode> {
    let http_client = |host: &str| config.api_client(host);
    new_cmd_rename(args, &http_client, ctx, rename_run)?;
    Ok(ExitCode::Success)
}

/// Check the positional arguments and hand the options to `run_f`.
///
/// `run_f` is [`rename_run`] in production; tests substitute a stub.
pub fn new_cmd_rename<'a, F>(
    args: &[String],
    http_client: &'a HttpClientFn<'a>,
    io: &'a OutputContext,
    run_f: F,
) -> Result<()>
where
    F: FnOnce(RenameOptions<'a>) -> Result<()>,
{
    let (old_repo_name, new_repo_name) = match args {
        [old, new] => (old.clone(), new.clone()),
        [] | [_] => return Err(ValidationError::MissingRepositoryArgument.into()),
        _ => {
            return Err(ValidationError::TooManyArguments {
                max: 2,
                received: args.len(),
            }
            .into())
        }
    };

    run_f(RenameOptions {
        http_client,
        io,
        old_repo_name,
        new_repo_name,
    })
}

/// Resolve the repository, rename it, and report on a terminal.
pub fn rename_run(opts: RenameOptions<'_>) -> Result<()> {
    let repo = RepoRef::from_full_name(&opts.old_repo_name)?;
    validate_new_repo_name(&opts.new_repo_name)?;

    let client = (opts.http_client)(repo.host())?;

    let info = client.repository_info(&repo)?;
    tracing::debug!(id = %info.id, repo = %repo, "resolved repository");

    let target = info.repo_ref(repo.host());
    client.rename_repository(&target, &opts.new_repo_name)?;
    tracing::info!(from = %target, to = %opts.new_repo_name, "renamed repository");

    if opts.io.is_stdout_tty() {
        opts.io.success(&format!(
            "Renamed repository {}/{}",
            info.owner.login, opts.new_repo_name
        ));
    }

    Ok(())
}
