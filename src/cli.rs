use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::io::Write;
use tracing::debug;
use url::Url;

use crate::info::{self, InfoArgs};
use crate::rpc::{NodeRpc, DEFAULT_RPC_URL};

pub const SUCCESS_EXIT_CODE: i32 = 0;
/// Exit code for command line usage errors.
pub const USAGE_ERROR_EXIT_CODE: i32 = 1;
/// Exit code for a command that reported a failure.
pub const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "ela-cli", author, version, about = "Command line client for an ELA node")]
pub struct Cli {
    /// JSON-RPC endpoint of the node
    #[arg(long, global = true, env = "ELA_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: Url,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = info::ABOUT, long_about = info::LONG_ABOUT)]
    Info(InfoArgs),
}

/// Rewrites single-dash spellings of `info` flags (`-cs`, `-getblock=5`) to
/// their double-dash form so clap accepts them.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let cmd = info::info_command();
    let names: Vec<&str> = cmd
        .get_arguments()
        .flat_map(|arg| {
            arg.get_long()
                .into_iter()
                .chain(arg.get_all_aliases().into_iter().flatten())
        })
        .collect();

    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if name.len() > 1 && names.contains(&name) {
                        OsString::from(format!("-{text}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

/// Parses `argv`, runs the chosen command against the node that `connect`
/// returns for the configured URL, and yields the process exit code.
///
/// Command output, help and version go to `out`; usage errors go to `err`.
pub async fn run<I, T, F, R, W, E>(argv: I, connect: F, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    F: FnOnce(Url) -> R,
    R: NodeRpc,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(normalize_args(argv)) {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = write!(err, "{}", e.render());
            return USAGE_ERROR_EXIT_CODE;
        }
        Err(e) => {
            let _ = write!(out, "{}", e.render());
            return SUCCESS_EXIT_CODE;
        }
    };

    match cli.command {
        Commands::Info(args) => {
            debug!("Using node at {}", cli.rpc_url);
            let rpc = connect(cli.rpc_url);
            match info::execute(&args, &rpc, out).await {
                Ok(()) => SUCCESS_EXIT_CODE,
                Err(e) => {
                    // Already reported to `out` by the command.
                    debug!("info command failed: {:?}", e);
                    FAILURE_EXIT_CODE
                }
            }
        }
    }
}
