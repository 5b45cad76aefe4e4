//! The `info` subcommand: look up node, block and transaction information.
//!
//! Exactly one query runs per invocation. Queries are tried in [`QUERIES`]
//! order and the first one whose flag is set wins.

use clap::{Args, Command, CommandFactory};
use eyre::Result;
use serde_json::Value;
use std::io::Write;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::rpc::NodeRpc;
use crate::types::ResultShape;

pub const ABOUT: &str = "show blockchain information";
pub const LONG_ABOUT: &str = "With ela-cli info, you could look up blocks, transactions, etc.";

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoArgs {
    /// version of the connected node
    #[arg(short = 'v', long)]
    pub version: bool,

    /// how many connections are holding by the connected node
    #[arg(long, visible_alias = "cs")]
    pub connections: bool,

    /// neighbor information of the connected node
    #[arg(long, visible_alias = "nb")]
    pub neighbor: bool,

    /// get the connected node's state
    #[arg(short = 's', long)]
    pub state: bool,

    /// current blocks in the blockchain
    #[arg(long, visible_alias = "bc")]
    pub blockcount: bool,

    /// query a block's hash with it's height
    #[arg(long, visible_alias = "gbh", value_name = "HEIGHT")]
    pub getblockhash: Option<u64>,

    /// query a block with height or it's hash
    #[arg(long, visible_alias = "gb", value_name = "HEIGHT_OR_HASH", allow_hyphen_values = true)]
    pub getblock: Option<String>,

    /// get the latest block's hash
    #[arg(long, visible_alias = "bbh")]
    pub bestblockhash: bool,

    /// query a transaction with it's hash
    #[arg(long, visible_alias = "gt", value_name = "HASH", allow_hyphen_values = true)]
    pub gettransaction: Option<String>,

    /// show the transactions in node's transaction pool
    #[arg(long, visible_alias = "stp")]
    pub showtxpool: bool,
}

impl InfoArgs {
    /// True when no flag was given on the command line at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One row of the dispatch table.
pub struct InfoQuery {
    pub flag: &'static str,
    pub method: &'static str,
    pub failure: &'static str,
    pub shape: ResultShape,
    /// Call arguments, or `None` when this query's flag is not set.
    pub params: fn(&InfoArgs) -> Option<Vec<Value>>,
}

pub const QUERIES: &[InfoQuery] = &[
    InfoQuery {
        flag: "version",
        method: "getversion",
        failure: "get node version failed",
        shape: ResultShape::Any,
        params: |args| args.version.then(Vec::new),
    },
    InfoQuery {
        flag: "connections",
        method: "getconnectioncount",
        failure: "get node connections failed",
        shape: ResultShape::Any,
        params: |args| args.connections.then(Vec::new),
    },
    InfoQuery {
        flag: "neighbor",
        method: "getneighbor",
        failure: "get node neighbors info failed",
        shape: ResultShape::Any,
        params: |args| args.neighbor.then(Vec::new),
    },
    InfoQuery {
        flag: "state",
        method: "getnodestate",
        failure: "get node state info failed",
        shape: ResultShape::Any,
        params: |args| args.state.then(Vec::new),
    },
    InfoQuery {
        flag: "blockcount",
        method: "getblockcount",
        failure: "get block count failed",
        shape: ResultShape::Any,
        params: |args| args.blockcount.then(Vec::new),
    },
    InfoQuery {
        flag: "getblockhash",
        method: "getblockhash",
        failure: "get block hash failed",
        shape: ResultShape::String,
        params: |args| args.getblockhash.map(|height| vec![Value::from(height)]),
    },
    InfoQuery {
        flag: "getblock",
        method: "getblock",
        failure: "get block failed",
        shape: ResultShape::Any,
        params: |args| non_empty(&args.getblock).map(|param| vec![block_param(param)]),
    },
    InfoQuery {
        flag: "gettransaction",
        method: "getrawtransaction",
        failure: "get transaction failed",
        shape: ResultShape::Any,
        params: |args| non_empty(&args.gettransaction).map(|hash| vec![Value::from(hash)]),
    },
    InfoQuery {
        flag: "bestblockhash",
        method: "getbestblockhash",
        failure: "get last block hash failed",
        shape: ResultShape::Any,
        params: |args| args.bestblockhash.then(Vec::new),
    },
    InfoQuery {
        flag: "showtxpool",
        method: "getrawmempool",
        failure: "get transaction pool failed",
        shape: ResultShape::Any,
        params: |args| args.showtxpool.then(Vec::new),
    },
];

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A block is addressed by height when the argument is a decimal integer,
/// otherwise by hash.
fn block_param(param: &str) -> Value {
    match param.parse::<i64>() {
        Ok(height) => Value::from(height),
        Err(_) => Value::from(param),
    }
}

/// The first query whose flag is set, with its call arguments.
pub fn select(args: &InfoArgs) -> Option<(&'static InfoQuery, Vec<Value>)> {
    QUERIES
        .iter()
        .find_map(|query| (query.params)(args).map(|params| (query, params)))
}

/// The `info` subcommand as the user sees it, global options included.
pub fn info_command() -> Command {
    let mut cli = Cli::command();
    cli.build();
    cli.find_subcommand("info")
        .cloned()
        .unwrap_or_else(|| InfoArgs::augment_args(Command::new("info").about(ABOUT)))
}

pub async fn execute<R, W>(args: &InfoArgs, rpc: &R, out: &mut W) -> Result<()>
where
    R: NodeRpc,
    W: Write,
{
    if args.is_empty() {
        writeln!(out, "{}", info_command().render_help())?;
        return Ok(());
    }

    let Some((query, params)) = select(args) else {
        debug!("No info query selected");
        return Ok(());
    };
    debug!("Running {} query", query.flag);

    let result = match rpc.call(query.method, params).await {
        Ok(value) => query.shape.check(query.method, value),
        Err(e) => Err(e),
    };

    match result {
        Ok(value) => {
            writeln!(out, "{value}")?;
            Ok(())
        }
        Err(e) => {
            warn!("{} call failed: {}", query.method, e);
            writeln!(out, "error: {}, {}", query.failure, e)?;
            Err(e.into())
        }
    }
}
