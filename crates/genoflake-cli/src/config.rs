use anyhow::bail;
use clap::{ArgGroup, Parser, Subcommand};
use genoflake::{ClockPolicy, Coordinates, Gene, SnowflakeId};

/// Upper bound on `generate --count`, about one second of a node's capacity.
pub const MAX_COUNT: usize = 1_024_000;

/// Command-line interface of the `genoflake` binary.
///
/// Node coordinates default to the same resolution the library performs for
/// its default node: `SNOWFLAKE_DATACENTER_ID` / `SNOWFLAKE_NODE_ID` when both
/// are valid, the host fingerprint otherwise. A `.env` file in the working
/// directory is loaded first.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "genoflake",
    version,
    about = "Generate, inspect and hash gene snowflake IDs"
)]
pub struct CliArgs {
    /// Datacenter coordinate (0..=7). Requires `--node`.
    #[arg(long, global = true)]
    pub datacenter: Option<i64>,

    /// Node coordinate (0..=7). Requires `--datacenter`.
    #[arg(long, global = true)]
    pub node: Option<i64>,

    /// Reaction to a clock that moves backward: adopt, wait or reject.
    ///
    /// Environment variable: `GENOFLAKE_CLOCK_POLICY`
    #[arg(long, global = true, env = "GENOFLAKE_CLOCK_POLICY", default_value_t = ClockPolicy::Adopt)]
    pub clock_policy: ClockPolicy,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate new IDs.
    Generate {
        /// Gene as a registered name (e.g. `order`) or a number in 0..=63.
        #[arg(long, conflicts_with = "key")]
        gene: Option<Gene>,

        /// Derive the gene by hashing this key.
        #[arg(long)]
        key: Option<String>,

        /// Number of IDs to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Print one JSON object per ID.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Decode IDs into their fields.
    Inspect {
        #[arg(required = true)]
        ids: Vec<SnowflakeId>,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Compute the gene a key or a list of parent IDs maps to.
    #[command(group(ArgGroup::new("input").required(true).args(["key", "ids"])))]
    Hash {
        #[arg(long)]
        key: Option<String>,

        /// Parent IDs, hashed in the given order.
        #[arg(long, num_args = 1..)]
        ids: Vec<SnowflakeId>,
    },

    /// Print the coordinates this host resolves to.
    Node {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Where the generating node gets its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSelection {
    /// Environment, then host fingerprint.
    Bootstrap,
    Explicit(Coordinates),
}

/// How `generate` picks its gene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneSource {
    Fixed(Gene),
    Key(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Generate {
        gene: GeneSource,
        count: usize,
        json: bool,
    },
    Inspect {
        ids: Vec<SnowflakeId>,
        json: bool,
    },
    HashKey(String),
    HashIds(Vec<SnowflakeId>),
    Node {
        json: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub node: NodeSelection,
    pub clock_policy: ClockPolicy,
    pub task: Task,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let node = match (args.datacenter, args.node) {
            (None, None) => NodeSelection::Bootstrap,
            (Some(datacenter), Some(node)) => {
                if !(0..=SnowflakeId::DATACENTER_MASK).contains(&datacenter) {
                    bail!("--datacenter must be within 0..=7, got {datacenter}");
                }
                if !(0..=SnowflakeId::NODE_MASK).contains(&node) {
                    bail!("--node must be within 0..=7, got {node}");
                }
                NodeSelection::Explicit(Coordinates { datacenter, node })
            }
            _ => bail!("--datacenter and --node must be given together"),
        };

        let task = match args.command {
            Command::Generate {
                gene,
                key,
                count,
                json,
            } => {
                if count == 0 {
                    bail!("--count must be greater than 0");
                }
                if count > MAX_COUNT {
                    bail!("--count ({count}) exceeds the maximum of {MAX_COUNT}");
                }
                let gene = match (gene, key) {
                    (_, Some(key)) => GeneSource::Key(key),
                    (gene, None) => GeneSource::Fixed(gene.unwrap_or_default()),
                };
                Task::Generate { gene, count, json }
            }
            Command::Inspect { ids, json } => Task::Inspect { ids, json },
            Command::Hash { key: Some(key), .. } => Task::HashKey(key),
            Command::Hash { key: None, ids } => Task::HashIds(ids),
            Command::Node { json } => Task::Node { json },
        };

        Ok(Self {
            node,
            clock_policy: args.clock_policy,
            task,
        })
    }
}
