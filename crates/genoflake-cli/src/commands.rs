use std::io::Write;

use chrono::SecondsFormat;
use genoflake::{
    CoordinateSource, Coordinates, Gene, Node, SnowflakeId, SystemEnv, SystemHost,
    bootstrap_node, hash_ids, hash_string, resolve_coordinates,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{CliConfig, GeneSource, NodeSelection, Task};

/// Field breakdown of one ID, as printed by `inspect` and `generate --json`.
#[derive(Debug, Serialize)]
struct IdReport {
    id: SnowflakeId,
    timestamp: i64,
    unix_millis: i64,
    datetime: String,
    gene: i64,
    gene_name: String,
    datacenter: i64,
    node: i64,
    sequence: i64,
}

impl From<SnowflakeId> for IdReport {
    fn from(id: SnowflakeId) -> Self {
        Self {
            id,
            timestamp: id.timestamp(),
            unix_millis: id.unix_millis(),
            datetime: id.datetime().to_rfc3339_opts(SecondsFormat::Millis, true),
            gene: id.gene().to_raw(),
            gene_name: id.gene().to_string(),
            datacenter: id.datacenter(),
            node: id.node(),
            sequence: id.sequence(),
        }
    }
}

#[derive(Debug, Serialize)]
struct NodeReport {
    datacenter: i64,
    node: i64,
    source: &'static str,
    clock_policy: &'static str,
}

pub fn run<W>(config: &CliConfig, out: &mut W) -> anyhow::Result<()>
where
    W: Write,
{
    match &config.task {
        Task::Generate { gene, count, json } => {
            let gene = match gene {
                GeneSource::Fixed(gene) => *gene,
                GeneSource::Key(key) => {
                    let gene = hash_string(key);
                    debug!(key = %key, %gene, "derived gene from key");
                    gene
                }
            };
            let node = build_node(config)?;
            generate(&node, gene, *count, *json, out)
        }
        Task::Inspect { ids, json } => inspect(ids, *json, out),
        Task::HashKey(key) => print_gene(hash_string(key), out),
        Task::HashIds(ids) => print_gene(hash_ids(ids), out),
        Task::Node { json } => {
            let (coordinates, source) = select_coordinates(config.node);
            let report = NodeReport {
                datacenter: coordinates.datacenter,
                node: coordinates.node,
                source,
                clock_policy: config.clock_policy.as_str(),
            };
            if *json {
                writeln!(out, "{}", serde_json::to_string(&report)?)?;
            } else {
                writeln!(
                    out,
                    "datacenter={} node={} source={} policy={}",
                    report.datacenter, report.node, report.source, report.clock_policy
                )?;
            }
            Ok(())
        }
    }
}

fn select_coordinates(selection: NodeSelection) -> (Coordinates, &'static str) {
    match selection {
        NodeSelection::Explicit(coordinates) => (coordinates, "arguments"),
        NodeSelection::Bootstrap => {
            let (coordinates, source) = resolve_coordinates(&SystemEnv, &SystemHost);
            (
                coordinates,
                match source {
                    CoordinateSource::Environment => "environment",
                    CoordinateSource::Fingerprint => "fingerprint",
                },
            )
        }
    }
}

fn build_node(config: &CliConfig) -> anyhow::Result<Node> {
    let node = match config.node {
        NodeSelection::Bootstrap => bootstrap_node(&SystemEnv, &SystemHost)?,
        NodeSelection::Explicit(Coordinates { datacenter, node }) => Node::new(datacenter, node)?,
    }
    .with_policy(config.clock_policy);

    let probe = node.generate(Gene::SYSTEM)?;
    info!(
        datacenter = node.datacenter(),
        node = node.node(),
        policy = %node.policy(),
        %probe,
        "snowflake node initialised"
    );
    Ok(node)
}

fn generate<W>(node: &Node, gene: Gene, count: usize, json: bool, out: &mut W) -> anyhow::Result<()>
where
    W: Write,
{
    for _ in 0..count {
        let id = node.generate(gene)?;
        if json {
            writeln!(out, "{}", serde_json::to_string(&IdReport::from(id))?)?;
        } else {
            writeln!(out, "{id}")?;
        }
    }
    Ok(())
}

fn inspect<W>(ids: &[SnowflakeId], json: bool, out: &mut W) -> anyhow::Result<()>
where
    W: Write,
{
    for (i, &id) in ids.iter().enumerate() {
        let report = IdReport::from(id);
        if json {
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
            continue;
        }
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "id          {}", report.id)?;
        writeln!(out, "timestamp   {}", report.timestamp)?;
        writeln!(out, "datetime    {}", report.datetime)?;
        writeln!(out, "gene        {} ({})", report.gene, report.gene_name)?;
        writeln!(out, "datacenter  {}", report.datacenter)?;
        writeln!(out, "node        {}", report.node)?;
        writeln!(out, "sequence    {}", report.sequence)?;
    }
    Ok(())
}

fn print_gene<W>(gene: Gene, out: &mut W) -> anyhow::Result<()>
where
    W: Write,
{
    writeln!(out, "{} {}", gene.to_raw(), gene)?;
    Ok(())
}
