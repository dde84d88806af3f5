mod graph_model {
    use std::collections::HashMap;
    use std::fmt;

    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Graph {
        adjacency_list: HashMap<String, Vec<String>>, // node -> outgoing neighbors, declared order
    }

    impl Graph {
        pub fn new() -> Self {
            Self::default()
        }

        pub(crate) fn declare(&mut self, node: String, neighbors: Vec<String>) {
            self.adjacency_list.insert(node, neighbors); // replaces any earlier declaration
        }

        pub fn neighbors(&self, node: &str) -> &[String] {
            self.adjacency_list
                .get(node)
                .map(Vec::as_slice)
                .unwrap_or(&[]) // undeclared nodes have no out-edges
        }

        pub fn contains(&self, node: &str) -> bool {
            self.adjacency_list.contains_key(node)
        }

        pub fn len(&self) -> usize {
            self.adjacency_list.len()
        }

        pub fn is_empty(&self) -> bool {
            self.adjacency_list.is_empty()
        }

        pub fn nodes(&self) -> Vec<&str> {
            let mut nodes: Vec<&str> = self.adjacency_list.keys().map(String::as_str).collect();
            nodes.sort_unstable(); // sorted so exports are stable
            nodes
        }

        pub fn all_nodes(&self) -> Vec<&str> {
            let mut nodes: Vec<&str> = self
                .adjacency_list
                .iter()
                .flat_map(|(node, neighbors)| {
                    std::iter::once(node.as_str()).chain(neighbors.iter().map(String::as_str))
                })
                .collect();
            nodes.sort_unstable();
            nodes.dedup(); // includes nodes that only appear as a neighbor
            nodes
        }

        pub fn edges(&self) -> Vec<(&str, &str)> {
            self.nodes()
                .into_iter()
                .flat_map(|node| self.neighbors(node).iter().map(move |n| (node, n.as_str())))
                .collect()
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Path(Vec<String>);

    impl Path {
        pub(crate) fn from_nodes(nodes: Vec<String>) -> Self {
            debug_assert!(!nodes.is_empty()); // start..=goal, never empty
            Self(nodes)
        }

        pub fn nodes(&self) -> &[String] {
            &self.0
        }

        pub fn start(&self) -> &str {
            &self.0[0]
        }

        pub fn goal(&self) -> &str {
            &self.0[self.0.len() - 1]
        }

        pub fn hop_count(&self) -> usize {
            self.0.len() - 1
        }

        pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
            self.0
                .windows(2)
                .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        }

        pub fn contains_edge(&self, from: &str, to: &str) -> bool {
            self.edges().any(|(a, b)| a == from && b == to)
        }
    }

    impl fmt::Display for Path {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.nodes().join(" → "))
        }
    }
}

mod graph_parser {
    use tracing::debug;

    use crate::graph_model::Graph;

    pub fn normalize_identifier(token: &str) -> String {
        token.trim().to_uppercase()
    }

    pub fn parse(text: &str) -> Graph {
        let mut graph = Graph::new();

        for (index, line) in text.lines().enumerate() {
            let Some((node, neighbors)) = line.split_once(':') else {
                if !line.trim().is_empty() {
                    debug!(line = index + 1, "skipping line without ':'");
                }
                continue;
            };

            let node = normalize_identifier(node);
            if node.is_empty() {
                debug!(line = index + 1, "skipping declaration with empty node name");
                continue;
            }

            let neighbors: Vec<String> = neighbors
                .split(',')
                .map(normalize_identifier)
                .filter(|neighbor| !neighbor.is_empty()) // trailing commas, `NODE:`
                .collect();
            graph.declare(node, neighbors); // last declaration of a node wins
        }

        debug!(nodes = graph.len(), "parsed graph");
        graph
    }
}

mod path_finder {
    use std::collections::{HashSet, VecDeque};
    use tracing::debug;

    use crate::graph_model::{Graph, Path};

    // BFS over whole paths; earlier-listed neighbors win ties
    pub fn shortest_path(graph: &Graph, start: &str, goal: &str) -> Option<Path> {
        if start == goal {
            return Some(Path::from_nodes(vec![start.to_string()]));
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<Vec<String>> = VecDeque::new();
        queue.push_back(vec![start.to_string()]);

        while let Some(path) = queue.pop_front() {
            let Some(node) = path.last() else {
                continue;
            };
            if visited.contains(node) {
                continue; // already expanded through an earlier path
            }

            for neighbor in graph.neighbors(node) {
                let mut new_path = path.clone();
                new_path.push(neighbor.clone());
                if neighbor.as_str() == goal {
                    debug!(expanded = visited.len() + 1, "goal reached");
                    return Some(Path::from_nodes(new_path));
                }
                queue.push_back(new_path);
            }
            visited.insert(node.clone()); // marked only after expansion
        }

        debug!(start, goal, expanded = visited.len(), "queue exhausted");
        None
    }
}

mod graph_input {
    use std::io::Read;
    use std::path::Path;

    use anyhow::{Context, Result};

    pub const SAMPLE_GRAPH: &str = "A:B,C\nB:D,E\nC:F\nD:\nE:F\nF:";

    pub fn load_graph_text(source: Option<&Path>) -> Result<String> {
        match source {
            None => Ok(SAMPLE_GRAPH.to_string()), // no input given
            Some(path) if path == Path::new("-") => {
                read_graph_text(std::io::stdin().lock()).context("failed to read graph from stdin")
            }
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read graph file {}", path.display())),
        }
    }

    pub fn read_graph_text<R: Read>(mut reader: R) -> Result<String> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(text)
    }
}

mod presenter {
    use std::io::Write;

    use serde::Serialize;
    use thiserror::Error;

    use crate::graph_model::{Graph, Path};
    use crate::graph_parser::normalize_identifier;

    #[derive(Debug, Error, PartialEq)]
    pub enum QueryError {
        #[error("{role} node is empty, both start and goal are required")]
        MissingEndpoint { role: &'static str },
        #[error("node {0:?} is not declared in the graph")]
        UnknownNode(String),
    }

    pub fn validate_endpoints(
        graph: &Graph,
        start: &str,
        goal: &str,
    ) -> Result<(String, String), QueryError> {
        let start = normalize_identifier(start);
        let goal = normalize_identifier(goal);
        if start.is_empty() {
            return Err(QueryError::MissingEndpoint { role: "start" });
        }
        if goal.is_empty() {
            return Err(QueryError::MissingEndpoint { role: "goal" });
        }
        for node in [&start, &goal] {
            if !graph.contains(node) {
                return Err(QueryError::UnknownNode(node.clone()));
            }
        }
        Ok((start, goal))
    }

    pub fn describe(outcome: Option<&Path>) -> String {
        match outcome {
            Some(path) => format!("Shortest path: {}", path),
            None => "No path found from start node to goal node.".to_string(),
        }
    }

    #[derive(Debug, Serialize, PartialEq)]
    pub struct EdgeRow {
        pub from: String,
        pub to: String,
        pub on_path: bool,
    }

    #[derive(Debug, Clone, Copy, Serialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    pub enum NodeRole {
        Start,
        Goal,
        Other,
    }

    #[derive(Debug, Serialize, PartialEq)]
    pub struct NodeRow {
        pub node: String,
        pub role: NodeRole,
    }

    pub fn edge_rows(graph: &Graph, path: Option<&Path>) -> Vec<EdgeRow> {
        graph
            .edges()
            .into_iter()
            .map(|(from, to)| EdgeRow {
                from: from.to_string(),
                to: to.to_string(),
                on_path: path.is_some_and(|p| p.contains_edge(from, to)),
            })
            .collect()
    }

    pub fn node_rows(graph: &Graph, start: &str, goal: &str) -> Vec<NodeRow> {
        graph
            .all_nodes()
            .into_iter()
            .map(|node| {
                let role = if node == start {
                    NodeRole::Start // wins when start == goal
                } else if node == goal {
                    NodeRole::Goal
                } else {
                    NodeRole::Other
                };
                NodeRow { node: node.to_string(), role }
            })
            .collect()
    }

    pub fn write_csv<W: Write, R: Serialize>(rows: &[R], out: W) -> csv::Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "bfs_pathfinder")]
#[command(about = "Shortest path (by edge count) between two nodes of a directed graph", long_about = None)]
struct Cli {
    /// Start node (case-insensitive)
    start: String,

    /// Goal node (case-insensitive)
    goal: String,

    /// Graph file with one `NODE:NEIGHBOR1,NEIGHBOR2` line per node ("-" reads stdin,
    /// a small sample graph is used when omitted)
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Write every edge with a path-membership flag as CSV
    #[arg(long)]
    edges_csv: Option<PathBuf>,

    /// Write every node with its role (start, goal, other) as CSV
    #[arg(long)]
    nodes_csv: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    // logs go to stderr, stdout only carries the result
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let text = graph_input::load_graph_text(cli.graph.as_deref())?;
    let graph = graph_parser::parse(&text);
    if graph.is_empty() {
        warn!("graph text has no `NODE:NEIGHBORS` declarations");
    }
    info!(nodes = graph.len(), edges = graph.edges().len(), "graph loaded");

    let (start, goal) = presenter::validate_endpoints(&graph, &cli.start, &cli.goal)?;
    let path = path_finder::shortest_path(&graph, &start, &goal);
    match &path {
        Some(found) => info!(
            start = found.start(),
            goal = found.goal(),
            hops = found.hop_count(),
            "path found"
        ),
        None => info!(%start, %goal, "no path"),
    }
    println!("{}", presenter::describe(path.as_ref()));

    if let Some(file) = &cli.edges_csv {
        let out = File::create(file)
            .with_context(|| format!("failed to create {}", file.display()))?;
        presenter::write_csv(&presenter::edge_rows(&graph, path.as_ref()), out)
            .with_context(|| format!("failed to write edges to {}", file.display()))?;
        info!(file = %file.display(), "edges written");
    }
    if let Some(file) = &cli.nodes_csv {
        let out = File::create(file)
            .with_context(|| format!("failed to create {}", file.display()))?;
        presenter::write_csv(&presenter::node_rows(&graph, &start, &goal), out)
            .with_context(|| format!("failed to write nodes to {}", file.display()))?;
        info!(file = %file.display(), "nodes written");
    }
    Ok(())
}
