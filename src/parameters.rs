use crate::algorithm::check_parameters;
use crate::weight_function::WeightFunction;
use std::str::FromStr;
use structopt::clap::{Error, ErrorKind};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "skew-graph",
    about = "Generates a graph by skewed preferential attachment (p ~ degree^exponent)"
)]
pub struct Parameters {
    #[structopt(short = "a", long, default_value = "scan")]
    pub algorithm: SamplingAlgorithm,

    #[structopt(short = "s", long)]
    pub seed_value: Option<u64>,

    /// Final number of nodes, including the seed clique
    #[structopt(short = "n", long)]
    pub nodes: usize,

    /// Edges added with each new node; also the size of the seed clique
    #[structopt(short = "d", long, default_value = "1")]
    pub initial_degree: usize,

    #[structopt(short = "e", long, default_value = "1.0")]
    pub exponent: f64,

    /// Relabel nodes so that lower ids have higher degrees
    #[structopt(short = "o", long)]
    pub order_by_degree: bool,

    #[structopt(short = "f", long, default_value = "adjacency")]
    pub format: OutputFormat,

    #[structopt(short = "r", long)]
    pub report_degree_distribution: bool,
}

#[derive(Eq, Clone, Copy, PartialEq, Debug)]
pub enum SamplingAlgorithm {
    LinearScan,
    Fenwick,
}

impl FromStr for SamplingAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scan" => Ok(SamplingAlgorithm::LinearScan),
            "fenwick" => Ok(SamplingAlgorithm::Fenwick),
            _ => Err(format!("Unknown algorithm type: {}", s)),
        }
    }
}

#[derive(Eq, Clone, Copy, PartialEq, Debug)]
pub enum OutputFormat {
    Adjacency,
    Edges,
    None,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adjacency" | "adj" => Ok(OutputFormat::Adjacency),
            "edges" => Ok(OutputFormat::Edges),
            "none" => Ok(OutputFormat::None),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

impl Parameters {
    /// Whether the adjacency lists have to be materialized, or streaming the edges into
    /// a counter suffices (the degree distribution only needs per-node counts).
    pub fn needs_graph(&self) -> bool {
        self.order_by_degree || self.format != OutputFormat::None
    }
}

pub fn get_and_check_options() -> Parameters {
    let opt = Parameters::from_args();

    if let Err(e) = check_parameters(
        opt.nodes,
        opt.initial_degree,
        &WeightFunction::new(opt.exponent),
    ) {
        Error::with_description(&e.to_string(), ErrorKind::InvalidValue).exit();
    }

    opt
}
