use skew_graph::parameters::{get_and_check_options, OutputFormat, Parameters, SamplingAlgorithm};
use std::error::Error;
use std::io::{stdout, BufWriter, Write};
use std::time::Instant;

use pcg_rand::Pcg64;
use rand::SeedableRng;
use skew_graph::algorithm::algo_fenwick::AlgoFenwick;
use skew_graph::algorithm::algo_linear_scan::AlgoLinearScan;
use skew_graph::algorithm::{expected_number_of_edges, Algorithm};
use skew_graph::edge_writer::{
    degree_distribution, report_distribution, write_adjacency, write_edge_list, DegreeCount,
    EdgeCounter,
};
use skew_graph::ranking::rank_by_degree;

fn execute<R: rand::Rng, T: Algorithm<R>>(rng: R, opt: &Parameters) -> Result<(), Box<dyn Error>> {
    let mut algorithm = T::from_parameters(rng, opt)?;

    if !opt.needs_graph() && opt.report_degree_distribution {
        let mut writer = DegreeCount::new(opt.nodes);
        let start = Instant::now();

        algorithm.run(&mut writer)?;
        let runtime = start.elapsed();

        assert_eq!(
            writer.number_of_edges(),
            expected_number_of_edges(opt.nodes, opt.initial_degree)
        );

        writer.report_distribution(&mut stdout().lock())?;
        eprintln!("runtime_s:{}", runtime.as_secs_f64());
        return Ok(());
    }

    if !opt.needs_graph() {
        let mut writer = EdgeCounter::default();
        let start = Instant::now();

        algorithm.run(&mut writer)?;
        let runtime = start.elapsed();

        assert_eq!(
            writer.number_of_edges(),
            expected_number_of_edges(opt.nodes, opt.initial_degree)
        );

        eprintln!("runtime_s:{}", runtime.as_secs_f64());
        return Ok(());
    }

    let start = Instant::now();
    let mut graph = algorithm.build()?;
    if opt.order_by_degree {
        graph = rank_by_degree(&graph);
    }
    let runtime = start.elapsed();

    let stdout = stdout();
    let mut out = BufWriter::new(stdout.lock());

    match opt.format {
        OutputFormat::Adjacency => write_adjacency(&graph, &mut out)?,
        OutputFormat::Edges => write_edge_list(&graph, &mut out)?,
        OutputFormat::None => {}
    }

    if opt.report_degree_distribution {
        let distr = degree_distribution(graph.degrees().into_iter());
        report_distribution(&distr, &mut out)?;
    }

    out.flush()?;
    eprintln!("runtime_s:{}", runtime.as_secs_f64());

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = get_and_check_options();

    let rng = if let Some(seed_value) = opt.seed_value {
        Pcg64::seed_from_u64(seed_value)
    } else {
        Pcg64::from_entropy()
    };

    match opt.algorithm {
        SamplingAlgorithm::LinearScan => execute::<_, AlgoLinearScan<_>>(rng, &opt),
        SamplingAlgorithm::Fenwick => execute::<_, AlgoFenwick<_>>(rng, &opt),
    }
}
