//! ezr: Active Learning and Explanation CLI Tool
//!
//! A command-line tool for ranking rows, finding good rows with few labels,
//! and explaining what separates the best rows from the rest.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ezr::cli::{Cli, Commands};
use ezr::pipeline::{
    compare, load_data, rank_bins, smo, tree, Classes, Cols, Data, EzError, NaiveBayes, Settings,
    Value,
};
use ezr::report::{display_bins, display_comparison, role_label, ColumnSummary, TreeExport};
use ezr::utils::{
    create_progress_bar, create_spinner, finish_with_success, print_banner, print_completion,
    print_config, print_info, print_score, print_step_header, print_success,
};

/// Column names of the auto93 car dataset
const AUTO93: [&str; 8] = [
    "Clndrs", "Volume", "HpX", "Model", "origin", "Lbs-", "Acc+", "Mpg+",
];

const BEST: &str = "best";
const REST: &str = "rest";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let settings = cli.settings()?;

    print_banner(env!("CARGO_PKG_VERSION"));

    if let Commands::Header = cli.command {
        return run_header();
    }

    let input = cli.input()?;
    print_config(Some(input), &settings);

    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let data = load_data(input)?;
    finish_with_success(
        &spinner,
        &format!(
            "Loaded {} rows x {} columns in {:.2?}",
            data.rows.len(),
            data.cols.all.len(),
            step_start.elapsed()
        ),
    );

    match &cli.command {
        Commands::Info => ColumnSummary::new(&data).display(),
        Commands::Rank { every } => run_rank(data, *every),
        Commands::Bins => run_bins(&data, &settings)?,
        Commands::Tree { json } => run_tree(&data, &settings, input, json.as_deref())?,
        Commands::Smo => run_smo(&data, &settings)?,
        Commands::Compare { repeats } => run_compare(&data, &settings, *repeats)?,
        Commands::Bayes => run_bayes(&data, &settings)?,
        Commands::Header => {}
    }

    print_completion();
    Ok(())
}

fn run_header() -> Result<()> {
    let cols = Cols::new(AUTO93.iter().map(|s| s.to_string()).collect())?;
    print_step_header("Column roles");
    for col in &cols.all {
        println!(
            "      {:<8} {}",
            col.txt(),
            style(role_label(col.role())).cyan()
        );
    }
    let names = |at: &[usize]| {
        at.iter()
            .map(|&i| cols.names[i].as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!();
    print_info(&format!("x: {}", names(&cols.x)));
    print_info(&format!("y: {}", names(&cols.y)));
    print_completion();
    Ok(())
}

fn run_rank(mut data: Data, every: usize) {
    print_step_header("Rows by distance to heaven");
    println!("      {:>5}  {:>6}  {}", "rank", "d2h", data.cols.names.join(", "));
    data.order();
    for (i, row) in data.rows.iter().enumerate().step_by(every.max(1)) {
        println!("      {:>5}  {:>6.3}  {}", i + 1, data.d2h(row), join(row));
    }
    println!("      {:>5}  {:>6}  {}", "mid", "", join(&data.mids()));
}

/// Top and bottom sqrt(N) rows of the dataset, ranked by distance to heaven
fn best_rest(data: &Data) -> Result<Classes> {
    let mut ranked = data.clone();
    ranked.order();
    let total = ranked.rows.len();
    if total == 0 {
        return Err(EzError::EmptyDataset.into());
    }
    let n = ((total as f64).sqrt() as usize).max(1);
    let mut classes = Classes::new();
    classes.insert(BEST.to_string(), ranked.rows[..n].to_vec());
    classes.insert(REST.to_string(), ranked.rows[total - n..].to_vec());
    Ok(classes)
}

fn run_bins(data: &Data, settings: &Settings) -> Result<()> {
    let classes = best_rest(data)?;
    let ranked = rank_bins(data, &classes, BEST, REST, settings)?;
    display_bins(&ranked, BEST, REST);
    Ok(())
}

fn run_tree(
    data: &Data,
    settings: &Settings,
    input: &std::path::Path,
    json: Option<&std::path::Path>,
) -> Result<()> {
    let classes = best_rest(data)?;
    let node = tree::grow(data, &classes, BEST, REST, settings)?;
    print_step_header("Explanation tree");
    for line in node.render(BEST, REST).lines() {
        println!("      {}", line);
    }
    if let Some(path) = json {
        TreeExport::new(&node, Some(input), BEST, REST, settings).write(path)?;
        print_success(&format!("Tree written to {}", path.display()));
    }
    Ok(())
}

fn run_smo(data: &Data, settings: &Settings) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let result = smo(data, settings, &mut rng)?;
    print_step_header("Active learning");
    println!("      {}", data.cols.names.join(", "));
    println!("      {}", join(&result.best));
    print_score("d2h:", data.d2h(&result.best));
    print_info(&format!("Labeled {} of {} rows", result.evaluations(), data.rows.len()));
    Ok(())
}

fn run_compare(data: &Data, settings: &Settings, repeats: usize) -> Result<()> {
    let spinner = create_spinner(&format!("Running {} repeats...", repeats));
    let cmp = compare(data, settings, repeats)?;
    finish_with_success(&spinner, "Comparison complete");
    display_comparison(&cmp);
    Ok(())
}

fn run_bayes(data: &Data, settings: &Settings) -> Result<()> {
    let mut nb = NaiveBayes::new(&data.cols, settings)?;
    let pb = create_progress_bar(data.rows.len() as u64, "Classifying");
    for row in &data.rows {
        nb.observe(row.clone())?;
        pb.inc(1);
    }
    finish_with_success(&pb, "Classification complete");
    print_step_header("Naive Bayes");
    print_info(&format!(
        "Classes: {}",
        nb.labels().collect::<Vec<_>>().join(", ")
    ));
    print_score("accuracy:", nb.accuracy());
    Ok(())
}

fn join(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
