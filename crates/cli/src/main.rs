mod scenario;

use crate::scenario::ScenarioConfig;
use anyhow::{anyhow, Context};
use config::{Config, File};
use hexlogic::{
    angle, dist_lim_flood_fill, hex_to_pixel, timed, FloodFillConfig,
    GraphMatrix, HexCoords, RectCoords, SearchOptions,
};
use log::{info, warn, LevelFilter};
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::{
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};
use validator::Validate;

/// CLI for running pathfinding scenarios on a hex tile disk.
#[derive(Debug, StructOpt)]
#[structopt(name = "hexlogic")]
struct Opt {
    /// Path to a config file that defines the scenario to run. Supported
    /// formats: JSON, TOML. If omitted, a built-in scenario is used
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// The search algorithm(s) to run. Supported algorithms:
    ///
    /// bfs - Breadth-first search, fewest steps
    ///
    /// dijkstra - Dijkstra's algorithm, lowest cost
    ///
    /// a_star - A* search, lowest cost guided by distance to the goal
    ///
    /// If none are given, all of them are run.
    #[structopt(short, long)]
    algorithms: Vec<Algorithm>,

    /// Skip searches whose start or goal can't be entered
    #[structopt(long)]
    test_accessibility: bool,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Path searches available on the graph
#[derive(Copy, Clone, Debug, Display, EnumString, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
enum Algorithm {
    Bfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    const ALL: [Self; 3] = [Self::Bfs, Self::Dijkstra, Self::AStar];

    fn run(
        self,
        graph: &GraphMatrix,
        start: HexCoords,
        goal: HexCoords,
        options: SearchOptions,
    ) -> hexlogic::Result<Option<Vec<HexCoords>>> {
        match self {
            Self::Bfs => graph.breadth_first_search(&start, &goal, options),
            Self::Dijkstra => graph.dijkstras_algorithm(&start, &goal, options),
            Self::AStar => graph.a_star_algorithm(&start, &goal, options),
        }
    }
}

/// Result of a single search, as printed
#[derive(Debug, Serialize)]
struct SearchReport {
    algorithm: Algorithm,
    /// Number of steps taken, not counting the start
    steps: Option<usize>,
    path: Option<Vec<HexCoords>>,
}

/// Everything the CLI prints, serialized as JSON
#[derive(Debug, Serialize)]
struct ScenarioReport {
    tiles: usize,
    edges: usize,
    start_pixel: RectCoords,
    goal_pixel: RectCoords,
    /// Heading from start to goal on screen, in degrees
    heading: f64,
    /// Number of tiles the flood fill reached from the start
    flood_fill_reach: usize,
    searches: Vec<SearchReport>,
}

fn load_config(config_path: &Path) -> anyhow::Result<ScenarioConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let scenario = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => {
            info!("No config given, using the built-in scenario");
            ScenarioConfig::default()
        }
    };
    scenario.validate().context("invalid scenario config")?;

    let tiles = timed!("Tile generation", log::Level::Info, scenario.tiles())?;
    let graph = GraphMatrix::new(&tiles).context("error building graph")?;
    info!(
        "Built graph of {} tiles and {} edges",
        graph.len(),
        graph.edge_count()
    );

    let flood_fill = dist_lim_flood_fill(
        &scenario.start,
        scenario.flood_distance,
        &tiles,
        &FloodFillConfig::default(),
    )?;

    let options = SearchOptions {
        test_accessibility: opt.test_accessibility,
    };
    let algorithms = if opt.algorithms.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        opt.algorithms.clone()
    };
    let mut searches = Vec::with_capacity(algorithms.len());
    for algorithm in algorithms {
        let path = timed!(
            format!("Running {}", algorithm),
            log::Level::Info,
            algorithm.run(&graph, scenario.start, scenario.goal, options)
        )
        .with_context(|| format!("error running {}", algorithm))?;
        if path.is_none() {
            warn!(
                "{} found no path from {} to {}",
                algorithm, scenario.start, scenario.goal
            );
        }
        searches.push(SearchReport {
            algorithm,
            steps: path.as_ref().map(|path| path.len() - 1),
            path,
        });
    }

    let report = ScenarioReport {
        tiles: tiles.len(),
        edges: graph.edge_count(),
        start_pixel: hex_to_pixel(&scenario.start, &scenario.layout)?,
        goal_pixel: hex_to_pixel(&scenario.goal, &scenario.layout)?,
        heading: angle(
            &scenario.start,
            3,
            &scenario.goal,
            3,
            &scenario.layout,
        )?,
        flood_fill_reach: flood_fill.len(),
        searches,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
