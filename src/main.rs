use std::{
    fs::File,
    io,
    io::prelude::*,
    thread,
    time::Duration,
};

use docopt::Docopt;
use error_chain::bail;
use log::info;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;

use maze3d::{
    analysis,
    generators::{self, Algorithm},
    grid::Grid,
    pathing,
    random,
    settings::Settings,
};

const USAGE: &str = "Maze3D

Usage:
    maze3d_driver -h | --help
    maze3d_driver [(backtracking|prim|kruskal)] [--size=<n>] [--seed=<s>] [--animate --frame-delay=<ms>] [--text --text-out=<path>] [--save-edges=<path>] [--longest-path]

Options:
    -h --help              Show this screen.
    --size=<n>             Edge length of the cube, the grid holds n * n * n cells [default: 25].
    --seed=<s>             Seed for the random source, the same seed gives the same maze.
    --animate              Build the maze one passage per step, reporting each step.
    --frame-delay=<ms>     Pause between animation steps in milliseconds [default: 0].
    --text                 Render the maze as text, one z layer after another.
    --text-out=<path>      Output file path for the text rendering instead of stdout.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --longest-path         Report the longest route through the finished maze.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_backtracking: bool,
    cmd_prim: bool,
    cmd_kruskal: bool,
    flag_size: usize,
    flag_seed: Option<u64>,
    flag_animate: bool,
    flag_frame_delay: u64,
    flag_text: bool,
    flag_text_out: String,
    flag_save_edges: String,
    flag_longest_path: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Maze(::maze3d::errors::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = match Docopt::new(USAGE).and_then(|d| d.deserialize()) {
        Ok(args) => args,
        // --help is reported as a non fatal docopt error
        Err(e) if !e.fatal() => e.exit(),
        Err(e) => return Err(e.into()),
    };

    let settings = settings_from_args(&args);
    let mut maze_grid = settings.empty_grid()?;
    let rng = random::rng_from_seed(args.flag_seed);

    info!("generating size {} maze with {}, seed {:?}",
          settings.size,
          settings.algorithm,
          args.flag_seed);
    generate_maze_on_grid(&mut maze_grid,
                          &settings,
                          rng,
                          Duration::from_millis(args.flag_frame_delay),
                          args.flag_text && args.flag_text_out.is_empty())?;

    if !analysis::is_spanning_tree(&maze_grid) {
        bail!("{} left the grid without a spanning tree", settings.algorithm);
    }
    info!("maze complete: {} passages over {} cells",
          maze_grid.links_count(),
          maze_grid.elements());

    if args.flag_text {
        if args.flag_text_out.is_empty() {
            println!("{}", maze_grid);
        } else {
            write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    if args.flag_longest_path {
        match pathing::longest_path(&maze_grid) {
            Some(path) => {
                let (start, end) = (path[0], path[path.len() - 1]);
                info!("longest path: {} passages from {} to {}", path.len() - 1, start, end);
                println!("longest path: {} passages from {} to {}", path.len() - 1, start, end);
            }
            None => {
                info!("longest path: none");
                println!("longest path: none");
            }
        }
    }

    Ok(())
}

fn settings_from_args(maze_args: &MazeArgs) -> Settings {
    let algorithm = match (maze_args.cmd_backtracking, maze_args.cmd_prim, maze_args.cmd_kruskal) {
        (_, true, _) => Algorithm::Prim,
        (_, _, true) => Algorithm::Kruskal,
        (true, _, _) => Algorithm::RecursiveBacktracking,
        // no algorithm named on the command line
        _ => Settings::default().algorithm,
    };

    Settings {
        size: maze_args.flag_size,
        animate: maze_args.flag_animate,
        algorithm,
    }
}

/// Run the configured generator over the grid, a step at a time when animating.
fn generate_maze_on_grid(maze_grid: &mut Grid,
                         settings: &Settings,
                         rng: XorShiftRng,
                         frame_delay: Duration,
                         show_text: bool)
                         -> Result<()> {

    let mut generator = settings.algorithm.generator(maze_grid, rng)?;

    if !settings.animate {
        generator.build();
        return Ok(());
    }

    let connectors = generator.grid().connectors();
    let passages = generators::animate(generator.as_mut(), |grid, passages| {
        println!("step {}/{}", passages, connectors);
        if show_text {
            println!("{}", grid);
        }
        if frame_delay > Duration::from_millis(0) {
            thread::sleep(frame_delay);
        }
    });
    info!("animation finished with {} passages", passages);
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.elements();
    let edges_count = maze_grid.links_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze_grid.iter_links() {
        let src_as_1_based_index = maze_grid.index(src) + 1;
        let dst_as_1_based_index = maze_grid.index(dst) + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
