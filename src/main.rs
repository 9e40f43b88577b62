use std::env;
use std::error::Error;
use std::process;

use clap::{App, Arg};
use log::debug;

use sokoban_engine::config::Config;
use sokoban_engine::game::Game;
use sokoban_engine::LoadLevel;

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-engine")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("no-optimize")
                .short("n")
                .long("no-optimize")
                .help("print the solution exactly as the solver found it"),
        )
        .arg(
            Arg::with_name("steps")
                .short("s")
                .long("steps")
                .help("print the level after every move, not just after pushes"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("print search progress and statistics"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let config = Config {
        optimize: !matches.is_present("no-optimize"),
        include_steps: matches.is_present("steps"),
        verbose: matches.is_present("verbose"),
    };
    debug!("{:?}", config);

    // required so it's always present
    let path = matches.value_of("file").unwrap();

    if let Err(err) = run(config, path) {
        let current_dir = env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        eprintln!("Can't solve {} in {}: {}", path, current_dir, err);
        process::exit(1);
    }
}

fn run(config: Config, path: &str) -> Result<(), Box<dyn Error>> {
    let level = path.load_level()?.normalized()?;
    let game = Game::new(&level)?;

    println!("Solving {}...", path);
    let solver_ok = game.solve(config.verbose)?;
    if config.verbose {
        println!("{}", solver_ok.stats);
    }

    match solver_ok.moves {
        None => println!("No solution"),
        Some(pushes) => {
            let pushes = if config.optimize {
                game.optimize(&pushes)?
            } else {
                pushes
            };
            let moves = game.expand_track(&pushes)?;

            println!("Found solution:");
            print!("{}", level.xsb_solution(&moves, config.include_steps));
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
        }
    }
    Ok(())
}
