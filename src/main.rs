#[macro_use]
extern crate log;

use log::LevelFilter;
use simplelog::{Config, SimpleLogger};
use std::env;
use std::io::{self, BufRead};
use std::process;
use treap_rotations::TreapSet;

fn parse_key(arg: Option<&&str>) -> Option<i64> {
    let arg = arg?;
    match arg.parse() {
        Ok(key) => Some(key),
        Err(err) => {
            error!("invalid key `{}`: {}", arg, err);
            None
        },
    }
}

fn main() {
    if let Err(err) = SimpleLogger::init(LevelFilter::Info, Config::default()) {
        eprintln!("could not initialize logger: {}", err);
    }

    let mut treap = match env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => TreapSet::with_seed(seed),
            Err(err) => {
                error!("invalid seed `{}`: {}", arg, err);
                process::exit(1);
            },
        },
        None => TreapSet::new(),
    };

    let input = io::stdin();
    for line in input.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("could not read command: {}", err);
                break;
            },
        };
        let args: Vec<&str> = line.split_whitespace().collect();
        let key = parse_key(args.get(1));
        match args.first().cloned() {
            Some("insert") => {
                let result = match args.get(2) {
                    Some(arg) => match arg.parse::<u32>() {
                        Ok(priority) => treap.try_insert_with_priority(key, priority),
                        Err(err) => {
                            error!("invalid priority `{}`: {}", arg, err);
                            continue;
                        },
                    },
                    None => treap.try_insert(key),
                };
                match result {
                    Ok(inserted) => println!("{}", inserted),
                    Err(err) => error!("insert failed: {}", err),
                }
            },
            Some("delete") => match key {
                Some(key) => println!("{}", treap.remove(&key)),
                None => error!("delete requires an integer key"),
            },
            Some("find") => match key {
                Some(key) => println!("{}", treap.contains(&key)),
                None => error!("find requires an integer key"),
            },
            Some("print") => print!("{}", treap),
            Some("check") => match treap.check_invariants() {
                Ok(()) => info!("{} keys, height {}", treap.len(), treap.height()),
                Err(err) => error!("invariant check failed: {}", err),
            },
            Some(command) => warn!("unknown command `{}`", command),
            None => {},
        }
    }
}
