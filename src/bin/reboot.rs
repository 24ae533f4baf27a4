use std::io;
use std::io::prelude::*;

use tracing_subscriber::prelude::*;

use disjoint_cuboids::cuboid::Cuboid;
use disjoint_cuboids::instruction::parse_instructions;
use disjoint_cuboids::set::{run_sequence, run_sequence_bounded};

fn run() -> Result<(), String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("failed to read input: {}", e))?;
    let instructions = parse_instructions(&input).map_err(|e| e.to_string())?;

    let bounds =
        Cuboid::new((-50, 50), (-50, 50), (-50, 50)).map_err(|e| e.to_string())?;
    let bounded = run_sequence_bounded(&instructions, &bounds).map_err(|e| e.to_string())?;
    println!("bounded count (|x|,|y|,|z| <= 50): {}", bounded);

    let unbounded = run_sequence(&instructions).map_err(|e| e.to_string())?;
    println!("unbounded count: {}", unbounded);
    Ok(())
}

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
