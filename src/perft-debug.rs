use std::env;

use anyhow::{bail, Context, Result};

use dama_engine::utils::perf_test;
use dama_engine::Game;

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        bail!("usage: {} <depth> <expected>", args[0]);
    }
    let depth: usize = args[1]
        .parse()
        .with_context(|| format!("bad depth `{}`", args[1]))?;
    let expected: usize = args[2]
        .parse()
        .with_context(|| format!("bad expected count `{}`", args[2]))?;
    if perf_test(&Game::new(), depth, expected, true)? {
        Ok(())
    } else {
        bail!("perft({depth}) does not match {expected}")
    }
}
