use std::thread;

use anyhow::ensure;
use numpool::{RangePool, SharedPool};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{info, Level};

mod args;

fn churn(pool: &mut RangePool, rounds: usize, seed: u64) -> anyhow::Result<Vec<u32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut held = Vec::new();

    for _ in 0..rounds {
        if held.is_empty() || rng.random_bool(0.6) {
            match pool.allocate() {
                0 => ensure!(held.len() == pool.max() as usize, "pool ran dry with {} ids out", held.len()),
                id => held.push(id)
            }
        } else {
            let id = held.swap_remove(rng.random_range(0..held.len()));
            ensure!(pool.release(id), "release of {id} was refused");
            ensure!(!pool.release(id), "{id} was released twice");
        }
    }

    ensure!(pool.allocated() as usize == held.len(), "pool lost track of {} ids", held.len());
    pool.check()?;
    Ok(held)
}

fn main() -> anyhow::Result<()> {
    let Some(args) = args::Args::from_env()? else {
        args::print_usage();
        return Ok(());
    };

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::TRACE } else { Level::INFO })
        .init();

    let mut pool = RangePool::new(args.max)?;
    let held = churn(&mut pool, args.rounds, args.seed)?;
    info!(rounds = args.rounds, held = held.len(), entries = pool.entries().len(), "churn done");

    ensure!(!pool.release(0), "id 0 was accepted");
    if let Some(above) = args.max.checked_add(1) {
        ensure!(!pool.release(above), "id {above} above max was accepted");
    }

    let rebuilt = RangePool::with_allocated(args.max, held.iter().copied())?;
    ensure!(rebuilt == pool, "pool rebuilt from held ids differs");

    if pool.entries().len() <= 32 {
        println!("{pool}");
    }
    println!("{} allocated, {} available", pool.allocated(), pool.available());

    let shared = SharedPool::from(pool);
    let workers = (0..4).map(|_| {
        let shared = shared.clone();
        thread::spawn(move || (0..1_000).filter_map(|_| shared.get()).collect::<Vec<_>>().len())
    }).collect::<Vec<_>>();
    for w in workers {
        let taken = w.join().map_err(|_| anyhow::anyhow!("worker panicked"))?;
        info!(taken, "worker returned its ids");
    }
    shared.with(|p| {
        ensure!(p.allocated() as usize == held.len(), "shared pool leaked ids");
        Ok(())
    })
}
