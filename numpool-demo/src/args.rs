use anyhow::{Context, bail};

#[derive(Debug)]
pub struct Args {
    pub max: u32,
    pub rounds: usize,
    pub seed: u64,
    pub verbose: bool
}

impl Default for Args {
    fn default() -> Self {
        Self { max: numpool::DEFAULT_MAX, rounds: 10_000, seed: 0, verbose: false }
    }
}

pub fn print_usage() {
    println!(
        r#"USAGE:
        {} [OPTIONS]

OPTIONS:
        --help              -h  print this help message
        --max <n>               highest id in the pool (default 10000000)
        --rounds <n>            number of random allocate/release steps
        --seed <n>              seed for the random churn
        --verbose           -v  log every pool event
"#,
        std::env::args().next().unwrap_or_else(|| "numpool-demo".into())
    );
}

impl Args {
    pub fn from_env() -> anyhow::Result<Option<Args>> {
        Self::parse(std::env::args().skip(1))
    }

    /// Returns `None` when help was requested.
    pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Option<Args>> {
        let mut result = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => return Ok(None),
                "--verbose" | "-v" => result.verbose = true,
                "--max" | "--rounds" | "--seed" => {
                    let Some(value) = args.next() else {
                        bail!("Missing argument for \"{arg}\"");
                    };
                    match arg.as_str() {
                        "--max" => result.max = value.parse().with_context(|| format!("bad --max \"{value}\""))?,
                        "--rounds" => result.rounds = value.parse().with_context(|| format!("bad --rounds \"{value}\""))?,
                        _ => result.seed = value.parse().with_context(|| format!("bad --seed \"{value}\""))?
                    }
                }
                _ => bail!("Unknown argument \"{arg}\"")
            }
        }
        Ok(Some(result))
    }
}
