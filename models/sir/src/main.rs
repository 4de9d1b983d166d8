use std::path::PathBuf;

use anyhow::Context;
use log::{debug, info};
use sir::output::{CHART_HEADERS, chart_filename, chart_rows};
use sir::parameters::Parameters;
use sir_runner::{Environment, init_logging};

fn main() -> anyhow::Result<()> {
    // A request file may be given as the only argument; otherwise read stdin
    let env = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Environment::from_path(&path)
            .with_context(|| format!("failed to read run request {}", path.display()))?,
        None => Environment::from_stdin().context("failed to read run request from stdin")?,
    };
    init_logging(env.log_level)?;

    let env = env.with_input_type::<Parameters>()?;
    let parameters = &env.input;
    debug!("replicate {} with seed {}", env.replicate, env.seed);

    let outcome = parameters
        .scenario
        .run(&parameters.model(), &parameters.run_options(env.seed))
        .with_context(|| format!("{} scenario failed", parameters.scenario.tag()))?;

    let rows = chart_rows(&outcome);
    let written = env.write_csv(&chart_filename(outcome.tag), &CHART_HEADERS, &rows)?;
    if let Some(path) = written {
        info!("wrote {}", path.display());
    }
    Ok(())
}
