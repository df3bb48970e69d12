use clap::Parser;
use dynvec::{DynVec, DynVecError};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "dynvec-demo")]
#[command(about = "Fill a DynVec<f64>, walk it by index and by cursor, then read out of range", long_about = None)]
struct Args {
    /// Number of values to push
    #[arg(short, long, default_value_t = 30)]
    count: usize,

    /// Initial capacity of the vector
    #[arg(long, default_value_t = 10)]
    capacity: usize,

    /// Value i is pushed as i * step
    #[arg(short, long, default_value_t = 5.0)]
    step: f64,

    /// Index used for the deliberate out-of-range read
    #[arg(short, long, default_value_t = 100_000)]
    probe_index: usize,
}

#[allow(clippy::cast_precision_loss)]
fn run(args: &Args) -> Result<(), DynVecError> {
    let mut dynvec = DynVec::with_capacity(args.capacity)?;

    for i in 0..args.count {
        dynvec.push(i as f64 * args.step)?;
    }
    println!();

    for i in 0..dynvec.len() {
        let value = dynvec.try_get(i)?;
        println!("Element {i} = {value:.6}");
    }
    println!();

    let mut cursor = dynvec.begin();
    while cursor.has_next() {
        let value = cursor.try_next()?;
        println!("Element {} = {value:.6}", cursor.position());
    }
    println!();

    match dynvec.try_get(args.probe_index) {
        Ok(value) => println!("Element {} = {value:.6}", args.probe_index),
        Err(err) => println!("{err}"),
    }

    dynvec.destroy();
    Ok(())
}

fn main() -> ExitCode {
    use tracing_subscriber::{fmt, EnvFilter};

    // RUST_LOG controls the level; warn if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "demo failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
