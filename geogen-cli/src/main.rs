use failure::Error;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[macro_use]
mod ui;

mod args;
mod commands;

use crate::{
    args::Args,
};


/// We just catch potential errors here and pretty print them. The actual
/// useful code is in `run()`.
fn main() {
    if let Err(e) = run() {
        error!("An error occured: {}", e);

        for cause in e.iter_causes() {
            error!("  ... caused by: {}", cause);
        }

        if std::env::var("RUST_BACKTRACE") == Ok("1".to_string()) {
            error!();
            error!("{}", e.backtrace());
        }

        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let args = Args::from_args();

    let filter = EnvFilter::try_new(&args.global.log)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    commands::run(&args.global, &args.command)
}
