use std::process::exit;

use clap::Parser;
use dispatch_cli::{run, Args};

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(&args) {
        log::error!("dispatch failed: {err}");
        exit(1);
    }
}
