//! Entry point for the linguist-ts command-line tool.

use std::process::ExitCode;

use clap::Parser;
use linguist_ts::cli::{
    self,
    Args,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let guard = match cli::init_logging(&args) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::from(2);
        }
    };

    let code = cli::run(args).await;
    drop(guard);
    code
}
