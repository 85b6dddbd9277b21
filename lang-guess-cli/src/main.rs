mod cli;

use std::io::Write;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
	let cli = cli::Cli::parse();

	// RUST_LOG wins over --log-level when set
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
		.format(|buf, record| {
			writeln!(buf, "{}\t{}:\t{}", buf.timestamp_seconds(), record.level(), record.args())
		})
		.init();

	cli::run(cli)
}
