use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_pylos::prelude::*;

fn main() -> Result<()> {
    // Initialize program options and environment.
    dotenvy::dotenv().ok();
    let options = PTPServerOptions::parse();
    let _logger = Logger::try_with_env_or_str(options.log_spec())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(
            match cfg!(debug_assertions) {
                true => AdaptiveFormat::WithThread,
                _    => AdaptiveFormat::Default
            })
        .set_palette("b196;208;195;111;67".to_owned())
        .start()?;

    // Serve PTP and the Pylos engine.
    PTPServer::new(&options).run().inspect_err(|e| log::error!("fatal error: {e}"))
}
