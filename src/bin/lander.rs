use std::process;

use clap::Parser;
use lander::cli::Lander;

#[tokio::main]
async fn main() {
    let app = Lander::parse();
    timber::init(app.log_level);
    tracing::trace!(command_structure = ?app);

    if let Err(error) = app.run().await {
        tracing::debug!(?error);
        if let Err(print_error) = app.print_error(&error) {
            tracing::debug!(?print_error, "could not print the error");
        }
        process::exit(1)
    }
}
