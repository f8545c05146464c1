use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = docviews::cli::Cli::parse();
    if let Err(e) = docviews::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
