use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = lbf::cli::Cli::parse();
    if let Err(e) = lbf::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
