use cardroom_sim::logging::init_logging;
use cardroom_sim::SimCli;
use clap::Parser;
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    let cli = SimCli::parse();
    init_logging(cli.log_format);

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = cardroom_sim::execute(cli, input, &mut out, &mut err).await;
    std::process::exit(code);
}
