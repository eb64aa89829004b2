use liar_game::config::Config;
use liar_game::metrics::register_metrics;
use liar_game::startup::create_web_server;

#[tokio::main]
async fn main() {
    std_logger::Config::logfmt().init();
    register_metrics();

    let config = match Config::get() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Unable to read the configuration. Error: '{error}'.");
            std::process::exit(1);
        }
    };

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(error) => {
            log::error!("Unable to bind {address}. Error: '{error}'.");
            std::process::exit(1);
        }
    };

    create_web_server(config, listener).await;
}
