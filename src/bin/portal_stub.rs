use rollcall::logger::*;
use rollcall::settings::*;
use rollcall::stub;
use std::sync::Arc;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let address: std::net::SocketAddr = project_settings.stub.address.parse()?;
    let portal = Arc::new(stub::StubPortal::new(
        &project_settings.stub.username,
        &project_settings.stub.password,
        project_settings.stub.captcha_length,
    ));

    info!("portal stub listening on {}", address);
    let (_, server) =
        warp::serve(stub::routes(portal)).bind_with_graceful_shutdown(address, async {
            signal::ctrl_c().await.expect("Could not register SIGINT");
        });
    server.await;

    info!("portal stub stopped");
    Ok(())
}
