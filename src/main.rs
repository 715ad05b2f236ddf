use anyhow::Context;
use contact_relay::configuration::get_configuration;
use contact_relay::startup::Application;
use contact_relay::telemetry::{get_tracing_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_tracing_subscriber("contact-relay", "info", std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let application = Application::build(configuration)?;
    tracing::info!(port = application.port(), "Contact relay listening");
    application.run_until_stopped().await?;
    Ok(())
}
