use std::sync::Arc;

use anyhow::Result;
use thursday_weather::{
    VisualCrossingClient, WeatherAppConfig, WeatherAppError, api::AppState, logging, web,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match WeatherAppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            if let Some(app_err) = err.downcast_ref::<WeatherAppError>() {
                eprintln!("{}", app_err.user_message());
            }
            return Err(err);
        }
    };
    logging::init(&config.logging)?;

    tracing::info!(
        "Serving {} weather for {}..={} ({} concurrent requests)",
        config.weather.city,
        config.range.start_year,
        config.range.end_year,
        config.server.max_concurrency
    );

    let client = VisualCrossingClient::new(&config.weather)?;
    let state = AppState::new(Arc::new(client), &config.range, config.server.max_concurrency)?;

    web::run(&config.server, state).await
}
