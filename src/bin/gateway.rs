use library_reservation::{
    adapters::http::{self, CatalogClient, RatingClient, ReservationClient},
    api::create_gateway_router,
    application::gateway::{AdminToken, GatewayDependencies},
    config::{GATEWAY_PORT, GatewayConfig, ServerConfig},
    server, telemetry,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing("library_reservation=debug,tower_http=debug");

    let server_config = ServerConfig::from_env(GATEWAY_PORT);
    let gateway_config = GatewayConfig::from_env();
    tracing::info!(?gateway_config, "gateway configuration loaded");

    // 下流サービスのクライアント（接続プールは共有）
    let client = http::build_client()?;
    let deps = GatewayDependencies {
        catalog: Arc::new(CatalogClient::new(
            gateway_config.library_service_url,
            client.clone(),
        )),
        rating: Arc::new(RatingClient::new(
            gateway_config.rating_service_url,
            client.clone(),
        )),
        reservation: Arc::new(ReservationClient::new(
            gateway_config.reservation_service_url,
            client,
        )),
        admin_token: AdminToken::new(gateway_config.admin_token),
    };

    server::serve("gateway", &server_config, create_gateway_router(deps)).await?;
    Ok(())
}
