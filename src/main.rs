use flatfile_shop::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}, products={}, cart={}, ids={:?}",
        config.server_address(),
        config.storage.products_path,
        config.storage.cart_path,
        config.catalog.id_assignment
    );

    flatfile_shop::run(config).await
}
