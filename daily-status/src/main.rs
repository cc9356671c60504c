#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = daily_status::config::Config::from_env()?;
    daily_status::web::start_web_server(config).await
}
