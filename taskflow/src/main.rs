#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = taskflow::config::Config::from_env()?;
    taskflow::web::start_web_server(config).await
}
