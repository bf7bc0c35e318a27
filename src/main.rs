use newsletter::app::{
    load_configuration,
    setup_tracing,
    NewsletterApp,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing("newsletter".into(), "info".into());

    let configuration = load_configuration()?;
    let app = NewsletterApp::from(configuration).await?;
    tracing::info!("Listening on port {}", app.port);
    app.server.await?;
    Ok(())
}
