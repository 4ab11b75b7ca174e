use anyhow::{Context, Result};
use clap::Parser;
use product_page::{render_page, ReqwestTransport, Settings};
use tokio::io::AsyncWriteExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::parse();
    let transport =
        ReqwestTransport::new(settings.timeout()).context("failed to build HTTP client")?;
    let page = render_page(transport, &settings.url, &settings.money_format())
        .await
        .context("failed to render page")?;

    match &settings.output {
        Some(path) => {
            tokio::fs::write(path, &page)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "page written");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(page.as_bytes())
                .await
                .context("failed to write page")?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
