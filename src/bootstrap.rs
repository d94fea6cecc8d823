use std::path::PathBuf;

use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::builder::{self, ChartKind};
use crate::client::{ClientConfig, StatsClient};
use crate::error::ChartError;
use crate::render;
use crate::request::StatsRequest;
use crate::RenderOptions;

/// Where the response payload comes from. A saved payload file (or stdin)
/// goes through the same log/build/render path as a live endpoint.
#[derive(Debug, Clone)]
pub enum PayloadSource {
    Remote {
        config: ClientConfig,
        request: StatsRequest,
    },
    File(PathBuf),
    Stdin,
}

/// The one-shot pipeline the prototype wired into its ready callback:
/// acquire exactly one payload, log it, build the chart configuration,
/// render it.
#[derive(Debug, Clone)]
pub struct ChartBootstrap {
    source: PayloadSource,
    kind: ChartKind,
    options: RenderOptions,
    title: Option<String>,
}

impl ChartBootstrap {
    pub fn new(source: PayloadSource, kind: ChartKind) -> Self {
        Self {
            source,
            kind,
            options: RenderOptions::default(),
            title: None,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Run the pipeline to completion and return the rendered bytes.
    pub async fn run(self) -> Result<Vec<u8>, ChartError> {
        let body = self.acquire().await?;
        debug!(payload = %body, "raw response payload");
        info!(bytes = body.len(), chart = ?self.kind, "payload acquired");

        let mut config = builder::build(self.kind, &body)?;
        if let Some(title) = self.title {
            config.title.text = title;
        }

        // plotters drawing is synchronous; keep it off the runtime threads
        let options = self.options;
        let bytes = tokio::task::spawn_blocking(move || render::render(&config, &options))
            .await
            .map_err(|e| ChartError::Render(format!("render task failed: {e}")))??;

        info!(bytes = bytes.len(), "chart rendered");
        Ok(bytes)
    }

    async fn acquire(&self) -> Result<String, ChartError> {
        match &self.source {
            PayloadSource::Remote { config, request } => {
                StatsClient::new(config.clone())?.fetch(request).await
            }
            PayloadSource::File(path) => {
                info!(path = %path.display(), "reading saved payload");
                Ok(tokio::fs::read_to_string(path).await?)
            }
            PayloadSource::Stdin => {
                info!("reading payload from stdin");
                let mut body = String::new();
                tokio::io::stdin().read_to_string(&mut body).await?;
                Ok(body)
            }
        }
    }
}
