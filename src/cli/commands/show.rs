//! Catalog table command.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::runtime::Runtime;

use super::{ShowArgs, open_cache};
use crate::cache::{CacheStore, JsonCache};
use crate::config::Config;
use crate::enrichment::{MubiClient, OmdbClient, RatingSource};
use crate::error::Result;
use crate::model::Film;
use crate::pipeline::Pipeline;
use crate::printer::{TableStyle, render_table};

/// Acquire (or read) the catalog and print it
pub fn cmd_show(rt: &Runtime, config: &Config, args: &ShowArgs) -> anyhow::Result<()> {
    let cache = Arc::new(open_cache(config)?);

    let mut films = if args.cached {
        cache
            .load()
            .with_context(|| format!("Could not read cached data from {:?}", cache.path()))?
    } else {
        rt.block_on(acquire(config, cache, args.refresh))?
    };

    args.sort.apply(&mut films);

    let style = TableStyle {
        no_color: args.no_color,
        max_len: usize::try_from(args.max_len).ok().filter(|&n| n > 0),
    };
    print!("{}", render_table(&films, style));
    Ok(())
}

/// Run the pipeline against MUBI and OMDb, cancelling on Ctrl-C
async fn acquire(config: &Config, cache: Arc<JsonCache>, refresh: bool) -> Result<Vec<Film>> {
    let ratings = config
        .omdb_api_key()
        .map(|key| Arc::new(OmdbClient::new(key)) as Arc<dyn RatingSource>);

    let pipeline = Pipeline::new(
        Arc::new(MubiClient::new()),
        ratings,
        cache,
        config.pipeline_config(),
    );

    let token = pipeline.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling");
            token.cancel();
        }
    });

    let started = Instant::now();
    let films = pipeline.acquire(refresh).await?;
    tracing::info!("Total time: {:.1?}", started.elapsed());
    Ok(films)
}
