//! Data Loader: fetch both documents and build the initial chart.

use choro_core::{Chart, ChartConfig, ChoroError, build_chart};

use crate::fetch::{FetchError, fetch_pair};

/// Errors that can occur while loading the chart.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A document could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The documents were fetched but do not form a chart.
    #[error(transparent)]
    Chart(#[from] ChoroError),
}

/// Fetch the county topology and education records named by `config`
/// concurrently, then build the initial chart.
///
/// Nothing is built unless both documents arrive.
///
/// # Errors
///
/// Returns [`LoadError::Fetch`] if either request fails and
/// [`LoadError::Chart`] if the documents are malformed or do not join.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn load_chart(config: &ChartConfig) -> Result<Chart, LoadError> {
    tracing::debug!(
        counties = %config.county_url,
        education = %config.education_url,
        "fetching chart data"
    );
    let (topology, education) = fetch_pair(&config.county_url, &config.education_url).await?;
    tracing::debug!(
        topology_bytes = topology.len(),
        education_bytes = education.len(),
        "chart data fetched"
    );
    Ok(build_chart(&topology, &education, config)?)
}
