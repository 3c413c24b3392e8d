pub mod error;
pub mod extract;
pub mod fetch;
pub mod parse;
#[cfg(feature = "fetch")]
pub mod pipeline;
#[cfg(feature = "fetch")]
pub mod publish;
pub mod render;
pub mod stopwords;

pub use error::{OrdskyError, Result};
pub use extract::{ARTICLE_SELECTORS, extract_text};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{FetchConfig, fetch_file, normalize_url};
pub use parse::Document;
#[cfg(feature = "fetch")]
pub use pipeline::{
    COMBINED_NAME, DEFAULT_HEIGHT, DEFAULT_OUTPUT_DIR, DEFAULT_WIDTH, Pipeline, PipelineConfig, RunSummary,
    artifact_filename,
};
#[cfg(feature = "fetch")]
pub use publish::{Credentials, TwitterClient};
pub use render::{CloudRenderer, WcloudRenderer};
pub use stopwords::StopwordFilter;
