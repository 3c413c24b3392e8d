//! The per-URL word-cloud pipeline.
//!
//! One driver, parameterized by combine/publish, replacing what used to be
//! two divergent scripts: fetch a page, extract its article text, strip
//! stopwords, render a cloud per input or one combined cloud, and
//! optionally post each artifact.

use std::fs;
use std::path::{Path, PathBuf};

use crate::extract::extract_text;
use crate::fetch::{FetchConfig, fetch_file, fetch_url, normalize_url};
use crate::parse::Document;
use crate::publish::TwitterClient;
use crate::render::CloudRenderer;
use crate::stopwords::StopwordFilter;
use crate::{OrdskyError, Result};

/// Directory artifacts are written to, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "images";

/// Artifact name used in combine mode.
pub const COMBINED_NAME: &str = "cloud";

/// Default canvas size.
pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Settings for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Where artifacts are written. Created on demand.
    pub output_dir: PathBuf,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// HTTP settings for page retrieval.
    pub fetch: FetchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fetch: FetchConfig::default(),
        }
    }
}

/// Outcome of a pipeline run.
///
/// In non-combine mode a failing input does not stop the others; its error
/// is recorded here so the caller can report it and exit non-zero.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Paths of the artifacts written, in input order.
    pub artifacts: Vec<PathBuf>,
    /// Inputs that failed, with their errors.
    pub failures: Vec<(String, OrdskyError)>,
}

/// The pipeline driver.
///
/// Holds everything that used to be process-global state: the stopword
/// filter, the renderer, and the optional publishing client, all built once
/// at startup.
pub struct Pipeline {
    config: PipelineConfig,
    stopwords: StopwordFilter,
    renderer: Box<dyn CloudRenderer>,
    publisher: Option<TwitterClient>,
}

impl Pipeline {
    /// Creates a pipeline from its collaborators.
    ///
    /// Publishing is enabled by passing a client; `None` means artifacts
    /// are only written to disk.
    pub fn new(
        config: PipelineConfig,
        stopwords: StopwordFilter,
        renderer: Box<dyn CloudRenderer>,
        publisher: Option<TwitterClient>,
    ) -> Self {
        Self { config, stopwords, renderer, publisher }
    }

    /// Runs the pipeline over `inputs`.
    ///
    /// Each input is a URL, bare hostname, or local HTML file, processed
    /// fully before the next begins. In combine mode all texts are
    /// collected before anything is rendered, and the first failing input
    /// aborts the run since the combined text cannot be partially
    /// assembled.
    pub async fn run(&self, inputs: &[String], combine: bool) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        if combine {
            let mut texts = Vec::with_capacity(inputs.len());
            for input in inputs {
                texts.push(self.collect_text(input).await?);
            }

            let combined = texts.join(" ");
            let path = self.render_to_file(COMBINED_NAME, &combined)?;
            if let Some(publisher) = &self.publisher {
                publisher.post("", &path).await?;
            }
            summary.artifacts.push(path);
        } else {
            for input in inputs {
                match self.process_single(input).await {
                    Ok(path) => summary.artifacts.push(path),
                    Err(err) => summary.failures.push((input.clone(), err)),
                }
            }
        }

        Ok(summary)
    }

    async fn process_single(&self, input: &str) -> Result<PathBuf> {
        let text = self.collect_text(input).await?;
        let path = self.render_to_file(input, &text)?;

        if let Some(publisher) = &self.publisher {
            let caption = format!("Dagens ordsky fra {}", input);
            publisher.post(&caption, &path).await?;
        }

        Ok(path)
    }

    /// Fetch, extract, and filter one input down to renderable text.
    async fn collect_text(&self, input: &str) -> Result<String> {
        let html = if Path::new(input).is_file() {
            fetch_file(input)?
        } else {
            fetch_url(&normalize_url(input), &self.config.fetch).await?
        };

        let doc = Document::parse(&html)?;
        let text = self.stopwords.apply(&extract_text(&doc)?);

        if text.trim().is_empty() {
            return Err(OrdskyError::InvalidPageFormat(input.to_string()));
        }

        Ok(text)
    }

    fn render_to_file(&self, key: &str, text: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join(artifact_filename(key));
        self.renderer
            .render_to_file(text, self.config.width, self.config.height, &path)?;

        Ok(path)
    }
}

/// Derives a deterministic artifact filename from an input key.
///
/// Characters that would split or escape a path are replaced so `vg.no`
/// maps to `vg.no.png` and a full URL still lands in the output directory.
pub fn artifact_filename(key: &str) -> String {
    let sanitized: String = key
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '?' | '*' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();

    format!("{}.png", sanitized)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    /// Renderer stub that skips layout work entirely.
    struct BlankRenderer;

    impl CloudRenderer for BlankRenderer {
        fn render_to_file(&self, text: &str, _width: u32, _height: u32, path: &Path) -> Result<()> {
            fs::write(path, text)?;
            Ok(())
        }
    }

    fn pipeline(output_dir: &Path) -> Pipeline {
        let config = PipelineConfig { output_dir: output_dir.to_path_buf(), ..Default::default() };
        let stopwords = StopwordFilter::from_list(&["og"]).unwrap();
        Pipeline::new(config, stopwords, Box::new(BlankRenderer), None)
    }

    fn run(pipeline: &Pipeline, inputs: &[String], combine: bool) -> Result<RunSummary> {
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(pipeline.run(inputs, combine))
    }

    fn write_fixture(dir: &TempDir, name: &str, html: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, html).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_artifact_filename_plain_hostname() {
        assert_eq!(artifact_filename("vg.no"), "vg.no.png");
    }

    #[test]
    fn test_artifact_filename_sanitizes_separators() {
        assert_eq!(artifact_filename("http://vg.no"), "http___vg.no.png");
    }

    #[test]
    fn test_artifact_filename_deterministic() {
        assert_eq!(artifact_filename("nrk.no"), artifact_filename("nrk.no"));
    }

    #[test]
    fn test_single_input_writes_one_artifact() {
        let out = TempDir::new().unwrap();
        let pages = TempDir::new().unwrap();
        let page = write_fixture(&pages, "vg.html", "<article>Hunden og katten leker</article>");

        let summary = run(&pipeline(out.path()), &[page], false).unwrap();

        assert_eq!(summary.artifacts.len(), 1);
        assert!(summary.failures.is_empty());
        assert!(summary.artifacts[0].exists());
    }

    #[test]
    fn test_page_without_articles_fails_but_others_complete() {
        let out = TempDir::new().unwrap();
        let pages = TempDir::new().unwrap();
        let empty = write_fixture(&pages, "empty.html", "<html><body><div>bare meny</div></body></html>");
        let good = write_fixture(&pages, "good.html", "<article>Hunden og katten leker</article>");

        let summary = run(&pipeline(out.path()), &[empty.clone(), good], false).unwrap();

        assert_eq!(summary.artifacts.len(), 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, empty);
        assert!(matches!(summary.failures[0].1, OrdskyError::InvalidPageFormat(_)));
    }

    #[test]
    fn test_all_stopwords_page_is_invalid_format() {
        let out = TempDir::new().unwrap();
        let pages = TempDir::new().unwrap();
        let page = write_fixture(&pages, "stop.html", "<article>og og og</article>");

        let summary = run(&pipeline(out.path()), &[page], false).unwrap();

        assert!(summary.artifacts.is_empty());
        assert_eq!(summary.failures.len(), 1);
    }

    #[test]
    fn test_combine_writes_single_cloud_artifact() {
        let out = TempDir::new().unwrap();
        let pages = TempDir::new().unwrap();
        let a = write_fixture(&pages, "a.html", "<article>Hunden og katten</article>");
        let b = write_fixture(&pages, "b.html", "<article>Fuglen og fisken</article>");

        let summary = run(&pipeline(out.path()), &[a, b], true).unwrap();

        assert_eq!(summary.artifacts.len(), 1);
        assert_eq!(summary.artifacts[0], out.path().join("cloud.png"));
        assert!(summary.artifacts[0].exists());
    }

    #[test]
    fn test_combine_aborts_on_first_failure() {
        let out = TempDir::new().unwrap();
        let pages = TempDir::new().unwrap();
        let good = write_fixture(&pages, "good.html", "<article>Hunden og katten</article>");
        let empty = write_fixture(&pages, "empty.html", "<html><body></body></html>");

        let result = run(&pipeline(out.path()), &[good, empty], true);

        assert!(matches!(result, Err(OrdskyError::InvalidPageFormat(_))));
        assert!(!out.path().join("cloud.png").exists());
    }

    #[test]
    fn test_output_dir_created_on_demand() {
        let out = TempDir::new().unwrap();
        let nested = out.path().join("deep").join("images");
        let pages = TempDir::new().unwrap();
        let page = write_fixture(&pages, "vg.html", "<article>Hunden og katten leker</article>");

        let summary = run(&pipeline(&nested), &[page], false).unwrap();

        assert_eq!(summary.artifacts.len(), 1);
        assert!(nested.is_dir());
    }
}
