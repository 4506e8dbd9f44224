use scenescribe_common::{read_script, AppConfig, Result, ScenescribeError};
use scenescribe_llm::{ChatTransport, SceneExtractor};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Default directory holding transcripts
pub const DEFAULT_OUTPUT_DIR: &str = "scripts/srt_files";

/// Default movie title
pub const DEFAULT_TITLE: &str = "Iron_Man";

/// Inputs of a single run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub title: String,
    pub script_path: PathBuf,
    pub output_dir: PathBuf,
}

impl RunOptions {
    /// Transcript expected at `<output_dir>/<title>.srt`
    pub fn new(title: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        let title = title.into();
        let output_dir = output_dir.into();
        Self {
            script_path: output_dir.join(format!("{}.srt", title)),
            title,
            output_dir,
        }
    }

    pub fn with_script_path(mut self, script_path: impl Into<PathBuf>) -> Self {
        self.script_path = script_path.into();
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE, DEFAULT_OUTPUT_DIR)
    }
}

/// Create the output directory and read the transcript
pub fn read_input(options: &RunOptions) -> Result<String> {
    ensure_dir(&options.output_dir)?;
    read_script(&options.script_path)
}

/// Everything a run needs before talking to the API
///
/// The transcript is checked before the configuration, so a missing script
/// is reported even when the config is missing too.
pub fn prepare(options: &RunOptions, config_path: &Path) -> Result<(String, AppConfig)> {
    let transcript = read_input(options)?;
    let config = AppConfig::load(config_path)?;
    Ok((transcript, config))
}

/// Extract scenes from the transcript and print them to `out`
pub async fn run<T: ChatTransport, W: Write>(
    extractor: &SceneExtractor<T>,
    options: &RunOptions,
    transcript: &str,
    out: &mut W,
    cancel: &CancellationToken,
) -> Result<()> {
    let scenes = extractor.extract(&options.title, transcript, cancel).await?;

    scenes.render(out)?;
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        ScenescribeError::file_system(format!("Failed to create directory {}: {}", dir.display(), e))
    })?;
    debug!("Output directory ready: {}", dir.display());
    Ok(())
}

/// Print the one diagnostic a failed run ends with
pub fn print_diagnostic<W: Write>(out: &mut W, err: &ScenescribeError) -> io::Result<()> {
    error!("Run failed: {}", err);
    match err {
        ScenescribeError::ConfigUnavailable(_) => {
            writeln!(out, "Error: Missing or invalid config file ({})", err)
        }
        ScenescribeError::NotFound(_) => {
            writeln!(out, "Error: Could not read SRT file ({})", err)
        }
        ScenescribeError::Parse { reason, raw } => {
            writeln!(out, "Error parsing response: {}", reason)?;
            writeln!(out, "Raw response: {}", raw)
        }
        ScenescribeError::RequestFailed { .. }
        | ScenescribeError::Transport(_)
        | ScenescribeError::MalformedResponse(_) => {
            writeln!(out, "Failed to get response from the API: {}", err)
        }
        ScenescribeError::Cancelled => writeln!(out, "Run cancelled"),
        _ => writeln!(out, "Error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenescribe_llm::{ChatClient, RetryPolicy, ScriptedReply, ScriptedTransport};
    use std::time::Duration;

    fn extractor(reply: ScriptedReply) -> SceneExtractor<ScriptedTransport> {
        let client = ChatClient::new(
            ScriptedTransport::new(vec![reply]),
            "test-model",
            RetryPolicy {
                max_retries: 3,
                retry_delay: Duration::ZERO,
            },
        );
        SceneExtractor::new(client, 4000)
    }

    async fn run_to_string(
        extractor: &SceneExtractor<ScriptedTransport>,
        options: &RunOptions,
    ) -> (String, Option<ScenescribeError>) {
        let mut out = Vec::new();
        let result = match read_input(options) {
            Ok(transcript) => {
                run(extractor, options, &transcript, &mut out, &CancellationToken::new()).await
            }
            Err(e) => Err(e),
        };
        let err = result.err();
        if let Some(e) = &err {
            print_diagnostic(&mut out, e).unwrap();
        }
        (String::from_utf8(out).unwrap(), err)
    }

    #[tokio::test]
    async fn test_end_to_end_prints_one_block() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions::new("Iron_Man", dir.path().join("srt_files"));
        std::fs::create_dir_all(&options.output_dir).unwrap();
        std::fs::write(
            &options.script_path,
            "1\n00:02:00,000 --> 00:02:05,000\nLet's face it, this is not the worst thing you've caught me doing.\n\n2\n00:02:25,000 --> 00:02:30,000\nI am Iron Man.\n",
        )
        .unwrap();

        let extractor = extractor(ScriptedReply::completion(
            r#"{"120-145": "Here we go, let's go over the movie Iron_Man."}"#,
        ));
        let (output, err) = run_to_string(&extractor, &options).await;

        assert!(err.is_none());
        assert_eq!(output.matches("Time Range:").count(), 1);
        assert!(output.contains(
            "Time Range: 120-145\nSummary: Here we go, let's go over the movie Iron_Man.\n"
        ));
        assert_eq!(extractor.client().transport().calls(), 1);
    }

    #[tokio::test]
    async fn test_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("scripts").join("srt_files");
        let script = dir.path().join("movie.srt");
        std::fs::write(&script, "line").unwrap();
        let options = RunOptions::new("Movie", &output_dir).with_script_path(&script);

        let extractor = extractor(ScriptedReply::completion("{}"));
        let (_, err) = run_to_string(&extractor, &options).await;

        assert!(err.is_none());
        assert!(output_dir.is_dir());
    }

    #[tokio::test]
    async fn test_missing_script_stops_before_request() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions::new("Missing", dir.path());

        let extractor = extractor(ScriptedReply::completion("{}"));
        let (output, err) = run_to_string(&extractor, &options).await;

        assert!(matches!(err, Some(ScenescribeError::NotFound(_))));
        assert!(output.starts_with("Error: Could not read SRT file"));
        assert_eq!(extractor.client().transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_failure_shows_raw_response() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions::new("Iron_Man", dir.path());
        std::fs::write(&options.script_path, "line").unwrap();

        let extractor = extractor(ScriptedReply::completion("Sure! Here are the scenes."));
        let (output, err) = run_to_string(&extractor, &options).await;

        assert!(matches!(err, Some(ScenescribeError::Parse { .. })));
        assert!(output.contains("Raw response: Sure! Here are the scenes."));
        assert!(!output.contains("Time Range:"));
    }

    #[tokio::test]
    async fn test_api_failure_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions::new("Iron_Man", dir.path());
        std::fs::write(&options.script_path, "line").unwrap();

        let extractor = extractor(ScriptedReply::status(401, "invalid api key"));
        let (output, err) = run_to_string(&extractor, &options).await;

        assert!(matches!(err, Some(ScenescribeError::RequestFailed { status: 401, .. })));
        assert!(output.starts_with("Failed to get response from the API"));
        assert_eq!(extractor.client().transport().calls(), 3);
    }

    #[test]
    fn test_missing_script_reported_before_config() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("scripts").join("srt_files");
        let options = RunOptions::new("Iron_Man", &output_dir);

        let err = prepare(&options, &dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, ScenescribeError::NotFound(_)));
        assert!(output_dir.is_dir());
    }

    #[test]
    fn test_config_loaded_after_script() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions::new("Iron_Man", dir.path());
        std::fs::write(&options.script_path, "line").unwrap();

        let err = prepare(&options, &dir.path().join("config.json")).unwrap_err();
        assert!(matches!(err, ScenescribeError::ConfigUnavailable(_)));

        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, r#"{"grooq_api_key": "k"}"#).unwrap();
        let (transcript, config) = prepare(&options, &config_path).unwrap();
        assert_eq!(transcript, "line");
        assert_eq!(config.api_key, "k");
    }

    #[test]
    fn test_default_options() {
        let options = RunOptions::default();
        assert_eq!(options.title, "Iron_Man");
        assert_eq!(options.script_path, PathBuf::from("scripts/srt_files/Iron_Man.srt"));
    }
}
