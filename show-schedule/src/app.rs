//! One complete run of the command-line tool.
//!
//! Loads the config, picks the live API or saved responses, assembles the
//! schedule and writes it out. Any error returned here ends the process
//! with a failure status.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::config::{DEFAULT_CONFIG_PATH, ShowConfig};
use crate::foxvillage::{FetchError, MockShowSource, ShowClient, ShowClientConfig, ShowSource};
use crate::output::{
    DEFAULT_OUTPUT_PATH, DEFAULT_PUBLISHED_PATH, OutputError, render_schedule, write_schedule,
};
use crate::schedule::{DEFAULT_PACING, ScheduleAssembler, ScheduleError, ScheduleRow};

/// Settings of a single run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Rider names from the command line; replace the configured ones.
    pub riders: Vec<String>,
    pub config_path: PathBuf,
    pub output_path: PathBuf,
    pub published_path: PathBuf,
    /// Show API base URL, or the production API when unset.
    pub base_url: Option<String>,
    pub pacing: Duration,
    pub timeout_secs: u64,
    /// Serve saved responses from this directory instead of the live API.
    pub mock_dir: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            riders: Vec::new(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            published_path: PathBuf::from(DEFAULT_PUBLISHED_PATH),
            base_url: None,
            pacing: DEFAULT_PACING,
            timeout_secs: 30,
            mock_dir: None,
        }
    }
}

/// Errors that make a run fail.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(
        "no rider names given: pass them as arguments or create {} with a riderNames array",
        config_path.display()
    )]
    NoRiders { config_path: PathBuf },

    #[error(transparent)]
    Client(#[from] FetchError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Load the config and apply the command-line rider names.
///
/// Fails when neither source names a rider.
pub fn effective_config(options: &RunOptions) -> Result<ShowConfig, RunError> {
    let config =
        ShowConfig::load_or_default(&options.config_path).with_rider_names(options.riders.clone());

    if config.rider_names.is_empty() {
        return Err(RunError::NoRiders {
            config_path: options.config_path.clone(),
        });
    }

    Ok(config)
}

/// Build the schedule, print it to stdout and write both output files.
pub async fn run(options: &RunOptions) -> Result<Vec<ScheduleRow>, RunError> {
    let config = effective_config(options)?;

    let rows = match &options.mock_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "using saved responses");
            assemble(MockShowSource::from_dir(dir)?, options, &config).await?
        }
        None => {
            let mut client_config = ShowClientConfig::new().with_timeout(options.timeout_secs);
            if let Some(url) = &options.base_url {
                client_config = client_config.with_base_url(url);
            }
            assemble(ShowClient::new(client_config)?, options, &config).await?
        }
    };

    let json = render_schedule(&rows)?;
    println!("{json}");

    write_schedule(&json, &[&options.output_path, &options.published_path])?;
    info!(rows = rows.len(), "done");

    Ok(rows)
}

async fn assemble<S: ShowSource>(
    source: S,
    options: &RunOptions,
    config: &ShowConfig,
) -> Result<Vec<ScheduleRow>, ScheduleError> {
    ScheduleAssembler::new(source)
        .with_pacing(options.pacing)
        .run(config)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::{TempDir, tempdir};

    /// Saved responses for a show with one rider, Jane Doe (ID 2).
    fn saved_show(dir: &Path) {
        std::fs::write(
            dir.join("roster.json"),
            r#"{"riderData": [{"riderID": 2, "riderName": "<a>Jane Doe</a>"}]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.join("classes.json"),
            r#"{"classData": [{"classID": 412, "className": "Training Level"}]}"#,
        )
        .unwrap();
        std::fs::create_dir(dir.join("riders")).unwrap();
        std::fs::write(
            dir.join("riders").join("2.json"),
            r#"{"riderPageData": [{
                "classText": "<a>412</a>",
                "test": "Test 1",
                "ring": "Ring 1",
                "day": "2025-06-13T00:00:00",
                "rideTime": "2025-06-13T08:42:00"
            }]}"#,
        )
        .unwrap();
    }

    fn options(dir: &TempDir) -> RunOptions {
        RunOptions {
            config_path: dir.path().join("config.json"),
            output_path: dir.path().join("schedule.json"),
            published_path: dir.path().join("docs").join("schedule.json"),
            pacing: Duration::ZERO,
            mock_dir: Some(dir.path().join("mock")),
            ..RunOptions::default()
        }
    }

    #[test]
    fn no_riders_anywhere_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"showId": 11474}"#).unwrap();

        let err = effective_config(&options(&dir)).unwrap_err();

        assert!(matches!(err, RunError::NoRiders { .. }));
        let message = err.to_string();
        assert!(message.contains("config.json"));
        assert!(message.contains("riderNames"));
    }

    #[test]
    fn missing_config_without_riders_is_an_error() {
        let dir = tempdir().unwrap();

        assert!(matches!(
            effective_config(&options(&dir)),
            Err(RunError::NoRiders { .. })
        ));
    }

    #[test]
    fn command_line_riders_fill_an_empty_config() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"riderNames": []}"#).unwrap();
        let options = RunOptions {
            riders: vec!["Jane".into()],
            ..options(&dir)
        };

        let config = effective_config(&options).unwrap();

        assert_eq!(config.rider_names, vec!["Jane"]);
        assert_eq!(config.show_id, 11474);
    }

    #[test]
    fn command_line_riders_replace_configured_ones() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"riderNames": ["John"]}"#).unwrap();
        let options = RunOptions {
            riders: vec!["Jane".into()],
            ..options(&dir)
        };

        assert_eq!(effective_config(&options).unwrap().rider_names, vec!["Jane"]);
    }

    #[tokio::test]
    async fn run_with_command_line_riders_writes_both_files() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("mock")).unwrap();
        saved_show(&dir.path().join("mock"));
        let options = RunOptions {
            riders: vec!["Jane".into()],
            ..options(&dir)
        };

        let rows = run(&options).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].class, "412 - Training Level - Test 1");
        let primary = std::fs::read(&options.output_path).unwrap();
        let published = std::fs::read(&options.published_path).unwrap();
        assert_eq!(primary, published);
    }

    #[tokio::test]
    async fn run_without_riders_writes_nothing() {
        let dir = tempdir().unwrap();
        let options = options(&dir);

        let result = run(&options).await;

        assert!(matches!(result, Err(RunError::NoRiders { .. })));
        assert!(!options.output_path.exists());
    }

    #[tokio::test]
    async fn roster_failure_fails_the_run() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("mock")).unwrap();
        let options = RunOptions {
            riders: vec!["Jane".into()],
            ..options(&dir)
        };

        let result = run(&options).await;

        assert!(matches!(
            result,
            Err(RunError::Schedule(ScheduleError::Roster { .. }))
        ));
        assert!(!options.output_path.exists());
    }

    #[tokio::test]
    async fn missing_mock_dir_fails_the_run() {
        let dir = tempdir().unwrap();
        let options = RunOptions {
            riders: vec!["Jane".into()],
            ..options(&dir)
        };

        assert!(matches!(run(&options).await, Err(RunError::Client(_))));
    }
}
