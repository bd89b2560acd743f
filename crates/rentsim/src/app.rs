//! Command implementations behind the `rentsim` binary

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{Result, bail, eyre};
use rentsim_core::cities::suggest;
use rentsim_core::model::SimulationInputs;
use tokio::io::BufReader;

use crate::config::ClientConfig;
use crate::display::{render_suggestions, render_view};
use crate::orchestrator::SimulationHandle;
use crate::report::{ReportExporter, TextReportExporter};
use crate::source::{self, MarketDataSource};
use crate::watch::{HELP, run_watch};

/// Where a one-shot simulation should write its report
#[derive(Debug, Clone, PartialEq)]
pub enum ExportTarget {
    /// Timestamped file in the configured report directory
    ReportDir,
    File(PathBuf),
}

pub struct App {
    data_dir: PathBuf,
    config: ClientConfig,
    source: Arc<dyn MarketDataSource>,
}

impl App {
    pub fn new(data_dir: PathBuf, config: ClientConfig) -> Self {
        let source = source::from_config(&config);
        Self::with_source(data_dir, config, source)
    }

    pub fn with_source(
        data_dir: PathBuf,
        config: ClientConfig,
        source: Arc<dyn MarketDataSource>,
    ) -> Self {
        Self {
            data_dir,
            config,
            source,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn report_exporter(&self) -> TextReportExporter {
        let dir = self
            .config
            .report_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        TextReportExporter::in_directory(dir)
    }

    /// Run one simulation and render its result, exporting it if asked.
    pub async fn simulate(
        &self,
        inputs: SimulationInputs,
        export: Option<ExportTarget>,
    ) -> Result<String> {
        // Nothing to coalesce for a single request
        let handle = SimulationHandle::spawn(Arc::clone(&self.source), Duration::ZERO);
        handle.update(inputs.clone());
        let view = handle
            .resolved(&inputs)
            .await
            .ok_or_else(|| eyre!("simulation stopped before producing a result"))?;
        handle.dispose();

        let mut out = render_view(&view);
        if let Some(target) = export {
            let path = match target {
                ExportTarget::ReportDir => self.report_exporter().export_view(&view)?,
                ExportTarget::File(path) => TextReportExporter::to_file(path).export_view(&view)?,
            };
            out.push_str(&format!("Report written to {}\n", path.display()));
        }
        Ok(out)
    }

    /// City suggestions for `query`, matched part highlighted.
    pub fn suggest(&self, query: &str) -> String {
        render_suggestions(query, &suggest(query))
    }

    /// Interactive session on stdin / stdout.
    pub async fn watch(&self, inputs: SimulationInputs) -> Result<()> {
        let handle = SimulationHandle::spawn(Arc::clone(&self.source), self.config.debounce());
        let exporter = self.report_exporter();

        let mut stdout = std::io::stdout();
        print!("{HELP}");
        run_watch(
            &handle,
            &exporter,
            inputs,
            BufReader::new(tokio::io::stdin()),
            &mut stdout,
        )
        .await?;
        Ok(())
    }

    /// Write the effective configuration to `{data_dir}/config.yaml`.
    pub fn init_config(&self, force: bool) -> Result<PathBuf> {
        let path = ClientConfig::path(&self.data_dir);
        if path.exists() && !force {
            bail!(
                "{} already exists, use --force to overwrite it",
                path.display()
            );
        }
        self.config.save(&self.data_dir)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use rentsim_core::model::{OperatingMode, RoomType};
    use tempfile::tempdir;

    use super::*;

    fn offline_app(dir: &Path) -> App {
        let config = ClientConfig {
            offline: true,
            report_dir: Some(dir.join("reports")),
            ..ClientConfig::default()
        };
        App::new(dir.to_path_buf(), config)
    }

    #[tokio::test]
    async fn test_simulate_offline() {
        let dir = tempdir().unwrap();
        let app = offline_app(dir.path());
        let inputs = SimulationInputs::new(
            100_000.0,
            50.0,
            RoomType::Studio,
            OperatingMode::ShortTerm,
            "Boulogne",
        );

        let out = app.simulate(inputs, None).await.unwrap();
        assert!(out.starts_with("Boulogne · 100 000 € · 50 m² · studio · Short-term rental\n"));
        assert!(out.contains("[AirDNA (live)]"));
        assert!(out.contains("1 836,00 €"));
    }

    #[tokio::test]
    async fn test_simulate_blank_city_is_idle() {
        let dir = tempdir().unwrap();
        let app = offline_app(dir.path());
        let inputs = SimulationInputs {
            city: " ".to_string(),
            ..SimulationInputs::default()
        };

        let out = app.simulate(inputs, None).await.unwrap();
        assert_eq!(out, "Enter a city to start the simulation.\n");
    }

    #[tokio::test]
    async fn test_simulate_exports_into_report_dir() {
        let dir = tempdir().unwrap();
        let app = offline_app(dir.path());

        let out = app
            .simulate(SimulationInputs::default(), Some(ExportTarget::ReportDir))
            .await
            .unwrap();

        assert!(out.contains("Report written to"));
        let reports: Vec<_> = std::fs::read_dir(dir.path().join("reports"))
            .unwrap()
            .collect();
        assert_eq!(reports.len(), 1);
    }

    #[tokio::test]
    async fn test_simulate_export_without_result_fails() {
        let dir = tempdir().unwrap();
        let app = offline_app(dir.path());
        let inputs = SimulationInputs {
            city: String::new(),
            ..SimulationInputs::default()
        };

        let err = app
            .simulate(inputs, Some(ExportTarget::File(dir.path().join("r.txt"))))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no simulation result"));
    }

    #[test]
    fn test_suggest() {
        let dir = tempdir().unwrap();
        let app = offline_app(dir.path());
        assert!(app.suggest("vinc").contains("[Vinc]ennes"));
    }

    #[test]
    fn test_init_config_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let app = offline_app(dir.path());

        let path = app.init_config(false).unwrap();
        assert!(path.exists());
        assert!(ClientConfig::load(app.data_dir()).unwrap().offline);

        assert!(app.init_config(false).is_err());
        assert!(app.init_config(true).is_ok());
    }
}
