use anyhow::{ensure, Context};
use clap::ArgMatches;
use openmod_core::mass::Window;
use openmod_core::mztab::DEFAULT_SCORE;
use openmod_core::LoadOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize)]
/// Actual grouping parameters - may include overrides or default values not set by user
pub struct Search {
    pub version: String,
    pub mztab_paths: Vec<String>,
    pub tol_mass: Option<f64>,
    pub tol_mode: Option<String>,
    /// Window resolved from `tol_mass` and `tol_mode`
    pub window: Window,
    pub score_column: String,
    pub skip_unreadable: bool,
    pub write_report: bool,
    pub output_paths: Vec<String>,

    #[serde(skip_serializing)]
    pub output_directory: PathBuf,
}

impl Search {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            score_column: self.score_column.clone(),
            skip_unreadable: self.skip_unreadable,
        }
    }
}

#[derive(Deserialize, Default)]
/// Input parameters deserialized from JSON file
pub struct Input {
    mztab_paths: Option<Vec<String>>,
    output_directory: Option<String>,
    tol_mass: Option<f64>,
    tol_mode: Option<String>,
    score_column: Option<String>,
    skip_unreadable: Option<bool>,
    write_report: Option<bool>,
}

impl Input {
    pub fn from_arguments(matches: ArgMatches) -> anyhow::Result<Self> {
        let mut input = match matches.get_one::<String>("parameters") {
            Some(path) => Input::load(path)
                .with_context(|| format!("Failed to read parameters from `{path}`"))?,
            None => Input::default(),
        };

        // Handle JSON configuration overrides
        if let Some(output_directory) = matches.get_one::<String>("output_directory") {
            log::trace!("overriding `output_directory` parameter.");
            input.output_directory = Some(output_directory.into());
        }
        if let Some(mztab_paths) = matches.get_many::<String>("mztab_paths") {
            log::trace!("overriding `mztab_paths` parameter.");
            input.mztab_paths = Some(mztab_paths.into_iter().map(|p| p.into()).collect());
        }
        if let Some(tol_mass) = matches.get_one::<f64>("tol-mass").copied() {
            log::trace!("overriding `tol_mass` parameter.");
            input.tol_mass = Some(tol_mass);
        }
        if let Some(tol_mode) = matches.get_one::<String>("tol-mode") {
            log::trace!("overriding `tol_mode` parameter.");
            input.tol_mode = Some(tol_mode.into());
        }
        if let Some(score_column) = matches.get_one::<String>("score-column") {
            log::trace!("overriding `score_column` parameter.");
            input.score_column = Some(score_column.into());
        }
        if matches.get_flag("skip-unreadable") {
            input.skip_unreadable = Some(true);
        }
        if matches.get_flag("report") {
            input.write_report = Some(true);
        }

        Ok(input)
    }

    pub fn load<S: AsRef<str>>(path: S) -> anyhow::Result<Self> {
        openmod_core::read_json(path).map_err(anyhow::Error::from)
    }

    fn check_window(&self, window: &Window) {
        if let Window::Unbounded = window {
            match (&self.tol_mass, &self.tol_mode) {
                (None, _) => log::warn!(
                    "`tol_mass` is not set: all PSMs will be reported as a single mass group"
                ),
                (Some(_), Some(mode)) => log::warn!(
                    "unrecognized `tol_mode` \"{}\" (expected \"absolute\"/\"Da\" or \
                     \"relative-ppm\"/\"ppm\"): all PSMs will be reported as a single mass group",
                    mode
                ),
                (Some(_), None) => log::warn!(
                    "`tol_mode` is not set: all PSMs will be reported as a single mass group"
                ),
            }
        }
    }

    pub fn build(self) -> anyhow::Result<Search> {
        let mztab_paths = self.mztab_paths.clone().unwrap_or_default();
        ensure!(
            !mztab_paths.is_empty(),
            "`mztab_paths` must be set. For more information try '--help'"
        );

        let window = Window::new(self.tol_mass, self.tol_mode.as_deref());
        self.check_window(&window);

        let output_directory = match self.output_directory {
            Some(path) => {
                let path = PathBuf::from(path);
                std::fs::create_dir_all(&path).with_context(|| {
                    format!("Failed to create output directory `{}`", path.display())
                })?;
                path
            }
            None => std::env::current_dir()?,
        };

        Ok(Search {
            version: clap::crate_version!().into(),
            mztab_paths,
            tol_mass: self.tol_mass,
            tol_mode: self.tol_mode,
            window,
            score_column: self.score_column.unwrap_or_else(|| DEFAULT_SCORE.into()),
            skip_unreadable: self.skip_unreadable.unwrap_or(false),
            write_report: self.write_report.unwrap_or(false),
            output_paths: Vec::new(),
            output_directory,
        })
    }
}
