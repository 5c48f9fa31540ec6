use super::input::Search;
use anyhow::Context;
use log::info;
use openmod_core::groups::mass_groups;
use openmod_core::read_matches;
use std::path::PathBuf;
use std::time::Instant;

pub struct Runner {
    pub parameters: Search,
    start: Instant,
}

impl Runner {
    pub fn new(parameters: Search) -> Self {
        Self {
            parameters,
            start: Instant::now(),
        }
    }

    // Create a path for `file_name` in the specified output directory
    pub(crate) fn make_path<S: AsRef<str>>(&self, file_name: S) -> PathBuf {
        self.parameters.output_directory.join(file_name.as_ref())
    }

    /// Load, group and write results. Returns the effective parameters,
    /// including the paths of all written outputs
    pub fn run(mut self) -> anyhow::Result<Search> {
        let psms = read_matches(
            &self.parameters.mztab_paths,
            &self.parameters.load_options(),
        )
        .context("Failed to read PSMs")?;

        let io_time = Instant::now() - self.start;
        info!(
            "read {} PSMs from {} files in {:#?}",
            psms.len(),
            self.parameters.mztab_paths.len(),
            io_time
        );

        let groups = mass_groups(&psms, self.parameters.window)
            .context("Failed to compute mass groups")?;

        info!(
            "- grouping: {:8} ms",
            (Instant::now() - self.start - io_time).as_millis()
        );
        info!(
            "discovered {} mass groups from {} PSMs",
            groups.len(),
            psms.len()
        );

        self.parameters
            .output_paths
            .push(self.write_groups(&groups)?);

        // Write an html report if requested
        if self.parameters.write_report {
            self.parameters
                .output_paths
                .push(self.write_report(&psms, &groups)?);
        }

        let path = self.make_path("results.json");
        self.parameters.output_paths.push(path.display().to_string());
        println!("{}", serde_json::to_string_pretty(&self.parameters)?);

        let bytes = serde_json::to_vec_pretty(&self.parameters)?;
        std::fs::write(&path, bytes)?;

        info!("finished in {}s", self.start.elapsed().as_secs());
        Ok(self.parameters)
    }
}
