use maud::{html, PreEscaped};
use openmod_core::groups::GroupStats;
use openmod_core::mass::{Tolerance, Window};
use openmod_core::psm::Psm;
use report_builder::{Report, ReportSection};

use crate::runner::Runner;

fn describe_window(window: &Window) -> String {
    match window {
        Window::Within(Tolerance::Da(tol)) => format!("± {} Da", tol),
        Window::Within(Tolerance::Ppm(tol)) => format!("± {} ppm", tol),
        Window::Unbounded => "unbounded (single group)".into(),
    }
}

impl Runner {
    pub fn write_report(&self, psms: &[Psm], groups: &[GroupStats]) -> anyhow::Result<String> {
        let path = self.make_path("mass_groups.report.html");

        let mut report = Report::new(
            "openmod",
            &self.parameters.version,
            None,
            "Mass Difference Report",
        );

        /* Section 1: Overview */
        {
            let mut intro_section = ReportSection::new("Results Overview");
            intro_section.add_content(html! {
                "The following files were processed:"
                ul {
                    @for filename in &self.parameters.mztab_paths {
                        li { (filename) }
                    }
                }
                table {
                    tbody {
                        tr { th { "PSMs" } td { (psms.len()) } }
                        tr { th { "Mass groups" } td { (groups.len()) } }
                        tr { th { "Window" } td { (describe_window(&self.parameters.window)) } }
                        tr { th { "Score column" } td { (self.parameters.score_column) } }
                    }
                }
            });
            report.add_section(intro_section);
        }

        /* Section 2: Mass groups, in order of discovery */
        {
            let mut groups_section = ReportSection::new("Mass Groups");
            groups_section.add_content(html! {
                div class="table-container" {
                    table id="dataTable" class="display" {
                        thead {
                            tr {
                                th { "Group" }
                                th { "Median Mass Difference" }
                                th { "Mean Mass Difference" }
                                th { "PSMs" }
                                th { "Seed Mass Difference" }
                            }
                        }
                        tbody {
                            @for (i, group) in groups.iter().enumerate() {
                                tr {
                                    td { (i + 1) }
                                    td { (format!("{:.4}", group.mass_diff_median)) }
                                    td { (format!("{:.4}", group.mass_diff_mean)) }
                                    td { (group.num_matches) }
                                    td { (format!("{:.4}", group.seed_mass_diff)) }
                                }
                            }
                        }
                    }
                    button id="downloadCsv" { "Download as CSV" }
                }
            });
            report.add_section(groups_section);
        }

        /* Section 3: Configuration */
        {
            let mut config_section = ReportSection::new("Configuration");
            config_section.add_content(html! {
                style {
                    ".code-container {
                        background-color: #f5f5f5;
                        padding: 10px;
                        border-radius: 5px;
                        overflow-x: auto;
                        font-family: monospace;
                        white-space: pre-wrap;
                    }"
                }
                div class="code-container" {
                    pre {
                        code { (PreEscaped(serde_json::to_string_pretty(&self.parameters)?)) }
                    }
                }
            });
            report.add_section(config_section);
        }

        report.save_to_file(&path.display().to_string())?;

        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn windows() {
        assert_eq!(describe_window(&Window::Within(Tolerance::Da(0.02))), "± 0.02 Da");
        assert_eq!(describe_window(&Window::Within(Tolerance::Ppm(10.0))), "± 10 ppm");
        assert_eq!(describe_window(&Window::Unbounded), "unbounded (single group)");
    }
}
