//! Report sink selection and terminal tree display.

use gpr_deps_core::{
    JsonReporter, ReportConfig, ReportError, Reporter, TextReporter, TreeReporter, TreeView,
    TreeViewer,
};
use std::io::Write;

use crate::OutputFormat;

/// Build the reporter for the requested format.
pub fn reporter<'a, W: Write + 'a>(
    format: OutputFormat,
    config: &ReportConfig,
    out: W,
) -> Box<dyn Reporter + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextReporter::new(
            out,
            config.show_source,
            config.show_diff,
        )),
        OutputFormat::Tree => Box::new(TreeReporter::new(TerminalViewer::new(out, false))),
        OutputFormat::Xml => Box::new(TreeReporter::new(TerminalViewer::new(out, true))),
        OutputFormat::Json => Box::new(JsonReporter::new(out)),
    }
}

/// Shows finished trees on a terminal, either rendered or as raw markup.
pub struct TerminalViewer<W: Write> {
    out: W,
    markup: bool,
}

impl<W: Write> TerminalViewer<W> {
    /// Creates a viewer writing to `out`.
    pub fn new(out: W, markup: bool) -> Self {
        Self { out, markup }
    }
}

impl<W: Write> TreeViewer for TerminalViewer<W> {
    fn display(&mut self, view: TreeView) -> Result<(), ReportError> {
        if self.markup {
            self.out.write_all(view.markup.as_bytes())?;
        } else {
            self.out.write_all(view.render().as_bytes())?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpr_deps_core::{DependencyChecker, InMemoryModel, SourceSpec};

    const NONE: [&str; 0] = [];

    fn check(format: OutputFormat, config: &ReportConfig) -> String {
        let model = InMemoryModel::builder("app")
            .project(
                "app",
                ["old"],
                vec![SourceSpec::new("src/main.adb").with("lib/lib.ads")],
            )
            .project("lib", NONE, vec![SourceSpec::new("lib/lib.ads")])
            .project("old", NONE, vec![])
            .build()
            .unwrap();

        let mut buf: Vec<u8> = Vec::new();
        {
            let mut reporter = reporter(format, config, &mut buf);
            DependencyChecker::builder()
                .build()
                .run(&model, reporter.as_mut())
                .unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_format_honors_report_config() {
        let config = ReportConfig {
            show_source: true,
            show_diff: true,
        };
        assert_eq!(
            check(OutputFormat::Text, &config),
            concat!(
                "Project app depends on:\n",
                " + lib\n",
                "   => main.adb depends on lib.ads\n",
                " - old\n",
                "Project old depends on:\n",
            )
        );
    }

    #[test]
    fn tree_format_renders_view() {
        let out = check(OutputFormat::Tree, &ReportConfig::default());
        assert!(out.starts_with("Project dependencies\napp\n"));
        assert!(out.contains("  lib (should be added)\n"));
        assert!(out.contains("  old (should be removed)\n"));
    }

    #[test]
    fn xml_format_prints_markup() {
        let out = check(OutputFormat::Xml, &ReportConfig::default());
        assert!(out.starts_with("<?xml version='1.0' ?>\n<projects>\n<project name='app'>\n"));
        assert!(out.contains("<file src='src/main.adb'>lib/lib.ads</file>"));
    }

    #[test]
    fn json_format_is_parseable() {
        let out = check(OutputFormat::Json, &ReportConfig::default());
        assert!(out.trim_start().starts_with('['));
        assert!(out.contains("\"to_remove\""));
    }
}
