//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use detpack_core::EntryOrigin;
use detpack_core::FileEntry;
use detpack_core::PackReport;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::with_capacity(s.len() + s.len() / 3);

        for (i, c) in s.chars().enumerate() {
            if i > 0 && (s.len() - i) % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result
    }

    fn header(&self, text: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_pack_result(&self, report: &PackReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.header(&format!(
            "Archive created: {}",
            report.output_path.display()
        ));
        let _ = self.term.write_line("");
        let _ = self
            .term
            .write_line(&format!("  Format:           {}", report.format));
        let _ = self.term.write_line(&format!(
            "  Files discovered: {}",
            Self::format_number(report.files_discovered)
        ));
        let _ = self.term.write_line(&format!(
            "  Files included:   {}",
            Self::format_number(report.files_included)
        ));
        let _ = self.term.write_line(&format!(
            "  Source size:      {}",
            humanize_bytes(report.bytes_read)
        ));
        let _ = self.term.write_line(&format!(
            "  Archive size:     {}",
            humanize_bytes(report.bytes_written)
        ));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Ratio:            {:.2}",
                report.compression_ratio()
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
            let _ = self.term.write_line("");
            for name in &report.entries {
                let _ = self.term.write_line(&format!("  {name}"));
            }
        }

        Ok(())
    }

    fn format_plan(&self, output_path: &Path, entries: &[FileEntry]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in entries {
            let line = if self.verbose {
                let marker = match entry.origin {
                    EntryOrigin::Discovered => " ",
                    EntryOrigin::Included => "+",
                };
                format!(
                    "{marker} {}  <-  {}",
                    entry.archive_name,
                    entry.input_path.display()
                )
            } else {
                entry.archive_name.clone()
            };
            let _ = self.term.write_line(&line);
        }

        if self.verbose {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Total: {} entries for {}",
                Self::format_number(entries.len()),
                output_path.display()
            ));
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
