use crate::io::output::OutputWriter;
use crate::report::{AnalysisReport, DirectoryEntry};
use crate::stats::TrackedMetric;
use colored::*;
use std::io::Write;

const TOP_DIRECTORIES: usize = 10;
const RULE: &str = "───────────────────────────────────────────";

/// Human-readable summary of a report.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

type Section<W> = fn(&mut W, &AnalysisReport) -> std::io::Result<()>;

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let sections: [Section<W>; 5] = [
            |w, _| write_header(w),
            write_summary,
            write_top_directories,
            write_languages,
            write_cocomo,
        ];

        for section in sections {
            section(&mut self.writer, report)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn write_header<W: Write>(w: &mut W) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", "═══════════════════════════════════════════".blue())?;
    writeln!(w, "{}", "           DIRMAP ANALYSIS REPORT".bold().blue())?;
    writeln!(w, "{}", "═══════════════════════════════════════════".blue())?;
    writeln!(w)
}

fn format_gini(gini: f64) -> ColoredString {
    let text = format!("{gini:.2}");
    match gini {
        g if g >= 0.7 => text.red(),
        g if g >= 0.4 => text.yellow(),
        _ => text.green(),
    }
}

fn write_summary<W: Write>(w: &mut W, report: &AnalysisReport) -> std::io::Result<()> {
    let summary = &report.summary;
    let totals = &summary.totals;

    writeln!(w, "{} Summary", "REPOSITORY".bold())?;
    writeln!(w, "{RULE}")?;
    writeln!(w, "  Files analyzed:      {}", totals.file_count)?;
    writeln!(
        w,
        "  Files excluded:      {}",
        summary.classification.excluded_files
    )?;
    writeln!(
        w,
        "  Directories:         {} (max depth {})",
        summary.structure.directory_count, summary.structure.max_depth
    )?;
    writeln!(w, "  Lines of code:       {}", totals.lines_code)?;
    writeln!(w, "  Total complexity:    {}", totals.complexity_total)?;
    writeln!(w, "  Comment ratio:       {:.2}", totals.comment_ratio)?;

    if let Some(dist) = totals.distributions.get(&TrackedMetric::LinesCode) {
        writeln!(
            w,
            "  File size Gini:      {} (top 20% hold {:.0}%)",
            format_gini(dist.gini),
            dist.top_20_pct_share * 100.0
        )?;
    }

    if !summary.classification.by_reason.is_empty() {
        let reasons: Vec<String> = summary
            .classification
            .by_reason
            .iter()
            .map(|(reason, count)| format!("{reason}: {count}"))
            .collect();
        writeln!(w, "  Excluded by reason:  {}", reasons.join(", "))?;
    }
    writeln!(w)
}

fn top_directories(report: &AnalysisReport, count: usize) -> Vec<&DirectoryEntry> {
    let mut entries: Vec<&DirectoryEntry> = report
        .directories
        .iter()
        .filter(|entry| entry.parent_id.is_some())
        .collect();
    entries.sort_by(|a, b| {
        b.recursive
            .lines_code
            .cmp(&a.recursive.lines_code)
            .then_with(|| a.path.cmp(&b.path))
    });
    entries.truncate(count);
    entries
}

fn write_top_directories<W: Write>(w: &mut W, report: &AnalysisReport) -> std::io::Result<()> {
    let entries = top_directories(report, TOP_DIRECTORIES);
    if entries.is_empty() {
        return Ok(());
    }

    writeln!(w, "{} (Top {})", "LARGEST DIRECTORIES".bold(), entries.len())?;
    writeln!(w, "{RULE}")?;
    for (i, entry) in entries.iter().enumerate() {
        let gini = entry
            .recursive
            .distributions
            .get(&TrackedMetric::LinesCode)
            .map(|dist| format!(", gini {}", format_gini(dist.gini)))
            .unwrap_or_default();
        writeln!(
            w,
            "  {}. {} - {} LOC in {} files{}",
            i + 1,
            entry.path.cyan(),
            entry.recursive.lines_code,
            entry.recursive.file_count,
            gini
        )?;
    }
    writeln!(w)
}

fn write_languages<W: Write>(w: &mut W, report: &AnalysisReport) -> std::io::Result<()> {
    let languages = &report.summary.languages;
    if languages.language_count == 0 {
        return Ok(());
    }

    writeln!(w, "{}", "LANGUAGES".bold())?;
    writeln!(w, "{RULE}")?;
    let mut by_loc: Vec<(&String, &u64)> = languages.by_loc.iter().collect();
    by_loc.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (name, loc) in by_loc {
        let files = languages.by_files.get(name).copied().unwrap_or(0);
        writeln!(w, "  {name:<20} {loc:>10} LOC {files:>6} files")?;
    }
    if let Some(dominant) = &languages.dominant_language {
        writeln!(
            w,
            "  Dominant: {} ({:.0}%), polyglot score {:.2}",
            dominant,
            languages.dominant_language_pct * 100.0,
            languages.polyglot_score
        )?;
    }
    writeln!(w)
}

fn write_cocomo<W: Write>(w: &mut W, report: &AnalysisReport) -> std::io::Result<()> {
    let estimate = &report.cocomo;
    writeln!(w, "{} ({})", "COCOMO ESTIMATE".bold(), estimate.preset_name)?;
    writeln!(w, "{RULE}")?;
    writeln!(
        w,
        "  Effort:              {:.2} person-months",
        estimate.effort_person_months
    )?;
    writeln!(w, "  Duration:            {:.2} months", estimate.duration_months)?;
    writeln!(w, "  Average staff:       {:.2}", estimate.average_staff)?;
    writeln!(w, "  Estimated cost:      ${:.0}", estimate.estimated_cost)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DirmapConfig;
    use crate::core::FileRecord;
    use crate::pipeline::analyze;

    fn render(records: Vec<FileRecord>) -> String {
        let report = analyze(records, &DirmapConfig::default()).unwrap();
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_report(&report)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_terminal_output_sections() {
        let output = render(vec![
            FileRecord::new("src/lib.rs", "Rust").with_lines(200, 20, 10),
            FileRecord::new("src/util/mod.rs", "Rust").with_lines(50, 5, 5),
            FileRecord::new("vendor/dep.rs", "Rust").with_lines(999, 0, 0),
        ]);

        assert!(output.contains("DIRMAP ANALYSIS REPORT"));
        assert!(output.contains("Files analyzed:      2"));
        assert!(output.contains("vendor: 1"));
        assert!(output.contains("src/util"));
        assert!(output.contains("COCOMO ESTIMATE"));
    }

    #[test]
    fn test_empty_report_renders() {
        let output = render(Vec::new());
        assert!(output.contains("Files analyzed:      0"));
        assert!(!output.contains("LARGEST DIRECTORIES"));
    }
}
