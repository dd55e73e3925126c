//! Text rendering for the non-interactive list and picker rows

use crate::classify::{delta_of, Buckets, Section};
use crate::domain::{Module, SectionLabels, VulnInfo};
use crate::filter::{age_in_days, parse_time};
use crate::output::{DisplayFormat, RowOptions};
use chrono::{DateTime, Utc};
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Width of the longest module name, for column alignment
pub fn name_width<'a>(modules: impl IntoIterator<Item = &'a Module>) -> usize {
    modules
        .into_iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(0)
}

/// `name  current → candidate`, with the name padded to `width`
pub fn format_update(name: &str, current: &str, candidate: &str, width: usize, color: bool) -> String {
    let padded = format!("{:width$}", name, width = width);
    if color {
        format!(
            "{} {} {} {}",
            padded.bold(),
            current.dimmed(),
            "→".dimmed(),
            candidate.green()
        )
    } else {
        format!("{} {} → {}", padded, current, candidate)
    }
}

/// Compact counts such as `[L (1), H (2)]`; empty when there are none
pub fn format_vuln_info(info: &VulnInfo) -> String {
    if info.total == 0 {
        return String::new();
    }
    let rated = info.low + info.medium + info.high + info.critical;
    let parts: Vec<String> = [
        ("L", info.low),
        ("M", info.medium),
        ("H", info.high),
        ("C", info.critical),
        ("?", info.total.saturating_sub(rated)),
    ]
    .iter()
    .filter(|(_, n)| *n > 0)
    .map(|(tag, n)| format!("{} ({})", tag, n))
    .collect();
    format!("[{}]", parts.join(", "))
}

/// Transition from the current counts to the candidate's
pub fn format_vuln_counts(current: &VulnInfo, update: &VulnInfo, color: bool) -> String {
    let current_str = format_vuln_info(current);
    if current_str.is_empty() {
        return String::new();
    }
    let update_str = format_vuln_info(update);
    let paint = |text: String, good: bool| -> String {
        match (color, good) {
            (false, _) => text,
            (true, true) => text.green().to_string(),
            (true, false) => text.red().to_string(),
        }
    };

    if current.total > update.total {
        let fixed = current.total - update.total;
        if update_str.is_empty() {
            format!("{} → {}", current_str, paint(format!("✓ (fixes {})", fixed), true))
        } else {
            format!(
                "{} → {} {}",
                current_str,
                update_str,
                paint(format!("(fixes {})", fixed), true)
            )
        }
    } else if update.total > current.total {
        let added = update.total - current.total;
        format!("{} → {} {}", current_str, update_str, paint(format!("(+{})", added), false))
    } else if update.total > 0 {
        format!("{} → {}", current_str, update_str)
    } else {
        current_str
    }
}

/// Human-relative age of an RFC 3339 timestamp
///
/// Returns `None` when the timestamp is missing or unparsable.
pub fn relative_age(time: Option<&str>, now: DateTime<Utc>) -> Option<String> {
    let published = time.and_then(parse_time)?;
    let days = age_in_days(published, now).max(0);
    let (n, unit) = match days {
        0 => return Some("today".to_string()),
        1..=29 => (days, "day"),
        30..=364 => (days / 30, "month"),
        _ => (days / 365, "year"),
    };
    Some(if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    })
}

/// One list row: update, optional vulnerability counts, optional age
pub fn format_row(module: &Module, width: usize, opts: &RowOptions) -> String {
    let candidate = module.update_version().unwrap_or_default();
    let mut line = format!(
        " {}",
        format_update(&module.name, &module.version, candidate, width, opts.color)
    );

    if opts.show_vulns && module.vuln_current.total > 0 {
        line.push(' ');
        line.push_str(&format_vuln_counts(
            &module.vuln_current,
            &module.vuln_update,
            opts.color,
        ));
    }

    if opts.show_time {
        if let Some(age) = relative_age(module.update_time(), opts.now) {
            line.push_str("  ");
            if opts.color {
                line.push_str(&age.dimmed().to_string());
            } else {
                line.push_str(&age);
            }
        }
    }
    line
}

/// `name@candidate` per line; transitive modules only when `include_all`
pub fn render_lines(buckets: &Buckets, include_all: bool, w: &mut dyn Write) -> io::Result<()> {
    let sections: &[Section] = if include_all {
        &[Section::Direct, Section::Indirect, Section::Transitive]
    } else {
        &[Section::Direct, Section::Indirect]
    };
    for section in sections {
        for module in buckets.section(*section) {
            if let Some(version) = module.update_version() {
                writeln!(w, "{}@{}", module.name, version)?;
            }
        }
    }
    Ok(())
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn write_rows(
    modules: &[Module],
    width: usize,
    opts: &RowOptions,
    w: &mut dyn Write,
) -> io::Result<()> {
    for module in modules {
        writeln!(w, "{}", format_row(module, width, opts))?;
    }
    Ok(())
}

/// Rows of one section, split into version-delta groups in key order
fn write_grouped(
    modules: &[Module],
    width: usize,
    opts: &RowOptions,
    w: &mut dyn Write,
) -> io::Result<()> {
    let mut groups: BTreeMap<u8, Vec<Module>> = BTreeMap::new();
    for module in modules {
        groups
            .entry(delta_of(module).group_key())
            .or_default()
            .push(module.clone());
    }
    for group in groups.values() {
        let delta = delta_of(&group[0]);
        let label = if opts.color {
            delta.colored_label()
        } else {
            delta.label().to_string()
        };
        writeln!(w, "\n{}", label)?;
        write_rows(group, width, opts, w)?;
    }
    Ok(())
}

/// "Available updates:" followed by every non-empty visible section
pub fn render_text(
    buckets: &Buckets,
    labels: &SectionLabels,
    format: &DisplayFormat,
    include_all: bool,
    opts: &RowOptions,
    w: &mut dyn Write,
) -> io::Result<()> {
    writeln!(w, "\nAvailable updates:")?;

    let width = name_width(buckets.iter());
    let mut sections = vec![
        (labels.direct.as_str(), &buckets.direct),
        (labels.indirect.as_str(), &buckets.indirect),
    ];
    if include_all {
        sections.push((labels.transitive.as_str(), &buckets.transitive));
    }

    for (title, modules) in sections {
        if modules.is_empty() {
            continue;
        }
        writeln!(w, "\n{}", heading(title, opts.color))?;
        if format.group {
            write_grouped(modules, width, opts, w)?;
        } else {
            write_rows(modules, width, opts, w)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 17, 12, 0, 0).unwrap()
    }

    fn vulns(low: u32, medium: u32, high: u32) -> VulnInfo {
        VulnInfo {
            low,
            medium,
            high,
            critical: 0,
            total: low + medium + high,
        }
    }

    fn buckets() -> Buckets {
        Buckets::new(
            vec![Module::new("a", "v1.0.0", true, "direct").with_update_version("v1.1.0")],
            vec![Module::new("b", "v1.0.0", false, "indirect").with_update_version("v1.0.1")],
            vec![Module::new("c", "v0.1.0", false, "transitive").with_update_version("v2.0.0")],
        )
    }

    fn render(format: DisplayFormat, include_all: bool) -> String {
        let mut out = Vec::new();
        render_text(
            &buckets(),
            &SectionLabels::default(),
            &format,
            include_all,
            &RowOptions::new(now()),
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_update_padding() {
        assert_eq!(format_update("ab", "1.0", "2.0", 4, false), "ab   1.0 → 2.0");
    }

    #[test]
    fn test_format_vuln_info() {
        assert_eq!(format_vuln_info(&vulns(1, 2, 2)), "[L (1), M (2), H (2)]");
        assert_eq!(format_vuln_info(&VulnInfo::default()), "");

        let unrated = VulnInfo {
            total: 2,
            high: 1,
            ..VulnInfo::default()
        };
        assert_eq!(format_vuln_info(&unrated), "[H (1), ? (1)]");
    }

    #[test]
    fn test_format_vuln_counts_transitions() {
        assert_eq!(
            format_vuln_counts(&vulns(1, 0, 2), &VulnInfo::default(), false),
            "[L (1), H (2)] → ✓ (fixes 3)"
        );
        assert_eq!(
            format_vuln_counts(&vulns(1, 0, 2), &vulns(1, 0, 0), false),
            "[L (1), H (2)] → [L (1)] (fixes 2)"
        );
        assert_eq!(
            format_vuln_counts(&vulns(1, 0, 0), &vulns(1, 1, 0), false),
            "[L (1)] → [L (1), M (1)] (+1)"
        );
        assert_eq!(
            format_vuln_counts(&vulns(1, 0, 0), &vulns(0, 1, 0), false),
            "[L (1)] → [M (1)]"
        );
        assert_eq!(format_vuln_counts(&VulnInfo::default(), &vulns(1, 0, 0), false), "");
    }

    #[test]
    fn test_relative_age() {
        let at = |s: &str| relative_age(Some(s), now());
        assert_eq!(at("2026-01-17T08:00:00Z").as_deref(), Some("today"));
        assert_eq!(at("2026-01-16T12:00:00Z").as_deref(), Some("1 day ago"));
        assert_eq!(at("2026-01-10T12:00:00Z").as_deref(), Some("7 days ago"));
        assert_eq!(at("2025-12-01T12:00:00Z").as_deref(), Some("1 month ago"));
        assert_eq!(at("2025-07-17T12:00:00Z").as_deref(), Some("6 months ago"));
        assert_eq!(at("2023-01-01T00:00:00Z").as_deref(), Some("3 years ago"));
        assert_eq!(relative_age(Some("yesterday"), now()), None);
        assert_eq!(relative_age(None, now()), None);
    }

    #[test]
    fn test_format_row_with_vulns_and_time() {
        let mut module = Module::new("lodash", "4.17.20", true, "dependencies")
            .with_update(crate::domain::UpdateInfo::new("4.17.21").with_time("2026-01-10T12:00:00Z"));
        module.vuln_current = vulns(0, 0, 1);

        let opts = RowOptions::new(now()).with_vulns(true).with_time(true);
        assert_eq!(
            format_row(&module, 8, &opts),
            " lodash   4.17.20 → 4.17.21 [H (1)] → ✓ (fixes 1)  7 days ago"
        );
    }

    #[test]
    fn test_render_text_default() {
        let text = render(DisplayFormat::default(), false);
        assert_eq!(
            text,
            "\nAvailable updates:\n\nDirect dependencies\n a v1.0.0 → v1.1.0\n\nIndirect dependencies\n b v1.0.0 → v1.0.1\n"
        );
    }

    #[test]
    fn test_render_text_grouped_with_transitive() {
        let format = DisplayFormat {
            group: true,
            ..DisplayFormat::default()
        };
        let text = render(format, true);
        let direct = text.find("Direct dependencies").unwrap();
        let minor = text.find("Minor").unwrap();
        let indirect = text.find("Indirect dependencies").unwrap();
        let patch = text.find("Patch").unwrap();
        let transitive = text.find("Transitive").unwrap();
        let major = text.find("Major").unwrap();
        assert!(direct < minor && minor < indirect);
        assert!(indirect < patch && patch < transitive);
        assert!(transitive < major);
    }

    #[test]
    fn test_render_lines() {
        let mut out = Vec::new();
        render_lines(&buckets(), false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a@v1.1.0\nb@v1.0.1\n");

        let mut out = Vec::new();
        render_lines(&buckets(), true, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("c@v2.0.0\n"));
    }
}
