use crate::calculator::BusinessLen;
use crate::model::{parse_instant, Interval};
use crate::offdays::OffDaySet;
use crate::report::{fmt_instant, WorkDuration};
use anyhow::{bail, Context};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Ligne de résultat d'un calcul par lot.
///
/// En JSON : `{"start": ..., "end": ..., "hours": ..., "days": ..., "minutes": ..., "seconds": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalReport {
    #[serde(flatten)]
    pub interval: Interval,
    #[serde(flatten)]
    pub duration: WorkDuration,
}

/// Lit un instant, avec un message d'erreur explicite.
pub fn parse_instant_arg(raw: &str) -> anyhow::Result<NaiveDateTime> {
    parse_instant(raw).with_context(|| format!("invalid date/datetime: {raw}"))
}

/// Import de jours off depuis CSV: header `date` (`YYYY-MM-DD`, heure ignorée)
pub fn import_offdays_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<OffDaySet> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut raw = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let date = rec.get(0).context("missing date")?.trim();
        if date.is_empty() {
            continue;
        }
        raw.push(date.to_string());
    }
    Ok(OffDaySet::parse_dates(raw)?)
}

/// Import d'intervalles: header `start,end`
pub fn import_intervals_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Interval>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let start = rec.get(0).context("missing start")?;
        let end = rec.get(1).context("missing end")?;
        let start = parse_instant_arg(start)?;
        let end = parse_instant_arg(end)?;
        let interval = Interval::new(start, end)
            .with_context(|| format!("interval on data line {}", line + 1))?;
        out.push(interval);
    }
    if out.is_empty() {
        bail!("no interval found");
    }
    Ok(out)
}

/// Calcule chaque intervalle avec la même configuration.
pub fn measure_all(calc: &BusinessLen, intervals: &[Interval]) -> Vec<IntervalReport> {
    intervals
        .iter()
        .map(|&interval| IntervalReport {
            interval,
            duration: calc.measure_interval(interval),
        })
        .collect()
}

/// Export CSV des résultats: header `start,end,hours,days,minutes,seconds`
pub fn export_reports_csv<P: AsRef<Path>>(path: P, reports: &[IntervalReport]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["start", "end", "hours", "days", "minutes", "seconds"])?;
    for r in reports {
        let d = &r.duration;
        w.write_record([
            fmt_instant(r.interval.start()),
            fmt_instant(r.interval.end()),
            format!("{:.4}", d.hours()),
            format!("{:.4}", d.days()),
            d.minutes().to_string(),
            d.seconds().to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON des résultats (jolie mise en forme)
pub fn export_reports_json<P: AsRef<Path>>(path: P, reports: &[IntervalReport]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(reports)?;
    fs::write(path, s)?;
    Ok(())
}
