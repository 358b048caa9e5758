//! Daily records and charts.

use crate::{
    cli::{
        CliContext, LogAction, Terminal,
        commands::{resolve_id, say_notice, short_id},
    },
    core::metrics::{ChartSeries, DailyLog, MetricField, SeriesProjection},
    errors::{Error, Result},
};
use chrono::Local;
use std::{
    fmt::Write as _,
    io::{BufRead, Write},
};

/// Plot rows between the minimum and the maximum.
const CHART_ROWS: usize = 8;

/// Adds, lists or deletes daily records.
///
/// A missing weight falls back to the starting weight from the profile.
pub async fn log<R: BufRead, W: Write>(
    ctx: &mut CliContext,
    term: &mut Terminal<R, W>,
    action: LogAction,
) -> Result<()> {
    match action {
        LogAction::Add {
            weight,
            energy,
            sleep,
            notes,
        } => {
            let weight = weight
                .or_else(|| ctx.app.settings().starting_weight.clone())
                .ok_or_else(|| Error::InvalidMetric {
                    field: "weight".to_string(),
                    value: String::new(),
                })?;
            let entry = DailyLog::record(&weight, energy, &sleep, notes, Local::now())?;
            let notice = ctx.app.add_log(entry).await?;
            say_notice(term, &notice)
        }
        LogAction::List => {
            let text = render_history(ctx.app.logs().entries())?;
            term.say(&text)
        }
        LogAction::Delete { id } => {
            let ids = ctx.app.logs().entries().iter().map(|entry| entry.id.as_str());
            let Some(id) = resolve_id(ids, &id).map(str::to_string) else {
                term.say(&format!("Nenhum registro com id '{id}'."))?;
                return Ok(());
            };

            if !term.confirm("Deseja apagar este registro?")? {
                return Ok(());
            }
            if ctx.app.delete_log(&id).await? {
                term.say("🗑️ Registro apagado.")?;
            }
            Ok(())
        }
    }
}

/// Draws one metric across the whole history.
pub fn chart<R: BufRead, W: Write>(
    ctx: &CliContext,
    term: &mut Terminal<R, W>,
    field: MetricField,
) -> Result<()> {
    match ctx.app.logs().project_series(field) {
        SeriesProjection::InsufficientData => term.say(&format!(
            "📈 {}: registre pelo menos 2 dias para ver o gráfico.",
            field.label()
        )),
        SeriesProjection::Chart(series) => term.say(&render_chart(&series)?),
    }
}

fn render_history(entries: &[DailyLog]) -> Result<String> {
    if entries.is_empty() {
        return Ok("Nenhum registro ainda.".to_string());
    }

    let mut response = String::new();
    writeln!(&mut response, "📋 Histórico")?;
    for entry in entries {
        writeln!(
            &mut response,
            "[{}] {} · ⚡ {}/10 · ⚖️ {}kg · 😴 {}h",
            short_id(&entry.id),
            entry.display_date,
            entry.energy,
            entry.weight,
            entry.sleep
        )?;
        if let Some(notes) = &entry.notes {
            writeln!(&mut response, "           📝 {notes}")?;
        }
    }
    Ok(response.trim_end().to_string())
}

fn render_chart(series: &ChartSeries) -> Result<String> {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let rows: Vec<usize> = series
        .points
        .iter()
        .map(|point| (point.normalized * (CHART_ROWS - 1) as f64).round() as usize)
        .collect();

    let mut response = String::new();
    writeln!(&mut response, "📈 {}", series.field.label())?;

    for row in (0..CHART_ROWS).rev() {
        let axis = if row == CHART_ROWS - 1 {
            format!("{:>7.1} ┤", series.max)
        } else if row == 0 {
            format!("{:>7.1} ┤", series.min)
        } else {
            format!("{:>7} │", "")
        };
        let line: String = rows
            .iter()
            .map(|r| if *r == row { "● " } else { "  " })
            .collect();
        writeln!(&mut response, "{axis}{}", line.trim_end())?;
    }

    writeln!(&mut response, "{:>7} └{}", "", "─".repeat(rows.len() * 2))?;
    write!(
        &mut response,
        "{:>9}{} → {}",
        "", series.first_label, series.last_label
    )?;
    Ok(response)
}
