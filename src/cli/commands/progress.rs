//! Dashboard, plan overview and day completion.

use crate::{
    cli::{CliContext, Terminal, commands::say_notice},
    core::{
        plan::{DailyGuidance, PlanIcon},
        progression::{DashboardSummary, DayStatus, ToggleOutcome},
    },
    errors::{Error, Result},
};
use std::{
    fmt::Write as _,
    io::{BufRead, Write},
};

/// Width of the progress bar, in cells.
const BAR_WIDTH: usize = 21;

/// Greeting, overall progress and today's mission.
pub fn dashboard<R: BufRead, W: Write>(ctx: &CliContext, term: &mut Terminal<R, W>) -> Result<()> {
    let summary = ctx.app.dashboard();
    let text = render_dashboard(&ctx.app.settings().name, &summary)?;
    term.say(&text)
}

/// Every day of the plan with its status.
pub fn plan<R: BufRead, W: Write>(ctx: &CliContext, term: &mut Terminal<R, W>) -> Result<()> {
    let summary = ctx.app.dashboard();
    let mut response = String::new();

    writeln!(&mut response, "📅 Plano de 21 dias")?;
    let mut phase = None;
    for overview in &summary.days {
        let guidance = overview.guidance;
        if phase != Some(guidance.phase) {
            phase = Some(guidance.phase);
            writeln!(&mut response, "\n== {} ==", guidance.phase.label())?;
        }
        writeln!(
            &mut response,
            "{} Dia {:>2}: {}",
            status_icon(overview.status),
            guidance.day,
            guidance.title
        )?;
    }

    term.say(response.trim_end())
}

/// Shows one day and toggles its completion.
///
/// Locked days are shown but cannot be completed yet. Completed days can
/// always be undone.
pub async fn day<R: BufRead, W: Write>(
    ctx: &mut CliContext,
    term: &mut Terminal<R, W>,
    day: u32,
    show_only: bool,
) -> Result<()> {
    let guidance = ctx
        .app
        .catalog()
        .day(day)
        .ok_or(Error::DayNotInPlan { day })?;
    term.say(&render_day(guidance)?)?;

    if show_only {
        return Ok(());
    }

    if ctx.app.is_locked(day) {
        let focus = ctx.app.dashboard().focus_day;
        term.say(&format!(
            "🔒 O Dia {day} ainda está bloqueado. Conclua o Dia {focus} primeiro."
        ))?;
        return Ok(());
    }

    match ctx.app.toggle_day(day).await? {
        (ToggleOutcome::Completed(_), Some(notice)) => say_notice(term, &notice)?,
        (ToggleOutcome::Completed(day), None) => term.say(&format!("Dia {day} concluído."))?,
        (ToggleOutcome::Uncompleted(day), _) => {
            term.say(&format!("↩️ Dia {day} marcado como não concluído."))?;
        }
    }
    Ok(())
}

fn render_dashboard(name: &str, summary: &DashboardSummary<'_>) -> Result<String> {
    let mut response = String::new();

    writeln!(&mut response, "👋 Olá, {name}!")?;
    writeln!(
        &mut response,
        "Progresso: {} {}/21 dias ({:.0}%)",
        progress_bar(summary.progress_percent),
        summary.completed_count,
        summary.progress_percent
    )?;

    if let Some(focus) = summary.focus() {
        writeln!(&mut response)?;
        let heading = if summary.focus_done {
            "🏆 Jornada concluída! Último dia"
        } else {
            "🎯 Missão de hoje"
        };
        writeln!(&mut response, "{heading}: Dia {} - {}", focus.day, focus.title)?;
        writeln!(&mut response, "{}", focus.action)?;
        if !summary.focus_done {
            write!(
                &mut response,
                "\nQuando terminar: keto-journey day {}",
                focus.day
            )?;
        }
    }

    Ok(response.trim_end().to_string())
}

fn render_day(guidance: &DailyGuidance) -> Result<String> {
    let mut response = String::new();

    writeln!(
        &mut response,
        "{} Dia {} · {}",
        icon_glyph(guidance.icon),
        guidance.day,
        guidance.phase.label()
    )?;
    writeln!(&mut response, "{}\n", guidance.title)?;
    writeln!(&mut response, "✅ Ação: {}", guidance.action)?;
    writeln!(&mut response, "💡 Por quê: {}\n", guidance.why)?;
    writeln!(&mut response, "🍳 Café da manhã: {}", guidance.meal_plan.breakfast)?;
    writeln!(&mut response, "🥗 Almoço: {}", guidance.meal_plan.lunch)?;
    writeln!(&mut response, "🍖 Jantar: {}", guidance.meal_plan.dinner)?;
    write!(&mut response, "🏃 Exercício: {}", guidance.exercise)?;

    Ok(response)
}

/// Emoji for a catalog icon.
pub(crate) const fn icon_glyph(icon: PlanIcon) -> &'static str {
    match icon {
        PlanIcon::Flame => "🔥",
        PlanIcon::Utensils => "🍴",
        PlanIcon::Droplet => "💧",
        PlanIcon::ThermometerSun => "🌡️",
        PlanIcon::Zap => "⚡",
        PlanIcon::Activity => "💓",
        PlanIcon::Award => "🏅",
        PlanIcon::BrainCircuit => "🧠",
        PlanIcon::Beaker => "🧪",
        PlanIcon::Moon => "🌙",
        PlanIcon::Battery => "🔋",
        PlanIcon::Scale => "⚖️",
        PlanIcon::ShieldAlert => "🛡️",
        PlanIcon::TrendingUp => "📈",
        PlanIcon::ListChecks => "📋",
        PlanIcon::CalendarCheck => "📅",
    }
}

const fn status_icon(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Completed => "✅",
        DayStatus::Current => "▶️",
        DayStatus::Locked => "🔒",
    }
}

fn progress_bar(percent: f64) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
