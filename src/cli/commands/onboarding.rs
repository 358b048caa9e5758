//! Interactive onboarding - four questions, then the profile analysis.

use crate::{
    cli::{CliContext, Terminal, commands::say_notice},
    core::onboarding::{ActivityLevel, AnalysisEvent, DietType, OnboardingFlow, OnboardingStep},
    errors::{Error, Result},
};
use std::io::{BufRead, Write};
use tracing::info;

/// Walks the user through the wizard and stores the resulting profile.
///
/// A step whose required answers are blank is asked again.
pub async fn onboard<R: BufRead, W: Write>(
    ctx: &mut CliContext,
    term: &mut Terminal<R, W>,
) -> Result<()> {
    let mut flow = OnboardingFlow::new();
    term.say("🔥 Bem-vindo à sua Jornada Keto de 21 dias!")?;

    while let Some(index) = flow.step().index() {
        let step = flow.step();
        term.say(&format!(
            "\nPasso {} de {}: {}",
            index + 1,
            OnboardingStep::INPUT_STEPS,
            step.title()
        ))?;

        ask_step(&mut flow, term)?;

        if flow.advance() == step {
            term.say("⚠️ Preencha os campos para continuar.")?;
        }
    }

    term.say(&format!("\n🧬 {}", OnboardingStep::Analyzing.title()))?;
    let Some(mut handle) = flow.start_analysis(ctx.analysis_tick) else {
        return Err(Error::OnboardingCancelled);
    };

    let profile = loop {
        match handle.next_event().await {
            Some(AnalysisEvent::Progress(stage)) => {
                term.say(&format!("[{:>3}%] {}", stage.percent, stage.message))?;
            }
            Some(AnalysisEvent::Complete(profile)) => break profile,
            None => return Err(Error::OnboardingCancelled),
        }
    };
    flow.finish();

    let name = profile.name.clone();
    let notice = ctx.app.complete_onboarding(profile).await?;
    say_notice(term, &notice)?;
    term.say(&format!(
        "Olá, {name}! Seu protocolo de 21 dias está pronto. Comece pelo Dia 1."
    ))?;
    info!("Onboarding finished from the terminal");
    Ok(())
}

fn ask_step<R: BufRead, W: Write>(
    flow: &mut OnboardingFlow,
    term: &mut Terminal<R, W>,
) -> Result<()> {
    let step = flow.step();
    let current = flow.form().clone();

    match step {
        OnboardingStep::Name => {
            let name = term.ask_required("Como podemos te chamar? ")?;
            if let Some(form) = flow.form_mut() {
                form.name = name;
            }
        }
        OnboardingStep::BodyMetrics => {
            let weight = term.ask_required("Peso atual (kg): ")?;
            let height = term.ask_required("Altura (cm): ")?;
            if let Some(form) = flow.form_mut() {
                form.weight = weight;
                form.height = height;
            }
        }
        OnboardingStep::Activity => {
            let level = choose(
                term,
                &ActivityLevel::ALL,
                current.activity_level,
                |level| format!("{} - {}", level.label(), level.description()),
            )?;
            if let Some(form) = flow.form_mut() {
                form.activity_level = level;
            }
        }
        OnboardingStep::Diet => {
            let diet = choose(term, &DietType::CHOICES, current.diet_type, |diet| {
                format!("{} - {}", diet.label(), diet.description())
            })?;
            if let Some(form) = flow.form_mut() {
                form.diet_type = diet;
            }
        }
        OnboardingStep::Analyzing | OnboardingStep::Complete => {}
    }
    Ok(())
}

/// Numbered menu; Enter keeps `current`.
fn choose<R, W, T>(
    term: &mut Terminal<R, W>,
    options: &[T],
    current: T,
    describe: impl Fn(T) -> String,
) -> Result<T>
where
    R: BufRead,
    W: Write,
    T: Copy + PartialEq,
{
    for (i, option) in options.iter().enumerate() {
        let marker = if *option == current { " (atual)" } else { "" };
        term.say(&format!("  {}) {}{marker}", i + 1, describe(*option)))?;
    }

    loop {
        let answer = term.ask_required(&format!("Escolha 1-{} (Enter mantém): ", options.len()))?;
        if answer.is_empty() {
            return Ok(current);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(options[n - 1]),
            _ => term.say("Opção inválida.")?,
        }
    }
}
