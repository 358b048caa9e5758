//! Onboarding wizard and the simulated profile analysis.
//!
//! The wizard is a linear state machine: four input steps, then `Analyzing`,
//! then `Complete`. Forward movement is gated per step; an unsatisfied step
//! simply does not advance. There is no way back and no abort.
//!
//! The analysis is cosmetic pacing. It runs as a spawned task that emits one
//! stage per tick, waits one more tick, and then hands back the collected
//! profile. The task is owned by an [`AnalysisHandle`]; cancelling or
//! dropping the handle stops the timer before anything else is emitted.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::errors::{Error, Result};

/// Name used when onboarding somehow finishes with a blank name.
pub const DEFAULT_NAME: &str = "Visitante";

/// Exercise routine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// 1-3 days a week
    Light,
    /// 3-5 days a week
    Moderate,
    /// 6-7 days a week
    Heavy,
}

impl ActivityLevel {
    /// Every level, in the order offered to the user.
    pub const ALL: [Self; 4] = [Self::Sedentary, Self::Light, Self::Moderate, Self::Heavy];

    /// Stored identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentário",
            Self::Light => "Leve",
            Self::Moderate => "Moderado",
            Self::Heavy => "Intenso",
        }
    }

    /// One-line hint shown under the label.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Sedentary => "Pouco ou nenhum exercício",
            Self::Light => "1-3 dias por semana",
            Self::Moderate => "3-5 dias por semana",
            Self::Heavy => "6-7 dias por semana",
        }
    }
}

/// Eating habit options. `Mixed` is the pre-selected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    /// Bread, pasta and sweets most days
    Carbs,
    /// Rice, beans, protein and salad
    Balanced,
    /// Already cutting sugar, inconsistently
    LowCarb,
    /// Fast food and frozen meals
    Processed,
    /// A bit of everything; never offered, only the default
    #[default]
    Mixed,
}

impl DietType {
    /// The choices offered to the user.
    pub const CHOICES: [Self; 4] = [Self::Carbs, Self::Balanced, Self::LowCarb, Self::Processed];

    /// Stored identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Carbs => "carbs",
            Self::Balanced => "balanced",
            Self::LowCarb => "lowcarb",
            Self::Processed => "processed",
            Self::Mixed => "mixed",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Carbs => "Rica em Carboidratos",
            Self::Balanced => "Balanceada",
            Self::LowCarb => "Já tento Low Carb",
            Self::Processed => "Muitos Processados",
            Self::Mixed => "Mista",
        }
    }

    /// One-line hint shown under the label.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Carbs => "Pães, massas, doces frequentes",
            Self::Balanced => "Arroz, feijão, proteína e salada",
            Self::LowCarb => "Evito açúcar, mas sem consistência",
            Self::Processed => "Fast food, congelados, snacks",
            Self::Mixed => "Um pouco de tudo",
        }
    }
}

/// Wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    /// Step 0: name
    Name,
    /// Step 1: weight and height
    BodyMetrics,
    /// Step 2: activity level
    Activity,
    /// Step 3: eating habits
    Diet,
    /// The paced analysis is running
    Analyzing,
    /// Profile delivered
    Complete,
}

impl OnboardingStep {
    /// Number of input steps before the analysis.
    pub const INPUT_STEPS: usize = 4;

    /// Zero-based index of an input step.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Name => Some(0),
            Self::BodyMetrics => Some(1),
            Self::Activity => Some(2),
            Self::Diet => Some(3),
            Self::Analyzing | Self::Complete => None,
        }
    }

    /// Heading shown for the step.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Name => "Vamos começar sua transformação",
            Self::BodyMetrics => "Seus dados corporais",
            Self::Activity => "Nível de atividade",
            Self::Diet => "Hábitos alimentares",
            Self::Analyzing => "Analisando Perfil",
            Self::Complete => "Protocolo pronto!",
        }
    }
}

/// Raw answers as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingForm {
    /// Required to leave step 0
    pub name: String,
    /// Kilograms, kept as typed
    pub weight: String,
    /// Centimeters, kept as typed
    pub height: String,
    /// Step 2 answer
    pub activity_level: ActivityLevel,
    /// Step 3 answer
    pub diet_type: DietType,
}

/// What onboarding hands to the settings slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingProfile {
    /// Trimmed name, never empty
    pub name: String,
    /// Trimmed weight answer
    pub starting_weight: String,
    /// Trimmed height answer
    pub height: String,
    /// Exercise routine
    pub activity_level: ActivityLevel,
    /// Eating habits before the program
    pub previous_diet: DietType,
}

/// The wizard state machine.
#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    step: OnboardingStep,
    form: OnboardingForm,
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingFlow {
    /// A flow at the name step with empty answers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::Name,
            form: OnboardingForm::default(),
        }
    }

    /// Current position.
    #[must_use]
    pub const fn step(&self) -> OnboardingStep {
        self.step
    }

    /// Answers collected so far.
    #[must_use]
    pub const fn form(&self) -> &OnboardingForm {
        &self.form
    }

    /// Answers can only be edited while an input step is showing.
    pub fn form_mut(&mut self) -> Option<&mut OnboardingForm> {
        self.step.index().map(|_| &mut self.form)
    }

    /// Whether the current step's inputs allow moving forward.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.step {
            OnboardingStep::Name => !self.form.name.trim().is_empty(),
            OnboardingStep::BodyMetrics => {
                !self.form.weight.trim().is_empty() && !self.form.height.trim().is_empty()
            }
            OnboardingStep::Activity | OnboardingStep::Diet => true,
            OnboardingStep::Analyzing | OnboardingStep::Complete => false,
        }
    }

    /// Moves to the next step when allowed; otherwise leaves the state alone.
    pub fn advance(&mut self) -> OnboardingStep {
        if !self.can_advance() {
            return self.step;
        }

        self.step = match self.step {
            OnboardingStep::Name => OnboardingStep::BodyMetrics,
            OnboardingStep::BodyMetrics => OnboardingStep::Activity,
            OnboardingStep::Activity => OnboardingStep::Diet,
            OnboardingStep::Diet => OnboardingStep::Analyzing,
            other => other,
        };
        debug!("Onboarding advanced to {:?}", self.step);
        self.step
    }

    /// Profile built from the current answers.
    #[must_use]
    pub fn profile(&self) -> OnboardingProfile {
        let name = self.form.name.trim();
        OnboardingProfile {
            name: if name.is_empty() {
                DEFAULT_NAME.to_string()
            } else {
                name.to_string()
            },
            starting_weight: self.form.weight.trim().to_string(),
            height: self.form.height.trim().to_string(),
            activity_level: self.form.activity_level,
            previous_diet: self.form.diet_type,
        }
    }

    /// Starts the analysis sequence. Only possible in the `Analyzing` step.
    #[must_use]
    pub fn start_analysis(&self, tick: Duration) -> Option<AnalysisHandle> {
        (self.step == OnboardingStep::Analyzing)
            .then(|| AnalysisHandle::spawn(self.profile(), tick))
    }

    /// Marks the flow as finished once the analysis has delivered its profile.
    pub fn finish(&mut self) {
        if self.step == OnboardingStep::Analyzing {
            self.step = OnboardingStep::Complete;
        }
    }
}

/// One visible step of the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisStage {
    /// Progress reached at this stage, 0-100
    pub percent: u8,
    /// Status line shown to the user
    pub message: &'static str,
}

/// Played back in order, one per tick.
pub const ANALYSIS_STAGES: [AnalysisStage; 6] = [
    AnalysisStage {
        percent: 10,
        message: "Processando dados biométricos...",
    },
    AnalysisStage {
        percent: 30,
        message: "Calculando Taxa Metabólica Basal...",
    },
    AnalysisStage {
        percent: 50,
        message: "Ajustando macros para cetose...",
    },
    AnalysisStage {
        percent: 75,
        message: "Estruturando cronograma de 21 dias...",
    },
    AnalysisStage {
        percent: 90,
        message: "Otimizando plano de eletrólitos...",
    },
    AnalysisStage {
        percent: 100,
        message: "Protocolo pronto!",
    },
];

/// Emitted by the analysis task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    /// One stage reached
    Progress(AnalysisStage),
    /// Sequence finished; the profile is ready to store
    Complete(OnboardingProfile),
}

/// Owner of a running analysis sequence. Dropping it cancels the sequence.
#[derive(Debug)]
pub struct AnalysisHandle {
    events: mpsc::UnboundedReceiver<AnalysisEvent>,
    cancel: CancellationToken,
}

impl AnalysisHandle {
    /// Spawns the sequence on the current runtime.
    #[must_use]
    pub fn spawn(profile: OnboardingProfile, tick: Duration) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(run_analysis(profile, tick, tx, cancel.clone()));
        Self { events, cancel }
    }

    /// Next stage or the final profile.
    ///
    /// `None` once the sequence is over or cancelled.
    pub async fn next_event(&mut self) -> Option<AnalysisEvent> {
        self.events.recv().await
    }

    /// Stops the timer; nothing further is emitted.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Drives the sequence to the end, reporting each stage.
    ///
    /// # Errors
    /// Returns `Error::OnboardingCancelled` if the sequence stops before the
    /// profile is delivered.
    pub async fn wait(
        mut self,
        mut on_progress: impl FnMut(&AnalysisStage),
    ) -> Result<OnboardingProfile> {
        while let Some(event) = self.next_event().await {
            match event {
                AnalysisEvent::Progress(stage) => on_progress(&stage),
                AnalysisEvent::Complete(profile) => return Ok(profile),
            }
        }
        Err(Error::OnboardingCancelled)
    }
}

impl Drop for AnalysisHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_analysis(
    profile: OnboardingProfile,
    tick: Duration,
    tx: mpsc::UnboundedSender<AnalysisEvent>,
    cancel: CancellationToken,
) {
    info!("Profile analysis started");

    for stage in ANALYSIS_STAGES {
        if !pause(tick, &cancel).await {
            return;
        }
        if tx.send(AnalysisEvent::Progress(stage)).is_err() {
            return;
        }
    }

    // closing delay after the last stage
    if !pause(tick, &cancel).await {
        return;
    }

    if tx.send(AnalysisEvent::Complete(profile)).is_ok() {
        info!("Profile analysis finished");
    }
}

/// Sleeps for `tick`; `false` if cancelled first.
async fn pause(tick: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        () = cancel.cancelled() => {
            debug!("Profile analysis cancelled");
            false
        }
        () = tokio::time::sleep(tick) => true,
    }
}
