//! General commands - theme, reset, legal texts and support.
//!
//! None of these require a completed profile.

use crate::{
    cli::{CliContext, LegalDocument, Terminal, ThemeAction},
    core::theme::ThemeMode,
    errors::Result,
};
use std::io::{BufRead, Write};

/// Where support requests are handed off.
pub const SUPPORT_MAILTO: &str = "mailto:suporte@ketocarnivora.com";

const TERMS: &str = "📜 Termos de Uso\n\n\
1. Isenção de Responsabilidade Médica: Este aplicativo e todo o seu conteúdo são fornecidos \
apenas para fins informativos e educacionais. Eles não substituem o aconselhamento, diagnóstico \
ou tratamento médico profissional. Nunca ignore o conselho médico profissional nem demore em \
procurá-lo por causa de algo que você leu neste aplicativo.\n\n\
2. Uso Pessoal: O acesso a este aplicativo é estritamente pessoal. O compartilhamento do link \
de acesso não é permitido.\n\n\
3. Resultados: Os resultados apresentados ou sugeridos podem variar de pessoa para pessoa, \
dependendo de fatores como idade, histórico de saúde, dedicação e genética. Não garantimos \
perda de peso específica.";

const RESET_WARNING: &str = "ATENÇÃO: Isso apagará todo o seu progresso, nome e configurações. \
Deseja recomeçar do zero?";

const PRIVACY: &str = "🔐 Política de Privacidade\n\n\
1. Coleta de Dados: Coletamos apenas os dados fornecidos voluntariamente por você (peso, \
altura, registros diários) para o funcionamento das ferramentas do aplicativo. Esses dados \
são armazenados localmente no seu dispositivo e não são enviados para servidores externos.\n\n\
2. Segurança: Comprometemo-nos a proteger sua privacidade. Não vendemos, trocamos ou \
transferimos suas informações pessoais.\n\n\
3. Armazenamento Local: Seu progresso e sua preferência de tema ficam em um banco SQLite \
neste computador.";

/// Shows the theme, or switches it.
pub async fn theme<R: BufRead, W: Write>(
    ctx: &mut CliContext,
    term: &mut Terminal<R, W>,
    action: Option<ThemeAction>,
) -> Result<()> {
    let mode = match action {
        Some(ThemeAction::Toggle) => ctx.app.toggle_theme().await?,
        None => ctx.app.theme(),
    };
    term.say(&format!("{} Tema: {mode}", theme_icon(mode)))
}

/// Erases everything after confirmation.
pub async fn reset<R: BufRead, W: Write>(
    ctx: &mut CliContext,
    term: &mut Terminal<R, W>,
) -> Result<()> {
    let confirmed = term.confirm(RESET_WARNING)?;
    if !confirmed {
        return Ok(());
    }

    ctx.app.reset().await?;
    term.say("♻️ Tudo apagado. Rode `keto-journey onboard` para começar de novo.")
}

/// Prints the terms of use or the privacy policy.
pub fn legal<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    document: LegalDocument,
) -> Result<()> {
    term.say(match document {
        LegalDocument::Terms => TERMS,
        LegalDocument::Privacy => PRIVACY,
    })
}

/// Points the user at the support address.
pub fn support<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> Result<()> {
    term.say(&format!(
        "💬 Precisa de ajuda? Escreva para a nossa equipe: {SUPPORT_MAILTO}"
    ))
}

const fn theme_icon(mode: ThemeMode) -> &'static str {
    if mode.is_dark() { "🌙" } else { "☀️" }
}
