//! The educational guide.

use crate::{
    cli::{CliContext, Terminal, commands::progress::icon_glyph},
    core::plan::GuideSection,
    errors::Result,
};
use std::{
    fmt::Write as _,
    io::{BufRead, Write},
};

/// Lists the guide sections, or shows the one named by `section`.
///
/// An unknown section id is not an error: the table of contents is shown
/// instead so the user can pick a valid one.
pub fn guide<R: BufRead, W: Write>(
    ctx: &CliContext,
    term: &mut Terminal<R, W>,
    section: Option<&str>,
) -> Result<()> {
    let sections = &ctx.app.catalog().guide;
    if sections.is_empty() {
        return term.say("O guia não está disponível neste catálogo.");
    }

    let Some(id) = section else {
        return term.say(&render_index(sections)?);
    };

    match ctx.app.catalog().guide_section(id) {
        Some(found) => term.say(&render_section(found)?),
        None => {
            term.say(&format!("Nenhuma seção do guia chamada '{id}'."))?;
            term.say(&render_index(sections)?)
        }
    }
}

fn render_index(sections: &[GuideSection]) -> Result<String> {
    let mut response = String::new();

    writeln!(&mut response, "📖 Guia Keto")?;
    for section in sections {
        writeln!(
            &mut response,
            "{} {:<12} {}",
            icon_glyph(section.icon),
            section.id,
            section.title
        )?;
    }
    write!(&mut response, "\nLeia uma seção com: keto-journey guide <id>")?;

    Ok(response)
}

fn render_section(section: &GuideSection) -> Result<String> {
    let mut response = String::new();

    writeln!(&mut response, "{} {}\n", icon_glyph(section.icon), section.title)?;
    write!(&mut response, "{}", section.body.trim_end())?;

    Ok(response)
}
