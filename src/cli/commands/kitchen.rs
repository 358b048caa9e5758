//! Recipes, substitutions and the shopping list.

use crate::{
    cli::{
        CliContext, ShopAction, Terminal,
        commands::{resolve_id, say_notice, short_id},
    },
    core::{plan::RecipeCategory, shopping::ShoppingList},
    errors::Result,
};
use std::{
    fmt::Write as _,
    io::{BufRead, Write},
};

/// Lists recipes, optionally limited to one category.
pub fn recipes<R: BufRead, W: Write>(
    ctx: &CliContext,
    term: &mut Terminal<R, W>,
    category: Option<RecipeCategory>,
) -> Result<()> {
    let recipes = ctx.app.catalog().recipes_in(category);
    if recipes.is_empty() {
        return term.say("Nenhuma receita nesta categoria.");
    }

    let mut response = String::new();
    for recipe in recipes {
        writeln!(
            &mut response,
            "#{} {} · {} · ⏱️ {}",
            recipe.id,
            recipe.title,
            recipe.category.label(),
            recipe.prep_time
        )?;
        writeln!(&mut response, "   Ingredientes: {}", recipe.ingredients.join(", "))?;
        if !recipe.variations.is_empty() {
            writeln!(&mut response, "   Variações: {}", recipe.variations.join("; "))?;
        }
        if !recipe.tags.is_empty() {
            writeln!(&mut response, "   Tags: {}", recipe.tags.join(", "))?;
        }
        writeln!(&mut response)?;
    }
    write!(
        &mut response,
        "Adicione os ingredientes com: keto-journey shop add-recipe <id>"
    )?;

    term.say(&response)
}

/// The substitution table.
pub fn substitutions<R: BufRead, W: Write>(
    ctx: &CliContext,
    term: &mut Terminal<R, W>,
) -> Result<()> {
    let mut response = String::new();
    writeln!(&mut response, "🔄 Substituições inteligentes")?;
    for swap in &ctx.app.catalog().substitutions {
        writeln!(&mut response, "❌ {}  →  ✅ {}", swap.original, swap.substitute)?;
    }
    term.say(response.trim_end())
}

/// Shopping list actions. Items are addressed by id or unique id prefix.
pub async fn shop<R: BufRead, W: Write>(
    ctx: &mut CliContext,
    term: &mut Terminal<R, W>,
    action: ShopAction,
) -> Result<()> {
    match action {
        ShopAction::Add { items } => {
            let items: Vec<String> = items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect();
            if items.is_empty() {
                return term.say("Nada para adicionar.");
            }
            let notice = ctx.app.add_to_shopping_list(items).await?;
            say_notice(term, &notice)
        }
        ShopAction::AddRecipe { id } => {
            let notice = ctx.app.add_recipe_to_shopping_list(id).await?;
            say_notice(term, &notice)
        }
        ShopAction::List => {
            let text = render_list(ctx.app.shopping_list())?;
            term.say(&text)
        }
        ShopAction::Toggle { id } => {
            let Some(id) = resolve_item(ctx, &id) else {
                return term.say(&format!("Nenhum item com id '{id}'."));
            };
            match ctx.app.toggle_shopping_item(&id).await? {
                Some(true) => term.say("☑️ Item marcado."),
                Some(false) => term.say("⬜ Item desmarcado."),
                None => Ok(()),
            }
        }
        ShopAction::Remove { id } => {
            let Some(id) = resolve_item(ctx, &id) else {
                return term.say(&format!("Nenhum item com id '{id}'."));
            };
            if ctx.app.remove_shopping_item(&id).await? {
                term.say("🗑️ Item removido.")?;
            }
            Ok(())
        }
        ShopAction::Clear => {
            if !term.confirm("Limpar toda a lista de compras?")? {
                return Ok(());
            }
            ctx.app.clear_shopping_list().await?;
            term.say("🧹 Lista de compras limpa.")
        }
    }
}

fn resolve_item(ctx: &CliContext, query: &str) -> Option<String> {
    let ids = ctx
        .app
        .shopping_list()
        .items()
        .iter()
        .map(|item| item.id.as_str());
    resolve_id(ids, query).map(str::to_string)
}

fn render_list(list: &ShoppingList) -> Result<String> {
    if list.is_empty() {
        return Ok("🛒 Sua lista está vazia.".to_string());
    }

    let mut response = String::new();
    writeln!(
        &mut response,
        "🛒 Lista de compras ({}/{} marcados)",
        list.checked_count(),
        list.len()
    )?;
    for item in list.items() {
        let mark = if item.checked { "☑️" } else { "⬜" };
        writeln!(&mut response, "{mark} [{}] {}", short_id(&item.id), item.name)?;
    }
    Ok(response.trim_end().to_string())
}
