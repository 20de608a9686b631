//! Interactive dashboard.
//!
//! Mirrors the tabs of the web dashboard: pick a tab, act on it, go back to
//! the tab list. Entering a data tab loads it once per session.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Select};
use dynaprice_core::catalog::PricingForm;
use dynaprice_core::dashboard::{NavigationEvent, Section};
use dynaprice_core::search::SortKey;

use super::predict::field;
use super::{flush, BrowseArgs};
use crate::context::{Context, Session};
use crate::render;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() || !console::user_attended() {
        bail!("browse needs an interactive terminal");
    }

    let mut session = ctx.dashboard()?;
    let spinner = ctx.output.spinner(&format!("Connecting to {}", session.api_url()));
    session.start().await;
    spinner.finish_and_clear();
    flush(ctx, &mut session);

    let mut section = args.section;
    loop {
        enter(ctx, &mut session, section).await;

        let next = match section {
            Section::Overview => overview_tab(ctx, &mut session).await?,
            Section::Products => products_tab(ctx, &mut session).await?,
            Section::Pricing => pricing_tab(ctx, &mut session).await?,
            Section::Training => training_tab(ctx, &mut session).await?,
            Section::Analytics => analytics_tab(ctx, &mut session).await?,
            Section::Settings => settings_tab(ctx, &mut session).await?,
        };

        section = match next {
            Some(section) => section,
            None => match pick_tab(session.current_section())? {
                Some(section) => section,
                None => break,
            },
        };
    }

    Ok(())
}

async fn enter(ctx: &Context, session: &mut Session, section: Section) {
    let spinner = ctx.output.spinner(&format!("Loading {}...", section));
    let loaded = session.navigate(NavigationEvent::new(section)).await;
    spinner.finish_and_clear();
    if loaded {
        flush(ctx, session);
    }
}

/// Tab picker. `None` means quit.
fn pick_tab(current: Section) -> Result<Option<Section>> {
    let mut items: Vec<&str> = Section::ALL.iter().map(|s| s.title()).collect();
    items.push("Quit");

    let default = Section::ALL.iter().position(|s| *s == current).unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Go to")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(Section::ALL.get(choice).copied())
}

fn menu(prompt: &str, actions: &[&str]) -> Result<usize> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(actions)
        .default(0)
        .interact()?)
}

// Each tab returns `Some(section)` to jump straight to another tab, or
// `None` to go back to the tab picker.

async fn overview_tab(ctx: &Context, session: &mut Session) -> Result<Option<Section>> {
    loop {
        render::overview(&ctx.output, session.status(), session.overview(), session.api_url());
        match menu("Dashboard", &["Refresh", "Back"])? {
            0 => {
                let spinner = ctx.output.spinner("Refreshing...");
                session.refresh().await;
                spinner.finish_and_clear();
                flush(ctx, session);
            }
            _ => return Ok(None),
        }
    }
}

async fn products_tab(ctx: &Context, session: &mut Session) -> Result<Option<Section>> {
    const ACTIONS: [&str; 9] = [
        "Next page",
        "Previous page",
        "Search",
        "Clear search",
        "Sort",
        "Get dynamic price",
        "Reload products",
        "Export CSV",
        "Back",
    ];

    loop {
        let term = session.products().search_term().to_string();
        render::products(
            &ctx.output,
            &session.page(),
            &session.page_info(),
            &term,
            session.products().sort_key(),
        );

        match menu("Products", &ACTIONS)? {
            0 => {
                if !session.next_page() {
                    ctx.output.info("Already on the last page");
                }
            }
            1 => {
                if !session.previous_page() {
                    ctx.output.info("Already on the first page");
                }
            }
            2 => {
                let term: String = Input::new()
                    .with_prompt("Search products")
                    .allow_empty(true)
                    .interact_text()?;
                session.search(&term);
            }
            3 => session.clear_search(),
            4 => {
                let labels: Vec<&str> = SortKey::ALL.iter().map(|k| k.display_name()).collect();
                let choice = menu("Sort by", &labels)?;
                session.sort(SortKey::ALL[choice]);
            }
            5 => price_from_page(ctx, session).await?,
            6 => {
                let spinner = ctx.output.spinner("Loading products...");
                let _ = session.load_products().await;
                spinner.finish_and_clear();
                flush(ctx, session);
            }
            7 => {
                let path = ctx.resolve_path(&ctx.config.export.filename);
                let _ = session.export_to(&path);
                flush(ctx, session);
            }
            _ => return Ok(None),
        }
    }
}

async fn price_from_page(ctx: &Context, session: &mut Session) -> Result<()> {
    let choices: Vec<(String, dynaprice_core::ProductId)> = session
        .page()
        .iter()
        .map(|p| (format!("#{} {}", p.product_id, p.name), p.product_id))
        .collect();
    if choices.is_empty() {
        ctx.output.warn("No products on this page. Load products first.");
        return Ok(());
    }

    let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();
    let choice = menu("Product", &labels)?;
    let id = choices[choice].1;

    let spinner = ctx.output.spinner(&format!("Pricing product {}...", id));
    let result = session.price_for(id).await.cloned();
    spinner.finish_and_clear();
    match result {
        Ok(priced) => render::pricing(&ctx.output, &priced),
        Err(_) => flush(ctx, session),
    }
    Ok(())
}

async fn pricing_tab(ctx: &Context, session: &mut Session) -> Result<Option<Section>> {
    loop {
        match menu("Price Calculator", &["Calculate price", "Back"])? {
            0 => {
                let form = PricingForm {
                    product_id: field(None, "Product ID", true)?,
                    base_price: field(None, "Base price (₹)", true)?,
                    stock: field(None, "Stock", true)?,
                    sales_7: field(None, "7-day sales", true)?,
                    sales_30: field(None, "30-day sales", true)?,
                    day: field(None, "Day of week (0=Mon .. 6=Sun)", true)?,
                };

                let spinner = ctx.output.spinner("Calculating price...");
                let result = session.calculate_price(&form).await.cloned();
                spinner.finish_and_clear();
                match result {
                    Ok(priced) => render::pricing(&ctx.output, &priced),
                    Err(_) => flush(ctx, session),
                }
            }
            _ => return Ok(None),
        }
    }
}

async fn training_tab(ctx: &Context, session: &mut Session) -> Result<Option<Section>> {
    if let Some(report) = session.last_training() {
        render::training(&ctx.output, report);
    }

    let confirmed = Confirm::new()
        .with_prompt("Retrain the pricing model now?")
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(None);
    }

    let spinner = ctx.output.spinner("Training model...");
    let result = session.train_model().await;
    spinner.finish_and_clear();
    flush(ctx, session);
    if let Ok(report) = result {
        render::training(&ctx.output, &report);
    }
    Ok(None)
}

async fn analytics_tab(ctx: &Context, session: &mut Session) -> Result<Option<Section>> {
    loop {
        if let Some(report) = session.analytics() {
            render::analytics(&ctx.output, report);
        }
        match menu("Analytics", &["Reload", "Back"])? {
            0 => {
                let spinner = ctx.output.spinner("Loading analytics...");
                session.load_analytics().await;
                spinner.finish_and_clear();
                flush(ctx, session);
            }
            _ => return Ok(None),
        }
    }
}

async fn settings_tab(ctx: &Context, session: &mut Session) -> Result<Option<Section>> {
    ctx.output.header("Settings");
    ctx.output.kv("API Base URL", session.api_url());
    ctx.output
        .kv("Saved to", &session.settings().path().display().to_string());

    match menu("Settings", &["Change API URL", "Back"])? {
        0 => {
            let url: String = Input::new()
                .with_prompt("API base URL")
                .with_initial_text(session.api_url())
                .interact_text()?;

            let spinner = ctx.output.spinner(&format!("Connecting to {}", url));
            let result = session.set_api_url(&url).await;
            spinner.finish_and_clear();
            flush(ctx, session);

            // A new URL resets the session to its first tab.
            Ok(result.ok().map(|_| Section::Overview))
        }
        _ => Ok(None),
    }
}
