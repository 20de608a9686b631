//! Product listing.

use std::ops::Range;

use anyhow::Result;
use serde_json::json;

use super::{settle, ProductsArgs};
use crate::context::Context;
use crate::render;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.dashboard()?;

    let spinner = ctx.output.spinner("Loading products...");
    let result = session.load_products().await;
    spinner.finish_and_clear();
    settle(ctx, &mut session, result)?;

    if let Some(ref term) = args.search {
        session.search(term);
    }
    if let Some(key) = args.sort {
        session.sort(key);
    }

    if ctx.output.is_json() {
        if args.all {
            let items: Vec<_> = session.products().items().collect();
            ctx.output.json(&items);
        } else {
            session.go_to_page(args.page.saturating_sub(1));
            ctx.output.json(&json!({
                "page": session.page_info(),
                "products": session.page(),
            }));
        }
        return Ok(());
    }

    let pages = pages_to_show(args.page, args.all, session.products().total_pages());

    let term = session.products().search_term().to_string();
    let sort = session.products().sort_key();
    for page in pages {
        session.go_to_page(page);
        render::products(&ctx.output, &session.page(), &session.page_info(), &term, sort);
    }

    Ok(())
}

/// Zero-based pages to render for a 1-based `--page`. Out-of-range pages
/// are clamped to the last one.
fn pages_to_show(page: usize, all: bool, total_pages: usize) -> Range<usize> {
    if all {
        return 0..total_pages;
    }
    let page = page.saturating_sub(1).min(total_pages.saturating_sub(1));
    page..page.saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_to_show() {
        assert_eq!(pages_to_show(1, false, 3), 0..1);
        assert_eq!(pages_to_show(0, false, 3), 0..1);
        assert_eq!(pages_to_show(3, true, 3), 0..3);
        assert_eq!(pages_to_show(usize::MAX, false, 3), 2..3);
    }
}
