use tidyli_core::{Category, Profile};
use tidyli_review::{filter_profiles, DecisionStore};

use super::Context;

pub fn run(ctx: &Context, category: Option<Category>) -> anyhow::Result<()> {
    let profiles = ctx.load_profiles();
    if profiles.is_empty() {
        println!("No profiles found");
        return Ok(());
    }

    let store = ctx.open_store()?;
    let category = category.unwrap_or(ctx.config.default_category);
    for line in format_list(&profiles, &store, category) {
        println!("{line}");
    }
    Ok(())
}

/// One line per visible profile, plus a trailing count
fn format_list(profiles: &[Profile], store: &DecisionStore, category: Category) -> Vec<String> {
    let visible = filter_profiles(profiles, store, category);

    let mut lines: Vec<String> = visible
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{:>4}. {:<8} {} | {} | {}",
                i + 1,
                store.get(&p.url).as_str(),
                p.full_name(),
                p.company,
                p.url
            )
        })
        .collect();
    lines.push(format!("{} of {} profiles in {}", visible.len(), profiles.len(), category.label()));
    lines
}
