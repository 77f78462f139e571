use tidyli_review::Stats;

use super::Context;

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let profiles = ctx.load_profiles();
    if profiles.is_empty() {
        println!("No profiles found");
        return Ok(());
    }

    let store = ctx.open_store()?;
    let stats = Stats::compute(&profiles, &store);

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
