use tidyli_core::Decision;

use super::{now_millis, Context};

pub fn run(ctx: &Context, url: &str, decision: Decision) -> anyhow::Result<()> {
    let url = url.trim();
    if url.is_empty() {
        anyhow::bail!("profile URL must not be empty");
    }

    let profiles = ctx.load_profiles();
    if profiles.is_empty() {
        tracing::warn!("No profiles loaded; recording {} without checking it", url);
    } else if !profiles.iter().any(|p| p.url == url) {
        anyhow::bail!("no loaded profile has URL {}", url);
    }

    let mut store = ctx.open_store()?;
    let previous = store.get(url);
    store.set(url, decision, now_millis())?;

    if let Some(mirror) = ctx.mirror() {
        mirror.record(url, decision);
    }

    println!("{url}: {previous} -> {decision}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tidyli_review::{DecisionStore, JsonFileStorage};

    fn context(temp: &TempDir) -> Context {
        let data = temp.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(
            data.join("profiles.csv"),
            "First Name,Last Name,URL,Email Address,Company,Position,Connected On\n\
             Ann,Lee,https://l.in/ann,,Acme,Engineer,01 Jan 2020\n",
        )
        .unwrap();
        Context::resolve(Some(temp.path().join("state").as_path()), Some(data.as_path())).unwrap()
    }

    #[test]
    fn test_decide_persists() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        run(&ctx, "https://l.in/ann", Decision::Remove).unwrap();

        let store =
            DecisionStore::open(Box::new(JsonFileStorage::new(ctx.paths.decisions_file())))
                .unwrap();
        assert_eq!(store.get("https://l.in/ann"), Decision::Remove);
    }

    #[test]
    fn test_decide_pending_deletes_record() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        run(&ctx, "https://l.in/ann", Decision::Keep).unwrap();
        run(&ctx, "https://l.in/ann", Decision::Pending).unwrap();

        let store = ctx.open_store().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_decide_unknown_url_is_error() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        assert!(run(&ctx, "https://l.in/nobody", Decision::Keep).is_err());
        assert!(run(&ctx, "  ", Decision::Keep).is_err());
    }
}
