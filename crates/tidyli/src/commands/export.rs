use std::path::Path;

use tidyli_core::Category;
use tidyli_review::ExportError;

use super::Context;

pub fn run(ctx: &Context, category: Option<Category>, out: Option<&Path>) -> anyhow::Result<()> {
    let profiles = ctx.load_profiles();
    if profiles.is_empty() {
        println!("No profiles found");
        return Ok(());
    }

    let store = ctx.open_store()?;
    let category = category.unwrap_or(ctx.config.default_category);

    match tidyli_review::export(&profiles, &store, category) {
        Ok(file) => {
            let path = file.write_to(&ctx.export_dir(out))?;
            println!(
                "Exported {} profiles to {}",
                file.contents.lines().count(),
                path.display()
            );
            Ok(())
        }
        // Nothing to write is not a failure
        Err(e @ ExportError::EmptyCategory(_)) => {
            println!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> Context {
        let data = temp.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(
            data.join("profiles.csv"),
            "First Name,Last Name,URL,Email Address,Company,Position\n\
             Ann,Lee,https://l.in/ann,,Acme,Engineer\n\
             Bob,Ray,https://l.in/bob,,Initech,Manager\n",
        )
        .unwrap();
        Context::resolve(Some(temp.path()), Some(data.as_path())).unwrap()
    }

    #[test]
    fn test_export_pending_writes_all_urls() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let out = temp.path().join("out");

        run(&ctx, Some(Category::Pending), Some(out.as_path())).unwrap();

        let written = std::fs::read_to_string(out.join("linkedin_profiles_pending.txt")).unwrap();
        assert_eq!(written, "https://l.in/ann\nhttps://l.in/bob\n");
    }

    #[test]
    fn test_export_empty_category_is_not_error() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let out = temp.path().join("out");

        run(&ctx, Some(Category::Remove), Some(out.as_path())).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn test_export_all_is_error() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        assert!(run(&ctx, Some(Category::All), None).is_err());
    }
}
