//! URL list export for a category

use crate::filter::filter_profiles;
use crate::store::DecisionStore;
use std::path::{Path, PathBuf};
use tidyli_core::{Category, Profile};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("No profiles in the \"{0}\" category")]
    EmptyCategory(Category),
    #[error("The \"{0}\" view has no export list; pick keep, remove or pending")]
    Unsupported(Category),
}

/// A ready-to-write export file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: &'static str,
    /// One URL per line, each newline-terminated
    pub contents: String,
}

impl Export {
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(self.file_name);
        tidyli_storage::atomic_write(&path, self.contents.as_bytes())?;
        Ok(path)
    }
}

pub fn export_file_name(category: Category) -> Option<&'static str> {
    match category {
        Category::Remove => Some("linkedin_profiles_to_remove.txt"),
        Category::Keep => Some("linkedin_profiles_to_keep.txt"),
        Category::Pending => Some("linkedin_profiles_pending.txt"),
        Category::All => None,
    }
}

/// Build the URL list for `category`; nothing is produced for an empty category
pub fn export(
    profiles: &[Profile],
    store: &DecisionStore,
    category: Category,
) -> Result<Export, ExportError> {
    let file_name = export_file_name(category).ok_or(ExportError::Unsupported(category))?;

    let selected = filter_profiles(profiles, store, category);
    if selected.is_empty() {
        return Err(ExportError::EmptyCategory(category));
    }

    let contents = selected
        .iter()
        .map(|p| format!("{}\n", p.url))
        .collect::<String>();

    Ok(Export {
        file_name,
        contents,
    })
}
