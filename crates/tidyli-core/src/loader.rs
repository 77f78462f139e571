//! Builds the profile list from the three export files

use crate::csv::parse_line;
use crate::error::{LoadError, RowError};
use crate::messages::MessageIndex;
use crate::types::Profile;
use std::collections::HashMap;
use std::path::Path;

/// Minimum columns for a profile row
pub const PROFILE_MIN_FIELDS: usize = 6;

pub const PROFILES_FILE: &str = "profiles.csv";
pub const PICTURES_FILE: &str = "pictures.csv";
pub const MESSAGES_FILE: &str = "messages.csv";

/// Raw text of the three export files. Only `profiles` is required to be non-empty.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub profiles: String,
    pub pictures: String,
    pub messages: String,
}

/// What was kept and dropped while loading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub profiles: usize,
    pub pictures: usize,
    pub message_threads: usize,
    pub skipped_profile_rows: usize,
    pub skipped_picture_rows: usize,
    pub skipped_message_rows: usize,
}

/// Loaded profile list plus its report
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub profiles: Vec<Profile>,
    pub report: LoadReport,
}

impl Profile {
    /// Map a positional row `firstName,lastName,url,email,company,position[,connectedOn]`
    pub fn from_fields(fields: &[&str]) -> Result<Self, RowError> {
        if fields.len() < PROFILE_MIN_FIELDS {
            return Err(RowError::TooFewFields {
                expected: PROFILE_MIN_FIELDS,
                found: fields.len(),
            });
        }

        let field = |i: usize| fields.get(i).map(|f| f.trim()).unwrap_or("").to_string();

        Ok(Self {
            first_name: field(0),
            last_name: field(1),
            url: field(2),
            email: field(3),
            company: field(4),
            position: field(5),
            connected_on: field(6),
            profile_picture: None,
            messages: Vec::new(),
        })
    }
}

/// Merge already-fetched sources into the canonical profile list.
///
/// Malformed rows in any source are skipped one at a time; they never abort the load.
pub fn load_sources(sources: &Sources) -> Loaded {
    let (pictures, skipped_picture_rows) = parse_pictures(&sources.pictures);
    let messages = MessageIndex::from_csv(&sources.messages);

    let mut report = LoadReport {
        pictures: pictures.len(),
        message_threads: messages.len(),
        skipped_picture_rows,
        skipped_message_rows: messages.skipped_rows,
        ..Default::default()
    };

    let mut profiles = Vec::new();
    for line in sources.profiles.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        let mut profile = match Profile::from_fields(&fields) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::debug!("Skipping profile row: {}", e);
                report.skipped_profile_rows += 1;
                continue;
            }
        };

        profile.profile_picture = pictures.get(&profile.url).cloned();
        profile.messages = messages.get(&profile.url).to_vec();
        profiles.push(profile);
    }

    report.profiles = profiles.len();
    Loaded { profiles, report }
}

/// Read the export files from `dir` and load them.
///
/// `profiles.csv` must exist; the picture and message files are optional.
pub fn load_from_dir(dir: &Path) -> Result<Loaded, LoadError> {
    let sources = Sources {
        profiles: read_required(&dir.join(PROFILES_FILE))?,
        pictures: read_optional(&dir.join(PICTURES_FILE))?,
        messages: read_optional(&dir.join(MESSAGES_FILE))?,
    };

    let loaded = load_sources(&sources);
    let r = &loaded.report;
    tracing::info!(
        "Loaded {} profiles from {} ({} pictures, {} message threads)",
        r.profiles,
        dir.display(),
        r.pictures,
        r.message_threads
    );
    if r.skipped_profile_rows + r.skipped_picture_rows + r.skipped_message_rows > 0 {
        tracing::info!(
            "Skipped malformed rows: {} profile, {} picture, {} message",
            r.skipped_profile_rows,
            r.skipped_picture_rows,
            r.skipped_message_rows
        );
    }
    Ok(loaded)
}

/// profileUrl -> pictureUrl, header skipped
fn parse_pictures(text: &str) -> (HashMap<String, String>, usize) {
    let mut pictures = HashMap::new();
    let mut skipped = 0;

    for line in text.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let fields = parse_line(line);
        let (url, picture) = match fields.as_slice() {
            [url, picture, ..] if !url.trim().is_empty() && !picture.trim().is_empty() => {
                (url.trim(), picture.trim())
            }
            _ => {
                skipped += 1;
                continue;
            }
        };
        pictures.insert(url.to_string(), picture.to_string());
    }

    (pictures, skipped)
}

fn read_required(path: &Path) -> Result<String, LoadError> {
    read_lossy(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional(path: &Path) -> Result<String, LoadError> {
    match read_lossy(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("{} not found, continuing without it", path.display());
            Ok(String::new())
        }
        Err(source) => Err(LoadError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Invalid UTF-8 is replaced rather than rejected; bad bytes only spoil their own row
fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                "{} is not valid UTF-8; undecodable bytes replaced",
                path.display()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use tempfile::TempDir;

    const PROFILES_HEADER: &str = "First Name,Last Name,URL,Email Address,Company,Position,Connected On";

    #[test]
    fn test_short_rows_dropped() {
        let sources = Sources {
            profiles: format!(
                "{}\nAnn,Lee,https://l.in/ann,,Acme\nBob,Roe,https://l.in/bob,bob@x.io,Initech,CTO,01 Jan 2020\n",
                PROFILES_HEADER
            ),
            ..Default::default()
        };

        let loaded = load_sources(&sources);
        assert_eq!(loaded.profiles.len(), 1);
        assert_eq!(loaded.profiles[0].url, "https://l.in/bob");
        assert_eq!(loaded.report.skipped_profile_rows, 1);
    }

    #[test]
    fn test_fields_trimmed_and_mapped() {
        let sources = Sources {
            profiles: format!(
                "{}\n Bob , Roe ,https://l.in/bob , bob@x.io,Initech , CTO , 01 Jan 2020 \r\n",
                PROFILES_HEADER
            ),
            ..Default::default()
        };

        let profile = &load_sources(&sources).profiles[0];
        assert_eq!(profile.first_name, "Bob");
        assert_eq!(profile.last_name, "Roe");
        assert_eq!(profile.url, "https://l.in/bob");
        assert_eq!(profile.email, "bob@x.io");
        assert_eq!(profile.company, "Initech");
        assert_eq!(profile.position, "CTO");
        assert_eq!(profile.connected_on, "01 Jan 2020");
        assert_eq!(profile.profile_picture, None);
        assert!(profile.messages.is_empty());
    }

    #[test]
    fn test_six_field_row_has_empty_connected_on() {
        let profile = Profile::from_fields(&["A", "B", "u", "", "C", "P"]).unwrap();
        assert_eq!(profile.connected_on, "");
    }

    #[test]
    fn test_from_fields_rejects_short_row() {
        let err = Profile::from_fields(&["A", "B", "u"]).unwrap_err();
        assert_eq!(
            err,
            RowError::TooFewFields {
                expected: 6,
                found: 3
            }
        );
    }

    #[test]
    fn test_pictures_and_messages_attached() {
        let sources = Sources {
            profiles: format!(
                "{}\nAnn,Lee,https://l.in/ann,,Acme,PM,02 Feb 2021\nBob,Roe,https://l.in/bob,,Initech,CTO,01 Jan 2020",
                PROFILES_HEADER
            ),
            pictures: "profile_url,profile_picture_url\nhttps://l.in/ann,https://img/ann.jpg\nbroken-row\n".to_string(),
            messages: "h1,h2,h3,h4,h5,h6,h7,h8,h9\nc1,t,Ann,https://l.in/ann,Me,https://l.in/me,2024-01-01 10:00:00 UTC,,hello\n".to_string(),
        };

        let loaded = load_sources(&sources);
        let ann = &loaded.profiles[0];
        assert_eq!(ann.profile_picture.as_deref(), Some("https://img/ann.jpg"));
        assert_eq!(ann.messages.len(), 1);
        assert_eq!(ann.messages[0].direction, Direction::Outgoing);

        let bob = &loaded.profiles[1];
        assert_eq!(bob.profile_picture, None);
        assert!(bob.messages.is_empty());

        assert_eq!(loaded.report.skipped_picture_rows, 1);
        assert_eq!(loaded.report.pictures, 1);
    }

    #[test]
    fn test_malformed_messages_do_not_abort_profiles() {
        let sources = Sources {
            profiles: format!("{}\nAnn,Lee,https://l.in/ann,,Acme,PM,x", PROFILES_HEADER),
            pictures: String::new(),
            messages: "header\nnot,enough,fields\n\"unterminated,row\n".to_string(),
        };

        let loaded = load_sources(&sources);
        assert_eq!(loaded.profiles.len(), 1);
        assert_eq!(loaded.report.skipped_message_rows, 2);
    }

    #[test]
    fn test_invalid_utf8_does_not_abort_load() {
        let temp = TempDir::new().unwrap();
        let mut profiles =
            format!("{}\nAnn,Lee,https://l.in/ann,,Acme,PM,x\n", PROFILES_HEADER).into_bytes();
        profiles.extend_from_slice(b"Ren\xe9,Roy,https://l.in/rene,,Acme,PM,x\n");
        std::fs::write(temp.path().join(PROFILES_FILE), profiles).unwrap();

        let mut messages = b"h1,h2,h3,h4,h5,h6,h7,h8,h9\n".to_vec();
        messages.extend_from_slice(
            b"c1,t,Ann,https://l.in/ann,Me,me,2024-01-01 10:00:00 UTC,,caf\xe9\n",
        );
        std::fs::write(temp.path().join(MESSAGES_FILE), messages).unwrap();
        std::fs::write(temp.path().join(PICTURES_FILE), b"h,h\nhttps://l.in/ann,\xff\n").unwrap();

        let loaded = load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.profiles.len(), 2);
        assert_eq!(loaded.profiles[1].first_name, "Ren\u{FFFD}");

        let ann = &loaded.profiles[0];
        assert_eq!(ann.messages.len(), 1);
        assert_eq!(ann.messages[0].content, "caf\u{FFFD}");
        assert_eq!(ann.profile_picture.as_deref(), Some("\u{FFFD}"));
    }

    #[test]
    fn test_load_from_dir_optional_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(PROFILES_FILE),
            format!("{}\nAnn,Lee,https://l.in/ann,,Acme,PM,x\n", PROFILES_HEADER),
        )
        .unwrap();

        let loaded = load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.profiles.len(), 1);
    }

    #[test]
    fn test_load_from_dir_missing_profiles_is_error() {
        let temp = TempDir::new().unwrap();
        let err = load_from_dir(temp.path()).unwrap_err();
        assert!(err.to_string().contains("profiles.csv"));
    }
}
