//! Interactive card-by-card review driven by line commands

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tidyli_core::{Category, Decision, Direction, Profile};
use tidyli_review::{swipe_decision, DecisionStore, FilterView, Stats, Swipe, ViewState};

use super::{now_millis, Context};
use crate::remote::Mirror;

/// Messages shown on a card, newest first
const CARD_MESSAGES: usize = 5;
const PREVIEW_CHARS: usize = 80;

const HELP: &str = "\
Commands:
  l, left         swipe left on the current card
  r, right        swipe right on the current card
  k, keep         mark the current card keep
  x, remove       mark the current card remove
  u, pending      move the current card back to pending
  n, next         next card
  p, prev         previous card
  f <category>    show all, keep, remove or pending
  e, export       write the URL list for this category
  s, stats        show counts
  h, help         this help
  q, quit         leave the review";

pub fn run(ctx: &Context, category: Option<Category>) -> anyhow::Result<()> {
    let profiles = ctx.load_profiles();
    if profiles.is_empty() {
        println!("No profiles found");
        return Ok(());
    }

    let mut store = ctx.open_store()?;
    let mirror = ctx.mirror();
    let category = category.unwrap_or(ctx.config.default_category);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    ReviewSession::new(&profiles, &mut store, category)
        .with_mirror(mirror.as_ref())
        .with_export_dir(&ctx.config.export_dir)
        .run(stdin.lock(), &mut stdout)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Swipe(Swipe),
    Set(Decision),
    Next,
    Previous,
    Filter(Category),
    Export,
    Stats,
    Help,
    Quit,
}

/// `Ok(None)` for a blank line; `Err` carries a message for the user
fn parse_action(line: &str) -> Result<Option<Action>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let action = match command.to_ascii_lowercase().as_str() {
        "l" | "left" => Action::Swipe(Swipe::Left),
        "r" | "right" => Action::Swipe(Swipe::Right),
        "k" | "keep" => Action::Set(Decision::Keep),
        "x" | "remove" => Action::Set(Decision::Remove),
        "u" | "pending" => Action::Set(Decision::Pending),
        "n" | "next" => Action::Next,
        "p" | "prev" => Action::Previous,
        "f" | "filter" => match words.next() {
            Some(name) => Action::Filter(name.parse().map_err(|e| format!("{}", e))?),
            None => return Err("usage: f <all|keep|remove|pending>".to_string()),
        },
        "e" | "export" => Action::Export,
        "s" | "stats" => Action::Stats,
        "h" | "help" | "?" => Action::Help,
        "q" | "quit" => Action::Quit,
        other => return Err(format!("unknown command \"{}\" (h for help)", other)),
    };
    Ok(Some(action))
}

/// One review over a loaded profile list
pub struct ReviewSession<'a> {
    profiles: &'a [Profile],
    store: &'a mut DecisionStore,
    view: FilterView,
    mirror: Option<&'a Mirror>,
    export_dir: PathBuf,
}

impl<'a> ReviewSession<'a> {
    pub fn new(profiles: &'a [Profile], store: &'a mut DecisionStore, category: Category) -> Self {
        Self {
            profiles,
            store,
            view: FilterView::new(category),
            mirror: None,
            export_dir: PathBuf::from("."),
        }
    }

    pub fn with_mirror(mut self, mirror: Option<&'a Mirror>) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_export_dir(mut self, dir: &Path) -> Self {
        self.export_dir = dir.to_path_buf();
        self
    }

    /// Render the first card, then apply one command per input line until `q` or EOF
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        self.render(out)?;

        for line in input.lines() {
            let line = line?;
            match parse_action(&line) {
                Ok(None) => {}
                Ok(Some(Action::Quit)) => break,
                Ok(Some(action)) => self.apply(action, out)?,
                Err(message) => writeln!(out, "{}", message)?,
            }
        }
        Ok(())
    }

    fn apply<W: Write>(&mut self, action: Action, out: &mut W) -> anyhow::Result<()> {
        match action {
            Action::Swipe(swipe) => {
                let url = self.current_url();
                let applied = self.view.swipe(swipe, self.profiles, self.store, now_millis())?;
                match (url, applied) {
                    (Some(url), Some(decision)) => self.mirror(&url, decision),
                    (None, _) => writeln!(out, "Nothing to swipe")?,
                    (Some(_), None) => {
                        writeln!(out, "Swiping {} does nothing here", swipe_name(swipe))?
                    }
                }
            }
            Action::Set(decision) => match self.current_url() {
                Some(url) => {
                    self.store.set(&url, decision, now_millis())?;
                    let len = self.view.visible(self.profiles, self.store).len();
                    self.view.reconcile(len);
                    self.mirror(&url, decision);
                }
                None => writeln!(out, "Nothing to decide")?,
            },
            Action::Next => {
                let len = self.view.visible(self.profiles, self.store).len();
                self.view.next(len);
            }
            Action::Previous => self.view.previous(),
            Action::Filter(category) => self.view.set_category(category),
            Action::Export => {
                self.export(out)?;
                return Ok(());
            }
            Action::Stats => {
                let stats = Stats::compute(self.profiles, self.store);
                writeln!(
                    out,
                    "keep {} | remove {} | pending {} | total {}",
                    stats.keep,
                    stats.remove,
                    stats.pending,
                    stats.total()
                )?;
                return Ok(());
            }
            Action::Help => {
                writeln!(out, "{}", HELP)?;
                return Ok(());
            }
            Action::Quit => return Ok(()),
        }

        self.render(out)?;
        Ok(())
    }

    fn current_url(&mut self) -> Option<String> {
        self.view
            .current(self.profiles, self.store)
            .map(|p| p.url.clone())
    }

    fn mirror(&self, url: &str, decision: Decision) {
        if let Some(mirror) = self.mirror {
            mirror.record(url, decision);
        }
    }

    fn export<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let category = self.view.category();
        match tidyli_review::export(self.profiles, self.store, category) {
            Ok(file) => {
                let path = file.write_to(&self.export_dir)?;
                let count = file.contents.lines().count();
                tracing::info!("Exported {} profiles to {}", count, path.display());
                writeln!(out, "Exported {} profiles to {}", count, path.display())?;
            }
            Err(e) => writeln!(out, "{}", e)?,
        }
        Ok(())
    }

    fn render<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let category = self.view.category();
        let visible = self.view.visible(self.profiles, self.store);

        writeln!(out)?;
        match self.view.reconcile(visible.len()) {
            ViewState::Showing(i) => {
                let profile = visible[i];
                writeln!(out, "[{}] {}/{}", category.label(), i + 1, visible.len())?;
                write_card(out, profile, self.store.get(&profile.url))?;
            }
            ViewState::Empty => {
                writeln!(out, "[{}] No profiles in this category", category.label())?;
            }
        }

        let stats = Stats::compute(self.profiles, self.store);
        writeln!(
            out,
            "keep {} | remove {} | pending {}",
            stats.keep, stats.remove, stats.pending
        )?;
        writeln!(out, "{}", controls_hint(category))
    }
}

fn swipe_name(swipe: Swipe) -> &'static str {
    match swipe {
        Swipe::Left => "left",
        Swipe::Right => "right",
    }
}

fn controls_hint(category: Category) -> String {
    let label = |swipe| {
        swipe_decision(category, swipe)
            .map(|d| d.as_str())
            .unwrap_or("-")
    };
    format!(
        "l: {}  r: {}  n/p: move  h: help",
        label(Swipe::Left),
        label(Swipe::Right)
    )
}

fn write_card<W: Write>(out: &mut W, profile: &Profile, decision: Decision) -> std::io::Result<()> {
    writeln!(out, "{}  [{}]", profile.full_name(), decision)?;

    match (profile.position.is_empty(), profile.company.is_empty()) {
        (false, false) => writeln!(out, "{} at {}", profile.position, profile.company)?,
        (false, true) => writeln!(out, "{}", profile.position)?,
        (true, false) => writeln!(out, "{}", profile.company)?,
        (true, true) => {}
    }
    if !profile.email.is_empty() {
        writeln!(out, "Email: {}", profile.email)?;
    }
    if !profile.connected_on.is_empty() {
        writeln!(out, "Connected: {}", profile.connected_on)?;
    }
    if let Some(picture) = &profile.profile_picture {
        writeln!(out, "Picture: {}", picture)?;
    }
    writeln!(out, "{}", profile.url)?;

    if profile.messages.is_empty() {
        return writeln!(out, "No messages exchanged");
    }
    writeln!(out, "Messages ({} total):", profile.messages.len())?;
    for message in profile.messages.iter().take(CARD_MESSAGES) {
        let arrow = match message.direction {
            Direction::Outgoing => "↗",
            Direction::Incoming => "↙",
        };
        writeln!(
            out,
            "  {:<10} {} {}",
            message.short_date(),
            arrow,
            preview(&message.content)
        )?;
    }
    Ok(())
}

/// Single-line content, cut at `PREVIEW_CHARS`
fn preview(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
    format!("{}...", cut)
}
