//! # Easel CLI
//!
//! Headless host for the Easel editing core. Replays a scripted list of
//! edits against a canvas document and prints the resulting document.
//!
//! ## Usage
//!
//! ```bash
//! easel replay --script edits.json --out result.json
//! easel presets --category social-media
//! easel new --preset "Instagram Story"
//! ```
//!
//! A script is a JSON array of steps:
//!
//! ```json
//! [
//!   {"type": "add_text", "data": "Hello"},
//!   {"type": "apply", "data": {"type": "set_background_blur", "data": {"radius": 4.0}}},
//!   {"type": "undo"}
//! ]
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use easel_core::presets::presets_in;
use easel_core::{
    find_preset, Canvas, CanvasDocument, EditCommand, EditSession, EditorConfig, HistoryOutcome,
    Outcome, PresetCategory,
};
use serde::{Deserialize, Serialize};

/// Command-line arguments for easel.
#[derive(Debug, Clone, Parser)]
#[command(name = "easel")]
#[command(about = "Replay edits against an Easel canvas document")]
#[command(version)]
pub struct CliArgs {
    /// Editor config JSON file
    #[arg(long, env = "EASEL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Run a script of edits and print the resulting document
    Replay {
        /// Script JSON file
        #[arg(long)]
        script: PathBuf,
        /// Starting canvas document; a blank canvas when omitted
        #[arg(long)]
        canvas: Option<PathBuf>,
        /// Where to write the result; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List canvas size presets
    Presets {
        /// Only list one category
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
    /// Print an empty canvas document
    New {
        /// Preset name, e.g. "A4"
        #[arg(long, conflicts_with_all = ["width", "height"])]
        preset: Option<String>,
        /// Width in pixels
        #[arg(long)]
        width: Option<u32>,
        /// Height in pixels
        #[arg(long)]
        height: Option<u32>,
    },
}

/// Preset category as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Print paper sizes.
    Standard,
    /// Plain aspect ratios.
    Basic,
    /// Social network sizes.
    SocialMedia,
}

impl From<CategoryArg> for PresetCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Standard => Self::Standard,
            CategoryArg::Basic => Self::Basic,
            CategoryArg::SocialMedia => Self::SocialMedia,
        }
    }
}

/// One step of a replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Apply a command.
    Apply(EditCommand),
    /// Undo the last change.
    Undo,
    /// Redo the last undone change.
    Redo,
    /// Add a text element with configured defaults.
    AddText(String),
    /// Add an image element with configured defaults.
    AddImage(String),
}

/// Tally of step outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Steps that changed the canvas.
    pub applied: usize,
    /// Steps that were valid but changed nothing.
    pub unchanged: usize,
    /// Steps that were refused.
    pub rejected: usize,
}

/// Run every step against `session`, logging each outcome.
pub fn replay(session: &mut EditSession, steps: &[ScriptStep]) -> ReplayReport {
    let mut report = ReplayReport::default();
    for (index, step) in steps.iter().enumerate() {
        let outcome = match step {
            ScriptStep::Apply(command) => session.apply(command),
            ScriptStep::AddText(content) => session.add_text(content.as_str()),
            ScriptStep::AddImage(source) => session.add_image(source.as_str()),
            ScriptStep::Undo => history_outcome(session.undo()),
            ScriptStep::Redo => history_outcome(session.redo()),
        };
        match outcome {
            Outcome::Applied(changes) => {
                tracing::info!(step = index, changes = changes.len(), "Step applied");
                report.applied += 1;
            }
            Outcome::Unchanged => {
                tracing::info!(step = index, "Step changed nothing");
                report.unchanged += 1;
            }
            Outcome::Rejected(rejection) => {
                tracing::warn!(step = index, error = %rejection.error, "Step rejected");
                report.rejected += 1;
            }
        }
    }
    report
}

fn history_outcome(outcome: HistoryOutcome) -> Outcome {
    match outcome {
        HistoryOutcome::Restored(changes) => Outcome::Applied(changes),
        HistoryOutcome::NothingToUndo | HistoryOutcome::NothingToRedo => Outcome::Unchanged,
        HistoryOutcome::Rejected(rejection) => Outcome::Rejected(rejection),
    }
}

/// Load the editor config, or the defaults when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid config.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    EditorConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}

/// Load a replay script.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> anyhow::Result<Vec<ScriptStep>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid script {}", path.display()))
}

/// Load and validate a canvas document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe a valid
/// canvas.
pub fn load_canvas(path: &Path) -> anyhow::Result<Canvas> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read canvas {}", path.display()))?;
    CanvasDocument::from_json(&json)
        .and_then(CanvasDocument::into_canvas)
        .with_context(|| format!("Invalid canvas {}", path.display()))
}

/// Build an empty canvas document from a preset or explicit size.
///
/// Missing dimensions fall back to the config.
///
/// # Errors
///
/// Returns an error for an unknown preset or a zero dimension.
pub fn new_document(
    config: &EditorConfig,
    preset: Option<&str>,
    width: Option<u32>,
    height: Option<u32>,
) -> anyhow::Result<CanvasDocument> {
    let (width, height) = match preset {
        Some(name) => {
            let Some(preset) = find_preset(name) else {
                bail!("Unknown preset: {name}");
            };
            (preset.width, preset.height)
        }
        None => (
            width.unwrap_or(config.canvas_width),
            height.unwrap_or(config.canvas_height),
        ),
    };
    let canvas = Canvas::new(width, height, config.background_color)?;
    Ok(CanvasDocument::from_canvas(&canvas))
}

/// Execute `args`, writing results to `out`.
///
/// # Errors
///
/// Returns an error if any input cannot be loaded or the output cannot be
/// written.
pub fn run(args: CliArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    match args.command {
        CliCommand::Replay {
            script,
            canvas,
            out: out_path,
        } => {
            let steps = load_script(&script)?;
            let mut session = match canvas {
                Some(path) => EditSession::with_canvas(load_canvas(&path)?, config)?,
                None => EditSession::new(config)?,
            };
            let report = replay(&mut session, &steps);
            tracing::info!(
                applied = report.applied,
                unchanged = report.unchanged,
                rejected = report.rejected,
                "Replay finished"
            );
            let json = session.document().to_json()?;
            match out_path {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => writeln!(out, "{json}")?,
            }
        }
        CliCommand::Presets { category } => {
            let categories = category.map_or_else(
                || PresetCategory::ALL.to_vec(),
                |arg| vec![PresetCategory::from(arg)],
            );
            for category in categories {
                writeln!(out, "{category}")?;
                for preset in presets_in(category) {
                    writeln!(out, "  {:<20} {}", preset.name, preset.dimensions())?;
                }
            }
        }
        CliCommand::New {
            preset,
            width,
            height,
        } => {
            let document = new_document(&config, preset.as_deref(), width, height)?;
            writeln!(out, "{}", document.to_json()?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::{Color, Fill};

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).expect("valid args")
    }

    #[test]
    fn test_parse_replay() {
        let args = parse(&["easel", "replay", "--script", "s.json", "--out", "o.json"]);
        match args.command {
            CliCommand::Replay { script, canvas, out } => {
                assert_eq!(script, PathBuf::from("s.json"));
                assert!(canvas.is_none());
                assert_eq!(out, Some(PathBuf::from("o.json")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_preset_conflicts_with_size() {
        let args = ["easel", "new", "--preset", "A4", "--width", "5"];
        assert!(CliArgs::try_parse_from(args).is_err());
    }

    #[test]
    fn test_script_step_format() {
        let steps: Vec<ScriptStep> = serde_json::from_str(
            r#"[
                {"type": "add_text", "data": "Hello"},
                {"type": "apply", "data": {"type": "set_background_blur", "data": {"radius": 4.0}}},
                {"type": "undo"}
            ]"#,
        )
        .expect("valid script");
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2], ScriptStep::Undo);
    }

    #[test]
    fn test_replay_report() {
        let mut session = EditSession::new(EditorConfig::default()).expect("session");
        let steps = vec![
            ScriptStep::AddText("Hello".to_string()),
            ScriptStep::Apply(EditCommand::set_background_color(Color::RED)),
            ScriptStep::Apply(EditCommand::SetBackgroundBlur { radius: 400.0 }),
            ScriptStep::Undo,
            ScriptStep::Redo,
            ScriptStep::Redo,
        ];
        let report = replay(&mut session, &steps);
        assert_eq!(
            report,
            ReplayReport {
                applied: 4,
                unchanged: 1,
                rejected: 1,
            }
        );
        assert_eq!(session.canvas().background().fill, Fill::Color(Color::RED));
        assert_eq!(session.canvas().len(), 1);
    }

    #[test]
    fn test_replay_files_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = dir.path().join("script.json");
        let start = dir.path().join("start.json");
        let result = dir.path().join("result.json");

        let document = new_document(&EditorConfig::default(), Some("Facebook Cover"), None, None)
            .expect("preset");
        fs::write(&start, document.to_json().expect("json")).expect("write start");
        fs::write(
            &script,
            r#"[{"type": "add_image", "data": "file://cover.png"}]"#,
        )
        .expect("write script");

        let args = parse(&[
            "easel",
            "replay",
            "--script",
            script.to_str().expect("utf8 path"),
            "--canvas",
            start.to_str().expect("utf8 path"),
            "--out",
            result.to_str().expect("utf8 path"),
        ]);
        let mut stdout = Vec::new();
        run(args, &mut stdout).expect("replay");
        assert!(stdout.is_empty());

        let json = fs::read_to_string(&result).expect("read result");
        let canvas = CanvasDocument::from_json(&json)
            .expect("parse")
            .into_canvas()
            .expect("valid");
        assert_eq!((canvas.width(), canvas.height()), (820, 312));
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn test_bad_config_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"canvas_width": 0}}"#).expect("write");
        let error = load_config(Some(file.path())).expect_err("invalid config");
        assert!(error.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_presets_output() {
        let args = parse(&["easel", "presets", "--category", "social-media"]);
        let mut out = Vec::new();
        run(args, &mut out).expect("presets");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("Social Media\n"));
        assert!(text.contains("Instagram Story"));
        assert!(text.contains("1080 x 1920 px"));
        assert!(!text.contains("A4"));
    }

    #[test]
    fn test_new_unknown_preset() {
        assert!(new_document(&EditorConfig::default(), Some("Poster"), None, None).is_err());
        let doc = new_document(&EditorConfig::default(), None, Some(640), None).expect("doc");
        assert_eq!((doc.width, doc.height), (640, 1080));
        assert!(doc.layers.is_empty());
    }
}
